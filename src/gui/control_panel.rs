//! Control Panel Widget
//! Left side panel with file loading, statistics, value entry and chart selection.

use crate::charts::ChartKind;
use egui::{Color32, ComboBox, RichText, ScrollArea};
use std::path::PathBuf;

/// Left side control panel.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub stats_text: String,
    pub value_input: String,
    pub chart_kind: ChartKind,
    pub status: String,
    pub status_is_error: bool,
    pub has_data: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            stats_text: "No data loaded".to_string(),
            value_input: String::new(),
            chart_kind: ChartKind::default(),
            status: "Ready".to_string(),
            status_is_error: false,
            has_data: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.status = error.into();
        self.status_is_error = true;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Data Visualizer")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            ui.visuals().text_color()
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Load CSV").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Statistics =====
        ui.label(RichText::new("📈 Statistics").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                    ui.label(RichText::new(&self.stats_text).monospace().size(12.0));
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Chart Type =====
        ui.label(RichText::new("⚙️ Chart Type").size(14.0).strong());
        ui.add_space(5.0);

        ComboBox::from_id_salt("chart_kind")
            .width(180.0)
            .selected_text(self.chart_kind.label())
            .show_ui(ui, |ui| {
                for kind in ChartKind::ALL {
                    if ui
                        .selectable_label(self.chart_kind == kind, kind.label())
                        .clicked()
                        && self.chart_kind != kind
                    {
                        self.chart_kind = kind;
                        action = ControlPanelAction::ChartKindChanged;
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Add Value =====
        ui.label(RichText::new("➕ Add Value").size(14.0).strong());
        ui.add_space(5.0);

        let hint = if self.chart_kind.is_numeric() {
            "Enter a number to add"
        } else {
            "Enter a category to add"
        };

        ui.add_enabled_ui(self.has_data, |ui| {
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.value_input)
                        .hint_text(hint)
                        .desired_width(170.0),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Add Value").clicked() || submitted {
                    action = ControlPanelAction::AddValue;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.has_data, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status_is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    AddValue,
    ChartKindChanged,
    ExportPng,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_error_toggle_flag() {
        let mut panel = ControlPanel::new();
        panel.set_error("Data loading error: bad");
        assert!(panel.status_is_error);
        panel.set_status("Loaded 3 rows");
        assert!(!panel.status_is_error);
        assert_eq!(panel.status, "Loaded 3 rows");
    }
}
