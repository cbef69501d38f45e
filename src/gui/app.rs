//! Data Visualizer Main Application
//! Main window with control panel and chart viewer.

use crate::config::AppConfig;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::session::{AddResult, Session};
use egui::SidePanel;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Main application window.
pub struct DataVisualizerApp {
    session: Session,
    config: AppConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DataVisualizerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        initial_file: Option<PathBuf>,
    ) -> Self {
        let mut app = Self {
            session: Session::new(config.columns.clone()),
            config,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        };
        if let Some(path) = initial_file {
            app.load(&path);
        }
        app
    }

    /// Recompute the statistics text and chart from the current table.
    fn refresh(&mut self) {
        self.control_panel.stats_text = self.session.summary_text();
        self.control_panel.has_data = self.session.has_data();
        self.chart_viewer.set_series(self.session.chart());
    }

    fn load(&mut self, path: &Path) {
        match self.session.load(path) {
            Ok(summary) => {
                self.control_panel.csv_path = Some(path.to_path_buf());
                self.control_panel.set_status(format!(
                    "Loaded {} rows, {} columns",
                    summary.rows, summary.columns
                ));
            }
            Err(e) => self.control_panel.set_error(e.to_string()),
        }
        self.refresh();
    }

    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Load CSV")
            .add_filter("CSV Files", &["csv"])
            .add_filter("All Files", &["*"])
            .pick_file()
        {
            self.load(&path);
        }
    }

    fn handle_add_value(&mut self) {
        if !self.session.has_data() || self.control_panel.value_input.trim().is_empty() {
            self.control_panel
                .set_error("No data loaded or the input field is empty.");
            return;
        }

        match self.session.append(&self.control_panel.value_input) {
            Ok(AddResult::Added(rows)) => {
                self.control_panel.value_input.clear();
                self.control_panel
                    .set_status(format!("Value added, {} rows", rows));
                self.refresh();
            }
            Ok(AddResult::Skipped { column }) => {
                self.control_panel.set_error(format!(
                    "Column '{}' not found for {}; value not added.",
                    column,
                    self.session.chart_kind()
                ));
            }
            Err(e) => self.control_panel.set_error(e.to_string()),
        }
    }

    fn handle_chart_kind_changed(&mut self) {
        self.session.set_chart_kind(self.control_panel.chart_kind);
        self.chart_viewer.set_series(self.session.chart());
    }

    fn handle_export_png(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("chart.png")
            .save_file()
        else {
            return; // User cancelled
        };

        match self.session.export_png(&path, &self.config.export) {
            Ok(()) => {
                self.control_panel
                    .set_status(format!("Chart exported to {}", path.display()));
                if let Err(e) = open::that(&path) {
                    warn!(path = %path.display(), error = %e, "could not open exported chart");
                }
            }
            Err(e) => self.control_panel.set_error(e.to_string()),
        }
    }
}

impl eframe::App for DataVisualizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::AddValue => self.handle_add_value(),
                        ControlPanelAction::ChartKindChanged => self.handle_chart_kind_changed(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
