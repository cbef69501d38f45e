//! Chart Viewer Widget
//! Central panel showing the selected chart.

use crate::charts::{ChartPlotter, ChartSeries};
use egui::RichText;

#[derive(Default)]
pub struct ChartViewer {
    /// Chart for the current table and chart kind. `None` before a load.
    pub series: Option<ChartSeries>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_series(&mut self, series: Option<ChartSeries>) {
        self.series = series;
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(series) = &self.series else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ChartPlotter::draw_chart(ui, series);
            });
    }
}
