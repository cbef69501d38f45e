//! Chart Plotter Module
//! Draws the selected chart interactively using egui_plot.

use crate::charts::series::point_runs;
use crate::charts::{ChartKind, ChartSeries, PieSlice, BAR_RGB, LINE_RGB, PALETTE_RGB};
use egui::{Color32, RichText};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

const PLOT_HEIGHT: f32 = 420.0;
const PIE_LABEL_RADIUS: f64 = 1.15;
const PIE_PCT_RADIUS: f64 = 0.6;
/// Wedges wider than this are split so every polygon stays convex.
const MAX_WEDGE_PART: f64 = FRAC_PI_2;

fn rgb((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Color of the i-th pie slice.
pub fn slice_color(index: usize) -> Color32 {
    rgb(PALETTE_RGB[index % PALETTE_RGB.len()])
}

/// Creates interactive charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw whichever chart the series describes.
    pub fn draw_chart(ui: &mut egui::Ui, series: &ChartSeries) {
        ui.label(RichText::new(series.title()).size(16.0).strong());
        ui.add_space(6.0);

        match series {
            ChartSeries::Points {
                kind,
                x_label,
                y_label,
                labels,
                values,
            } => {
                if *kind == ChartKind::Bar {
                    Self::draw_bar_chart(ui, x_label, y_label, labels, values);
                } else {
                    Self::draw_line_chart(ui, x_label, y_label, labels, values);
                }
            }
            ChartSeries::Slices { slices } => Self::draw_pie_chart(ui, slices),
            ChartSeries::Missing { .. } => {
                if let Some(note) = series.missing_note() {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new(note).size(14.0).color(Color32::GRAY));
                    });
                }
            }
        }
    }

    /// Axis formatter that shows the row label at integer positions.
    fn label_formatter(labels: &[String]) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
        let labels = labels.to_vec();
        move |mark, _range| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            labels.get(rounded as usize).cloned().unwrap_or_default()
        }
    }

    fn draw_line_chart(
        ui: &mut egui::Ui,
        x_label: &str,
        y_label: &str,
        labels: &[String],
        values: &[Option<f64>],
    ) {
        let color = rgb(LINE_RGB);

        Plot::new("line_chart")
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .x_axis_formatter(Self::label_formatter(labels))
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for run in point_runs(values) {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(run.iter().copied()))
                            .color(color)
                            .width(1.5)
                            .name(y_label),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(run.into_iter()))
                            .radius(4.0)
                            .color(color)
                            .name(y_label),
                    );
                }
            });
    }

    fn draw_bar_chart(
        ui: &mut egui::Ui,
        x_label: &str,
        y_label: &str,
        labels: &[String],
        values: &[Option<f64>],
    ) {
        let bars: Vec<Bar> = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| {
                v.map(|v| {
                    Bar::new(i as f64, v)
                        .width(0.6)
                        .name(labels.get(i).cloned().unwrap_or_default())
                })
            })
            .collect();

        Plot::new("bar_chart")
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .x_axis_formatter(Self::label_formatter(labels))
            .include_y(0.0)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(rgb(BAR_RGB)).name(y_label));
            });
    }

    /// Points of a wedge from `start` to `end` (radians), center first.
    pub fn wedge_points(start: f64, end: f64) -> Vec<[f64; 2]> {
        let steps = (((end - start) / TAU) * 120.0).ceil().max(2.0) as usize;
        let mut points = Vec::with_capacity(steps + 2);
        points.push([0.0, 0.0]);
        for s in 0..=steps {
            let angle = start + (end - start) * s as f64 / steps as f64;
            points.push([angle.cos(), angle.sin()]);
        }
        points
    }

    fn draw_pie_chart(ui: &mut egui::Ui, slices: &[PieSlice]) {
        Plot::new("pie_chart")
            .height(PLOT_HEIGHT)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .include_x(-1.4)
            .include_x(1.4)
            .include_y(-1.3)
            .include_y(1.3)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                // Counter-clockwise from 12 o'clock.
                let mut start = FRAC_PI_2;
                for (i, slice) in slices.iter().enumerate() {
                    let sweep = slice.fraction * TAU;
                    let end = start + sweep;
                    let color = slice_color(i);

                    let parts = (sweep / MAX_WEDGE_PART).ceil().max(1.0) as usize;
                    for p in 0..parts {
                        let a = start + sweep * p as f64 / parts as f64;
                        let b = start + sweep * (p + 1) as f64 / parts as f64;
                        plot_ui.polygon(
                            Polygon::new(PlotPoints::from_iter(Self::wedge_points(a, b)))
                                .fill_color(color)
                                .stroke(egui::Stroke::new(1.0, Color32::WHITE))
                                .name(&slice.label),
                        );
                    }

                    let mid = start + sweep / 2.0;
                    plot_ui.text(Text::new(
                        PlotPoint::new(mid.cos() * PIE_LABEL_RADIUS, mid.sin() * PIE_LABEL_RADIUS),
                        RichText::new(&slice.label).size(13.0),
                    ));
                    plot_ui.text(Text::new(
                        PlotPoint::new(mid.cos() * PIE_PCT_RADIUS, mid.sin() * PIE_PCT_RADIUS),
                        RichText::new(format!("{:.1}%", slice.fraction * 100.0))
                            .size(12.0)
                            .color(Color32::BLACK),
                    ));

                    start = end;
                }
            });
    }
}
