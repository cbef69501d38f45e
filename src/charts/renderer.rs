//! Static Chart Renderer
//! Writes the current chart to a PNG file with plotters.
//!
//! Layout follows the interactive view: caption on top, then either a
//! cartesian plot (line with markers, or bars) labelled by row, or a pie
//! with category labels and percentages.

use crate::charts::series::point_runs;
use crate::charts::{ChartKind, ChartSeries, PieSlice, BAR_RGB, LINE_RGB, PALETTE_RGB};
use plotters::coord::{cartesian::Cartesian2d, types::RangedCoordf64, Shift};
use plotters::element::Pie;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 28);
const MAX_X_LABELS: usize = 12;
/// Headroom above and below the plotted range.
const Y_PADDING: f64 = 0.1;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("{0}")]
    Missing(String),
    #[error("Nothing to plot")]
    Empty,
    #[error("Render error: {0}")]
    Render(String),
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart to a PNG file of the given pixel size.
    pub fn render_png(
        series: &ChartSeries,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), ChartError> {
        if let Some(note) = series.missing_note() {
            return Err(ChartError::Missing(note));
        }
        if series.is_empty() {
            return Err(ChartError::Empty);
        }

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        match series {
            ChartSeries::Points {
                kind,
                x_label,
                y_label,
                labels,
                values,
            } => {
                let axes = Axes {
                    title: series.title(),
                    x_label,
                    y_label,
                    labels,
                    bounds: series.value_bounds(),
                };
                if *kind == ChartKind::Bar {
                    Self::draw_bars(&root, &axes, values)?;
                } else {
                    Self::draw_line(&root, &axes, values)?;
                }
            }
            ChartSeries::Slices { slices } => Self::draw_pie(&root, series.title(), slices)?,
            ChartSeries::Missing { .. } => {}
        }

        root.present().map_err(render_err)?;
        Ok(())
    }

    fn draw_line<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        axes: &Axes<'_>,
        values: &[Option<f64>],
    ) -> Result<(), ChartError> {
        let color = rgb(LINE_RGB);
        let mut chart = axes.build(root)?;

        for run in point_runs(values) {
            let points: Vec<(f64, f64)> = run.iter().map(|p| (p[0], p[1])).collect();
            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
                .map_err(render_err)?;
            chart
                .draw_series(points.into_iter().map(|p| Circle::new(p, 4, color.filled())))
                .map_err(render_err)?;
        }
        Ok(())
    }

    fn draw_bars<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        axes: &Axes<'_>,
        values: &[Option<f64>],
    ) -> Result<(), ChartError> {
        let color = rgb(BAR_RGB);
        let mut chart = axes.build(root)?;

        let bars = values.iter().enumerate().filter_map(|(i, v)| {
            let x = i as f64;
            v.map(|v| Rectangle::new([(x - 0.3, 0.0), (x + 0.3, v)], color.filled()))
        });
        chart.draw_series(bars).map_err(render_err)?;
        Ok(())
    }

    fn draw_pie<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        title: &str,
        slices: &[PieSlice],
    ) -> Result<(), ChartError> {
        let area = root.titled(title, CAPTION_FONT).map_err(render_err)?;
        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = w.min(h) as f64 * 0.35;

        let sizes: Vec<f64> = slices.iter().map(|s| s.count as f64).collect();
        let colors: Vec<RGBColor> = (0..slices.len())
            .map(|i| rgb(PALETTE_RGB[i % PALETTE_RGB.len()]))
            .collect();
        let labels: Vec<String> = slices.iter().map(|s| s.label.clone()).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        // Pixel y grows downwards, so -90 degrees is 12 o'clock.
        pie.start_angle(-90.0);
        pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
        pie.percentages(("sans-serif", 16).into_font().color(&BLACK));
        area.draw(&pie).map_err(render_err)?;
        Ok(())
    }
}

/// Shared cartesian setup for line and bar charts.
struct Axes<'a> {
    title: &'a str,
    x_label: &'a str,
    y_label: &'a str,
    labels: &'a [String],
    bounds: (f64, f64),
}

impl Axes<'_> {
    fn y_range(&self) -> std::ops::Range<f64> {
        let (lo, hi) = self.bounds;
        let pad = (hi - lo) * Y_PADDING;
        (lo - pad)..(hi + pad)
    }

    fn build<'b, DB: DrawingBackend>(
        &self,
        root: &'b DrawingArea<DB, Shift>,
    ) -> Result<ChartContext<'b, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>, ChartError>
    {
        let n = self.labels.len().max(1);
        let mut chart = ChartBuilder::on(root)
            .caption(self.title, CAPTION_FONT)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), self.y_range())
            .map_err(render_err)?;

        let labels = self.labels;
        let label_at = |x: &f64| {
            let rounded = x.round();
            if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            labels.get(rounded as usize).cloned().unwrap_or_default()
        };

        chart
            .configure_mesh()
            .x_labels(n.min(MAX_X_LABELS))
            .x_label_formatter(&label_at)
            .x_desc(self.x_label)
            .y_desc(self.y_label)
            .draw()
            .map_err(render_err)?;

        Ok(chart)
    }
}
