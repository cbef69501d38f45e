//! Chart Series Module
//! Extracts the data a chart kind needs from the table.

use crate::charts::ChartKind;
use crate::config::ColumnConfig;
use crate::data::category_counts;
use polars::prelude::*;

/// One wedge of a pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of all counted values, in `0.0..=1.0`.
    pub fraction: f64,
}

/// Plot-ready data for the selected chart kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSeries {
    /// Line and bar charts: one value per x label, nulls are gaps.
    Points {
        kind: ChartKind,
        x_label: String,
        y_label: String,
        labels: Vec<String>,
        values: Vec<Option<f64>>,
    },
    /// Pie chart: occurrences per category, most frequent first.
    Slices { slices: Vec<PieSlice> },
    /// The table lacks columns the chart reads from.
    Missing {
        kind: ChartKind,
        columns: Vec<String>,
    },
}

impl ChartSeries {
    pub fn from_table(df: &DataFrame, kind: ChartKind, columns: &ColumnConfig) -> Self {
        let missing: Vec<String> = kind
            .required_columns(columns)
            .into_iter()
            .filter(|name| df.column(name).is_err())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return ChartSeries::Missing {
                kind,
                columns: missing,
            };
        }

        let built = match kind {
            ChartKind::Line | ChartKind::Bar => {
                Self::points(df, kind, &columns.date, kind.target_column(columns))
            }
            ChartKind::Pie => Self::slices(df, &columns.category),
        };

        // Columns were checked above, so only an unusable dtype lands here.
        built.unwrap_or_else(|_| ChartSeries::Missing {
            kind,
            columns: kind
                .required_columns(columns)
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }

    fn points(
        df: &DataFrame,
        kind: ChartKind,
        x_col: &str,
        y_col: &str,
    ) -> PolarsResult<Self> {
        let labels_col = df.column(x_col)?.cast(&DataType::String)?;
        let labels = labels_col
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect();

        let values_col = df.column(y_col)?.cast(&DataType::Float64)?;
        let values = values_col
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();

        Ok(ChartSeries::Points {
            kind,
            x_label: x_col.to_string(),
            y_label: y_col.to_string(),
            labels,
            values,
        })
    }

    fn slices(df: &DataFrame, category_col: &str) -> PolarsResult<Self> {
        let counts = category_counts(df.column(category_col)?)?;
        let total: usize = counts.iter().map(|(_, count)| count).sum();

        let slices = counts
            .into_iter()
            .map(|(label, count)| PieSlice {
                label,
                count,
                fraction: count as f64 / total as f64,
            })
            .collect();

        Ok(ChartSeries::Slices { slices })
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSeries::Points { kind, .. } | ChartSeries::Missing { kind, .. } => *kind,
            ChartSeries::Slices { .. } => ChartKind::Pie,
        }
    }

    pub fn title(&self) -> &'static str {
        self.kind().label()
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        match self {
            ChartSeries::Points { values, .. } => values.iter().all(Option::is_none),
            ChartSeries::Slices { slices } => slices.is_empty(),
            ChartSeries::Missing { .. } => true,
        }
    }

    /// Smallest and largest plotted value, widened to include zero.
    pub fn value_bounds(&self) -> (f64, f64) {
        let ChartSeries::Points { values, .. } = self else {
            return (0.0, 1.0);
        };
        let (min, max) = values
            .iter()
            .flatten()
            .fold((0.0f64, 0.0f64), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if min == max {
            (min, min + 1.0)
        } else {
            (min, max)
        }
    }

    /// Text shown in place of the chart when it cannot be drawn.
    pub fn missing_note(&self) -> Option<String> {
        match self {
            ChartSeries::Missing { kind, columns } => Some(format!(
                "{} needs column(s): {}",
                kind.label(),
                columns.join(", ")
            )),
            _ => None,
        }
    }
}

/// Split values into runs of consecutive present points, as `[x, y]` with
/// `x` the row index.
pub fn point_runs(values: &[Option<f64>]) -> Vec<Vec<[f64; 2]>> {
    let mut runs = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) => current.push([i as f64, *v]),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
