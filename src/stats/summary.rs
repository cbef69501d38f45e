//! Table Summary Module
//! Shape of the table plus the range of every numeric or boolean column.

use crate::data::is_numeric_dtype;
use polars::prelude::*;
use rayon::prelude::*;
use std::fmt;

/// One end of a column range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Number(f64),
    /// Boolean columns count as numeric; printed as `False` / `True`.
    Flag(bool),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Number(v) => write!(f, "{}", v),
            Bound::Flag(true) => f.write_str("True"),
            Bound::Flag(false) => f.write_str("False"),
        }
    }
}

/// Min/max of a single numeric or boolean column. `None` when the column
/// is all null.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRange {
    pub name: String,
    pub min: Option<Bound>,
    pub max: Option<Bound>,
}

/// Summary shown next to the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: usize,
    pub ranges: Vec<ColumnRange>,
}

impl TableSummary {
    pub fn range(&self, column: &str) -> Option<&ColumnRange> {
        self.ranges.iter().find(|r| r.name == column)
    }
}

fn fmt_bound(value: Option<Bound>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows: {}", self.rows)?;
        write!(f, "Columns: {}", self.columns)?;
        for range in &self.ranges {
            write!(
                f,
                "\n{} -> Min: {}, Max: {}",
                range.name,
                fmt_bound(range.min),
                fmt_bound(range.max)
            )?;
        }
        Ok(())
    }
}

/// Computes table summaries.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Summarize the table. Numeric columns are reduced in parallel and
    /// reported in column order.
    pub fn summarize(df: &DataFrame) -> TableSummary {
        let ranges = df
            .get_columns()
            .par_iter()
            .filter(|col| is_numeric_dtype(col.dtype()) || col.dtype() == &DataType::Boolean)
            .map(Self::column_range)
            .collect();

        TableSummary {
            rows: df.height(),
            columns: df.width(),
            ranges,
        }
    }

    fn column_range(column: &Column) -> ColumnRange {
        let (min, max) = if column.dtype() == &DataType::Boolean {
            column
                .bool()
                .ok()
                .map(|ca| (ca.min().map(Bound::Flag), ca.max().map(Bound::Flag)))
                .unwrap_or((None, None))
        } else {
            let values = column.cast(&DataType::Float64).ok();
            values
                .as_ref()
                .and_then(|c| c.f64().ok())
                .map(|ca| (ca.min().map(Bound::Number), ca.max().map(Bound::Number)))
                .unwrap_or((None, None))
        };

        ColumnRange {
            name: column.name().to_string(),
            min,
            max,
        }
    }
}
