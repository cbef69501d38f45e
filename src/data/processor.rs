//! Data Processor Module
//! Appends single user-entered values to the loaded table.

use crate::charts::ChartKind;
use crate::config::ColumnConfig;
use crate::data::is_numeric_dtype;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Input is empty")]
    EmptyInput,
    #[error("Invalid input '{0}': enter a number for line and bar charts")]
    InvalidNumber(String),
}

/// Result of an append. `Skipped` leaves the table untouched.
#[derive(Debug, Clone)]
pub enum AppendOutcome {
    Appended(DataFrame),
    Skipped { column: String },
}

/// A single value written into the new row.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    /// Dtype the existing column must be widened to before this cell fits.
    /// A column holding no values (e.g. a header-only file read as text)
    /// takes on the dtype of the first number written to it.
    fn widen(&self, existing: &Column) -> Option<DataType> {
        let current = existing.dtype();
        match self {
            Cell::Text(_) if *current != DataType::String => Some(DataType::String),
            Cell::Number(_) if is_numeric_dtype(current) && *current != DataType::Float64 => {
                Some(DataType::Float64)
            }
            Cell::Number(_)
                if !is_numeric_dtype(current) && existing.null_count() == existing.len() =>
            {
                Some(DataType::Float64)
            }
            _ => None,
        }
    }

    fn to_column(&self, name: PlSmallStr) -> Column {
        match self {
            Cell::Text(text) => Column::new(name, [text.as_str()]),
            Cell::Number(value) => Column::new(name, [*value]),
        }
    }
}

/// Handles table mutations. Every operation returns a new frame and never
/// touches its input.
pub struct DataProcessor;

impl DataProcessor {
    /// Append one value according to the selected chart kind.
    ///
    /// Line and bar charts require a number; the new row gets a generated
    /// `New_{n}` date label. Pie charts take the trimmed text as a new
    /// category.
    pub fn append_value(
        df: &DataFrame,
        kind: ChartKind,
        input: &str,
        columns: &ColumnConfig,
    ) -> Result<AppendOutcome, ProcessorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ProcessorError::EmptyInput);
        }

        let target = kind.target_column(columns);
        let cells = if kind.is_numeric() {
            let value: f64 = input
                .parse()
                .map_err(|_| ProcessorError::InvalidNumber(input.to_string()))?;
            vec![
                (columns.date.as_str(), Cell::Text(format!("New_{}", df.height()))),
                (target, Cell::Number(value)),
            ]
        } else {
            vec![(target, Cell::Text(input.to_string()))]
        };

        if df.column(target).is_err() {
            return Ok(AppendOutcome::Skipped {
                column: target.to_string(),
            });
        }

        Self::append_row(df, &cells).map(AppendOutcome::Appended)
    }

    /// Append a row holding `cells`; every other column gets a null.
    /// Cells naming a column the table does not have are dropped.
    fn append_row(df: &DataFrame, cells: &[(&str, Cell)]) -> Result<DataFrame, ProcessorError> {
        let mut base = df.clone();

        for (name, cell) in cells {
            let widened = match base.column(name) {
                Ok(existing) => cell
                    .widen(existing)
                    .map(|dtype| existing.cast(&dtype))
                    .transpose()?,
                Err(_) => None,
            };
            if let Some(column) = widened {
                base.with_column(column)?;
            }
        }

        let row = base
            .get_columns()
            .iter()
            .map(|col| {
                let name = col.name().clone();
                match cells.iter().find(|(n, _)| *n == name.as_str()) {
                    Some((_, cell)) => cell.to_column(name).cast(col.dtype()),
                    None => Ok(Column::full_null(name, 1, col.dtype())),
                }
            })
            .collect::<PolarsResult<Vec<Column>>>()?;

        let row = DataFrame::new(row)?;
        let mut out = base.vstack(&row)?;
        // vstack adds a chunk per call; keep repeated appends contiguous.
        out.as_single_chunk();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Date".into(), ["d1", "d2", "d3"]),
            Column::new("Value1".into(), [10i64, 20, 30]),
            Column::new("Value2".into(), [1.5f64, 2.5, 3.5]),
            Column::new("Category".into(), ["A", "B", "A"]),
        ])
        .unwrap()
    }

    fn appended(outcome: AppendOutcome) -> DataFrame {
        match outcome {
            AppendOutcome::Appended(df) => df,
            AppendOutcome::Skipped { column } => panic!("unexpected skip on {column}"),
        }
    }

    #[test]
    fn line_append_adds_one_row_with_generated_date() {
        let df = sample();
        let columns = ColumnConfig::default();
        let out = appended(
            DataProcessor::append_value(&df, ChartKind::Line, " 2.5 ", &columns).unwrap(),
        );

        assert_eq!(out.height(), df.height() + 1);
        assert_eq!(out.width(), df.width());
        assert_eq!(out.column("Date").unwrap().str().unwrap().get(3), Some("New_3"));

        // Integer column widened so the fractional value survives.
        let value1 = out.column("Value1").unwrap();
        assert_eq!(value1.dtype(), &DataType::Float64);
        assert_eq!(value1.f64().unwrap().get(3), Some(2.5));
        assert_eq!(value1.f64().unwrap().get(0), Some(10.0));

        assert_eq!(out.column("Value2").unwrap().null_count(), 1);
        assert_eq!(out.column("Category").unwrap().null_count(), 1);
    }

    #[test]
    fn bar_append_writes_second_value_column() {
        let df = sample();
        let out = appended(
            DataProcessor::append_value(&df, ChartKind::Bar, "7", &ColumnConfig::default())
                .unwrap(),
        );

        assert_eq!(out.height(), 4);
        assert_eq!(out.column("Value2").unwrap().f64().unwrap().get(3), Some(7.0));
        assert_eq!(out.column("Value1").unwrap().null_count(), 1);
        assert_eq!(out.column("Value1").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn non_numeric_input_for_numeric_chart_is_rejected() {
        let df = sample();
        let err = DataProcessor::append_value(&df, ChartKind::Line, "abc", &ColumnConfig::default())
            .unwrap_err();
        assert!(matches!(err, ProcessorError::InvalidNumber(ref s) if s == "abc"));
        assert_eq!(df.height(), 3);
        assert!(df.equals_missing(&sample()));
    }

    #[test]
    fn blank_input_is_rejected() {
        let err = DataProcessor::append_value(
            &sample(),
            ChartKind::Pie,
            "   ",
            &ColumnConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ProcessorError::EmptyInput));
    }

    #[test]
    fn pie_append_adds_category_text() {
        let df = sample();
        let out = appended(
            DataProcessor::append_value(&df, ChartKind::Pie, "C", &ColumnConfig::default())
                .unwrap(),
        );

        assert_eq!(out.height(), 4);
        assert_eq!(out.column("Category").unwrap().str().unwrap().get(3), Some("C"));
        assert_eq!(out.column("Date").unwrap().null_count(), 1);
    }

    #[test]
    fn pie_append_widens_numeric_category_column() {
        let df = DataFrame::new(vec![Column::new("Category".into(), [1i64, 2])]).unwrap();
        let out = appended(
            DataProcessor::append_value(&df, ChartKind::Pie, "other", &ColumnConfig::default())
                .unwrap(),
        );

        let categories = out.column("Category").unwrap();
        assert_eq!(categories.dtype(), &DataType::String);
        assert_eq!(categories.str().unwrap().get(0), Some("1"));
        assert_eq!(categories.str().unwrap().get(2), Some("other"));
    }

    #[test]
    fn missing_target_column_is_skipped() {
        let df = DataFrame::new(vec![Column::new("Date".into(), ["d1"])]).unwrap();
        let outcome =
            DataProcessor::append_value(&df, ChartKind::Bar, "1", &ColumnConfig::default())
                .unwrap();
        assert!(matches!(outcome, AppendOutcome::Skipped { ref column } if column == "Value2"));
    }

    #[test]
    fn number_is_validated_before_column_check() {
        let df = DataFrame::new(vec![Column::new("Date".into(), ["d1"])]).unwrap();
        let err = DataProcessor::append_value(&df, ChartKind::Line, "x", &ColumnConfig::default())
            .unwrap_err();
        assert!(matches!(err, ProcessorError::InvalidNumber(_)));
    }

    #[test]
    fn custom_column_names_are_honoured() {
        let df = DataFrame::new(vec![
            Column::new("Day".into(), ["mon"]),
            Column::new("Sales".into(), [3.0f64]),
        ])
        .unwrap();
        let columns = ColumnConfig {
            date: "Day".to_string(),
            line_value: "Sales".to_string(),
            ..ColumnConfig::default()
        };

        let out = appended(
            DataProcessor::append_value(&df, ChartKind::Line, "4", &columns).unwrap(),
        );
        assert_eq!(out.column("Day").unwrap().str().unwrap().get(1), Some("New_1"));
        assert_eq!(out.column("Sales").unwrap().f64().unwrap().get(1), Some(4.0));
    }

    #[test]
    fn repeated_appends_stay_single_chunk() {
        let columns = ColumnConfig::default();
        let mut df = sample();
        for i in 0..200 {
            df = appended(
                DataProcessor::append_value(&df, ChartKind::Line, &i.to_string(), &columns)
                    .unwrap(),
            );
        }

        assert_eq!(df.height(), 203);
        for col in df.get_columns() {
            assert_eq!(col.n_chunks(), 1, "column {} is fragmented", col.name());
        }
        assert_eq!(df.column("Value1").unwrap().f64().unwrap().get(202), Some(199.0));
    }

    #[test]
    fn number_into_empty_text_column_becomes_float() {
        // Shape of a header-only CSV: every column inferred as text.
        let df = DataFrame::new(vec![
            Column::full_null("Date".into(), 0, &DataType::String),
            Column::full_null("Value1".into(), 0, &DataType::String),
            Column::full_null("Value2".into(), 0, &DataType::String),
        ])
        .unwrap();

        let out = appended(
            DataProcessor::append_value(&df, ChartKind::Line, "3", &ColumnConfig::default())
                .unwrap(),
        );

        let value1 = out.column("Value1").unwrap();
        assert_eq!(value1.dtype(), &DataType::Float64);
        assert_eq!(value1.f64().unwrap().get(0), Some(3.0));
        assert_eq!(out.column("Date").unwrap().str().unwrap().get(0), Some("New_0"));
        assert_eq!(out.column("Value2").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn number_into_populated_text_column_keeps_text() {
        let df = DataFrame::new(vec![
            Column::new("Date".into(), ["d1"]),
            Column::new("Value1".into(), ["n/a"]),
        ])
        .unwrap();

        let out = appended(
            DataProcessor::append_value(&df, ChartKind::Line, "3", &ColumnConfig::default())
                .unwrap(),
        );

        let value1 = out.column("Value1").unwrap();
        assert_eq!(value1.dtype(), &DataType::String);
        assert_eq!(value1.str().unwrap().get(1), Some("3"));
    }
}
