//! CSV Data Loader Module
//! Handles CSV file loading and column queries using Polars.

use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rows scanned to infer the column types.
const INFER_SCHEMA_ROWS: usize = 10_000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("File has no columns")]
    NoColumns,
    #[error("No data loaded")]
    NoData,
}

/// Returns true for integer and floating point dtypes.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Owns the loaded table. A failed load keeps whatever was loaded before.
#[derive(Debug)]
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a CSV file, replacing the current table on success.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .finish()?
            .collect()?;

        if df.width() == 0 {
            return Err(LoaderError::NoColumns);
        }

        self.file_path = Some(file_path.to_path_buf());
        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get list of numeric column names.
    pub fn get_numeric_columns(&self) -> Vec<String> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.get_columns()
            .iter()
            .filter(|col| is_numeric_dtype(col.dtype()))
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Count occurrences of each value in a column.
    pub fn category_counts(&self, column: &str) -> Result<Vec<(String, usize)>, LoaderError> {
        let df = self.df.as_ref().ok_or(LoaderError::NoData)?;
        Ok(category_counts(df.column(column)?)?)
    }

    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    pub fn get_column_count(&self) -> usize {
        self.df.as_ref().map(|df| df.width()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Replace the table in place (used after an append).
    pub fn set_dataframe(&mut self, df: DataFrame) {
        self.df = Some(df);
    }
}

/// Count non-null values of a column, most frequent first, ties by value.
pub fn category_counts(column: &Column) -> PolarsResult<Vec<(String, usize)>> {
    let as_text = column.cast(&DataType::String)?;
    let values = as_text.str()?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values.into_iter().flatten() {
        *counts.entry(value).or_default() += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const SAMPLE: &str = "Date,Value1,Value2,Category\n\
                          2024-01-01,10,1.5,A\n\
                          2024-01-02,20,2.5,B\n\
                          2024-01-03,30,3.5,A\n";

    #[test]
    fn load_populates_shape() {
        let file = csv_file(SAMPLE);
        let mut loader = DataLoader::new();
        loader.load_csv(file.path()).unwrap();

        assert_eq!(loader.get_row_count(), 3);
        assert_eq!(loader.get_column_count(), 4);
        assert_eq!(
            loader.get_columns(),
            vec!["Date", "Value1", "Value2", "Category"]
        );
        assert_eq!(loader.get_numeric_columns(), vec!["Value1", "Value2"]);
        assert_eq!(loader.get_file_path().map(|p| p.as_path()), Some(file.path()));
    }

    #[test]
    fn missing_file_is_reported() {
        let mut loader = DataLoader::new();
        let err = loader
            .load_csv(Path::new("/no/such/dir/data.csv"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
        assert!(loader.get_dataframe().is_none());
    }

    #[test]
    fn ragged_file_fails_and_keeps_previous_table() {
        let good = csv_file(SAMPLE);
        let bad = csv_file("a,b\n1,2\n3,4,5,6\n");

        let mut loader = DataLoader::new();
        loader.load_csv(good.path()).unwrap();
        assert!(loader.load_csv(bad.path()).is_err());

        assert_eq!(loader.get_row_count(), 3);
        assert_eq!(loader.get_file_path().map(|p| p.as_path()), Some(good.path()));
    }

    #[test]
    fn category_counts_sorted_by_frequency() {
        let file = csv_file(SAMPLE);
        let mut loader = DataLoader::new();
        loader.load_csv(file.path()).unwrap();

        let counts = loader.category_counts("Category").unwrap();
        assert_eq!(counts, vec![("A".to_string(), 2), ("B".to_string(), 1)]);
        assert!(loader.category_counts("Nope").is_err());
    }

    #[test]
    fn category_counts_skip_nulls_and_break_ties_by_value() {
        let column = Column::new("c".into(), [Some("y"), None, Some("x"), Some("z"), Some("x")]);
        let counts = category_counts(&column).unwrap();
        assert_eq!(
            counts,
            vec![
                ("x".to_string(), 2),
                ("y".to_string(), 1),
                ("z".to_string(), 1)
            ]
        );
    }

    #[test]
    fn no_data_before_load() {
        let loader = DataLoader::default();
        assert_eq!(loader.get_row_count(), 0);
        assert!(loader.get_columns().is_empty());
        assert!(matches!(
            loader.category_counts("Category"),
            Err(LoaderError::NoData)
        ));
    }
}
