//! Session state.
//!
//! Owns the loaded table and the selected chart kind. The GUI calls into it
//! for every user action and turns the results into status messages.

use crate::charts::{ChartError, ChartKind, ChartSeries, StaticChartRenderer};
use crate::config::{ColumnConfig, ExportConfig};
use crate::data::{AppendOutcome, DataLoader, DataProcessor, LoaderError, ProcessorError};
use crate::stats::{StatsCalculator, TableSummary};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Data loading error: {0}")]
    Load(#[from] LoaderError),
    #[error("{0}")]
    Append(#[from] ProcessorError),
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),
    #[error("No data loaded")]
    NoData,
}

/// What happened to the table after an add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddResult {
    /// One row was appended; holds the new row count.
    Added(usize),
    /// The chart's target column is missing; nothing changed.
    Skipped { column: String },
}

#[derive(Debug)]
pub struct Session {
    loader: DataLoader,
    chart_kind: ChartKind,
    columns: ColumnConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ColumnConfig::default())
    }
}

impl Session {
    pub fn new(columns: ColumnConfig) -> Self {
        Self {
            loader: DataLoader::new(),
            chart_kind: ChartKind::default(),
            columns,
        }
    }

    pub fn has_data(&self) -> bool {
        self.loader.get_dataframe().is_some()
    }

    pub fn loader(&self) -> &DataLoader {
        &self.loader
    }

    pub fn chart_kind(&self) -> ChartKind {
        self.chart_kind
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        if kind != self.chart_kind {
            debug!(from = %self.chart_kind, to = %kind, "chart kind changed");
            self.chart_kind = kind;
        }
    }

    /// Load a CSV file. On failure the previous table stays loaded.
    pub fn load(&mut self, path: &Path) -> Result<TableSummary, SessionError> {
        match self.loader.load_csv(path) {
            Ok(df) => {
                info!(
                    path = %path.display(),
                    rows = df.height(),
                    columns = df.width(),
                    "loaded table"
                );
                Ok(StatsCalculator::summarize(df))
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load table");
                Err(e.into())
            }
        }
    }

    /// Append one value for the current chart kind.
    pub fn append(&mut self, input: &str) -> Result<AddResult, SessionError> {
        let df = self.loader.get_dataframe().ok_or(SessionError::NoData)?;

        let outcome = DataProcessor::append_value(df, self.chart_kind, input, &self.columns)
            .inspect_err(|e| warn!(kind = %self.chart_kind, error = %e, "append rejected"))?;

        match outcome {
            AppendOutcome::Appended(df) => {
                let rows = df.height();
                self.loader.set_dataframe(df);
                info!(kind = %self.chart_kind, rows, "appended value");
                Ok(AddResult::Added(rows))
            }
            AppendOutcome::Skipped { column } => {
                debug!(kind = %self.chart_kind, %column, "append skipped, column missing");
                Ok(AddResult::Skipped { column })
            }
        }
    }

    pub fn summary(&self) -> Option<TableSummary> {
        self.loader.get_dataframe().map(StatsCalculator::summarize)
    }

    /// Text for the statistics panel.
    pub fn summary_text(&self) -> String {
        self.summary()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "No data loaded".to_string())
    }

    pub fn chart(&self) -> Option<ChartSeries> {
        self.loader
            .get_dataframe()
            .map(|df| ChartSeries::from_table(df, self.chart_kind, &self.columns))
    }

    /// Write the current chart to a PNG.
    pub fn export_png(&self, path: &Path, size: &ExportConfig) -> Result<(), SessionError> {
        let series = self.chart().ok_or(SessionError::NoData)?;
        StaticChartRenderer::render_png(&series, path, size.width, size.height)?;
        info!(path = %path.display(), kind = %self.chart_kind, "exported chart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_session_reports_no_data() {
        let mut session = Session::default();
        assert!(!session.has_data());
        assert_eq!(session.summary_text(), "No data loaded");
        assert!(session.chart().is_none());
        assert!(matches!(session.append("1"), Err(SessionError::NoData)));

        let dir = tempfile::tempdir().unwrap();
        let err = session
            .export_png(&dir.path().join("c.png"), &ExportConfig::default())
            .unwrap_err();
        assert!(matches!(err, SessionError::NoData));
    }

    #[test]
    fn chart_kind_switch() {
        let mut session = Session::default();
        session.set_chart_kind(ChartKind::Pie);
        assert_eq!(session.chart_kind(), ChartKind::Pie);
    }

    #[test]
    fn invalid_number_message_reaches_user() {
        let err = SessionError::from(ProcessorError::InvalidNumber("abc".to_string()));
        assert_eq!(
            err.to_string(),
            "Invalid input 'abc': enter a number for line and bar charts"
        );
    }
}
