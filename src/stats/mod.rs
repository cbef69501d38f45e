//! Stats module - Table summaries

mod summary;

pub use summary::{Bound, ColumnRange, StatsCalculator, TableSummary};
