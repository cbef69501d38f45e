//! Data module - CSV loading and table updates

mod loader;
mod processor;

pub use loader::{category_counts, is_numeric_dtype, DataLoader, LoaderError};
pub use processor::{AppendOutcome, DataProcessor, ProcessorError};
