//! Data Visualizer - CSV loading, summary statistics and line/bar/pie charts.
//!
//! The table is loaded with Polars, summarized, and plotted with egui_plot
//! (interactive) or plotters (PNG export). Single values can be appended and
//! every view refreshes from the updated table.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod session;
pub mod stats;

pub use config::AppConfig;
pub use session::{AddResult, Session, SessionError};
