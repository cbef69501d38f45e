//! Application configuration.
//! Column names and window/export sizes, read from an optional JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Names of the columns each chart kind reads from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// X axis labels for line and bar charts.
    pub date: String,
    /// Values for the line chart.
    pub line_value: String,
    /// Values for the bar chart.
    pub bar_value: String,
    /// Categories counted by the pie chart.
    pub category: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            line_value: "Value1".to_string(),
            bar_value: "Value2".to_string(),
            category: "Category".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 700.0,
        }
    }
}

/// Pixel size of exported PNG charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub columns: ColumnConfig,
    pub window: WindowConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load config from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
