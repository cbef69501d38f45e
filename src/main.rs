//! Data Visualizer - CSV Data Statistics & Chart Viewer
//!
//! Loads a CSV table, shows summary statistics and a line, bar or pie chart.

use anyhow::{Context, Result};
use clap::Parser;
use data_visualizer::gui::DataVisualizerApp;
use data_visualizer::AppConfig;
use eframe::egui;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "data-visualizer")]
#[command(about = "Load a CSV file, view its statistics and chart it", long_about = None)]
struct Args {
    /// CSV file to open at start-up
    file: Option<PathBuf>,

    /// JSON config file (column names, window and export sizes)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to the specified file instead of stderr
    #[arg(long)]
    log: Option<PathBuf>,
}

fn init_logging(log: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_ref())?;

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    tracing::info!(config = ?args.config, file = ?args.file, "starting Data Visualizer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([700.0, 500.0])
            .with_title("Data Visualizer"),
        ..Default::default()
    };

    let initial_file = args.file;
    eframe::run_native(
        "Data Visualizer",
        options,
        Box::new(move |cc| Ok(Box::new(DataVisualizerApp::new(cc, config, initial_file)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}
