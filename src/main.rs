//! Interactive Plot Digitizer - Main Entry Point
//!
//! Opens each chart image in turn and lets the user place markers, calibrate
//! the axes and export the recovered data series.

use clap::Parser;
use plotdig_rs::frontend::PlotDigApp;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "plotdig", version, about = "Extract numeric data series from chart images")]
struct Cli {
    /// Chart images to digitize, one session each
    images: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,plotdig_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let images = if cli.images.is_empty() {
        rfd::FileDialog::new()
            .set_title("Pick chart images to digitize")
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif"])
            .pick_files()
            .unwrap_or_default()
    } else {
        cli.images
    };

    if images.is_empty() {
        tracing::info!("No images selected, nothing to digitize");
        return Ok(());
    }

    tracing::info!("Starting digitizer with {} image(s)", images.len());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Plot Digitizer"),
        ..Default::default()
    };

    eframe::run_native(
        "Plot Digitizer",
        native_options,
        Box::new(|cc| Ok(Box::new(PlotDigApp::new(cc, images)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run the viewer: {e}"))
}
