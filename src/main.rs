//! Olympics Dashboard - Athlete Events Data Analysis & Interactive Charts
//!
//! Loads `athlete_events.csv` once, then recomputes the dashboard on every
//! year/sport filter change.

mod charts;
mod gui;

use anyhow::Context;
use eframe::egui;
use gui::DashboardApp;
use olympics_dashboard::{logging, DashboardConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::load().context("Failed to load dashboard configuration")?;
    logging::init_logging(&config.log_filter);
    info!(dataset = %config.dataset_path.display(), "Starting Olympics dashboard");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1200.0, 700.0])
            .with_title("🏅 Olympics Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Olympics Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}
