//! Race Insights - Interactive Race Event Dashboard
//!
//! A Rust application that loads a remote race dataset and displays
//! filter-driven interactive charts.

mod charts;
mod config;
mod data;
mod gui;
mod pipeline;

use eframe::egui;
use gui::RaceInsightsApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = config::AppConfig::load();
    log::info!("starting Race Insights, dataset url: {}", config.dataset_url);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Race Insights"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Race Insights",
        options,
        Box::new(move |cc| Ok(Box::new(RaceInsightsApp::new(cc, config)))),
    )
}
