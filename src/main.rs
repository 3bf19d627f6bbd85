mod app;
mod controller;
mod data;
mod error;
mod settings;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use app::ChargeBreedApp;
use controller::PlotController;
use data::client::HttpSource;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = settings::load_config().context("Failed to load configuration")?;
    tracing::info!("Using API endpoint {}", cfg.api.endpoint);

    let source = HttpSource::new(&cfg.api.endpoint, cfg.api.timeout())
        .context("Failed to build HTTP client")?;
    let controller = PlotController::new(Arc::new(source), cfg.defaults);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Charge Breeding Simulator")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "chargebreed-plot",
        options,
        Box::new(|cc| Ok(Box::new(ChargeBreedApp::new(cc, controller)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
