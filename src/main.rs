mod app;
mod color;
mod config;
mod data;
mod reactive;
mod session;
mod state;
mod ui;
mod views;

use std::sync::Arc;

use anyhow::{Context, Result};
use app::PenguinApp;
use config::DashboardConfig;
use eframe::egui;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = DashboardConfig::from_env().context("resolving dashboard configuration")?;
    log::debug!("Configuration: {config:?}");

    // The page cannot render without data, so a load failure ends startup.
    let dataset = match &config.data_path {
        Some(path) => data::loader::load_file(path)
            .with_context(|| format!("loading dataset {}", path.display()))?,
        None => data::loader::load_bundled()?,
    };
    log::info!(
        "Loaded {} penguin records ({} species) from {}",
        dataset.len(),
        dataset.species_present().len(),
        dataset.source()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.title.clone();
    let app = PenguinApp::new(Arc::new(dataset), config);

    eframe::run_native(&title, options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
