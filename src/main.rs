mod api;
mod app;
mod config;
mod error;
mod media;
mod task;
mod utils;

use crate::app::LipSyncApp;
use crate::config::AppConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    // Network calls run here; the window keeps the UI thread.
    let runtime = tokio::runtime::Runtime::new()?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 720.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Lip-Sync Studio",
        options,
        Box::new(move |cc| Box::new(LipSyncApp::new(cc, config, handle))),
    )?;

    info!("Window closed, shutting down");
    Ok(())
}
