mod app;
mod config;
mod error;
mod modules;
mod style;

use eframe::egui;
use tracing_subscriber::EnvFilter;
use crate::config::PaintConfig;
use crate::error::PaintError;

fn main() -> Result<(), PaintError> {
    let config: PaintConfig = PaintConfig::load();

    let filter: EnvFilter = EnvFilter::try_new(config.effective_log_filter()).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting paint preview");

    let options: eframe::NativeOptions = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title("Paint Preview"),
        ..Default::default()
    };
    eframe::run_native(
        "Paint Preview",
        options,
        Box::new(|cc: &eframe::CreationContext<'_>| Ok(Box::new(app::PaintApp::new(cc, config)))),
    )?;
    Ok(())
}
