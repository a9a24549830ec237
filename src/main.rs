//! Running Analysis Suite
//!
//! Main entry point for the application.

use anyhow::Context;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use runsuite::auth::AccessController;
use runsuite::storage::config::load_config;
use runsuite::storage::Database;

mod app;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Running Analysis Suite v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().context("Failed to load configuration")?;
    let db_path = config.database_path();
    let db = Database::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    let created = AccessController::new(&db)
        .bootstrap_admin(
            &config.bootstrap.admin_username,
            &config.bootstrap.admin_password,
        )
        .context("Failed to seed admin account")?;
    if created {
        tracing::info!("Created admin account '{}'", config.bootstrap.admin_username);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Running Analysis Suite"),
        ..Default::default()
    };

    eframe::run_native(
        "Running Analysis Suite",
        options,
        Box::new(move |cc| Ok(Box::new(app::RunSuiteApp::new(cc, config, db)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {}", e))
}
