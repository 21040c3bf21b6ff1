//! Album Toolbar
//!
//! Entry point of the demo application. It installs logging, initializes
//! GTK/Libadwaita and starts the main application loop.

use {
    album_toolbar::{config::get_config_path, error::ResultExt, ui::ToolbarApplication},
    anyhow::Result,
    tracing_subscriber::EnvFilter,
};

/// Main entry point for the Album Toolbar application.
fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    libadwaita::init().add_context("Failed to initialize Libadwaita")?;

    let app = ToolbarApplication::new().add_contextf(format!(
        "Failed to start with settings from {}",
        get_config_path().display()
    ))?;
    app.run();

    Ok(())
}
