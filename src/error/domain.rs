//! Domain-specific error types using `thiserror`.
//!
//! The toolbar itself renders without failing; these errors cover the
//! GTK layer around it. Settings errors live next to the settings manager.

use thiserror::Error;

use crate::config::SettingsError;

/// UI-related errors.
#[derive(Error, Debug)]
pub enum UiError {
    /// GTK/Libadwaita initialization error.
    #[error("UI initialization error: {0}")]
    InitializationError(String),
    /// Settings could not be loaded for the UI.
    #[error("Settings error: {0}")]
    SettingsError(#[from] SettingsError),
}
