//! Toolbar preferences and settings file handling.
//!
//! This module provides settings management with XDG Base Directory
//! compliance.

pub mod settings;

pub use settings::{SettingsError, SettingsManager, ToolbarSettings, get_config_path};
