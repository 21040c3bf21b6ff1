//! Toolbar preference management with XDG Base Directory compliance.
//!
//! This module provides settings management with proper XDG directory
//! usage for the configuration file. The current view mode is never
//! written here; only the mode a new store starts in is configurable.

use std::{
    collections::BTreeMap,
    env::var,
    fs::{create_dir_all, read_to_string, write},
    io::Error as StdError,
    path::PathBuf,
};

use {
    parking_lot::{RwLock, RwLockReadGuard},
    serde::{Deserialize, Serialize},
    serde_json::{Error as SerdeJsonError, from_str, to_string_pretty},
    thiserror::Error,
    tracing::debug,
};

use crate::{i18n::parse_locale, state::ViewMode, ui::collaborators::Breakpoint};

/// Error type for settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read or write settings file.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// Failed to serialize or deserialize settings.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerdeJsonError),
    /// Invalid settings value.
    #[error("Invalid settings value: {reason}")]
    InvalidValue { reason: String },
}

/// Serializable toolbar settings with default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarSettings {
    /// Mode a freshly created view mode store starts in.
    pub default_view_mode: ViewMode,
    /// Minimum window width, in logical pixels, of the small breakpoint.
    pub small_breakpoint_px: u32,
    /// Locale of the built-in message catalog; `None` follows the system.
    pub locale: Option<String>,
    /// Album list columns offered by the column menu, in display order.
    pub album_columns: Vec<String>,
    /// Translation overrides keyed by message key.
    pub messages: BTreeMap<String, String>,
}

impl Default for ToolbarSettings {
    fn default() -> Self {
        Self {
            default_view_mode: ViewMode::Grid,
            small_breakpoint_px: Breakpoint::Sm.min_width(),
            locale: None,
            album_columns: [
                "artist",
                "songCount",
                "playCount",
                "year",
                "duration",
                "rating",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            messages: BTreeMap::new(),
        }
    }
}

impl ToolbarSettings {
    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` for a zero breakpoint or a
    /// locale that is not a valid language identifier.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.small_breakpoint_px == 0 {
            return Err(SettingsError::InvalidValue {
                reason: "small_breakpoint_px must be greater than zero".to_string(),
            });
        }
        if let Some(locale) = &self.locale
            && (locale.trim().is_empty() || parse_locale(locale).is_none())
        {
            return Err(SettingsError::InvalidValue {
                reason: format!("locale {locale:?} is not a language identifier"),
            });
        }
        Ok(())
    }
}

/// Handles loading, saving, and validation of toolbar preferences.
#[derive(Debug)]
pub struct SettingsManager {
    /// Thread-safe settings storage.
    settings: RwLock<ToolbarSettings>,
    /// Path to the configuration file on disk.
    config_path: PathBuf,
}

impl SettingsManager {
    /// Creates a new settings manager with default config path.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if settings cannot be loaded from disk.
    pub fn new() -> Result<Self, SettingsError> {
        Self::with_config_path(get_config_path())
    }

    /// Creates a new settings manager with a custom config path.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Path of the settings file
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the directory cannot be created or an
    /// existing file cannot be read, parsed or validated.
    pub fn with_config_path(config_path: PathBuf) -> Result<Self, SettingsError> {
        if let Some(parent) = config_path.parent() {
            create_dir_all(parent)?;
        }

        let settings = if config_path.exists() {
            debug!("Loading settings from existing file: {:?}", config_path);
            let contents = read_to_string(&config_path)?;
            let settings: ToolbarSettings = from_str(&contents)?;
            settings.validate()?;
            settings
        } else {
            debug!("Using default settings, no file at {:?}", config_path);
            ToolbarSettings::default()
        };

        Ok(SettingsManager {
            settings: RwLock::new(settings),
            config_path,
        })
    }

    /// Gets the current settings.
    pub fn get_settings(&self) -> RwLockReadGuard<'_, ToolbarSettings> {
        self.settings.read()
    }

    /// Gets the configuration file path.
    pub fn get_config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Validates and applies new settings, then saves them to disk.
    ///
    /// # Arguments
    ///
    /// * `new_settings` - New settings to apply.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if validation fails (the current settings
    /// are kept) or the file cannot be written.
    pub fn update_settings(&self, new_settings: ToolbarSettings) -> Result<(), SettingsError> {
        new_settings.validate()?;
        *self.settings.write() = new_settings;
        self.save_settings()
    }

    fn save_settings(&self) -> Result<(), SettingsError> {
        debug!("Saving settings to file: {:?}", self.config_path);
        let contents = to_string_pretty(&*self.settings.read())?;
        write(&self.config_path, contents)?;
        Ok(())
    }
}

/// Ensures proper XDG directory usage for the configuration file.
///
/// # Returns
///
/// The path to the configuration file.
#[must_use]
pub fn get_config_path() -> PathBuf {
    let mut config_dir = get_xdg_config_home();
    config_dir.push("album-toolbar");
    config_dir.push("settings.json");
    config_dir
}

/// Uses `XDG_CONFIG_HOME` if set, otherwise `$HOME/.config`.
fn get_xdg_config_home() -> PathBuf {
    if let Ok(config_home) = var("XDG_CONFIG_HOME")
        && !config_home.is_empty()
    {
        return PathBuf::from(config_home);
    }

    if let Ok(home) = var("HOME") {
        let mut path = PathBuf::from(home);
        path.push(".config");
        return path;
    }

    PathBuf::from(".")
}
