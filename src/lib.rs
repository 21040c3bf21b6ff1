//! Album Toolbar - grid/table view switching for an album list
//!
//! A toolbar shown above an album list. It hosts the list's filter region
//! and, on wide enough windows, a column menu embedding a grid/table
//! toggle backed by a shared, observable view mode store. Built with
//! modern Rust and Libadwaita.

pub mod config;
pub mod error;
pub mod i18n;
pub mod state;
pub mod ui;

// Re-export key types for convenience
pub use {
    config::{SettingsManager, ToolbarSettings},
    error::UiError,
    i18n::{MessageCatalog, Translator},
    state::{ColumnVisibility, ViewMode, ViewModeAction, ViewModeEvent, ViewModeStore},
    ui::{AlbumToolbar, Element},
};

#[cfg(feature = "gui")]
pub use ui::ToolbarApplication;
