//! Shared UI state with reactive updates to UI components.
//!
//! This module provides the album view mode store that toolbars read
//! and toggle, and the column visibility set behind the column menu.

pub mod columns;
pub mod view_mode;

pub use {
    columns::ColumnVisibility,
    view_mode::{SubscriptionId, ViewMode, ViewModeAction, ViewModeEvent, ViewModeStore},
};
