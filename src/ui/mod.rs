//! Album toolbar user interface.
//!
//! Components render to `Element` trees; with the `gui` feature the trees
//! are realized as Libadwaita widgets.

#[cfg(test)]
mod tests;

pub mod collaborators;
pub mod element;
pub mod toolbar;

#[cfg(feature = "gui")]
pub mod album_list;
#[cfg(feature = "gui")]
pub mod application;
#[cfg(feature = "gui")]
pub mod widgets;

pub use {
    collaborators::{
        Breakpoint, ColumnMenu, FilterContext, FilterParams, FilterRegion, ResponsiveCondition,
        SearchFilter, ToggleFieldsMenu, ViewportWidth, WindowSize,
    },
    element::{ButtonElement, Element, Emphasis, MenuElement},
    toolbar::{AlbumToolbar, AlbumToolbarBuilder, ListContext, ViewModeToggler},
};

#[cfg(feature = "gui")]
pub use {
    album_list::AlbumListView, application::ToolbarApplication, widgets::ToolbarWidget,
};
