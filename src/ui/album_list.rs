//! Album list area that switches between grid and table layouts.

use {
    libadwaita::{
        StatusPage,
        glib::{JoinHandle, MainContext},
        gtk::{Stack, StackTransitionType::Crossfade},
    },
    tokio::sync::broadcast::error::RecvError::{Closed, Lagged},
    tracing::debug,
};

use crate::state::{ViewMode, ViewModeStore};

/// Stack page name of a view mode.
#[must_use]
pub fn page_name(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Grid => "grid",
        ViewMode::Table => "table",
    }
}

/// Album list with one stack page per view mode.
pub struct AlbumListView {
    /// Stack holding the grid and table pages.
    pub stack: Stack,
    /// Event loop handle for cleanup.
    handle: JoinHandle<()>,
}

impl AlbumListView {
    /// Creates the list showing the page for the store's current mode.
    pub fn new(store: ViewModeStore) -> Self {
        let stack = Stack::builder()
            .transition_type(Crossfade)
            .vexpand(true)
            .hexpand(true)
            .build();

        for mode in [ViewMode::Grid, ViewMode::Table] {
            let page = StatusPage::builder()
                .icon_name(mode.icon_name())
                .title(format!("{mode} view"))
                .description("Albums appear here once a library is loaded.")
                .build();
            stack.add_named(&page, Some(page_name(mode)));
        }
        stack.set_visible_child_name(page_name(store.view_mode()));

        let mut events = store.subscribe();
        let handle = MainContext::default().spawn_local({
            let stack = stack.clone();
            async move {
                loop {
                    match events.recv().await {
                        Ok(event) if event.changed() => {
                            stack.set_visible_child_name(page_name(event.current));
                        }
                        Ok(_) => {}
                        Err(Lagged(skipped)) => {
                            debug!(skipped, "Album list resyncing after missed events");
                            stack.set_visible_child_name(page_name(store.view_mode()));
                        }
                        Err(Closed) => break,
                    }
                }
            }
        });

        Self { stack, handle }
    }

    /// Name of the page currently shown.
    #[must_use]
    pub fn visible_page(&self) -> Option<String> {
        self.stack.visible_child_name().map(|name| name.to_string())
    }
}

impl Drop for AlbumListView {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
