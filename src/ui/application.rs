//! Main application window hosting the album toolbar.
//!
//! This module implements the `ToolbarApplication`: a header bar, the
//! album toolbar, and an album list area that follows the view mode.

use std::rc::Rc;

use {
    anyhow::Error,
    libadwaita::{
        Application, ApplicationWindow, Breakpoint as AdwBreakpoint, BreakpointCondition,
        HeaderBar,
        glib::Propagation::Proceed,
        gtk::{Box as GtkBox, Orientation::Vertical},
        prelude::{
            AdwApplicationWindowExt, ApplicationExt, ApplicationExtManual, BoxExt, GtkWindowExt,
        },
    },
    tracing::{debug, info},
};

use crate::{
    config::{SettingsManager, ToolbarSettings},
    error::{ErrorReporter, UiError},
    state::{ColumnVisibility, ViewModeStore},
    ui::{
        album_list::AlbumListView,
        collaborators::{
            FilterParams, SearchFilter, ToggleFieldsMenu,
            WindowSize::{Compact, Regular},
        },
        toolbar::{ALBUM_RESOURCE, AlbumToolbar, AlbumToolbarBuilder},
        widgets::ToolbarWidget,
    },
};

/// Initial window width in logical pixels.
const DEFAULT_WIDTH: i32 = 1000;

/// Application with a single album window.
pub struct ToolbarApplication {
    /// The main application instance.
    pub app: Application,
    /// View mode shared by the toolbar and the album list.
    pub store: ViewModeStore,
    /// Settings manager.
    pub settings: SettingsManager,
}

impl ToolbarApplication {
    /// Creates a new application instance.
    ///
    /// # Errors
    ///
    /// Returns `UiError::SettingsError` if the settings file exists but
    /// cannot be read or is invalid.
    pub fn new() -> Result<Self, UiError> {
        let settings = SettingsManager::new()?;
        let store = ViewModeStore::with_mode(settings.get_settings().default_view_mode);

        let app = Application::builder()
            .application_id("com.example.AlbumToolbar")
            .build();

        Ok(Self {
            app,
            store,
            settings,
        })
    }

    /// Runs the application.
    ///
    /// This method starts the GTK main loop and displays the main window.
    pub fn run(&self) {
        self.app.connect_activate({
            let store = self.store.clone();
            let settings = self.settings.get_settings().clone();

            move |app| {
                if let Err(error) = build_ui(app, &store, &settings) {
                    ErrorReporter::error(&Error::from(error), "Building the main window");
                    app.quit();
                }
            }
        });

        self.app.run();
    }
}

/// Builds the main window.
fn build_ui(
    app: &Application,
    store: &ViewModeStore,
    settings: &ToolbarSettings,
) -> Result<(), UiError> {
    let window = ApplicationWindow::builder()
        .application(app)
        .title("Albums")
        .default_width(DEFAULT_WIDTH)
        .default_height(700)
        .build();

    let columns = ColumnVisibility::new(ALBUM_RESOURCE, settings.album_columns.iter().cloned());
    let toolbar = album_toolbar(settings, &columns);
    let toolbar_widget = Rc::new(ToolbarWidget::new(toolbar, store.clone(), columns));
    let album_list = Rc::new(AlbumListView::new(store.clone()));

    let condition = BreakpointCondition::parse(&format!(
        "min-width: {}px",
        settings.small_breakpoint_px
    ))
    .map_err(|error| UiError::InitializationError(error.to_string()))?;
    let breakpoint = AdwBreakpoint::new(condition);
    breakpoint.connect_apply({
        let toolbar_widget = toolbar_widget.clone();
        move |_| {
            debug!("Small breakpoint applied");
            toolbar_widget.set_responsive(Regular);
        }
    });
    breakpoint.connect_unapply({
        let toolbar_widget = toolbar_widget.clone();
        move |_| {
            debug!("Small breakpoint unapplied");
            toolbar_widget.set_responsive(Compact);
        }
    });
    window.add_breakpoint(breakpoint);

    let content = GtkBox::builder().orientation(Vertical).build();
    content.append(&HeaderBar::new());
    content.append(&toolbar_widget.widget);
    content.append(&album_list.stack);

    window.connect_close_request(move |_| {
        debug!(page = ?album_list.visible_page(), "Closing album window");
        Proceed
    });

    window.set_content(Some(&content));
    window.present();
    info!(mode = %store.view_mode(), "Album window presented");
    Ok(())
}

/// Album toolbar of the main window.
///
/// It starts `Compact`: the breakpoint only signals when its condition
/// starts or stops holding, and `apply` fires on the first allocation at
/// least as wide as the small breakpoint.
fn album_toolbar(settings: &ToolbarSettings, columns: &ColumnVisibility) -> AlbumToolbar {
    AlbumToolbarBuilder::from_settings(settings)
        .filter(SearchFilter::new("search"))
        .filter_params(FilterParams::new(ALBUM_RESOURCE))
        .column_menu(ToggleFieldsMenu::new(columns.clone()))
        .responsive(Compact)
        .build()
}
