//! Toolbar shown above the album list.
//!
//! The toolbar composes the filter region, and on wide enough viewports a
//! column menu whose top bar is the grid/table toggle. Rendering is pure:
//! it reads the view mode and returns an `Element` tree.

use crate::{
    config::ToolbarSettings,
    i18n::{LAYOUT_KEY, MessageCatalog, Translator},
    state::{ColumnVisibility, ViewMode, ViewModeStore},
    ui::{
        collaborators::{
            Breakpoint, ColumnMenu, FilterContext, FilterParams, FilterRegion,
            ResponsiveCondition, ToggleFieldsMenu, WindowSize,
        },
        element::{ButtonElement, Element},
    },
};

/// Resource name the toolbar and its menu configure.
pub const ALBUM_RESOURCE: &str = "album";

/// Sort direction of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending (default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Sort applied to a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    /// Field sorted on.
    pub field: String,
    /// Direction.
    pub order: SortOrder,
}

/// Page of a list currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// One-based page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items, once known.
    pub total: Option<u64>,
}

/// Selection, sort and pagination of the list below the toolbar.
///
/// Accepted for parity with the other list toolbars; rendering ignores it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListContext {
    /// Identifiers of the selected rows.
    pub selected_ids: Vec<String>,
    /// Current sort, if any.
    pub sort: Option<Sort>,
    /// Current page, if paginated.
    pub pagination: Option<Pagination>,
}

/// The grid/table toggle embedded in the column menu.
pub struct ViewModeToggler;

impl ViewModeToggler {
    /// Renders a heading above the "Grid" and "Table" buttons.
    ///
    /// The button matching `mode` is the primary one.
    #[must_use]
    pub fn render(mode: ViewMode, translator: &dyn Translator) -> Element {
        Element::Container(vec![
            Element::Heading(translator.translate(LAYOUT_KEY)),
            Element::ButtonGroup(vec![
                ButtonElement::for_mode(ViewMode::Grid, mode),
                ButtonElement::for_mode(ViewMode::Table, mode),
            ]),
        ])
    }
}

/// Builder pattern for configuring `AlbumToolbar` components.
pub struct AlbumToolbarBuilder {
    /// Optional filter region.
    filter: Option<Box<dyn FilterRegion>>,
    /// Parameters the filter region is rendered with.
    filter_params: FilterParams,
    /// Viewport width provider.
    responsive: Box<dyn ResponsiveCondition>,
    /// Column visibility menu.
    column_menu: Box<dyn ColumnMenu>,
    /// Message lookup.
    translator: Box<dyn Translator>,
    /// Selection, sort and pagination of the list.
    list_context: ListContext,
}

impl Default for AlbumToolbarBuilder {
    fn default() -> Self {
        Self::from_settings(&ToolbarSettings::default())
    }
}

impl AlbumToolbarBuilder {
    /// Starts from `settings`: its catalog, its album columns, and a
    /// `WindowSize::Regular` window, which shows the full layout.
    #[must_use]
    pub fn from_settings(settings: &ToolbarSettings) -> Self {
        let columns = ColumnVisibility::new(ALBUM_RESOURCE, settings.album_columns.iter().cloned());
        let translator =
            MessageCatalog::from_settings(settings.locale.as_deref(), &settings.messages);

        Self {
            filter: None,
            filter_params: FilterParams::new(ALBUM_RESOURCE),
            responsive: Box::new(WindowSize::Regular),
            column_menu: Box::new(ToggleFieldsMenu::new(columns)),
            translator: Box::new(translator),
            list_context: ListContext::default(),
        }
    }

    /// Sets the filter region.
    ///
    /// # Arguments
    ///
    /// * `filter` - Filter region collaborator
    ///
    /// # Returns
    ///
    /// The builder instance for method chaining.
    #[must_use]
    pub fn filter(mut self, filter: impl FilterRegion + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Sets the parameters the filter region is rendered with.
    ///
    /// The display context is always overridden with the toolbar button
    /// context when rendering.
    #[must_use]
    pub fn filter_params(mut self, filter_params: FilterParams) -> Self {
        self.filter_params = filter_params;
        self
    }

    /// Sets the responsive condition provider.
    #[must_use]
    pub fn responsive(mut self, responsive: impl ResponsiveCondition + 'static) -> Self {
        self.responsive = Box::new(responsive);
        self
    }

    /// Sets the column visibility menu.
    #[must_use]
    pub fn column_menu(mut self, column_menu: impl ColumnMenu + 'static) -> Self {
        self.column_menu = Box::new(column_menu);
        self
    }

    /// Sets the message lookup.
    #[must_use]
    pub fn translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    /// Sets the selection, sort and pagination of the list.
    #[must_use]
    pub fn list_context(mut self, list_context: ListContext) -> Self {
        self.list_context = list_context;
        self
    }

    /// Builds the `AlbumToolbar`.
    #[must_use]
    pub fn build(self) -> AlbumToolbar {
        AlbumToolbar {
            filter: self.filter,
            filter_params: self.filter_params,
            responsive: self.responsive,
            column_menu: self.column_menu,
            translator: self.translator,
            list_context: self.list_context,
        }
    }
}

/// Toolbar above the album list.
pub struct AlbumToolbar {
    filter: Option<Box<dyn FilterRegion>>,
    filter_params: FilterParams,
    responsive: Box<dyn ResponsiveCondition>,
    column_menu: Box<dyn ColumnMenu>,
    translator: Box<dyn Translator>,
    list_context: ListContext,
}

impl AlbumToolbar {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn builder() -> AlbumToolbarBuilder {
        AlbumToolbarBuilder::default()
    }

    /// Renders the toolbar for the mode currently held by `store`.
    #[must_use]
    pub fn render(&self, store: &ViewModeStore) -> Element {
        self.render_with_mode(store.view_mode())
    }

    /// Renders the toolbar for `mode`.
    #[must_use]
    pub fn render_with_mode(&self, mode: ViewMode) -> Element {
        let mut children = Vec::with_capacity(2);

        if let Some(filter) = &self.filter {
            let params = FilterParams {
                context: FilterContext::Button,
                ..self.filter_params.clone()
            };
            children.push(Element::FilterRegion(Box::new(filter.render(&params))));
        }

        if self.responsive.is_at_least(Breakpoint::Sm) {
            let toggler = ViewModeToggler::render(mode, self.translator.as_ref());
            children.push(
                self.column_menu
                    .render(ALBUM_RESOURCE, toggler, self.translator.as_ref()),
            );
        }

        Element::Toolbar(children)
    }

    /// Replaces the responsive condition, e.g. after a window resize.
    pub fn set_responsive(&mut self, responsive: impl ResponsiveCondition + 'static) {
        self.responsive = Box::new(responsive);
    }

    /// Replaces the list context.
    pub fn set_list_context(&mut self, list_context: ListContext) {
        self.list_context = list_context;
    }

    /// Current list context.
    #[must_use]
    pub fn list_context(&self) -> &ListContext {
        &self.list_context
    }
}
