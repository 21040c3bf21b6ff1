//! Contracts of the components the album toolbar composes.
//!
//! The toolbar never builds a filter region, measures the viewport or
//! lists columns itself. It asks these collaborators, which keeps each of
//! them swappable in tests and in the application.

use std::collections::BTreeMap;

use crate::{
    i18n::{COLUMNS_KEY, Translator},
    state::ColumnVisibility,
    ui::element::{Element, MenuElement},
};

/// Viewport width thresholds, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    /// Phones in portrait.
    Xs,
    /// Small windows and tablets.
    Sm,
    /// Medium windows.
    Md,
    /// Large windows.
    Lg,
    /// Extra large windows.
    Xl,
}

impl Breakpoint {
    /// Minimum width, in logical pixels, at which this breakpoint applies.
    #[must_use]
    pub fn min_width(self) -> u32 {
        match self {
            Breakpoint::Xs => 0,
            Breakpoint::Sm => 600,
            Breakpoint::Md => 960,
            Breakpoint::Lg => 1280,
            Breakpoint::Xl => 1920,
        }
    }
}

/// Answers whether the viewport is at least as wide as a breakpoint.
pub trait ResponsiveCondition {
    /// Returns `true` if the viewport is at least `breakpoint` wide.
    fn is_at_least(&self, breakpoint: Breakpoint) -> bool;
}

impl<F> ResponsiveCondition for F
where
    F: Fn(Breakpoint) -> bool,
{
    fn is_at_least(&self, breakpoint: Breakpoint) -> bool {
        self(breakpoint)
    }
}

/// Window size class reported by the window's breakpoint.
///
/// The window only tells whether it crossed the small breakpoint, so a
/// `Regular` window never counts as `Md` or wider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowSize {
    /// Narrower than the small breakpoint.
    Compact,
    /// At least as wide as the small breakpoint.
    Regular,
}

impl ResponsiveCondition for WindowSize {
    fn is_at_least(&self, breakpoint: Breakpoint) -> bool {
        match self {
            WindowSize::Compact => breakpoint == Breakpoint::Xs,
            WindowSize::Regular => breakpoint <= Breakpoint::Sm,
        }
    }
}

/// Responsive condition backed by a measured viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportWidth {
    /// Current width in logical pixels.
    pub width: u32,
    /// Width at which `Breakpoint::Sm` starts; others keep their defaults.
    pub small_breakpoint: u32,
}

impl ViewportWidth {
    /// Creates a provider using the default breakpoint widths.
    #[must_use]
    pub fn new(width: u32) -> Self {
        Self {
            width,
            small_breakpoint: Breakpoint::Sm.min_width(),
        }
    }

    /// Overrides the width at which `Breakpoint::Sm` starts.
    #[must_use]
    pub fn with_small_breakpoint(mut self, small_breakpoint: u32) -> Self {
        self.small_breakpoint = small_breakpoint;
        self
    }
}

impl ResponsiveCondition for ViewportWidth {
    fn is_at_least(&self, breakpoint: Breakpoint) -> bool {
        let threshold = match breakpoint {
            Breakpoint::Sm => self.small_breakpoint,
            other => other.min_width(),
        };
        self.width >= threshold
    }
}

/// Display context a filter region is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterContext {
    /// Compact "add filter" button in a toolbar.
    Button,
    /// Full filter form above a list.
    Form,
}

impl FilterContext {
    /// Lowercase name of the context.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FilterContext::Button => "button",
            FilterContext::Form => "form",
        }
    }
}

/// Parameters a filter region is rendered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParams {
    /// Resource being filtered, e.g. `"album"`.
    pub resource: String,
    /// Whether filter inputs may be revealed.
    pub show_filter: bool,
    /// Filters currently displayed, by name.
    pub displayed_filters: BTreeMap<String, bool>,
    /// Current filter values, by name.
    pub filter_values: BTreeMap<String, String>,
    /// Display context.
    pub context: FilterContext,
}

impl FilterParams {
    /// Parameters for `resource` with no displayed filters or values.
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            show_filter: true,
            displayed_filters: BTreeMap::new(),
            filter_values: BTreeMap::new(),
            context: FilterContext::Form,
        }
    }
}

/// Renders the active search and filter controls of a list.
pub trait FilterRegion {
    /// Renders the region for `params`.
    fn render(&self, params: &FilterParams) -> Element;
}

/// Filter region rendering a single named opaque fragment.
///
/// Its attributes echo the parameters it was rendered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    /// Fragment name.
    pub name: String,
}

impl SearchFilter {
    /// Creates a filter region named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl FilterRegion for SearchFilter {
    fn render(&self, params: &FilterParams) -> Element {
        let mut attributes = BTreeMap::from([
            ("resource".to_string(), params.resource.clone()),
            ("show_filter".to_string(), params.show_filter.to_string()),
            ("context".to_string(), params.context.as_str().to_string()),
        ]);
        for (name, value) in &params.filter_values {
            attributes.insert(format!("value.{name}"), value.clone());
        }

        Element::Opaque {
            name: self.name.clone(),
            attributes,
        }
    }
}

/// Menu letting the user choose which list columns are displayed.
pub trait ColumnMenu {
    /// Renders the menu for `resource` with `top_bar` embedded above its
    /// entries. `translator` supplies the trigger's tooltip.
    fn render(&self, resource: &str, top_bar: Element, translator: &dyn Translator) -> Element;
}

/// Column menu with one check entry per column.
#[derive(Debug, Clone)]
pub struct ToggleFieldsMenu {
    /// Columns offered by the menu.
    pub columns: ColumnVisibility,
}

impl ToggleFieldsMenu {
    /// Creates a menu over `columns`.
    #[must_use]
    pub fn new(columns: ColumnVisibility) -> Self {
        Self { columns }
    }
}

impl ColumnMenu for ToggleFieldsMenu {
    fn render(&self, resource: &str, top_bar: Element, translator: &dyn Translator) -> Element {
        let items = self
            .columns
            .columns()
            .into_iter()
            .map(|(field, active)| Element::CheckItem { field, active })
            .collect();

        Element::Menu(MenuElement {
            resource: resource.to_string(),
            tooltip: translator.translate(COLUMNS_KEY),
            icon_name: "view-column-symbolic".to_string(),
            top_bar: Box::new(top_bar),
            items,
        })
    }
}
