//! Libadwaita realization of rendered `Element` trees.
//!
//! `ToolbarWidget` keeps a realized album toolbar in sync with its
//! `ViewModeStore`: mode changes restyle the toggle buttons in place, and
//! viewport changes rebuild the toolbar.

use std::{cell::RefCell, rc::Rc};

use {
    libadwaita::{
        ButtonContent,
        glib::{JoinHandle, MainContext},
        gtk::{
            Align::Center,
            Box as GtkBox, Button, CheckButton, Label, MenuButton,
            Orientation::{Horizontal, Vertical},
            Popover, Widget,
        },
        prelude::{BoxExt, ButtonExt, Cast, CheckButtonExt, WidgetExt},
    },
    tokio::sync::broadcast::error::RecvError::{Closed, Lagged},
    tracing::debug,
};

use crate::{
    state::{ColumnVisibility, ViewMode, ViewModeAction, ViewModeStore},
    ui::{
        collaborators::ResponsiveCondition,
        element::{ButtonElement, Element, Emphasis, MenuElement},
        toolbar::AlbumToolbar,
    },
};

/// CSS class marking the primary toggle button.
const PRIMARY_CLASS: &str = "suggested-action";

/// Realized toggle buttons, keyed by the action they dispatch.
type ModeButtons = Rc<RefCell<Vec<(ViewModeAction, Button)>>>;

/// Everything realized widgets need to act on user input.
#[derive(Debug, Clone)]
pub struct RealizeContext {
    /// Store that toggle buttons dispatch to.
    pub store: ViewModeStore,
    /// Columns that check items toggle, if any.
    pub columns: Option<ColumnVisibility>,
    /// Toggle buttons realized so far.
    mode_buttons: ModeButtons,
}

impl RealizeContext {
    /// Creates a context dispatching to `store`.
    #[must_use]
    pub fn new(store: ViewModeStore, columns: Option<ColumnVisibility>) -> Self {
        Self {
            store,
            columns,
            mode_buttons: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Restyles every realized toggle button for `mode`.
    pub fn apply_mode(&self, mode: ViewMode) {
        for (action, button) in self.mode_buttons.borrow().iter() {
            set_emphasis(button, Emphasis::for_active(action.target() == mode));
        }
    }

    /// Number of realized toggle buttons.
    #[must_use]
    pub fn mode_button_count(&self) -> usize {
        self.mode_buttons.borrow().len()
    }

    /// Emphasis currently shown by the toggle button dispatching `action`.
    #[must_use]
    pub fn emphasis(&self, action: ViewModeAction) -> Option<Emphasis> {
        self.mode_buttons
            .borrow()
            .iter()
            .find(|(realized, _)| *realized == action)
            .map(|(_, button)| Emphasis::for_active(button.has_css_class(PRIMARY_CLASS)))
    }
}

/// Builds the widget for `element`.
///
/// # Arguments
///
/// * `element` - Rendered element tree.
/// * `context` - Store and columns the widgets act on.
pub fn realize(element: &Element, context: &RealizeContext) -> Widget {
    match element {
        Element::Toolbar(children) => {
            let row = GtkBox::builder()
                .orientation(Horizontal)
                .spacing(6)
                .margin_top(6)
                .margin_bottom(6)
                .margin_start(12)
                .margin_end(12)
                .css_classes(["toolbar"])
                .build();
            for child in children {
                row.append(&realize(child, context));
            }
            row.upcast()
        }
        Element::Container(children) => {
            let column = GtkBox::builder().orientation(Vertical).spacing(6).build();
            for child in children {
                column.append(&realize(child, context));
            }
            column.upcast()
        }
        Element::FilterRegion(inner) => realize(inner, context),
        Element::Heading(text) => Label::builder()
            .label(text.as_str())
            .css_classes(["heading"])
            .margin_top(12)
            .margin_bottom(6)
            .build()
            .upcast(),
        Element::ButtonGroup(buttons) => {
            let group = GtkBox::builder()
                .orientation(Horizontal)
                .halign(Center)
                .css_classes(["linked"])
                .build();
            for button in buttons {
                group.append(&realize_button(button, context));
            }
            group.upcast()
        }
        Element::Menu(menu) => realize_menu(menu, context),
        Element::CheckItem { field, active } => {
            let check = CheckButton::builder()
                .label(field.as_str())
                .active(*active)
                .build();
            if let Some(columns) = &context.columns {
                let columns = columns.clone();
                let field = field.clone();
                check.connect_toggled(move |check| {
                    columns.set_visible(&field, check.is_active());
                });
            }
            check.upcast()
        }
        Element::Opaque { name, attributes } => {
            let tooltip = attributes
                .iter()
                .map(|(key, value)| format!("{key}: {value}"))
                .collect::<Vec<_>>()
                .join("\n");
            Label::builder()
                .label(name.as_str())
                .tooltip_text(tooltip)
                .css_classes(["dim-label"])
                .build()
                .upcast()
        }
    }
}

fn realize_button(element: &ButtonElement, context: &RealizeContext) -> Widget {
    let content = ButtonContent::builder()
        .icon_name(element.icon_name.as_str())
        .label(element.label.as_str())
        .build();
    let button = Button::builder()
        .child(&content)
        .tooltip_text(element.label.as_str())
        .build();
    set_emphasis(&button, element.emphasis);

    let store = context.store.clone();
    let action = element.action;
    button.connect_clicked(move |_| {
        store.dispatch(action);
    });

    context
        .mode_buttons
        .borrow_mut()
        .push((element.action, button.clone()));
    button.upcast()
}

fn realize_menu(menu: &MenuElement, context: &RealizeContext) -> Widget {
    let content = GtkBox::builder()
        .orientation(Vertical)
        .spacing(6)
        .margin_top(6)
        .margin_bottom(6)
        .margin_start(6)
        .margin_end(6)
        .build();
    content.append(&realize(&menu.top_bar, context));
    for item in &menu.items {
        content.append(&realize(item, context));
    }

    let popover = Popover::builder().child(&content).build();
    MenuButton::builder()
        .icon_name(menu.icon_name.as_str())
        .tooltip_text(menu.tooltip.as_str())
        .popover(&popover)
        .build()
        .upcast()
}

fn set_emphasis(button: &Button, emphasis: Emphasis) {
    match emphasis {
        Emphasis::Primary => button.add_css_class(PRIMARY_CLASS),
        Emphasis::Secondary => button.remove_css_class(PRIMARY_CLASS),
    }
}

/// Realized album toolbar that follows its store.
pub struct ToolbarWidget {
    /// Container holding the realized toolbar.
    pub widget: GtkBox,
    /// Toolbar being realized.
    toolbar: Rc<RefCell<AlbumToolbar>>,
    /// Context of the current realization.
    context: Rc<RefCell<RealizeContext>>,
    /// Event loop handle for cleanup.
    handle: JoinHandle<()>,
}

impl ToolbarWidget {
    /// Realizes `toolbar` and starts following `store`.
    ///
    /// # Arguments
    ///
    /// * `toolbar` - Toolbar to realize.
    /// * `store` - Store the toolbar reads and dispatches to.
    /// * `columns` - Columns the column menu toggles.
    pub fn new(toolbar: AlbumToolbar, store: ViewModeStore, columns: ColumnVisibility) -> Self {
        let widget = GtkBox::builder().orientation(Vertical).build();
        let toolbar = Rc::new(RefCell::new(toolbar));
        let context = Rc::new(RefCell::new(RealizeContext::new(
            store.clone(),
            Some(columns),
        )));
        rebuild(&widget, &toolbar.borrow(), &context);

        let mut events = store.subscribe();
        let handle = MainContext::default().spawn_local({
            let context = context.clone();
            async move {
                loop {
                    match events.recv().await {
                        Ok(event) => {
                            debug!(current = %event.current, "Restyling view mode toggle");
                            context.borrow().apply_mode(event.current);
                        }
                        Err(Lagged(skipped)) => {
                            debug!(skipped, "Toolbar resyncing after missed events");
                            context.borrow().apply_mode(store.view_mode());
                        }
                        Err(Closed) => break,
                    }
                }
            }
        });

        Self {
            widget,
            toolbar,
            context,
            handle,
        }
    }

    /// Replaces the responsive condition and rebuilds the toolbar.
    pub fn set_responsive(&self, responsive: impl ResponsiveCondition + 'static) {
        self.toolbar.borrow_mut().set_responsive(responsive);
        self.refresh();
    }

    /// Rebuilds the toolbar from the current store state.
    pub fn refresh(&self) {
        rebuild(&self.widget, &self.toolbar.borrow(), &self.context);
    }

    /// Number of toggle buttons currently realized.
    #[must_use]
    pub fn mode_button_count(&self) -> usize {
        self.context.borrow().mode_button_count()
    }

    /// Emphasis currently shown by the toggle button dispatching `action`.
    #[must_use]
    pub fn emphasis(&self, action: ViewModeAction) -> Option<Emphasis> {
        self.context.borrow().emphasis(action)
    }
}

impl Drop for ToolbarWidget {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn rebuild(container: &GtkBox, toolbar: &AlbumToolbar, context: &Rc<RefCell<RealizeContext>>) {
    while let Some(child) = container.first_child() {
        container.remove(&child);
    }

    let fresh = {
        let current = context.borrow();
        RealizeContext::new(current.store.clone(), current.columns.clone())
    };
    let rendered = toolbar.render(&fresh.store);
    container.append(&realize(&rendered, &fresh));
    *context.borrow_mut() = fresh;
}
