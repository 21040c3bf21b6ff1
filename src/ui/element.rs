//! Toolkit-independent render output of toolbar components.
//!
//! Components describe what to show as an `Element` tree. The GTK layer
//! realizes the tree as widgets, and tests inspect it directly.

use std::{collections::BTreeMap, iter::once};

use crate::state::{ViewMode, ViewModeAction, ViewModeEvent, ViewModeStore};

/// Visual emphasis of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emphasis {
    /// Highlighted; marks the active choice.
    Primary,
    /// Plain.
    Secondary,
}

impl Emphasis {
    /// `Primary` when `active`, `Secondary` otherwise.
    #[must_use]
    pub fn for_active(active: bool) -> Self {
        if active {
            Emphasis::Primary
        } else {
            Emphasis::Secondary
        }
    }
}

/// A button that dispatches a view mode action when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonElement {
    /// Visible label.
    pub label: String,
    /// Symbolic icon name.
    pub icon_name: String,
    /// Current emphasis.
    pub emphasis: Emphasis,
    /// Action dispatched on activation.
    pub action: ViewModeAction,
}

impl ButtonElement {
    /// Builds the toggle button for `mode` given the mode currently held.
    #[must_use]
    pub fn for_mode(mode: ViewMode, current: ViewMode) -> Self {
        Self {
            label: mode.label().to_string(),
            icon_name: mode.icon_name().to_string(),
            emphasis: Emphasis::for_active(mode == current),
            action: mode.action(),
        }
    }

    /// Dispatches this button's action.
    pub fn activate(&self, store: &ViewModeStore) -> ViewModeEvent {
        store.dispatch(self.action)
    }
}

/// A menu trigger whose popover shows a top bar above its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuElement {
    /// Resource the menu configures, e.g. `"album"`.
    pub resource: String,
    /// Tooltip of the trigger.
    pub tooltip: String,
    /// Symbolic icon name of the trigger.
    pub icon_name: String,
    /// Component shown above the items.
    pub top_bar: Box<Element>,
    /// Menu entries.
    pub items: Vec<Element>,
}

/// Node of a rendered component tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Horizontal control row above a list.
    Toolbar(Vec<Element>),
    /// Vertical grouping without semantics of its own.
    Container(Vec<Element>),
    /// Output of a filter region collaborator.
    FilterRegion(Box<Element>),
    /// Short heading text.
    Heading(String),
    /// Linked row of buttons.
    ButtonGroup(Vec<ButtonElement>),
    /// Menu trigger with popover content.
    Menu(MenuElement),
    /// Check entry toggling one list column.
    CheckItem {
        /// Field name of the column.
        field: String,
        /// Whether the column is shown.
        active: bool,
    },
    /// Collaborator output this crate does not interpret.
    Opaque {
        /// Name of the fragment.
        name: String,
        /// Free-form attributes.
        attributes: BTreeMap<String, String>,
    },
}

impl Element {
    /// Direct children of this element.
    #[must_use]
    pub fn children(&self) -> Vec<&Element> {
        match self {
            Element::Toolbar(children) | Element::Container(children) => children.iter().collect(),
            Element::FilterRegion(inner) => vec![inner.as_ref()],
            Element::Menu(menu) => once(menu.top_bar.as_ref())
                .chain(menu.items.iter())
                .collect(),
            Element::Heading(_)
            | Element::ButtonGroup(_)
            | Element::CheckItem { .. }
            | Element::Opaque { .. } => Vec::new(),
        }
    }

    /// This element followed by all of its descendants, depth first.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Element> {
        let mut found = vec![self];
        for child in self.children() {
            found.extend(child.descendants());
        }
        found
    }

    /// Every button in the tree, in render order.
    #[must_use]
    pub fn buttons(&self) -> Vec<&ButtonElement> {
        self.descendants()
            .into_iter()
            .filter_map(|element| match element {
                Element::ButtonGroup(buttons) => Some(buttons.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// The first button labelled `label`.
    #[must_use]
    pub fn find_button(&self, label: &str) -> Option<&ButtonElement> {
        self.buttons().into_iter().find(|button| button.label == label)
    }

    /// Returns `true` if the tree contains a menu.
    #[must_use]
    pub fn contains_menu(&self) -> bool {
        self.descendants()
            .iter()
            .any(|element| matches!(element, Element::Menu(_)))
    }

    /// Returns `true` if the tree contains a filter region.
    #[must_use]
    pub fn contains_filter(&self) -> bool {
        self.descendants()
            .iter()
            .any(|element| matches!(element, Element::FilterRegion(_)))
    }
}
