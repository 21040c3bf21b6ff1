//! Behavioural tests of the album toolbar against a real store.

#[cfg(test)]
mod album_toolbar_tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering::SeqCst},
    };

    use proptest::prelude::*;

    use crate::{
        config::ToolbarSettings,
        state::{
            ViewMode::{self, Grid, Table},
            ViewModeStore,
        },
        ui::{
            collaborators::{Breakpoint, FilterParams, SearchFilter, ViewportWidth},
            element::{
                Element,
                Emphasis::{self, Primary, Secondary},
            },
            toolbar::{
                AlbumToolbar, AlbumToolbarBuilder, ListContext, Pagination, Sort, SortOrder,
            },
        },
    };

    fn wide_toolbar() -> AlbumToolbar {
        AlbumToolbar::builder()
            .responsive(|_: Breakpoint| true)
            .build()
    }

    fn emphasis_of(rendered: &Element, label: &str) -> Option<Emphasis> {
        rendered.find_button(label).map(|button| button.emphasis)
    }

    #[test]
    fn test_initial_render_emphasizes_grid() {
        let store = ViewModeStore::new();
        let rendered = wide_toolbar().render(&store);

        assert_eq!(emphasis_of(&rendered, "Grid"), Some(Primary));
        assert_eq!(emphasis_of(&rendered, "Table"), Some(Secondary));
    }

    #[test]
    fn test_set_table_swaps_emphasis() {
        let store = ViewModeStore::new();
        let toolbar = wide_toolbar();

        store.set_table();
        assert_eq!(store.view_mode(), Table);

        let rendered = toolbar.render(&store);
        assert_eq!(emphasis_of(&rendered, "Table"), Some(Primary));
        assert_eq!(emphasis_of(&rendered, "Grid"), Some(Secondary));
    }

    #[test]
    fn test_narrow_viewport_renders_only_filter() {
        let store = ViewModeStore::new();
        let toolbar = AlbumToolbar::builder()
            .filter(SearchFilter::new("search"))
            .responsive(ViewportWidth::new(320))
            .build();

        let rendered = toolbar.render(&store);
        let Element::Toolbar(children) = &rendered else {
            panic!("expected a toolbar");
        };
        assert_eq!(children.len(), 1);
        assert!(matches!(children[0], Element::FilterRegion(_)));
        assert!(!rendered.contains_menu());
        assert!(rendered.buttons().is_empty());
    }

    #[test]
    fn test_without_filter_renders_only_menu() {
        let store = ViewModeStore::new();
        let rendered = wide_toolbar().render(&store);

        let Element::Toolbar(children) = &rendered else {
            panic!("expected a toolbar");
        };
        assert_eq!(children.len(), 1);
        assert!(matches!(children[0], Element::Menu(_)));
        assert!(!rendered.contains_filter());
    }

    #[test]
    fn test_filter_rendered_in_button_context() {
        let mut params = FilterParams::new("album");
        params.show_filter = false;
        params
            .displayed_filters
            .insert("name".to_string(), true);

        let toolbar = AlbumToolbar::builder()
            .filter(SearchFilter::new("search"))
            .filter_params(params)
            .build();
        let rendered = toolbar.render_with_mode(Grid);

        let Element::Toolbar(children) = &rendered else {
            panic!("expected a toolbar");
        };
        let Element::FilterRegion(inner) = &children[0] else {
            panic!("expected the filter region first");
        };
        let Element::Opaque { attributes, .. } = inner.as_ref() else {
            panic!("expected the search fragment");
        };
        assert_eq!(attributes.get("context").map(String::as_str), Some("button"));
        assert_eq!(attributes.get("show_filter").map(String::as_str), Some("false"));
    }

    #[test]
    fn test_menu_is_for_album_resource() {
        let rendered = wide_toolbar().render_with_mode(Grid);

        let Some(Element::Menu(menu)) = rendered
            .descendants()
            .into_iter()
            .find(|element| matches!(element, Element::Menu(_)))
        else {
            panic!("expected a menu");
        };
        assert_eq!(menu.resource, "album");
        assert_eq!(menu.top_bar.buttons().len(), 2);
        assert!(!menu.items.is_empty());
    }

    #[test]
    fn test_clicking_active_button_is_harmless() {
        let store = ViewModeStore::new();
        let toolbar = wide_toolbar();
        let notified = Arc::new(AtomicUsize::new(0));
        store.subscribe_fn({
            let notified = notified.clone();
            move |_| {
                notified.fetch_add(1, SeqCst);
            }
        });

        let rendered = toolbar.render(&store);
        let event = rendered.find_button("Grid").unwrap().activate(&store);

        assert!(!event.changed());
        assert_eq!(store.view_mode(), Grid);
        assert_eq!(notified.load(SeqCst), 1);
        assert_eq!(toolbar.render(&store), rendered);
    }

    #[test]
    fn test_list_context_has_no_effect() {
        let mut toolbar = wide_toolbar();
        let before = toolbar.render_with_mode(Table);

        let context = ListContext {
            selected_ids: vec!["al-1".to_string(), "al-2".to_string()],
            sort: Some(Sort {
                field: "name".to_string(),
                order: SortOrder::Desc,
            }),
            pagination: Some(Pagination {
                page: 2,
                per_page: 15,
                total: Some(40),
            }),
        };
        toolbar.set_list_context(context.clone());

        assert_eq!(toolbar.list_context(), &context);
        assert_eq!(toolbar.render_with_mode(Table), before);
    }

    #[test]
    fn test_translated_heading_from_settings() {
        let mut settings = ToolbarSettings::default();
        settings.locale = Some("de".to_string());
        settings
            .messages
            .insert("toggle_fields_menu.columns".to_string(), "Felder".to_string());

        let rendered = AlbumToolbarBuilder::from_settings(&settings)
            .build()
            .render_with_mode(Grid);

        assert!(
            rendered
                .descendants()
                .contains(&&Element::Heading("Ansicht".to_string()))
        );
        let Element::Toolbar(children) = &rendered else {
            panic!("expected a toolbar");
        };
        let Element::Menu(menu) = &children[0] else {
            panic!("expected a menu");
        };
        assert_eq!(menu.tooltip, "Felder");
        assert_eq!(menu.items.len(), settings.album_columns.len());
    }

    fn mode_strategy() -> impl Strategy<Value = ViewMode> {
        prop_oneof![Just(Grid), Just(Table)]
    }

    proptest! {
        /// Property: exactly the button of the current mode is primary.
        #[test]
        fn emphasis_mirrors_state(modes in prop::collection::vec(mode_strategy(), 1..16)) {
            let store = ViewModeStore::new();
            let toolbar = wide_toolbar();

            for mode in modes {
                store.dispatch(mode.action());
                let rendered = toolbar.render(&store);

                let primaries = rendered
                    .buttons()
                    .into_iter()
                    .filter(|button| button.emphasis == Primary)
                    .map(|button| button.label.clone())
                    .collect::<Vec<_>>();
                prop_assert_eq!(primaries, vec![mode.label().to_string()]);
            }
        }

        /// Property: below the small breakpoint no toggle is rendered.
        #[test]
        fn narrow_viewport_never_shows_toggle(
            width in 0u32..600,
            modes in prop::collection::vec(mode_strategy(), 0..8),
        ) {
            let store = ViewModeStore::new();
            let toolbar = AlbumToolbar::builder()
                .responsive(ViewportWidth::new(width))
                .build();

            for mode in modes {
                store.dispatch(mode.action());
            }
            let rendered = toolbar.render(&store);

            prop_assert!(!rendered.contains_menu());
            prop_assert!(rendered.buttons().is_empty());
        }
    }
}

#[cfg(all(test, feature = "gui"))]
mod widget_tests {
    use libadwaita::{
        glib::MainContext,
        gtk::Button,
        init,
        prelude::{ButtonExt, Cast, WidgetExt},
    };

    use crate::{
        state::{
            ColumnVisibility,
            ViewMode::{Grid, Table},
            ViewModeAction::{ShowGrid, ShowTable},
            ViewModeStore,
        },
        ui::{
            album_list::{AlbumListView, page_name},
            collaborators::{Breakpoint, ToggleFieldsMenu},
            element::{
                ButtonElement, Element,
                Emphasis::{Primary, Secondary},
            },
            toolbar::AlbumToolbar,
            widgets::{RealizeContext, ToolbarWidget, realize},
        },
    };

    fn run_pending() {
        let context = MainContext::default();
        while context.iteration(false) {}
    }

    // GTK may only be initialized from one thread, so every widget check
    // lives in this single test.
    #[test]
    fn test_realized_toolbar_follows_store() {
        // Skip this test if we can't initialize GTK (e.g., in CI environments)
        if init().is_err() {
            return;
        }

        let store = ViewModeStore::new();

        // Toggle buttons dispatch and carry emphasis
        let context = RealizeContext::new(store.clone(), None);
        let button = realize(
            &Element::ButtonGroup(vec![ButtonElement::for_mode(Table, Grid)]),
            &context,
        );
        assert!(button.first_child().is_some());
        assert_eq!(context.mode_button_count(), 1);
        let table_button = button
            .first_child()
            .and_then(|child| child.downcast::<Button>().ok())
            .unwrap();
        assert!(!table_button.has_css_class("suggested-action"));
        table_button.emit_clicked();
        assert_eq!(store.view_mode(), Table);
        context.apply_mode(Table);
        assert!(table_button.has_css_class("suggested-action"));
        store.set_grid();

        // Toolbar widget rebuilds on viewport changes
        let columns = ColumnVisibility::new("album", ["artist", "year"]);
        let toolbar = AlbumToolbar::builder()
            .column_menu(ToggleFieldsMenu::new(columns.clone()))
            .responsive(|_: Breakpoint| true)
            .build();
        let widget = ToolbarWidget::new(toolbar, store.clone(), columns);
        assert_eq!(widget.mode_button_count(), 2);

        widget.set_responsive(|_: Breakpoint| false);
        assert_eq!(widget.mode_button_count(), 0);
        widget.set_responsive(|_: Breakpoint| true);
        assert_eq!(widget.mode_button_count(), 2);

        // Album list starts on the page of the current mode
        let list = AlbumListView::new(store.clone());
        assert_eq!(list.visible_page().as_deref(), Some(page_name(Grid)));
        assert_eq!(widget.emphasis(ShowGrid), Some(Primary));
        assert_eq!(widget.emphasis(ShowTable), Some(Secondary));

        // Store changes restyle the toolbar and switch the list page
        store.set_table();
        run_pending();
        assert_eq!(widget.emphasis(ShowTable), Some(Primary));
        assert_eq!(widget.emphasis(ShowGrid), Some(Secondary));
        assert_eq!(list.visible_page().as_deref(), Some("table"));

        store.set_grid();
        run_pending();
        assert_eq!(widget.emphasis(ShowGrid), Some(Primary));
        assert_eq!(list.visible_page().as_deref(), Some("grid"));

        // Dropping the views releases their receivers
        let receivers = store.receiver_count();
        drop(widget);
        drop(list);
        run_pending();
        assert_eq!(store.receiver_count(), receivers - 2);
    }
}
