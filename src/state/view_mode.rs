//! Album view mode state with reactive update mechanisms.
//!
//! This module provides the `ViewModeStore` container that holds the
//! grid/table display preference for the album list and notifies
//! subscribers whenever one of its two actions is dispatched.

use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    mem::replace,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering::Relaxed},
    },
};

use {
    parking_lot::RwLock,
    serde::{Deserialize, Serialize},
    tokio::sync::broadcast::{Receiver, Sender, channel},
    tracing::debug,
};

/// View mode for the album list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Grid of album covers (default).
    #[default]
    Grid,
    /// Table with one row per album.
    Table,
}

impl ViewMode {
    /// Label shown on the toggle button selecting this mode.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Grid => "Grid",
            ViewMode::Table => "Table",
        }
    }

    /// Symbolic icon name of the toggle button selecting this mode.
    #[must_use]
    pub fn icon_name(self) -> &'static str {
        match self {
            ViewMode::Grid => "view-grid-symbolic",
            ViewMode::Table => "view-list-symbolic",
        }
    }

    /// The action that switches the store into this mode.
    #[must_use]
    pub fn action(self) -> ViewModeAction {
        match self {
            ViewMode::Grid => ViewModeAction::ShowGrid,
            ViewMode::Table => ViewModeAction::ShowTable,
        }
    }
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// The two actions that can be dispatched to a `ViewModeStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewModeAction {
    /// Switch to the grid layout.
    ShowGrid,
    /// Switch to the table layout.
    ShowTable,
}

impl ViewModeAction {
    /// The mode the store holds after this action is dispatched.
    #[must_use]
    pub fn target(self) -> ViewMode {
        match self {
            ViewModeAction::ShowGrid => ViewMode::Grid,
            ViewModeAction::ShowTable => ViewMode::Table,
        }
    }
}

/// Notification emitted after every dispatched action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewModeEvent {
    /// Mode held before the action.
    pub previous: ViewMode,
    /// Mode held after the action.
    pub current: ViewMode,
}

impl ViewModeEvent {
    /// Returns `true` if the action actually changed the mode.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Handle returned by `ViewModeStore::subscribe_fn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Arc<dyn Fn(ViewModeEvent) + Send + Sync>;

/// Shared container for the album view mode.
///
/// Cloning a store yields another handle to the same state, so a store
/// can be handed to every component that reads or toggles the mode.
#[derive(Clone)]
pub struct ViewModeStore {
    /// Current view mode.
    mode: Arc<RwLock<ViewMode>>,
    /// Synchronous subscribers, called in subscription order.
    subscribers: Arc<RwLock<Vec<(SubscriptionId, Callback)>>>,
    /// Source of subscription identifiers.
    next_id: Arc<AtomicU64>,
    /// Broadcast channel for asynchronous observers.
    event_tx: Sender<ViewModeEvent>,
}

impl ViewModeStore {
    /// Creates a store in the default `Grid` mode.
    #[must_use]
    pub fn new() -> Self {
        Self::with_mode(ViewMode::default())
    }

    /// Creates a store starting in `mode`.
    ///
    /// # Arguments
    ///
    /// * `mode` - Initial view mode.
    #[must_use]
    pub fn with_mode(mode: ViewMode) -> Self {
        let (event_tx, _) = channel(16);

        Self {
            mode: Arc::new(RwLock::new(mode)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
            event_tx,
        }
    }

    /// Gets the current view mode.
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        *self.mode.read()
    }

    /// Switches to the grid layout and notifies subscribers.
    pub fn set_grid(&self) {
        self.dispatch(ViewModeAction::ShowGrid);
    }

    /// Switches to the table layout and notifies subscribers.
    pub fn set_table(&self) {
        self.dispatch(ViewModeAction::ShowTable);
    }

    /// Applies `action` and notifies every subscriber.
    ///
    /// Dispatching the action for the mode already held is a no-op
    /// transition, but subscribers are still notified.
    ///
    /// # Arguments
    ///
    /// * `action` - Action to apply.
    ///
    /// # Returns
    ///
    /// The event delivered to subscribers.
    pub fn dispatch(&self, action: ViewModeAction) -> ViewModeEvent {
        let current = action.target();
        let previous = replace(&mut *self.mode.write(), current);
        let event = ViewModeEvent { previous, current };

        debug!(?action, %previous, %current, "View mode action dispatched");

        // Snapshot so callbacks may subscribe or dispatch without deadlocking
        let callbacks = self
            .subscribers
            .read()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect::<Vec<_>>();
        for callback in callbacks {
            callback(event);
        }

        let _ = self.event_tx.send(event);
        event
    }

    /// Registers a callback invoked after every dispatched action.
    ///
    /// # Arguments
    ///
    /// * `callback` - Function receiving each `ViewModeEvent`.
    ///
    /// # Returns
    ///
    /// A `SubscriptionId` that can be passed to `unsubscribe`.
    pub fn subscribe_fn<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(ViewModeEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Relaxed));
        self.subscribers.write().push((id, Arc::new(callback)));
        id
    }

    /// Removes a previously registered callback.
    ///
    /// # Returns
    ///
    /// `true` if a callback was registered under `id`.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Number of live broadcast receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.event_tx.receiver_count()
    }

    /// Subscribes to view mode events over a broadcast channel.
    ///
    /// # Returns
    ///
    /// A broadcast receiver for view mode events.
    pub fn subscribe(&self) -> Receiver<ViewModeEvent> {
        self.event_tx.subscribe()
    }
}

impl Default for ViewModeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ViewModeStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ViewModeStore")
            .field("mode", &self.view_mode())
            .field("subscribers", &self.subscriber_count())
            .field("receivers", &self.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering::SeqCst},
    };

    use {parking_lot::Mutex, proptest::prelude::*};

    use crate::state::view_mode::{
        ViewMode::{self, Grid, Table},
        ViewModeAction::{self, ShowGrid, ShowTable},
        ViewModeStore,
    };

    #[test]
    fn test_store_defaults_to_grid() {
        let store = ViewModeStore::new();
        assert_eq!(store.view_mode(), Grid);
        assert_eq!(ViewMode::default(), Grid);
    }

    #[test]
    fn test_set_table_then_grid() {
        let store = ViewModeStore::new();

        store.set_table();
        assert_eq!(store.view_mode(), Table);

        store.set_grid();
        assert_eq!(store.view_mode(), Grid);
    }

    #[test]
    fn test_set_grid_is_idempotent() {
        let store = ViewModeStore::new();

        let event = store.dispatch(ShowGrid);
        assert!(!event.changed());
        store.set_grid();
        assert_eq!(store.view_mode(), Grid);
    }

    #[test]
    fn test_clones_share_state() {
        let store = ViewModeStore::new();
        let other = store.clone();

        other.set_table();
        assert_eq!(store.view_mode(), Table);
    }

    #[test]
    fn test_with_mode_sets_initial_state() {
        let store = ViewModeStore::with_mode(Table);
        assert_eq!(store.view_mode(), Table);
    }

    #[test]
    fn test_all_subscribers_notified_before_return() {
        let store = ViewModeStore::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        store.subscribe_fn({
            let first = first.clone();
            move |_| {
                first.fetch_add(1, SeqCst);
            }
        });
        store.subscribe_fn({
            let second = second.clone();
            move |_| {
                second.fetch_add(1, SeqCst);
            }
        });

        store.set_table();
        store.set_table();

        assert_eq!(first.load(SeqCst), 2);
        assert_eq!(second.load(SeqCst), 2);
    }

    #[test]
    fn test_subscriber_receives_transition() {
        let store = ViewModeStore::new();
        let events = Arc::new(Mutex::new(Vec::new()));

        store.subscribe_fn({
            let events = events.clone();
            move |event| events.lock().push(event)
        });

        store.set_table();
        store.set_table();

        let events = events.lock();
        assert_eq!(events.len(), 2);
        assert_eq!((events[0].previous, events[0].current), (Grid, Table));
        assert!(events[0].changed());
        assert!(!events[1].changed());
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = ViewModeStore::new();
        let count = Arc::new(AtomicUsize::new(0));

        let id = store.subscribe_fn({
            let count = count.clone();
            move |_| {
                count.fetch_add(1, SeqCst);
            }
        });
        assert_eq!(store.subscriber_count(), 1);

        store.set_table();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_grid();

        assert_eq!(count.load(SeqCst), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_can_reenter_store() {
        let store = ViewModeStore::new();
        let observed = Arc::new(Mutex::new(None));

        store.subscribe_fn({
            let store = store.clone();
            let observed = observed.clone();
            move |_| *observed.lock() = Some(store.view_mode())
        });

        store.set_table();
        assert_eq!(*observed.lock(), Some(Table));
    }

    #[test]
    fn test_broadcast_subscriber_receives_events() {
        let store = ViewModeStore::new();
        let mut receiver = store.subscribe();

        store.set_table();

        let event = receiver.try_recv().unwrap();
        assert_eq!(event.current, Table);
        assert_eq!(event.previous, Grid);

        assert_eq!(store.receiver_count(), 1);
        drop(receiver);
        assert_eq!(store.receiver_count(), 0);
    }

    #[test]
    fn test_view_mode_presentation() {
        assert_eq!(Grid.to_string(), "Grid");
        assert_eq!(Table.to_string(), "Table");
        assert_eq!(Grid.icon_name(), "view-grid-symbolic");
        assert_eq!(Table.icon_name(), "view-list-symbolic");
        assert_eq!(Table.action(), ShowTable);
        assert_eq!(ShowGrid.target(), Grid);
    }

    #[test]
    fn test_view_mode_serialization() {
        assert_eq!(serde_json::to_string(&Table).unwrap(), "\"table\"");
        assert_eq!(serde_json::from_str::<ViewMode>("\"grid\"").unwrap(), Grid);
    }

    fn action_strategy() -> impl Strategy<Value = ViewModeAction> {
        prop_oneof![Just(ShowGrid), Just(ShowTable)]
    }

    proptest! {
        /// Property: the mode after a sequence equals the last action's target.
        #[test]
        fn last_action_wins(actions in prop::collection::vec(action_strategy(), 0..32)) {
            let store = ViewModeStore::new();
            for action in &actions {
                store.dispatch(*action);
            }

            let expected = actions.last().map_or(Grid, |action| action.target());
            prop_assert_eq!(store.view_mode(), expected);
        }
    }
}
