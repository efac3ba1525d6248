//! The selection/filter state machine.
//!
//! [`ComboController`] owns the filtering state of one editable combo and
//! reacts to [`ComboEvent`]s delivered by its host. It has two modes:
//!
//! - **Idle**: nothing is being typed and the visible items are the original
//!   collection.
//! - **Filtering**: the user is typing; the visible items are the matches for
//!   the typed query.
//!
//! Leaving Filtering always goes through **commit** (accept the current
//! selection) or **cancel** (revert to the last committed selection). Either
//! way the original collection is restored and the text shows the committed
//! item.
//!
//! # Suppression
//!
//! Every write the controller makes to its host is wrapped in a
//! [`SuppressGuard`](horizon_combo_core::SuppressGuard). Notifications that
//! arrive while a guard is raised, whether drained from
//! [`ComboHost::take_notifications`] or delivered by the host through
//! [`handle_event`](ComboController::handle_event) during the write, are
//! recognized as the controller's own echoes and ignored.
//!
//! # Example
//!
//! ```
//! use horizon_combo::{ComboConfig, ComboController, ComboEvent, ComboHost, ItemCollection, Key};
//!
//! #[derive(Default)]
//! struct Widget {
//!     text: String,
//!     open: bool,
//! }
//!
//! impl ComboHost<String> for Widget {
//!     fn set_displayed_text(&mut self, text: &str) { self.text = text.to_string(); }
//!     fn set_caret(&mut self, _caret: usize) {}
//!     fn select_all_text(&mut self) {}
//!     fn set_visible_items(&mut self, _items: ItemCollection<String>) {}
//!     fn set_selected_item(&mut self, _item: Option<String>) {}
//!     fn set_list_open(&mut self, open: bool) { self.open = open; }
//! }
//!
//! let mut widget = Widget::default();
//! let mut combo = ComboController::with_config(ComboConfig::new().with_defer_until_loaded(false));
//!
//! let fruits: ItemCollection<String> =
//!     ["Apple", "Banana", "Cherry"].into_iter().map(String::from).collect();
//! combo.handle_event(&mut widget, ComboEvent::ItemsAssigned(fruits));
//! combo.handle_event(&mut widget, ComboEvent::typed("an"));
//! assert_eq!(combo.visible().as_slice(), &["Banana".to_string()]);
//!
//! combo.handle_event(&mut widget, ComboEvent::KeyPressed(Key::Down));
//! combo.handle_event(&mut widget, ComboEvent::KeyPressed(Key::Enter));
//! assert_eq!(combo.last_committed(), Some(&"Banana".to_string()));
//! assert_eq!(widget.text, "Banana");
//! assert!(!widget.open);
//! ```

use std::fmt;
use std::sync::Arc;

use horizon_combo_core::{
    Channel, DeferredQueue, PerfSpan, Signal, SuppressionFlags, span_names, targets,
};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::ComboConfig;
use crate::display::{DisplayResolver, SelectedValue};
use crate::event::{ComboEvent, FocusOrigin, Key};
use crate::filter::{FilterEngine, ItemCollection};
use crate::host::ComboHost;
use crate::item::ComboItem;

/// Number of grapheme clusters in `text`.
pub(crate) fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Filtering mode of a [`ComboController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// No active edit; the visible items are the original collection.
    #[default]
    Idle,
    /// The user is typing a query.
    Filtering,
}

/// Continuations that run after the current turn.
///
/// Each one re-checks the controller's state when it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deferred {
    /// Leave the initial-load phase.
    MarkReady,
    /// Open the list again if focus handling closed it.
    ReopenList,
}

/// Filtering and selection controller for an editable combo.
///
/// # Signals
///
/// - `filter_changed(String)`: the user typed a new query
/// - `committed(Option<T>)`: a commit finished; carries the committed item
/// - `cancelled(Option<T>)`: a cancel finished; carries the restored item
/// - `cleared(())`: the clear action ran
/// - `list_open_changed(bool)`: the list presentation opened or closed
/// - `clear_available_changed(bool)`: a selection appeared or went away
pub struct ComboController<T> {
    config: ComboConfig,
    resolver: DisplayResolver<T>,
    engine: FilterEngine,

    /// Collection last assigned by the host.
    original: ItemCollection<T>,
    /// Collection currently shown; `original` itself when unfiltered.
    visible: ItemCollection<T>,

    selected: Option<T>,
    /// Row of `selected` in `visible`. Equal items may share a display, so
    /// the row is tracked rather than looked up.
    active_index: Option<usize>,
    last_committed: Option<T>,

    mode: FilterMode,
    query_text: String,
    /// Caret position in `query_text`, in grapheme clusters.
    caret: usize,
    keyboard_navigating: bool,

    list_open: bool,
    has_focus: bool,
    ready: bool,
    clear_available: bool,

    flags: Arc<SuppressionFlags>,
    deferred: DeferredQueue<Deferred>,

    // Signals
    /// Signal emitted when the user types a new query.
    pub filter_changed: Signal<String>,
    /// Signal emitted after a commit.
    pub committed: Signal<Option<T>>,
    /// Signal emitted after a cancel.
    pub cancelled: Signal<Option<T>>,
    /// Signal emitted after the clear action.
    pub cleared: Signal<()>,
    /// Signal emitted when the list presentation opens or closes.
    pub list_open_changed: Signal<bool>,
    /// Signal emitted when the clear affordance becomes available or not.
    pub clear_available_changed: Signal<bool>,
}

impl<T> ComboController<T>
where
    T: ComboItem + Clone + PartialEq + 'static,
{
    /// Create a controller with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ComboConfig::default())
    }

    /// Create a controller from a configuration.
    pub fn with_config(config: ComboConfig) -> Self {
        let mut resolver = DisplayResolver::new();
        resolver.set_display_path(config.display_path.clone());
        resolver.set_value_path(config.value_path.clone());
        let original = ItemCollection::empty();

        Self {
            ready: !config.defer_until_loaded,
            config,
            resolver,
            engine: FilterEngine::new(),
            visible: original.clone(),
            original,
            selected: None,
            active_index: None,
            last_committed: None,
            mode: FilterMode::Idle,
            query_text: String::new(),
            caret: 0,
            keyboard_navigating: false,
            list_open: false,
            has_focus: false,
            clear_available: false,
            flags: Arc::new(SuppressionFlags::new()),
            deferred: DeferredQueue::new(),
            filter_changed: Signal::new(),
            committed: Signal::new(),
            cancelled: Signal::new(),
            cleared: Signal::new(),
            list_open_changed: Signal::new(),
            clear_available_changed: Signal::new(),
        }
    }

    /// Set an explicit display projection using builder pattern.
    pub fn with_display_fn<F>(mut self, projection: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.resolver.set_display_fn(projection);
        self
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The active configuration.
    pub fn config(&self) -> &ComboConfig {
        &self.config
    }

    /// The display resolver.
    pub fn resolver(&self) -> &DisplayResolver<T> {
        &self.resolver
    }

    /// Change the display path. Takes effect on the next resolution.
    pub fn set_display_path(&mut self, path: Option<String>) {
        self.resolver.set_display_path(path);
        self.config.display_path = self.resolver.display_path().map(str::to_string);
    }

    /// Change the value path. Takes effect on the next resolution.
    pub fn set_value_path(&mut self, path: Option<String>) {
        self.resolver.set_value_path(path);
        self.config.value_path = self.resolver.value_path().map(str::to_string);
    }

    /// Use an explicit display projection instead of the display path.
    pub fn set_display_fn<F>(&mut self, projection: F)
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.resolver.set_display_fn(projection);
    }

    /// Drop the explicit display projection and fall back to the display path.
    pub fn clear_display_fn(&mut self) {
        self.resolver.clear_display_fn();
    }

    // =========================================================================
    // State
    // =========================================================================

    /// The full collection assigned by the host.
    pub fn original(&self) -> &ItemCollection<T> {
        &self.original
    }

    /// The collection currently shown in the list.
    pub fn visible(&self) -> &ItemCollection<T> {
        &self.visible
    }

    /// Returns `true` if a filter narrows the visible collection.
    pub fn is_filter_active(&self) -> bool {
        !self.visible.same_as(&self.original)
    }

    /// The current selection.
    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    /// Position of the selection in the visible collection.
    pub fn selected_index(&self) -> Option<usize> {
        self.active_index
    }

    /// The most recently confirmed selection.
    pub fn last_committed(&self) -> Option<&T> {
        self.last_committed.as_ref()
    }

    /// The value companion of the current selection.
    pub fn selected_value(&self) -> Option<SelectedValue<T>> {
        self.resolver.selected_value(self.selected.as_ref())
    }

    /// Display text of `item` under the current projection.
    pub fn display_text(&self, item: Option<&T>) -> String {
        self.resolver.display_text(item)
    }

    /// The current mode.
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// The query typed so far. Empty unless filtering.
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    /// Caret position in the query, in grapheme clusters.
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Returns `true` while an arrow-key step is being applied.
    pub fn is_keyboard_navigating(&self) -> bool {
        self.keyboard_navigating
    }

    /// Returns `true` if the list presentation is open.
    pub fn is_list_open(&self) -> bool {
        self.list_open
    }

    /// Returns `true` if the text surface has keyboard focus.
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Returns `true` once the initial-load phase is over.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Returns `true` if the clear affordance should be shown.
    pub fn is_clear_available(&self) -> bool {
        self.clear_available
    }

    /// The suppression flags guarding this controller's writes.
    pub fn suppression_flags(&self) -> &Arc<SuppressionFlags> {
        &self.flags
    }

    /// Number of continuations waiting for [`process_deferred`](Self::process_deferred).
    pub fn pending_deferred(&self) -> usize {
        self.deferred.pending_count()
    }

    // =========================================================================
    // Event Dispatch
    // =========================================================================

    /// Handle one event from the host.
    ///
    /// Returns `true` if the event was consumed and the host should not
    /// process it further. Only keys and the clear action are ever consumed.
    pub fn handle_event<H>(&mut self, host: &mut H, event: ComboEvent<T>) -> bool
    where
        H: ComboHost<T> + ?Sized,
    {
        let _span = PerfSpan::new(span_names::DISPATCH);
        self.dispatch(host, event)
    }

    /// Run the continuations that were pending when this call began.
    ///
    /// Hosts call this once per turn, after the turn's events are handled.
    /// Returns the number of continuations run.
    pub fn process_deferred<H>(&mut self, host: &mut H) -> usize
    where
        H: ComboHost<T> + ?Sized,
    {
        let batch = self.deferred.take_batch();
        let count = batch.len();
        for task in batch {
            self.run_deferred(host, task);
        }
        count
    }

    fn dispatch<H>(&mut self, host: &mut H, event: ComboEvent<T>) -> bool
    where
        H: ComboHost<T> + ?Sized,
    {
        tracing::trace!(
            target: targets::CONTROLLER,
            event = event.name(),
            mode = ?self.mode,
            "dispatch"
        );

        match event {
            ComboEvent::ItemsAssigned(items) => {
                self.on_items_assigned(host, items);
                false
            }
            ComboEvent::TextEdited { text, caret } => {
                self.on_text_edited(host, text, caret);
                false
            }
            ComboEvent::KeyPressed(key) => self.on_key_pressed(host, key),
            ComboEvent::SelectionChanged(item) => {
                self.on_selection_changed(host, item);
                false
            }
            ComboEvent::ListOpened => {
                self.set_list_state(true);
                false
            }
            ComboEvent::ListClosed => {
                self.set_list_state(false);
                self.finish_list_cycle(host);
                false
            }
            ComboEvent::FocusGained(origin) => {
                self.on_focus_gained(host, origin);
                false
            }
            ComboEvent::FocusLost => {
                self.on_focus_lost(host);
                false
            }
            ComboEvent::ClearRequested => {
                self.clear(host);
                true
            }
            ComboEvent::Loaded => {
                if !self.ready {
                    self.post_deferred(Deferred::MarkReady);
                }
                false
            }
        }
    }

    /// Dispatch notifications the host raised during a write.
    fn drain_echoes<H>(&mut self, host: &mut H)
    where
        H: ComboHost<T> + ?Sized,
    {
        for echo in host.take_notifications() {
            self.dispatch(host, echo);
        }
    }

    fn post_deferred(&mut self, task: Deferred) {
        if !self.deferred.contains(&task) {
            self.deferred.post(task);
        }
    }

    fn run_deferred<H>(&mut self, host: &mut H, task: Deferred)
    where
        H: ComboHost<T> + ?Sized,
    {
        match task {
            Deferred::MarkReady => {
                if !self.ready {
                    self.ready = true;
                    tracing::debug!(target: targets::CONTROLLER, "ready");
                }
            }
            Deferred::ReopenList => {
                if self.ready && self.has_focus && self.mode == FilterMode::Idle && !self.list_open
                {
                    self.open_list(host);
                } else {
                    tracing::trace!(target: targets::CONTROLLER, "reopen no longer applies");
                }
            }
        }
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    fn on_items_assigned<H>(&mut self, host: &mut H, items: ItemCollection<T>)
    where
        H: ComboHost<T> + ?Sized,
    {
        if self.flags.is_suppressed(Channel::Selection) {
            tracing::trace!(target: targets::CONTROLLER, "ignoring item swap echo");
            return;
        }

        self.original = items;
        tracing::debug!(target: targets::CONTROLLER, count = self.original.len(), "items assigned");

        let stale = self
            .last_committed
            .as_ref()
            .is_some_and(|item| !self.original.contains_item(item));
        if stale {
            tracing::trace!(target: targets::CONTROLLER, "committed item no longer assigned");
            self.last_committed = None;
        }

        match self.mode {
            FilterMode::Idle => {
                let original = self.original.clone();
                self.swap_visible(host, original);
            }
            FilterMode::Filtering => {
                let visible = self
                    .engine
                    .filter(&self.original, &self.query_text, &self.resolver);
                self.swap_visible(host, visible);
                self.reassert_query(host);
            }
        }
    }

    fn on_text_edited<H>(&mut self, host: &mut H, text: String, caret: usize)
    where
        H: ComboHost<T> + ?Sized,
    {
        if self.flags.is_suppressed(Channel::Text) {
            tracing::trace!(target: targets::CONTROLLER, "ignoring text echo");
            return;
        }
        if !self.ready {
            tracing::trace!(target: targets::CONTROLLER, "ignoring text before ready");
            return;
        }

        self.mode = FilterMode::Filtering;
        self.caret = caret.min(grapheme_len(&text));
        self.query_text = text;

        let visible = self
            .engine
            .filter(&self.original, &self.query_text, &self.resolver);
        self.swap_visible(host, visible);
        self.reassert_query(host);
        self.filter_changed.emit(self.query_text.clone());

        if self.config.open_on_type && !self.list_open {
            self.open_list(host);
            // Opening may have reset the displayed text.
            self.reassert_query(host);
        }
    }

    fn on_key_pressed<H>(&mut self, host: &mut H, key: Key) -> bool
    where
        H: ComboHost<T> + ?Sized,
    {
        match key {
            Key::Up | Key::Down => self.step_selection(host, key),
            Key::Enter => {
                self.commit(host);
                self.close_list(host);
                true
            }
            Key::Tab => {
                self.commit(host);
                self.close_list(host);
                false
            }
            Key::Escape => {
                self.cancel(host);
                self.close_list(host);
                true
            }
            Key::Other => false,
        }
    }

    /// Move the selection one row without committing it.
    fn step_selection<H>(&mut self, host: &mut H, key: Key) -> bool
    where
        H: ComboHost<T> + ?Sized,
    {
        if !self.list_open {
            return false;
        }
        let count = self.visible.len();
        if count == 0 {
            return true;
        }

        self.keyboard_navigating = true;

        let next = match (self.active_index.filter(|&index| index < count), key) {
            (Some(index), Key::Down) => (index + 1).min(count - 1),
            (Some(index), _) => index.saturating_sub(1),
            (None, _) => 0,
        };
        self.write_selection_at(host, next);

        match self.mode {
            FilterMode::Filtering => {
                self.caret = grapheme_len(&self.query_text);
                self.reassert_query(host);
            }
            FilterMode::Idle => {
                let text = self.resolver.display_text(self.selected.as_ref());
                self.write_text(host, &text);
            }
        }

        self.keyboard_navigating = false;
        true
    }

    fn on_selection_changed<H>(&mut self, host: &mut H, item: Option<T>)
    where
        H: ComboHost<T> + ?Sized,
    {
        if self.flags.is_suppressed(Channel::Selection) {
            tracing::trace!(target: targets::CONTROLLER, "ignoring selection echo");
            return;
        }

        self.active_index = item.as_ref().and_then(|item| self.visible.position(item));
        self.selected = item;
        self.refresh_clear_available();

        // A click on a narrowed row confirms it.
        if self.mode == FilterMode::Filtering
            && !self.keyboard_navigating
            && self.selected.is_some()
        {
            self.commit(host);
        }
    }

    fn on_focus_gained<H>(&mut self, host: &mut H, origin: FocusOrigin)
    where
        H: ComboHost<T> + ?Sized,
    {
        self.has_focus = true;
        if origin == FocusOrigin::TextSurface {
            return;
        }
        if !self.ready {
            tracing::trace!(target: targets::CONTROLLER, "focus during initial load");
            return;
        }

        if self.mode == FilterMode::Idle && self.selected.is_some() {
            self.last_committed = self.selected.clone();
        }

        if self.config.open_on_focus {
            self.open_list(host);
            self.post_deferred(Deferred::ReopenList);
        }
        if self.config.select_all_on_focus {
            host.select_all_text();
        }
    }

    fn on_focus_lost<H>(&mut self, host: &mut H)
    where
        H: ComboHost<T> + ?Sized,
    {
        self.has_focus = false;
        if self.list_open || self.mode == FilterMode::Filtering {
            self.close_list(host);
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Accept the current selection and leave filtering.
    ///
    /// With nothing selected, the last committed item is reselected. The
    /// original collection is restored and the text shows the committed
    /// item. Calling this twice in a row is the same as calling it once.
    pub fn commit<H>(&mut self, host: &mut H)
    where
        H: ComboHost<T> + ?Sized,
    {
        self.mode = FilterMode::Idle;

        if self.selected.is_some() {
            self.last_committed = self.selected.clone();
        } else if self.last_committed.is_some() {
            self.restore_original(host);
            self.write_selection(host, self.last_committed.clone());
        }

        self.restore_original(host);
        let text = self.resolver.display_text(self.last_committed.as_ref());
        self.write_text(host, &text);
        self.query_text.clear();
        self.caret = 0;

        tracing::debug!(target: targets::CONTROLLER, text = %text, "commit");
        self.committed.emit(self.last_committed.clone());
    }

    /// Discard the query and revert to the last committed selection.
    ///
    /// With no committed selection, the selection is cleared.
    pub fn cancel<H>(&mut self, host: &mut H)
    where
        H: ComboHost<T> + ?Sized,
    {
        self.mode = FilterMode::Idle;

        self.restore_original(host);
        self.write_selection(host, self.last_committed.clone());
        let text = self.resolver.display_text(self.last_committed.as_ref());
        self.write_text(host, &text);
        self.query_text.clear();
        self.caret = 0;

        tracing::debug!(target: targets::CONTROLLER, text = %text, "cancel");
        self.cancelled.emit(self.last_committed.clone());
    }

    /// Forget the selection entirely.
    ///
    /// Clears the query, the selection and the committed selection, restores
    /// the original collection, blanks the text and closes the list.
    pub fn clear<H>(&mut self, host: &mut H)
    where
        H: ComboHost<T> + ?Sized,
    {
        self.mode = FilterMode::Idle;
        self.query_text.clear();
        self.caret = 0;
        self.keyboard_navigating = false;
        self.last_committed = None;

        self.restore_original(host);
        self.write_selection(host, None);
        self.write_text(host, "");
        self.close_list(host);

        tracing::debug!(target: targets::CONTROLLER, "clear");
        self.cleared.emit(());
    }

    /// Open the list presentation if it is closed.
    pub fn open_list<H>(&mut self, host: &mut H)
    where
        H: ComboHost<T> + ?Sized,
    {
        if self.list_open {
            return;
        }
        self.set_list_state(true);
        self.write_list_open(host, true);
    }

    /// Close the list presentation.
    ///
    /// A filter still in progress is cancelled. Afterwards the controller is
    /// Idle with the original collection visible, whatever state it was in.
    pub fn close_list<H>(&mut self, host: &mut H)
    where
        H: ComboHost<T> + ?Sized,
    {
        if self.list_open {
            self.set_list_state(false);
            self.write_list_open(host, false);
        }
        self.finish_list_cycle(host);
    }

    // =========================================================================
    // Host Writes
    // =========================================================================

    fn finish_list_cycle<H>(&mut self, host: &mut H)
    where
        H: ComboHost<T> + ?Sized,
    {
        if self.mode == FilterMode::Filtering {
            tracing::debug!(target: targets::CONTROLLER, "list closed while filtering");
            self.cancel(host);
        }
        self.mode = FilterMode::Idle;
        self.keyboard_navigating = false;
        self.query_text.clear();
        self.restore_original(host);
    }

    fn restore_original<H>(&mut self, host: &mut H)
    where
        H: ComboHost<T> + ?Sized,
    {
        let original = self.original.clone();
        self.swap_visible(host, original);
    }

    /// Show `visible` in the list, keeping the selection a visible row.
    fn swap_visible<H>(&mut self, host: &mut H, visible: ItemCollection<T>)
    where
        H: ComboHost<T> + ?Sized,
    {
        if visible.same_as(&self.visible) {
            return;
        }

        {
            let _guards = self.flags.suppress_all();
            self.visible = visible.clone();
            host.set_visible_items(visible);
            self.drain_echoes(host);
        }

        // Rows moved, so find the selection again.
        self.active_index = self
            .selected
            .as_ref()
            .and_then(|item| self.visible.position(item));
        if self.selected.is_some() && self.active_index.is_none() {
            tracing::trace!(target: targets::CONTROLLER, "selection filtered out");
            self.write_selection(host, None);
        }
    }

    fn write_selection<H>(&mut self, host: &mut H, item: Option<T>)
    where
        H: ComboHost<T> + ?Sized,
    {
        let index = item.as_ref().and_then(|item| self.visible.position(item));
        self.apply_selection(host, item, index);
    }

    /// Select the visible row at `index`.
    fn write_selection_at<H>(&mut self, host: &mut H, index: usize)
    where
        H: ComboHost<T> + ?Sized,
    {
        let item = self.visible[index].clone();
        self.apply_selection(host, Some(item), Some(index));
    }

    fn apply_selection<H>(&mut self, host: &mut H, item: Option<T>, index: Option<usize>)
    where
        H: ComboHost<T> + ?Sized,
    {
        {
            // The host's text mirrors its selection, so both channels echo.
            let _guards = self.flags.suppress_all();
            self.selected = item.clone();
            self.active_index = index;
            host.set_selected_item(item);
            self.drain_echoes(host);
        }
        self.refresh_clear_available();
    }

    fn write_text<H>(&mut self, host: &mut H, text: &str)
    where
        H: ComboHost<T> + ?Sized,
    {
        let _text = self.flags.suppress(Channel::Text);
        host.set_displayed_text(text);
        self.drain_echoes(host);
    }

    fn write_list_open<H>(&mut self, host: &mut H, open: bool)
    where
        H: ComboHost<T> + ?Sized,
    {
        // Toolkits rewrite the text when the popup toggles.
        let _text = self.flags.suppress(Channel::Text);
        host.set_list_open(open);
        self.drain_echoes(host);
    }

    /// Put the typed query and caret back into the text surface.
    fn reassert_query<H>(&mut self, host: &mut H)
    where
        H: ComboHost<T> + ?Sized,
    {
        let _text = self.flags.suppress(Channel::Text);
        host.set_displayed_text(&self.query_text);
        host.set_caret(self.caret);
        self.drain_echoes(host);
    }

    fn set_list_state(&mut self, open: bool) {
        if self.list_open != open {
            self.list_open = open;
            self.list_open_changed.emit(open);
        }
    }

    fn refresh_clear_available(&mut self) {
        let available = self.selected.is_some();
        if self.clear_available != available {
            self.clear_available = available;
            self.clear_available_changed.emit(available);
        }
    }
}

impl<T> Default for ComboController<T>
where
    T: ComboItem + Clone + PartialEq + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ComboController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComboController")
            .field("mode", &self.mode)
            .field("query_text", &self.query_text)
            .field("original", &self.original.len())
            .field("visible", &self.visible.len())
            .field("has_selection", &self.selected.is_some())
            .field("list_open", &self.list_open)
            .field("ready", &self.ready)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(ComboController<String>: Send, Sync);
