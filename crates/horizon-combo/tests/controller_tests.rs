//! Integration tests for the combo controller.
//!
//! The host used here behaves like a retained-mode toolkit: every write
//! raises the change notifications a real widget would, and swapping the
//! item source or opening the popup clobbers the displayed text. The
//! controller must tell those echoes apart from user input.

use std::sync::Arc;

use horizon_combo::{
    Channel, ComboConfig, ComboController, ComboEvent, ComboHost, ComboItem, FieldValue,
    FilterMode, FocusOrigin, ItemCollection, Key, SelectedValue, Signal,
};
use parking_lot::Mutex;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("horizon_combo=trace")
        .try_init();
}

#[derive(Debug, Clone, PartialEq)]
struct Fruit {
    id: i64,
    name: &'static str,
}

impl ComboItem for Fruit {
    fn display_string(&self) -> String {
        format!("Fruit#{}", self.id)
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "Id" => Some(self.id.into()),
            "Name" => Some(self.name.into()),
            _ => None,
        }
    }
}

const ALPHA: Fruit = Fruit { id: 1, name: "Alpha" };
const BETA: Fruit = Fruit { id: 2, name: "Beta" };
const GAMMA: Fruit = Fruit { id: 3, name: "Gamma" };

fn fruits() -> ItemCollection<Fruit> {
    ItemCollection::from(vec![ALPHA, BETA, GAMMA])
}

/// A host that raises notifications from inside its writes.
#[derive(Default)]
struct EchoHost {
    text: String,
    caret: usize,
    items: ItemCollection<Fruit>,
    selected: Option<Fruit>,
    open: bool,
    select_all: usize,
    pending: Vec<ComboEvent<Fruit>>,
}

impl EchoHost {
    fn change_text(&mut self, text: String) {
        if self.text != text {
            let caret = text.chars().count();
            self.text = text.clone();
            self.pending.push(ComboEvent::TextEdited { text, caret });
        }
    }

    fn selected_name(&self) -> String {
        self.selected
            .as_ref()
            .map(|fruit| fruit.name.to_string())
            .unwrap_or_default()
    }
}

impl ComboHost<Fruit> for EchoHost {
    fn set_displayed_text(&mut self, text: &str) {
        self.change_text(text.to_string());
    }

    fn set_caret(&mut self, caret: usize) {
        self.caret = caret;
    }

    fn select_all_text(&mut self) {
        self.select_all += 1;
    }

    fn set_visible_items(&mut self, items: ItemCollection<Fruit>) {
        self.items = items.clone();
        self.pending.push(ComboEvent::ItemsAssigned(items));
        if self
            .selected
            .as_ref()
            .is_some_and(|fruit| !self.items.contains_item(fruit))
        {
            self.selected = None;
            self.pending.push(ComboEvent::SelectionChanged(None));
        }
        self.change_text(String::new());
    }

    fn set_selected_item(&mut self, item: Option<Fruit>) {
        if self.selected != item {
            self.selected = item.clone();
            self.pending.push(ComboEvent::SelectionChanged(item));
            let name = self.selected_name();
            self.change_text(name);
        }
    }

    fn set_list_open(&mut self, open: bool) {
        if self.open != open {
            self.open = open;
            self.pending.push(if open {
                ComboEvent::ListOpened
            } else {
                ComboEvent::ListClosed
            });
            if open {
                let name = self.selected_name();
                self.change_text(name);
            }
        }
    }

    fn take_notifications(&mut self) -> Vec<ComboEvent<Fruit>> {
        std::mem::take(&mut self.pending)
    }
}

fn record<A: Clone + Send + 'static>(signal: &Signal<A>) -> Arc<Mutex<Vec<A>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    signal.connect(move |value: &A| sink.lock().push(value.clone()));
    log
}

struct Harness {
    combo: ComboController<Fruit>,
    host: EchoHost,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(
            ComboConfig::new()
                .with_display_path("Name")
                .with_value_path("Id")
                .with_defer_until_loaded(false),
        )
    }

    fn with_config(config: ComboConfig) -> Self {
        init_tracing();
        let mut harness = Self {
            combo: ComboController::with_config(config),
            host: EchoHost::default(),
        };
        harness.send(ComboEvent::ItemsAssigned(fruits()));
        harness
    }

    fn send(&mut self, event: ComboEvent<Fruit>) -> bool {
        self.combo.handle_event(&mut self.host, event)
    }

    /// The user types `text` into the editable surface.
    fn type_text(&mut self, text: &str) {
        self.host.text = text.to_string();
        self.send(ComboEvent::typed(text));
    }

    fn press(&mut self, key: Key) -> bool {
        self.send(ComboEvent::KeyPressed(key))
    }

    /// The user clicks a row in the list.
    fn click(&mut self, fruit: Fruit) {
        self.host.selected = Some(fruit.clone());
        self.send(ComboEvent::SelectionChanged(Some(fruit)));
    }

    /// The toolkit closes the popup on its own (outside click, etc).
    fn toolkit_closes_list(&mut self) {
        self.host.open = false;
        self.send(ComboEvent::ListClosed);
    }

    fn commit_via_keyboard(&mut self, query: &str) {
        self.type_text(query);
        self.press(Key::Down);
        self.press(Key::Enter);
    }

    fn visible_names(&self) -> Vec<&'static str> {
        self.combo.visible().iter().map(|fruit| fruit.name).collect()
    }

    fn assert_unfiltered(&self) {
        assert!(self.combo.visible().same_as(self.combo.original()));
        assert_eq!(self.host.items, *self.combo.original());
        assert_eq!(self.combo.mode(), FilterMode::Idle);
        assert_eq!(self.combo.query_text(), "");
    }

    fn assert_guards_released(&self) {
        let flags = self.combo.suppression_flags();
        assert!(!flags.is_suppressed(Channel::Selection));
        assert!(!flags.is_suppressed(Channel::Text));
    }
}

// =========================================================================
// Filtering
// =========================================================================

#[test]
fn test_typing_survives_toolkit_echoes() {
    let mut h = Harness::new();
    let commits = record(&h.combo.committed);

    h.type_text("be");

    assert_eq!(h.combo.mode(), FilterMode::Filtering);
    assert_eq!(h.combo.query_text(), "be");
    assert_eq!(h.visible_names(), vec!["Beta"]);
    assert_eq!(h.host.text, "be");
    assert_eq!(h.host.caret, 2);
    assert!(h.host.open);
    assert_eq!(h.combo.selected(), None);
    assert!(commits.lock().is_empty());
    h.assert_guards_released();
}

#[test]
fn test_blank_query_shows_original() {
    let mut h = Harness::new();
    h.type_text("ga");
    h.type_text("");

    assert!(h.combo.visible().same_as(h.combo.original()));
    assert_eq!(h.combo.mode(), FilterMode::Filtering);
}

#[test]
fn test_diacritics_ignored() {
    let mut h = Harness::new();
    h.send(ComboEvent::ItemsAssigned(ItemCollection::from(vec![
        Fruit { id: 10, name: "Caf\u{00e9}" },
        Fruit { id: 11, name: "Z\u{00fc}rcher" },
    ])));

    h.type_text("ZURCH");
    assert_eq!(h.visible_names(), vec!["Z\u{00fc}rcher"]);

    h.type_text("cafe");
    assert_eq!(h.visible_names(), vec!["Caf\u{00e9}"]);
}

#[test]
fn test_items_reassigned_mid_filter_reapply_query() {
    let mut h = Harness::new();
    h.type_text("et");
    assert_eq!(h.visible_names(), vec!["Beta"]);

    let replacement = ItemCollection::from(vec![ALPHA, BETA, Fruit { id: 4, name: "Theta" }]);
    h.send(ComboEvent::ItemsAssigned(replacement.clone()));

    assert!(h.combo.original().same_as(&replacement));
    assert_eq!(h.visible_names(), vec!["Beta", "Theta"]);
    assert_eq!(h.combo.mode(), FilterMode::Filtering);
    assert_eq!(h.host.text, "et");
}

#[test]
fn test_items_reassigned_while_idle_keep_surviving_selection() {
    let mut h = Harness::new();
    h.commit_via_keyboard("bet");
    assert_eq!(h.combo.selected_index(), Some(1));

    h.send(ComboEvent::ItemsAssigned(ItemCollection::from(vec![GAMMA, ALPHA, BETA])));

    assert_eq!(h.combo.selected(), Some(&BETA));
    assert_eq!(h.combo.selected_index(), Some(2));
    assert_eq!(h.combo.last_committed(), Some(&BETA));
    assert_eq!(h.host.selected, Some(BETA));
    h.assert_unfiltered();
    h.assert_guards_released();
}

#[test]
fn test_items_reassigned_while_idle_drop_selection() {
    let mut h = Harness::new();
    let cancels = record(&h.combo.cancelled);
    h.commit_via_keyboard("alp");
    assert!(h.combo.is_clear_available());

    h.send(ComboEvent::ItemsAssigned(ItemCollection::from(vec![
        Fruit { id: 5, name: "Xigua" },
        Fruit { id: 6, name: "Yuzu" },
    ])));

    assert_eq!(h.combo.selected(), None);
    assert_eq!(h.combo.selected_index(), None);
    assert_eq!(h.combo.last_committed(), None);
    assert_eq!(h.host.selected, None);
    assert!(!h.combo.is_clear_available());

    h.type_text("x");
    assert_eq!(h.visible_names(), vec!["Xigua"]);
    assert!(h.press(Key::Escape));

    assert_eq!(h.combo.selected(), None);
    assert_eq!(h.host.selected, None);
    assert_eq!(h.host.text, "");
    h.assert_unfiltered();
    assert_eq!(*cancels.lock(), vec![None]);
}

#[test]
fn test_items_reassigned_mid_filter_drop_committed() {
    let mut h = Harness::new();
    let commits = record(&h.combo.committed);
    h.commit_via_keyboard("alp");

    h.type_text("e");
    assert_eq!(h.visible_names(), vec!["Beta"]);
    assert_eq!(h.combo.selected(), None);

    h.send(ComboEvent::ItemsAssigned(ItemCollection::from(vec![
        BETA,
        Fruit { id: 4, name: "Theta" },
    ])));
    assert_eq!(h.visible_names(), vec!["Beta", "Theta"]);
    assert_eq!(h.combo.last_committed(), None);
    assert_eq!(h.host.text, "e");

    h.press(Key::Enter);

    assert_eq!(h.combo.selected(), None);
    assert_eq!(h.host.selected, None);
    assert_eq!(h.host.text, "");
    h.assert_unfiltered();
    assert_eq!(*commits.lock(), vec![Some(ALPHA), None]);
}

#[test]
fn test_display_path_change_applies_to_next_pass() {
    let mut h = Harness::with_config(ComboConfig::new().with_defer_until_loaded(false));

    h.type_text("fruit#2");
    assert_eq!(h.visible_names(), vec!["Beta"]);

    h.combo.set_display_path(Some("Name".into()));
    h.type_text("fruit");
    assert!(h.visible_names().is_empty());
    assert_eq!(h.combo.config().display_path.as_deref(), Some("Name"));
}

#[test]
fn test_display_fn_overrides_path() {
    init_tracing();
    let mut combo = ComboController::with_config(
        ComboConfig::new()
            .with_display_path("Name")
            .with_defer_until_loaded(false),
    )
    .with_display_fn(|fruit: &Fruit| format!("{} ({})", fruit.name, fruit.id));
    let mut host = EchoHost::default();

    combo.handle_event(&mut host, ComboEvent::ItemsAssigned(fruits()));
    host.text = "(3)".into();
    combo.handle_event(&mut host, ComboEvent::typed("(3)"));
    combo.handle_event(&mut host, ComboEvent::KeyPressed(Key::Down));
    combo.handle_event(&mut host, ComboEvent::KeyPressed(Key::Enter));

    assert_eq!(combo.last_committed(), Some(&GAMMA));
    assert_eq!(host.text, "Gamma (3)");

    combo.clear_display_fn();
    assert_eq!(combo.display_text(Some(&GAMMA)), "Gamma");
}

// =========================================================================
// Commit / Cancel
// =========================================================================

#[test]
fn test_commit_with_display_and_value_paths() {
    let mut h = Harness::new();
    h.commit_via_keyboard("bet");

    assert_eq!(h.combo.selected(), Some(&BETA));
    assert_eq!(h.combo.last_committed(), Some(&BETA));
    assert_eq!(h.host.text, "Beta");
    assert_eq!(
        h.combo.selected_value(),
        Some(SelectedValue::Field(FieldValue::Int(2)))
    );
    assert!(!h.host.open);
    h.assert_unfiltered();
    h.assert_guards_released();
}

#[test]
fn test_commit_keeps_selection_still_visible() {
    let mut h = Harness::new();
    h.commit_via_keyboard("gam");

    h.type_text("a");
    assert_eq!(h.combo.selected(), Some(&GAMMA));
    h.press(Key::Enter);

    assert_eq!(h.combo.selected(), Some(&GAMMA));
    assert_eq!(h.host.selected, Some(GAMMA));
    h.assert_unfiltered();
}

#[test]
fn test_commit_restores_selection_filtered_out() {
    let mut h = Harness::new();
    let commits = record(&h.combo.committed);
    h.commit_via_keyboard("alp");

    h.type_text("be");
    // The narrowed list lost the selected row.
    assert_eq!(h.combo.selected(), None);
    assert_eq!(h.host.selected, None);
    assert_eq!(h.combo.last_committed(), Some(&ALPHA));

    h.press(Key::Enter);

    assert_eq!(h.combo.selected(), Some(&ALPHA));
    assert_eq!(h.host.selected, Some(ALPHA));
    assert_eq!(h.host.text, "Alpha");
    h.assert_unfiltered();
    assert_eq!(*commits.lock(), vec![Some(ALPHA), Some(ALPHA)]);
}

#[test]
fn test_commit_twice_is_commit_once() {
    let mut h = Harness::new();
    h.commit_via_keyboard("alp");
    h.type_text("gam");
    h.press(Key::Down);

    h.combo.commit(&mut h.host);
    let once = (
        h.combo.selected().cloned(),
        h.combo.last_committed().cloned(),
        h.host.text.clone(),
        h.combo.visible().clone(),
    );
    h.combo.commit(&mut h.host);

    assert_eq!(h.combo.selected().cloned(), once.0);
    assert_eq!(h.combo.last_committed().cloned(), once.1);
    assert_eq!(h.host.text, once.2);
    assert!(h.combo.visible().same_as(&once.3));
}

#[test]
fn test_escape_restores_last_committed() {
    let mut h = Harness::new();
    let cancels = record(&h.combo.cancelled);
    h.commit_via_keyboard("alp");

    h.type_text("ga");
    h.press(Key::Down);
    assert_eq!(h.combo.selected(), Some(&GAMMA));

    assert!(h.press(Key::Escape));

    assert_eq!(h.combo.selected(), Some(&ALPHA));
    assert_eq!(h.host.selected, Some(ALPHA));
    assert_eq!(h.host.text, "Alpha");
    assert!(!h.host.open);
    h.assert_unfiltered();
    assert_eq!(*cancels.lock(), vec![Some(ALPHA)]);
}

#[test]
fn test_escape_without_commitment_clears() {
    let mut h = Harness::new();
    h.type_text("ga");
    h.press(Key::Down);
    h.press(Key::Escape);

    assert_eq!(h.combo.selected(), None);
    assert_eq!(h.host.selected, None);
    assert_eq!(h.host.text, "");
    h.assert_unfiltered();
}

#[test]
fn test_list_closed_while_filtering_cancels() {
    let mut h = Harness::new();
    let cancels = record(&h.combo.cancelled);
    h.commit_via_keyboard("bet");

    h.type_text("ga");
    h.toolkit_closes_list();

    assert_eq!(h.combo.selected(), Some(&BETA));
    assert_eq!(h.host.text, "Beta");
    assert!(!h.combo.is_list_open());
    assert!(!h.combo.is_keyboard_navigating());
    h.assert_unfiltered();
    assert_eq!(cancels.lock().len(), 1);
}

#[test]
fn test_list_closed_after_commit_does_not_cancel() {
    let mut h = Harness::new();
    let cancels = record(&h.combo.cancelled);

    h.type_text("gam");
    h.click(GAMMA);
    h.toolkit_closes_list();

    assert_eq!(h.combo.last_committed(), Some(&GAMMA));
    assert!(cancels.lock().is_empty());
}

// =========================================================================
// Selection & Keyboard
// =========================================================================

#[test]
fn test_click_on_narrowed_row_commits() {
    let mut h = Harness::new();
    let commits = record(&h.combo.committed);

    h.type_text("a");
    h.click(BETA);

    assert_eq!(*commits.lock(), vec![Some(BETA)]);
    assert_eq!(h.combo.last_committed(), Some(&BETA));
    assert_eq!(h.host.text, "Beta");
    h.assert_unfiltered();
}

#[test]
fn test_selection_while_idle_does_not_commit() {
    let mut h = Harness::new();
    let commits = record(&h.combo.committed);

    h.click(BETA);

    assert_eq!(h.combo.selected(), Some(&BETA));
    assert_eq!(h.combo.last_committed(), None);
    assert!(commits.lock().is_empty());
}

#[test]
fn test_arrow_navigation_never_commits() {
    let mut h = Harness::new();
    let commits = record(&h.combo.committed);

    h.type_text("a");
    assert_eq!(h.visible_names(), vec!["Alpha", "Beta", "Gamma"]);

    assert!(h.press(Key::Down));
    assert!(h.press(Key::Down));
    assert!(h.press(Key::Down));
    assert!(h.press(Key::Down));

    assert_eq!(h.combo.selected(), Some(&GAMMA));
    assert_eq!(h.combo.last_committed(), None);
    assert_eq!(h.combo.mode(), FilterMode::Filtering);
    assert_eq!(h.host.text, "a");
    assert_eq!(h.host.caret, 1);
    assert!(commits.lock().is_empty());

    h.press(Key::Up);
    assert_eq!(h.combo.selected(), Some(&BETA));
    h.assert_guards_released();
}

#[test]
fn test_arrow_keys_in_idle_list_show_item_text() {
    let mut h = Harness::new();
    h.host.open = true;
    h.send(ComboEvent::ListOpened);

    h.press(Key::Down);
    h.press(Key::Down);

    assert_eq!(h.combo.selected(), Some(&BETA));
    assert_eq!(h.host.text, "Beta");
    assert_eq!(h.combo.last_committed(), None);
}

#[test]
fn test_arrow_keys_on_empty_list_are_consumed() {
    let mut h = Harness::new();
    h.type_text("xyz");

    assert!(h.press(Key::Down));
    assert!(h.press(Key::Up));
    assert_eq!(h.combo.selected(), None);
}

#[test]
fn test_tab_commits_and_lets_focus_move() {
    let mut h = Harness::new();
    h.type_text("gam");
    h.press(Key::Down);

    assert!(!h.press(Key::Tab));
    assert_eq!(h.combo.last_committed(), Some(&GAMMA));
    assert!(!h.host.open);
}

#[test]
fn test_enter_without_anything_selected() {
    let mut h = Harness::new();
    h.type_text("be");

    assert!(h.press(Key::Enter));
    assert_eq!(h.combo.selected(), None);
    assert_eq!(h.host.text, "");
    h.assert_unfiltered();
}

// =========================================================================
// Focus & Deferred
// =========================================================================

#[test]
fn test_focus_from_outside_opens_and_selects_all() {
    let mut h = Harness::new();
    h.click(BETA);
    assert_eq!(h.combo.last_committed(), None);

    h.send(ComboEvent::FocusGained(FocusOrigin::Outside));

    assert_eq!(h.combo.last_committed(), Some(&BETA));
    assert!(h.host.open);
    assert_eq!(h.host.select_all, 1);
    assert_eq!(h.combo.mode(), FilterMode::Idle);

    h.send(ComboEvent::FocusGained(FocusOrigin::TextSurface));
    assert_eq!(h.host.select_all, 1);
}

#[test]
fn test_focus_honours_config() {
    let mut h = Harness::with_config(
        ComboConfig::new()
            .with_open_on_focus(false)
            .with_select_all_on_focus(false)
            .with_defer_until_loaded(false),
    );

    h.send(ComboEvent::FocusGained(FocusOrigin::Outside));

    assert!(!h.host.open);
    assert_eq!(h.host.select_all, 0);
    assert_eq!(h.combo.pending_deferred(), 0);
}

#[test]
fn test_reopen_after_focus_transition() {
    let mut h = Harness::new();
    h.send(ComboEvent::FocusGained(FocusOrigin::Outside));
    assert_eq!(h.combo.pending_deferred(), 1);

    h.toolkit_closes_list();
    assert!(!h.combo.is_list_open());

    assert_eq!(h.combo.process_deferred(&mut h.host), 1);
    assert!(h.host.open);
    assert!(h.combo.is_list_open());
}

#[test]
fn test_reopen_rechecks_focus() {
    let mut h = Harness::new();
    h.send(ComboEvent::FocusGained(FocusOrigin::Outside));
    h.send(ComboEvent::FocusLost);

    assert!(!h.host.open);
    h.combo.process_deferred(&mut h.host);
    assert!(!h.host.open);
    assert!(!h.combo.has_focus());
}

#[test]
fn test_focus_lost_cancels_filter() {
    let mut h = Harness::new();
    h.commit_via_keyboard("alp");
    h.type_text("ga");

    h.send(ComboEvent::FocusLost);

    assert_eq!(h.combo.selected(), Some(&ALPHA));
    assert_eq!(h.host.text, "Alpha");
    assert!(!h.host.open);
    h.assert_unfiltered();
}

#[test]
fn test_initial_load_defers_readiness() {
    let mut h = Harness::with_config(ComboConfig::new().with_display_path("Name"));

    // Auto-focus and stray text during load are ignored.
    h.send(ComboEvent::FocusGained(FocusOrigin::Outside));
    h.type_text("be");
    assert!(!h.host.open);
    assert_eq!(h.combo.mode(), FilterMode::Idle);
    assert!(h.combo.visible().same_as(h.combo.original()));

    h.send(ComboEvent::Loaded);
    assert!(!h.combo.is_ready());
    assert_eq!(h.combo.process_deferred(&mut h.host), 1);
    assert!(h.combo.is_ready());

    h.type_text("be");
    assert_eq!(h.visible_names(), vec!["Beta"]);
}

// =========================================================================
// Clear & Signals
// =========================================================================

#[test]
fn test_clear_resets_everything() {
    let mut h = Harness::new();
    let cleared = record(&h.combo.cleared);
    h.commit_via_keyboard("bet");
    h.type_text("al");

    assert!(h.send(ComboEvent::ClearRequested));

    assert_eq!(h.combo.selected(), None);
    assert_eq!(h.combo.last_committed(), None);
    assert_eq!(h.host.selected, None);
    assert_eq!(h.host.text, "");
    assert!(!h.host.open);
    h.assert_unfiltered();
    h.assert_guards_released();
    assert_eq!(cleared.lock().len(), 1);

    // Nothing left to restore.
    h.type_text("ga");
    h.press(Key::Escape);
    assert_eq!(h.combo.selected(), None);
}

#[test]
fn test_clear_availability_follows_selection() {
    let mut h = Harness::new();
    let available = record(&h.combo.clear_available_changed);

    h.commit_via_keyboard("bet");
    assert!(h.combo.is_clear_available());

    h.send(ComboEvent::ClearRequested);
    assert!(!h.combo.is_clear_available());

    assert_eq!(*available.lock(), vec![true, false]);
}

#[test]
fn test_notification_signals() {
    let mut h = Harness::new();
    let filters = record(&h.combo.filter_changed);
    let open = record(&h.combo.list_open_changed);

    h.type_text("b");
    h.type_text("be");
    h.press(Key::Down);
    h.press(Key::Enter);

    assert_eq!(*filters.lock(), vec!["b".to_string(), "be".to_string()]);
    assert_eq!(*open.lock(), vec![true, false]);
}

#[test]
fn test_config_from_toml_drives_controller() {
    let config = ComboConfig::from_toml_str(
        r#"
        display_path = "Name"
        value_path = "Id"
        defer_until_loaded = false
        "#,
    )
    .unwrap();
    let mut h = Harness::with_config(config);

    h.commit_via_keyboard("gam");

    assert_eq!(h.host.text, "Gamma");
    assert_eq!(
        h.combo
            .selected_value()
            .and_then(|value| value.as_field().and_then(FieldValue::as_int)),
        Some(3)
    );
}
