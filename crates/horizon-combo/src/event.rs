//! Normalized host events.
//!
//! A host adapter translates its toolkit's raw keyboard, mouse and focus
//! events into [`ComboEvent`]s and feeds them to
//! [`ComboController::handle_event`](crate::ComboController::handle_event).

use crate::filter::ItemCollection;

/// Keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Enter / Return.
    Enter,
    /// Tab (focus advance).
    Tab,
    /// Escape.
    Escape,
    /// Any other key. Never consumed.
    Other,
}

/// Where keyboard focus came from when the text surface gained it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusOrigin {
    /// Focus moved in from another element.
    Outside,
    /// The text surface re-focused itself (e.g. after a click inside it).
    TextSurface,
}

/// An input event delivered by the host widget layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ComboEvent<T> {
    /// The binding layer assigned a new item collection.
    ItemsAssigned(ItemCollection<T>),
    /// The text in the editable surface changed.
    TextEdited {
        /// The full text after the edit.
        text: String,
        /// Caret position, in grapheme clusters.
        caret: usize,
    },
    /// A key went down while the widget had focus.
    KeyPressed(Key),
    /// The list selection changed (a click on a row, or a toolkit echo).
    SelectionChanged(Option<T>),
    /// The list presentation opened.
    ListOpened,
    /// The list presentation closed, for any reason.
    ListClosed,
    /// The text surface gained keyboard focus.
    FocusGained(FocusOrigin),
    /// Keyboard focus left the widget.
    FocusLost,
    /// The clear affordance was activated.
    ClearRequested,
    /// The host finished its initial load.
    Loaded,
}

impl<T> ComboEvent<T> {
    /// A short, stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ComboEvent::ItemsAssigned(_) => "items_assigned",
            ComboEvent::TextEdited { .. } => "text_edited",
            ComboEvent::KeyPressed(_) => "key_pressed",
            ComboEvent::SelectionChanged(_) => "selection_changed",
            ComboEvent::ListOpened => "list_opened",
            ComboEvent::ListClosed => "list_closed",
            ComboEvent::FocusGained(_) => "focus_gained",
            ComboEvent::FocusLost => "focus_lost",
            ComboEvent::ClearRequested => "clear_requested",
            ComboEvent::Loaded => "loaded",
        }
    }

    /// Shorthand for a [`ComboEvent::TextEdited`] with the caret at the end.
    pub fn typed(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = crate::controller::grapheme_len(&text);
        ComboEvent::TextEdited { text, caret }
    }
}
