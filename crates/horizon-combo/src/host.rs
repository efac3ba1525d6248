//! The host widget interface.
//!
//! The controller never touches a toolkit directly. Every effect it has on
//! the widget goes through one of the [`ComboHost`] write methods, and each
//! write is a single atomic operation from the controller's point of view.

use crate::event::ComboEvent;
use crate::filter::ItemCollection;

/// Effectful operations the controller performs on its host widget.
///
/// # Synchronous notifications
///
/// Many toolkits raise change notifications from inside a property write:
/// assigning the text fires "text changed", swapping the item source fires
/// "selection changed". A host that behaves like that reports those
/// notifications from [`take_notifications`](Self::take_notifications). The
/// controller drains them straight after each write, while the write's
/// suppression guard is still raised, which is how it tells its own echoes
/// apart from user input.
pub trait ComboHost<T> {
    /// Replace the text shown in the editable surface.
    fn set_displayed_text(&mut self, text: &str);

    /// Move the caret, in grapheme clusters from the start of the text.
    fn set_caret(&mut self, caret: usize);

    /// Select all text in the editable surface, so typing replaces it.
    fn select_all_text(&mut self);

    /// Replace the items shown in the list presentation.
    fn set_visible_items(&mut self, items: ItemCollection<T>);

    /// Replace the selected item.
    fn set_selected_item(&mut self, item: Option<T>);

    /// Open or close the list presentation.
    fn set_list_open(&mut self, open: bool);

    /// Notifications raised synchronously by the previous write(s).
    fn take_notifications(&mut self) -> Vec<ComboEvent<T>> {
        Vec::new()
    }
}
