//! Horizon Combo - filtering and selection for editable dropdowns.
//!
//! An editable combo lets the user type to narrow a list of items, move
//! through the matches with the arrow keys, and confirm or abandon the
//! choice. This crate holds the logic of such a widget without any
//! toolkit: a host adapter feeds [`ComboEvent`]s into a [`ComboController`]
//! and applies the writes it receives through the [`ComboHost`] trait.
//!
//! Matching is case- and diacritic-insensitive substring search on each
//! item's display text (see [`normalize()`] and [`fold()`]).
//!
//! # Example
//!
//! ```
//! use horizon_combo::{ComboController, ComboEvent, ComboHost, ComboItem, FieldValue, ItemCollection};
//! use horizon_combo::{ComboConfig, Key, SelectedValue};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct City { id: i64, name: &'static str }
//!
//! impl ComboItem for City {
//!     fn display_string(&self) -> String { self.name.to_string() }
//!     fn field(&self, name: &str) -> Option<FieldValue> {
//!         match name {
//!             "Id" => Some(self.id.into()),
//!             "Name" => Some(self.name.into()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! struct Headless;
//!
//! impl ComboHost<City> for Headless {
//!     fn set_displayed_text(&mut self, _text: &str) {}
//!     fn set_caret(&mut self, _caret: usize) {}
//!     fn select_all_text(&mut self) {}
//!     fn set_visible_items(&mut self, _items: ItemCollection<City>) {}
//!     fn set_selected_item(&mut self, _item: Option<City>) {}
//!     fn set_list_open(&mut self, _open: bool) {}
//! }
//!
//! let config = ComboConfig::new()
//!     .with_display_path("Name")
//!     .with_value_path("Id")
//!     .with_defer_until_loaded(false);
//! let mut combo = ComboController::with_config(config);
//! let mut host = Headless;
//!
//! combo.handle_event(&mut host, ComboEvent::ItemsAssigned(ItemCollection::from(vec![
//!     City { id: 1, name: "Zürich" },
//!     City { id: 2, name: "Geneva" },
//! ])));
//!
//! combo.handle_event(&mut host, ComboEvent::typed("zur"));
//! assert_eq!(combo.visible().len(), 1);
//!
//! combo.handle_event(&mut host, ComboEvent::KeyPressed(Key::Down));
//! combo.handle_event(&mut host, ComboEvent::KeyPressed(Key::Enter));
//! assert_eq!(combo.selected_value(), Some(SelectedValue::Field(FieldValue::Int(1))));
//! ```

mod config;
pub mod controller;
pub mod display;
mod error;
pub mod event;
pub mod filter;
pub mod host;
pub mod item;
pub mod normalize;

pub use config::ComboConfig;
pub use controller::{ComboController, Deferred, FilterMode};
pub use display::{DisplayFn, DisplayResolver, SelectedValue};
pub use error::{ComboError, Result};
pub use event::{ComboEvent, FocusOrigin, Key};
pub use filter::{FilterEngine, ItemCollection};
pub use host::ComboHost;
pub use item::{ComboItem, FieldValue};
pub use normalize::{TextNormalizer, fold, normalize};

pub use horizon_combo_core::{Channel, ConnectionGuard, ConnectionId, Signal, SuppressionFlags};
