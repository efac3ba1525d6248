//! Display and value projections.
//!
//! [`DisplayResolver`] turns an item into the label the user sees (and
//! types against), and optionally into a scalar "value" that travels with
//! the selection. Resolution never fails: a projection that does not apply
//! to an item degrades to the item's natural string or to the item itself.

use std::fmt;
use std::sync::Arc;

use crate::item::{ComboItem, FieldValue};

/// Type alias for an explicit display projection.
pub type DisplayFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// The value companion of a selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectedValue<T> {
    /// No value path applies; the item itself is the value.
    Item(T),
    /// The value read through the configured value path.
    Field(FieldValue),
}

impl<T> SelectedValue<T> {
    /// The projected field, if a value path applied.
    pub fn as_field(&self) -> Option<&FieldValue> {
        match self {
            SelectedValue::Field(value) => Some(value),
            SelectedValue::Item(_) => None,
        }
    }

    /// The item, if it is its own value.
    pub fn as_item(&self) -> Option<&T> {
        match self {
            SelectedValue::Item(item) => Some(item),
            SelectedValue::Field(_) => None,
        }
    }
}

/// Resolves display text and selected values for items.
///
/// Paths are read each time an item is resolved, so changing them takes
/// effect on the next filter pass or commit.
///
/// # Example
///
/// ```
/// use horizon_combo::{ComboItem, DisplayResolver, FieldValue};
///
/// #[derive(Clone, PartialEq)]
/// struct Fruit { id: i64, name: &'static str }
///
/// impl ComboItem for Fruit {
///     fn display_string(&self) -> String { format!("Fruit#{}", self.id) }
///     fn field(&self, name: &str) -> Option<FieldValue> {
///         match name {
///             "Id" => Some(self.id.into()),
///             "Name" => Some(self.name.into()),
///             _ => None,
///         }
///     }
/// }
///
/// let beta = Fruit { id: 2, name: "Beta" };
/// let resolver = DisplayResolver::new()
///     .with_display_path("Name")
///     .with_value_path("Id");
///
/// assert_eq!(resolver.display_text(Some(&beta)), "Beta");
/// assert_eq!(
///     resolver.selected_value(Some(&beta)).and_then(|v| v.as_field().and_then(FieldValue::as_int)),
///     Some(2)
/// );
/// ```
pub struct DisplayResolver<T> {
    display_path: Option<String>,
    value_path: Option<String>,
    display_fn: Option<DisplayFn<T>>,
}

impl<T> DisplayResolver<T> {
    /// Create a resolver that uses each item's natural string form.
    pub fn new() -> Self {
        Self {
            display_path: None,
            value_path: None,
            display_fn: None,
        }
    }

    /// The configured display path, if any.
    pub fn display_path(&self) -> Option<&str> {
        self.display_path.as_deref()
    }

    /// Set the display path. An empty path is the same as none.
    pub fn set_display_path(&mut self, path: Option<String>) {
        self.display_path = path.filter(|p| !p.is_empty());
    }

    /// Set display path using builder pattern.
    pub fn with_display_path(mut self, path: impl Into<String>) -> Self {
        self.set_display_path(Some(path.into()));
        self
    }

    /// The configured value path, if any.
    pub fn value_path(&self) -> Option<&str> {
        self.value_path.as_deref()
    }

    /// Set the value path. An empty path is the same as none.
    pub fn set_value_path(&mut self, path: Option<String>) {
        self.value_path = path.filter(|p| !p.is_empty());
    }

    /// Set value path using builder pattern.
    pub fn with_value_path(mut self, path: impl Into<String>) -> Self {
        self.set_value_path(Some(path.into()));
        self
    }

    /// Use an explicit projection for display text.
    ///
    /// The projection takes precedence over the display path.
    pub fn set_display_fn<F>(&mut self, projection: F)
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.display_fn = Some(Arc::new(projection));
    }

    /// Set display projection using builder pattern.
    pub fn with_display_fn<F>(mut self, projection: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.set_display_fn(projection);
        self
    }

    /// Remove an explicit display projection.
    pub fn clear_display_fn(&mut self) {
        self.display_fn = None;
    }
}

impl<T: ComboItem> DisplayResolver<T> {
    /// The user-visible text for `item`; `None` resolves to `""`.
    pub fn display_text(&self, item: Option<&T>) -> String {
        let Some(item) = item else {
            return String::new();
        };

        if let Some(projection) = &self.display_fn {
            return projection(item);
        }

        // A path the item does not have behaves like no path at all.
        if let Some(path) = &self.display_path
            && let Some(value) = item.field(path)
        {
            return value.to_string();
        }

        item.display_string()
    }

    /// The value companion of `item`; `None` resolves to `None`.
    pub fn selected_value(&self, item: Option<&T>) -> Option<SelectedValue<T>>
    where
        T: Clone,
    {
        let item = item?;
        if let Some(path) = &self.value_path
            && let Some(value) = item.field(path)
        {
            return Some(SelectedValue::Field(value));
        }
        Some(SelectedValue::Item(item.clone()))
    }
}

impl<T> Default for DisplayResolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for DisplayResolver<T> {
    fn clone(&self) -> Self {
        Self {
            display_path: self.display_path.clone(),
            value_path: self.value_path.clone(),
            display_fn: self.display_fn.clone(),
        }
    }
}

impl<T> fmt::Debug for DisplayResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayResolver")
            .field("display_path", &self.display_path)
            .field("value_path", &self.value_path)
            .field("display_fn", &self.display_fn.is_some())
            .finish()
    }
}
