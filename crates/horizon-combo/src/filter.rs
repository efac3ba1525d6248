//! Item collections and the filter engine.
//!
//! The controller keeps two views of the bound items: the *original*
//! collection supplied by the host, and the *visible* collection shown in the
//! list. Both are [`ItemCollection`]s, cheap shared handles that compare by
//! identity, so "no filter is active" is simply `visible.same_as(&original)`.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use horizon_combo_core::{PerfSpan, span_names, targets};

use crate::display::DisplayResolver;
use crate::item::ComboItem;
use crate::normalize::TextNormalizer;

/// An immutable, shared, ordered sequence of items.
///
/// Cloning an `ItemCollection` clones the handle, not the items. Two handles
/// are [`same_as`](Self::same_as) each other only if they share storage.
///
/// # Example
///
/// ```
/// use horizon_combo::ItemCollection;
///
/// let items = ItemCollection::from(vec!["Apple", "Banana"]);
/// let alias = items.clone();
/// let copy = ItemCollection::from(vec!["Apple", "Banana"]);
///
/// assert!(alias.same_as(&items));
/// assert!(!copy.same_as(&items));
/// assert_eq!(copy, items);
/// ```
pub struct ItemCollection<T> {
    items: Arc<[T]>,
}

impl<T> ItemCollection<T> {
    /// Create a collection from a vector of items.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::from(items),
        }
    }

    /// Create an empty collection.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns `true` if both handles share the same storage.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    /// The items as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq> ItemCollection<T> {
    /// Find the position of `item`.
    pub fn position(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }

    /// Returns `true` if `item` is in the collection.
    pub fn contains_item(&self, item: &T) -> bool {
        self.position(item).is_some()
    }
}

impl<T> Clone for ItemCollection<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Deref for ItemCollection<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for ItemCollection<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Element-wise equality; use [`ItemCollection::same_as`] for identity.
impl<T: PartialEq> PartialEq for ItemCollection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items[..] == other.items[..]
    }
}

impl<T: fmt::Debug> fmt::Debug for ItemCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T> From<Vec<T>> for ItemCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for ItemCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Narrows an item collection to the entries matching a query.
///
/// Matching is case- and diacritic-insensitive substring containment on each
/// item's display text. There is no ranking: matches keep their original
/// order.
#[derive(Debug, Default)]
pub struct FilterEngine {
    normalizer: TextNormalizer,
}

impl FilterEngine {
    /// Create a filter engine.
    pub const fn new() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
        }
    }

    /// The normalizer used to fold queries and display text.
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Compute the visible subset of `original` for `query`.
    ///
    /// A query that folds to empty returns `original` itself (the same
    /// handle), otherwise a new collection holding the matching items in
    /// their original order. `original` is never modified.
    pub fn filter<T>(
        &self,
        original: &ItemCollection<T>,
        query: &str,
        resolver: &DisplayResolver<T>,
    ) -> ItemCollection<T>
    where
        T: ComboItem + Clone,
    {
        let needle = self.normalizer.fold(query);
        if needle.is_empty() {
            return original.clone();
        }

        let _span = PerfSpan::new(span_names::FILTER_PASS);
        let visible: ItemCollection<T> = original
            .iter()
            .filter(|item| {
                let label = resolver.display_text(Some(*item));
                self.normalizer.fold(&label).contains(&needle)
            })
            .cloned()
            .collect();

        tracing::debug!(
            target: targets::FILTER,
            query,
            total = original.len(),
            matched = visible.len(),
            "filter pass"
        );
        visible
    }
}
