//! Re-entrancy suppression guards.
//!
//! When a controller writes to its host widget (sets the displayed text,
//! swaps the item list, changes the selection), many toolkits answer with a
//! change notification that lands back in the controller. Those echoes must
//! not be mistaken for user input.
//!
//! [`SuppressionFlags`] holds one flag per notification [`Channel`]. A
//! controller raises a flag with [`SuppressionFlags::suppress`] immediately
//! before its write and keeps the returned [`SuppressGuard`] alive until the
//! write (and any notification it raised synchronously) has been handled.
//! Handlers check [`SuppressionFlags::is_suppressed`] first thing.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_combo_core::{Channel, SuppressionFlags};
//!
//! let flags = Arc::new(SuppressionFlags::new());
//! {
//!     let _guard = flags.suppress(Channel::Text);
//!     assert!(flags.is_suppressed(Channel::Text));
//!     assert!(!flags.is_suppressed(Channel::Selection));
//! }
//! assert!(!flags.is_suppressed(Channel::Text));
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::logging::targets;

/// A notification channel that can be suppressed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Selection-changed and item-source notifications.
    Selection,
    /// Text-changed notifications.
    Text,
}

impl Channel {
    fn name(self) -> &'static str {
        match self {
            Channel::Selection => "selection",
            Channel::Text => "text",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of suppression flags owned by one controller.
#[derive(Default)]
pub struct SuppressionFlags {
    selection: AtomicBool,
    text: AtomicBool,
}

impl SuppressionFlags {
    /// Create a flag set with every channel open.
    pub fn new() -> Self {
        Self::default()
    }

    fn flag(&self, channel: Channel) -> &AtomicBool {
        match channel {
            Channel::Selection => &self.selection,
            Channel::Text => &self.text,
        }
    }

    /// Check whether notifications on `channel` are currently suppressed.
    pub fn is_suppressed(&self, channel: Channel) -> bool {
        self.flag(channel).load(Ordering::SeqCst)
    }

    /// Suppress `channel` until the returned guard is dropped.
    ///
    /// Guards nest: dropping an inner guard restores the value the flag had
    /// before it was raised, so an outer guard on the same channel stays in
    /// effect.
    pub fn suppress(self: &Arc<Self>, channel: Channel) -> SuppressGuard {
        let previous = self.flag(channel).swap(true, Ordering::SeqCst);
        tracing::trace!(target: targets::SUPPRESS, %channel, nested = previous, "suppression raised");
        SuppressGuard {
            flags: Arc::clone(self),
            channel,
            previous,
        }
    }

    /// Suppress both channels until the returned guards are dropped.
    pub fn suppress_all(self: &Arc<Self>) -> (SuppressGuard, SuppressGuard) {
        (self.suppress(Channel::Selection), self.suppress(Channel::Text))
    }
}

impl fmt::Debug for SuppressionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuppressionFlags")
            .field("selection", &self.is_suppressed(Channel::Selection))
            .field("text", &self.is_suppressed(Channel::Text))
            .finish()
    }
}

/// RAII guard returned by [`SuppressionFlags::suppress`].
///
/// The guard owns a handle to the flag set, so holding it does not borrow
/// the controller that owns the flags.
#[must_use = "the channel is released as soon as the guard is dropped"]
pub struct SuppressGuard {
    flags: Arc<SuppressionFlags>,
    channel: Channel,
    previous: bool,
}

impl SuppressGuard {
    /// The channel this guard suppresses.
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

impl Drop for SuppressGuard {
    fn drop(&mut self) {
        self.flags
            .flag(self.channel)
            .store(self.previous, Ordering::SeqCst);
        tracing::trace!(target: targets::SUPPRESS, channel = %self.channel, restored = self.previous, "suppression released");
    }
}

impl fmt::Debug for SuppressGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuppressGuard")
            .field("channel", &self.channel)
            .field("previous", &self.previous)
            .finish()
    }
}

static_assertions::assert_impl_all!(SuppressionFlags: Send, Sync);
static_assertions::assert_impl_all!(SuppressGuard: Send, Sync);
