//! Core primitives for Horizon Combo.
//!
//! This crate provides the toolkit-independent building blocks the combo
//! controller is assembled from:
//!
//! - **Signals**: Observer-style notifications with scoped connections
//! - **Deferred Queue**: "Run after the current turn" continuations
//! - **Suppression Guards**: Per-channel re-entrancy flags with RAII release
//! - **Logging**: Tracing targets, span names and helper macros
//!
//! # Suppression Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_combo_core::{Channel, Signal, SuppressionFlags};
//!
//! let flags = Arc::new(SuppressionFlags::new());
//! let selection_changed = Signal::<Option<usize>>::new();
//!
//! let observer = flags.clone();
//! selection_changed.connect(move |index| {
//!     if observer.is_suppressed(Channel::Selection) {
//!         return; // our own write echoing back
//!     }
//!     println!("user picked {:?}", index);
//! });
//!
//! let _guard = flags.suppress(Channel::Selection);
//! selection_changed.emit(Some(3)); // ignored by the slot
//! ```

pub mod logging;
pub mod signal;
pub mod suppress;
mod task;

pub use logging::{PerfSpan, span_names, targets};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use suppress::{Channel, SuppressGuard, SuppressionFlags};
pub use task::{DeferredQueue, TaskId};
