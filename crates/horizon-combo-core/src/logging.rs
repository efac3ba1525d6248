//! Logging facilities for Horizon Combo.
//!
//! Horizon Combo uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_combo=debug")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Every subsystem logs under its own target (see [`targets`]), so a filter
//! such as `horizon_combo::controller=trace` follows the state machine event
//! by event without the noise of the filter engine.

/// Span names used throughout Horizon Combo for tracing.
pub mod span_names {
    /// A single filter pass over the original collection.
    pub const FILTER_PASS: &str = "horizon_combo::filter_pass";
    /// Dispatch of one host event through the controller.
    pub const DISPATCH: &str = "horizon_combo::dispatch";
}

/// Target names for log filtering.
pub mod targets {
    /// Core primitives target.
    pub const CORE: &str = "horizon_combo_core";
    /// Signal emission target.
    pub const SIGNAL: &str = "horizon_combo_core::signal";
    /// Deferred task queue target.
    pub const TASK: &str = "horizon_combo::task";
    /// Suppression guard target.
    pub const SUPPRESS: &str = "horizon_combo::suppress";
    /// Selection/filter state machine target.
    pub const CONTROLLER: &str = "horizon_combo::controller";
    /// Filter engine target.
    pub const FILTER: &str = "horizon_combo::filter";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_combo::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing an operation with a span-aware subscriber.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_combo::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros with a consistent
/// target.
#[macro_export]
macro_rules! combo_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "horizon_combo_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! combo_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "horizon_combo_core", $($arg)*)
    };
}
