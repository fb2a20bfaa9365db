//! Logging facilities for Horizon GridForm.
//!
//! Horizon GridForm uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Diagnostics are emitted under the targets in [`targets`], so a filter such
//! as `horizon_gridform::controller=debug` narrows output to one subsystem.

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_gridform_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_gridform_core::signal";
    /// CRUD controller target.
    pub const CONTROLLER: &str = "horizon_gridform::controller";
    /// Grid collaborator target.
    pub const GRID: &str = "horizon_gridform::grid";
    /// Column projection target.
    pub const COLUMNS: &str = "horizon_gridform::columns";
    /// Enumeration formatting target.
    pub const ENUMS: &str = "horizon_gridform::enums";
    /// Localized text lookup target.
    pub const LOCALIZATION: &str = "horizon_gridform::localization";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_gridform::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing a controller operation end to end.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_gridform::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros with consistent
/// target naming.
#[macro_export]
macro_rules! gridform_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[macro_export]
macro_rules! gridform_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let _span = PerfSpan::new("test_operation");
        crate::gridform_debug!(rows = 3, "inside perf span");
    }

    #[test]
    fn test_targets_share_crate_prefixes() {
        for target in [targets::CONTROLLER, targets::GRID, targets::COLUMNS, targets::ENUMS] {
            assert!(target.starts_with("horizon_gridform::"));
        }
        assert!(targets::SIGNAL.starts_with(targets::CORE));
    }
}
