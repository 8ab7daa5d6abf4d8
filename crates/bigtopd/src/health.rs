//! Structured health reporting for the serving loop.

use crate::dispatch::DispatchError;

/// Observer trait used to surface serving lifecycle events to telemetry
/// sinks.
#[cfg_attr(test, mockall::automock)]
pub trait HealthReporter: Send + Sync {
    /// Invoked before the first request is read.
    fn serving_started(&self);

    /// Invoked when the request stream ends cleanly.
    fn serving_stopped(&self, handled: usize);

    /// Invoked when the request or response stream fails.
    fn serving_failed(&self, error: &DispatchError);
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn serving_started(&self) {
        tracing::info!(
            target: "bigtopd::health",
            event = "serving_started",
            "serving control requests"
        );
    }

    fn serving_stopped(&self, handled: usize) {
        tracing::info!(
            target: "bigtopd::health",
            event = "serving_stopped",
            handled,
            "request stream closed"
        );
    }

    fn serving_failed(&self, error: &DispatchError) {
        tracing::error!(
            target: "bigtopd::health",
            event = "serving_failed",
            error = %error,
            "serving loop failed"
        );
    }
}
