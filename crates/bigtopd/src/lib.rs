//! Daemon-side request handling for the bigtop process supervisor.
//!
//! The daemon receives control messages as JSON lines, resolves each one
//! through the command registry in [`bigtop_protocol`], validates and
//! executes it against the supervisor it owns, and writes exactly one JSON
//! response line back. Every protocol fault (unknown command, malformed or
//! oversized line, schema violation, access denial, supervisor failure)
//! becomes an error response; only IO and serialisation failures on the
//! stream itself end the serving loop.
//!
//! The [`Dispatcher`] owns the supervisor and processes one request to
//! completion before reading the next, so the supervisor never observes
//! interleaved commands.
//!
//! Structured telemetry is configured once per process with
//! [`telemetry::initialise`], and serving lifecycle events are surfaced
//! through a [`HealthReporter`].

mod dispatch;
mod health;
pub mod telemetry;

pub use dispatch::{DispatchError, Dispatcher, MAX_REQUEST_BYTES, ResponseWriter, parse_request};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
