//! Process-wide `tracing` setup for the daemon library.
//!
//! Events go to stderr with RFC 3339 UTC timestamps, encoded as JSON or
//! compact text according to [`Config::log_format`] and filtered by
//! [`Config::log_filter`].

use std::io::{self, IsTerminal};

use bigtop_config::{Config, LogFormat};
use once_cell::sync::OnceCell;
use tracing::Subscriber;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, time::UtcTime};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Proof that the global subscriber is in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Reasons the subscriber could not be installed.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// `log_filter` is not a valid filter directive list.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Some other subscriber already owns the global slot.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the global subscriber once per process.
///
/// Only the first successful call reads `config`; later calls are no-ops
/// that hand back another [`TelemetryHandle`].
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an unparsable `log_filter` and
/// [`TelemetryError::Subscriber`] when another subscriber is already global.
///
/// # Examples
///
/// ```rust
/// use bigtop_config::Config;
/// use bigtopd::telemetry;
///
/// # fn main() -> Result<(), bigtopd::TelemetryError> {
/// let config = Config::default();
/// telemetry::initialise(&config)?;
/// telemetry::initialise(&config)?;
/// # Ok(())
/// # }
/// ```
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    INSTALLED.get_or_try_init(|| install(config))?;
    Ok(TelemetryHandle)
}

fn install(config: &Config) -> Result<(), TelemetryError> {
    let subscriber = build_subscriber(env_filter(config)?, config.log_format());
    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}

fn env_filter(config: &Config) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(config.log_filter()).map_err(|error| TelemetryError::Filter(error.to_string()))
}

fn build_subscriber(filter: EnvFilter, format: LogFormat) -> Box<dyn Subscriber + Send + Sync> {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(UtcTime::rfc_3339());
    match format {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    }
}
