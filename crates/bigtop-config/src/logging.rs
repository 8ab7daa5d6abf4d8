//! Log output settings and their built-in defaults.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Filter applied when no layer overrides `log_filter`.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log line encoding used by the daemon telemetry layer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Terse text, one event per line.
    Compact,
}

/// Returned when text names no known [`LogFormat`].
pub type LogFormatParseError = strum::ParseError;

/// Borrowed form of [`DEFAULT_LOG_FILTER`].
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned form of [`DEFAULT_LOG_FILTER`], for derive-time defaults.
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Format applied when no layer overrides `log_format`.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
