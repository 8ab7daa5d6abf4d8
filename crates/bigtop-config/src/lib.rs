//! Shared configuration for the bigtop control client and daemon library.
//!
//! [`Config`] is layered with `ortho_config`: built-in defaults are overridden
//! by a configuration file, then by `BIGTOP_*` environment variables, then by
//! command-line flags. The crate also owns the watcher configuration files
//! consumed by the `add` command's config-lookup path, together with the
//! parser that turns a watcher's `env` entry into an explicit mapping.

mod env;
mod logging;
mod watchers;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use env::{EnvParseError, parse_env, parse_env_with};
pub use logging::{
    DEFAULT_LOG_FILTER, LogFormat, LogFormatParseError, default_log_filter,
    default_log_filter_string, default_log_format,
};
pub use watchers::{WatcherDefinition, WatcherFile, WatcherFileError, WatcherSource};

/// Runtime configuration shared by `bigtop` and `bigtopd`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "BIGTOP")]
pub struct Config {
    /// Tracing filter expression applied by the daemon telemetry layer.
    #[ortho_config(default = logging::default_log_filter_string())]
    pub log_filter: String,
    /// Output format for structured logs.
    #[ortho_config(default = logging::default_log_format())]
    pub log_format: LogFormat,
    /// Shell command line that carries one request line to the daemon and
    /// prints its response line. When unset the client prints the request.
    pub transport: Option<String>,
    /// Watcher configuration file consulted by `add <name>` when no
    /// `--config` option is given on the command line.
    pub watchers_path: Option<Utf8PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            transport: None,
            watchers_path: None,
        }
    }
}

impl Config {
    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Structured log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// External transport command line, when configured.
    #[must_use]
    pub fn transport(&self) -> Option<&str> {
        self.transport.as_deref()
    }

    /// Default watcher configuration file, when configured.
    #[must_use]
    pub fn watchers_path(&self) -> Option<&camino::Utf8Path> {
        self.watchers_path.as_deref()
    }
}
