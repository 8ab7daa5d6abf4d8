//! Watcher configuration files.
//!
//! A watcher file is a YAML document with a top-level `watchers` sequence.
//! Each entry is a mapping holding at least a string `name` and `cmd`; every
//! other key is a watcher option forwarded verbatim to the daemon.
//!
//! ```yaml
//! watchers:
//!   - name: web
//!     cmd: /usr/bin/web --port 8080
//!     numprocesses: 2
//!     env: "RUST_LOG=info, PORT=8080"
//! ```

use std::collections::HashSet;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// A single watcher entry as written in the configuration file.
pub type WatcherDefinition = Map<String, Value>;

/// Lookup of watcher definitions by name.
///
/// The `add` command consults a source when it is invoked with only a
/// watcher name.
pub trait WatcherSource {
    /// Returns the definition of the watcher called `name`, if present.
    fn find_watcher(&self, name: &str) -> Option<WatcherDefinition>;
}

/// Errors raised while loading a watcher configuration file.
#[derive(Debug, Error)]
pub enum WatcherFileError {
    /// The file could not be read.
    #[error("failed to read watcher configuration '{path}': {source}")]
    Read {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid YAML or does not match the file layout.
    #[error("failed to parse watcher configuration: {message}")]
    Parse {
        /// Parser diagnostic.
        message: String,
    },
    /// An entry is missing a required key or has the wrong shape.
    #[error("watcher entry {index} is invalid: {message}")]
    InvalidEntry {
        /// Zero-based position of the entry in the `watchers` list.
        index: usize,
        /// Description of the problem.
        message: String,
    },
    /// Two entries share a name.
    #[error("watcher '{name}' is defined more than once")]
    DuplicateWatcher {
        /// The repeated name.
        name: String,
    },
}

/// Parsed watcher configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WatcherFile {
    #[serde(default)]
    watchers: Vec<WatcherDefinition>,
}

impl WatcherFile {
    /// Reads and validates a watcher file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`WatcherFileError`] when the file cannot be read, parsed, or
    /// contains invalid entries.
    pub fn load(path: &Utf8Path) -> Result<Self, WatcherFileError> {
        let text = fs::read_to_string(path).map_err(|source| WatcherFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Parses and validates a watcher file from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`WatcherFileError`] when the text is not valid YAML or
    /// contains invalid entries.
    pub fn from_yaml_str(text: &str) -> Result<Self, WatcherFileError> {
        let file: Self = serde_saphyr::from_str(text).map_err(|error| WatcherFileError::Parse {
            message: error.to_string(),
        })?;
        file.validated()
    }

    /// Builds a watcher file from already-parsed definitions.
    ///
    /// # Errors
    ///
    /// Returns [`WatcherFileError`] when an entry lacks a string `name` or
    /// `cmd`, or when names repeat.
    pub fn from_definitions(watchers: Vec<WatcherDefinition>) -> Result<Self, WatcherFileError> {
        Self { watchers }.validated()
    }

    /// All watcher entries in file order.
    #[must_use]
    pub fn watchers(&self) -> &[WatcherDefinition] {
        &self.watchers
    }

    fn validated(self) -> Result<Self, WatcherFileError> {
        let mut seen = HashSet::new();
        for (index, entry) in self.watchers.iter().enumerate() {
            let name = required_string(entry, "name", index)?;
            required_string(entry, "cmd", index)?;
            if !seen.insert(name) {
                return Err(WatcherFileError::DuplicateWatcher {
                    name: name.to_owned(),
                });
            }
        }
        Ok(self)
    }
}

impl WatcherSource for WatcherFile {
    fn find_watcher(&self, name: &str) -> Option<WatcherDefinition> {
        self.watchers
            .iter()
            .find(|entry| entry.get("name").and_then(Value::as_str) == Some(name))
            .cloned()
    }
}

fn required_string<'a>(
    entry: &'a WatcherDefinition,
    key: &str,
    index: usize,
) -> Result<&'a str, WatcherFileError> {
    match entry.get(key) {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.as_str()),
        Some(_) => Err(WatcherFileError::InvalidEntry {
            index,
            message: format!("'{key}' must be a non-empty string"),
        }),
        None => Err(WatcherFileError::InvalidEntry {
            index,
            message: format!("'{key}' is missing"),
        }),
    }
}
