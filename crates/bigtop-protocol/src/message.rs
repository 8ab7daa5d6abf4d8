//! Wire request sent from the client to the daemon.
//!
//! A message is serialised as a single JSON object:
//!
//! ```json
//! {"command": "add", "properties": {"name": "web", "cmd": "/usr/bin/web"}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property mapping carried by a [`Message`].
pub type Properties = Map<String, Value>;

/// Immutable structured request: a command name and its properties.
///
/// Properties are only trusted once the owning command's `validate` has
/// accepted them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    command: String,
    #[serde(default)]
    properties: Properties,
}

impl Message {
    /// Builds a message for `command` carrying `properties`.
    #[must_use]
    pub fn new(command: impl Into<String>, properties: Properties) -> Self {
        Self {
            command: command.into(),
            properties,
        }
    }

    /// Builds a message with no properties.
    #[must_use]
    pub fn bare(command: impl Into<String>) -> Self {
        Self::new(command, Properties::new())
    }

    /// Command name as sent on the wire.
    #[must_use]
    pub const fn command(&self) -> &str {
        self.command.as_str()
    }

    /// Properties as sent on the wire.
    #[must_use]
    pub const fn properties(&self) -> &Properties {
        &self.properties
    }
}
