//! Wire response sent from the daemon back to the client.
//!
//! The payload fields of a response are flattened into the top-level object
//! next to `status` and `time`:
//!
//! ```json
//! {"status": "ok", "numshows": 3, "time": 1700000000.25}
//! {"status": "error", "reason": "unknown command 'nope'", "time": 1700000000.5}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::error::MessageError;

/// Payload fields returned by a command.
pub type Payload = Map<String, Value>;

/// Top-level keys owned by the response envelope.
pub const RESERVED_FIELDS: [&str; 3] = ["status", "reason", "time"];

/// Outcome marker of a [`Response`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The command executed successfully.
    Ok,
    /// The request was rejected or failed.
    #[default]
    Error,
}

/// Terminal reply to one [`Message`](crate::Message).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(rename = "time", default)]
    timestamp: f64,
    #[serde(flatten)]
    payload: Payload,
}

impl Response {
    /// Successful response carrying `payload`, or a bare acknowledgment.
    ///
    /// Payload entries named like an envelope field ([`RESERVED_FIELDS`])
    /// are dropped so the encoded object never repeats a key.
    #[must_use]
    pub fn ok(payload: Option<Payload>) -> Self {
        let mut payload = payload.unwrap_or_default();
        payload.retain(|key, _| !RESERVED_FIELDS.contains(&key.as_str()));
        Self {
            status: Status::Ok,
            reason: None,
            timestamp: now(),
            payload,
        }
    }

    /// Error response carrying `reason`.
    #[must_use]
    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            reason: Some(reason.into()),
            timestamp: now(),
            payload: Payload::new(),
        }
    }

    /// Converts the outcome of a command execution into a response.
    #[must_use]
    pub fn from_result(result: Result<Option<Payload>, MessageError>) -> Self {
        match result {
            Ok(payload) => Self::ok(payload),
            Err(error) => Self::from(&error),
        }
    }

    /// Outcome marker.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns `true` when the status is `ok`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// Error reason, when one was given.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Seconds since the Unix epoch at which the response was built.
    #[must_use]
    pub const fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Payload fields.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Looks up a single payload field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

impl From<&MessageError> for Response {
    fn from(error: &MessageError) -> Self {
        Self::error(error.to_string())
    }
}

fn now() -> f64 {
    (OffsetDateTime::now_utc() - OffsetDateTime::UNIX_EPOCH).as_seconds_f64()
}
