//! Typed table of the options a watcher may be created with.

use serde_json::Value;

use super::{is_integer, is_string_list, parse_signal};
use crate::error::MessageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionKind {
    Integer,
    Number,
    IntegerOrString,
    Boolean,
    String,
    StringOrList,
    StringMap,
    Signal,
}

impl OptionKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Integer => is_integer(value),
            Self::Number => value.is_number(),
            Self::IntegerOrString => is_integer(value) || value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::String => value.is_string(),
            Self::StringOrList => value.is_string() || is_string_list(value),
            Self::StringMap => value
                .as_object()
                .is_some_and(|entries| entries.values().all(Value::is_string)),
            Self::Signal => parse_signal(value).is_some(),
        }
    }

    const fn expectation(self) -> &'static str {
        match self {
            Self::Integer => "an integer",
            Self::Number => "a number",
            Self::IntegerOrString => "an integer or a string",
            Self::Boolean => "a boolean",
            Self::String => "a string",
            Self::StringOrList => "a string or a list of strings",
            Self::StringMap => "an object of strings",
            Self::Signal => "a signal name or number",
        }
    }
}

const WATCHER_OPTIONS: &[(&str, OptionKind)] = &[
    ("numprocesses", OptionKind::Integer),
    ("max_retry", OptionKind::Integer),
    ("max_age", OptionKind::Integer),
    ("max_age_variance", OptionKind::Integer),
    ("priority", OptionKind::Integer),
    ("warmup_delay", OptionKind::Number),
    ("retry_in", OptionKind::Number),
    ("graceful_timeout", OptionKind::Number),
    ("uid", OptionKind::IntegerOrString),
    ("gid", OptionKind::IntegerOrString),
    ("send_hup", OptionKind::Boolean),
    ("shell", OptionKind::Boolean),
    ("copy_env", OptionKind::Boolean),
    ("copy_path", OptionKind::Boolean),
    ("respawn", OptionKind::Boolean),
    ("stop_children", OptionKind::Boolean),
    ("close_child_stdin", OptionKind::Boolean),
    ("close_child_stdout", OptionKind::Boolean),
    ("close_child_stderr", OptionKind::Boolean),
    ("use_sockets", OptionKind::Boolean),
    ("singleton", OptionKind::Boolean),
    ("autostart", OptionKind::Boolean),
    ("working_dir", OptionKind::String),
    ("shell_args", OptionKind::String),
    ("executable", OptionKind::String),
    ("stdout_stream", OptionKind::String),
    ("stderr_stream", OptionKind::String),
    ("args", OptionKind::StringOrList),
    ("env", OptionKind::StringMap),
    ("stop_signal", OptionKind::Signal),
];

// Keys under these prefixes are handed to stream classes, hooks and rlimits
// unchecked.
const PASSTHROUGH_PREFIXES: &[&str] = &["stdout_stream.", "stderr_stream.", "hooks.", "rlimit_"];

/// Returns `true` when `key` falls under a prefix whose values are not
/// type-checked.
#[must_use]
pub fn is_passthrough_option(key: &str) -> bool {
    PASSTHROUGH_PREFIXES
        .iter()
        .any(|prefix| key.len() > prefix.len() && key.starts_with(prefix))
}

/// Checks a single watcher option against the option table.
///
/// # Errors
///
/// Returns [`MessageError::UnknownOption`] for keys outside the table and
/// the passthrough prefixes, and [`MessageError::InvalidOption`] when the
/// value has the wrong type.
pub fn validate_option(key: &str, value: &Value) -> Result<(), MessageError> {
    if is_passthrough_option(key) {
        return Ok(());
    }

    let Some((_, kind)) = WATCHER_OPTIONS.iter().find(|(name, _)| *name == key) else {
        return Err(MessageError::UnknownOption {
            key: key.to_owned(),
        });
    };

    if kind.accepts(value) {
        Ok(())
    } else {
        Err(MessageError::InvalidOption {
            key: key.to_owned(),
            expected: kind.expectation(),
        })
    }
}
