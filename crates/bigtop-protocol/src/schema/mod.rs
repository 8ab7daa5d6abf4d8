//! Per-command schema descriptors and the generic validator.
//!
//! A [`CommandDescriptor`] is the single source of truth for a command's
//! surface: the CLI flags it accepts and the typed properties its wire
//! message may carry. The client builds messages against it and the daemon
//! checks received messages with [`validate_properties`].

mod props;
mod signal;
mod watcher_options;

use serde_json::Value;

use crate::error::MessageError;
use crate::message::Properties;

pub(crate) use self::props::{
    flag, optional_object, optional_str, optional_string_list, optional_u32, required_str,
};
pub use self::signal::parse_signal;
pub use self::watcher_options::{is_passthrough_option, validate_option};

/// Static metadata describing one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Wire and CLI name; unique within the registry.
    pub name: &'static str,
    /// One-line description shown in CLI help.
    pub summary: &'static str,
    /// Positional argument synopsis shown in CLI help.
    pub usage: &'static str,
    /// CLI flags accepted by the command, in declaration order.
    pub options: &'static [OptionSpec],
    /// Typed properties the wire message may carry.
    pub properties: &'static [PropertySpec],
}

impl CommandDescriptor {
    /// Names of the properties that must appear in a received message.
    #[must_use]
    pub fn required_properties(&self) -> Vec<&'static str> {
        self.properties
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.name)
            .collect()
    }

    /// Looks up a declared property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&'static PropertySpec> {
        self.properties.iter().find(|spec| spec.name == name)
    }

    /// Looks up a declared CLI flag by its long name.
    #[must_use]
    pub fn option(&self, long: &str) -> Option<&'static OptionSpec> {
        self.options.iter().find(|spec| spec.long == long)
    }
}

/// One CLI flag: `(short, long, default, help)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// Optional single-character alias.
    pub short: Option<char>,
    /// Long flag name without the leading dashes.
    pub long: &'static str,
    /// Value used when the flag is not given.
    pub default: OptionDefault,
    /// Help text.
    pub help: &'static str,
}

/// Default value of a CLI flag, which also fixes whether it takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionDefault {
    /// Boolean switch.
    Flag(bool),
    /// Flag taking a string value.
    Value(Option<&'static str>),
}

/// One typed property of a wire message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpec {
    /// Property name.
    pub name: &'static str,
    /// Accepted value shape.
    pub kind: PropertyKind,
    /// Whether the property must be present.
    pub required: bool,
}

impl PropertySpec {
    /// Declares a property that must be present.
    #[must_use]
    pub const fn required(name: &'static str, kind: PropertyKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// Declares a property that may be omitted.
    #[must_use]
    pub const fn optional(name: &'static str, kind: PropertyKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Value shapes a property may be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// JSON string.
    String,
    /// JSON boolean.
    Boolean,
    /// JSON integer.
    Integer,
    /// Array of JSON strings.
    StringList,
    /// JSON integer or string.
    IntegerOrString,
    /// Signal name (`TERM`, `SIGTERM`) or number.
    Signal,
    /// Mapping of watcher options, each checked with [`validate_option`].
    WatcherOptions,
}

impl PropertyKind {
    /// Human-readable description of the accepted shape.
    #[must_use]
    pub const fn expectation(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Boolean => "a boolean",
            Self::Integer => "an integer",
            Self::StringList => "a list of strings",
            Self::IntegerOrString => "an integer or a string",
            Self::Signal => "a signal name or number",
            Self::WatcherOptions => "an object",
        }
    }

    fn check(self, name: &str, value: &Value) -> Result<(), MessageError> {
        let accepted = match self {
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::Integer => is_integer(value),
            Self::StringList => is_string_list(value),
            Self::IntegerOrString => is_integer(value) || value.is_string(),
            Self::Signal => parse_signal(value).is_some(),
            Self::WatcherOptions => {
                let Value::Object(options) = value else {
                    return Err(MessageError::invalid(name, self.expectation()));
                };
                return options
                    .iter()
                    .try_for_each(|(key, option)| validate_option(key, option));
            }
        };
        if accepted {
            Ok(())
        } else {
            Err(MessageError::invalid(name, self.expectation()))
        }
    }
}

/// Checks `props` against the schema in `descriptor`.
///
/// Required properties must be present, every present property must match
/// its declared kind, and properties the schema does not declare are
/// rejected.
///
/// # Errors
///
/// Returns the first [`MessageError`] found, checking declared properties in
/// declaration order before looking for undeclared ones.
pub fn validate_properties(
    descriptor: &CommandDescriptor,
    props: &Properties,
) -> Result<(), MessageError> {
    for spec in descriptor.properties {
        match props.get(spec.name) {
            Some(value) => spec.kind.check(spec.name, value)?,
            None if spec.required => return Err(MessageError::missing(spec.name)),
            None => {}
        }
    }

    match props.keys().find(|key| descriptor.property(key).is_none()) {
        Some(key) => Err(MessageError::UnexpectedProperty {
            property: key.clone(),
        }),
        None => Ok(()),
    }
}

pub(crate) fn is_integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

pub(crate) fn is_string_list(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_string))
}
