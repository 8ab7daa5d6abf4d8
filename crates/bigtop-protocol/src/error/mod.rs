//! Error taxonomy of the command protocol.
//!
//! [`ArgumentError`] belongs to the client: it is raised while a message is
//! built from CLI input and nothing reaches the daemon. [`MessageError`]
//! belongs to the daemon: it is raised while a received message is validated
//! or executed and is always turned into an error response. Validation and
//! authorisation failures carry distinct reason strings so clients can tell
//! a malformed request from an access denial.

use thiserror::Error;

/// Malformed CLI input detected while building a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// The number of positional arguments is wrong for the command.
    #[error("invalid number of arguments for '{command}': expected {expected}, got {given}")]
    InvalidArgumentCount {
        /// Command being built.
        command: &'static str,
        /// Accepted arity, e.g. `"0"` or `"1 or 2"`.
        expected: &'static str,
        /// Number of positional arguments supplied.
        given: usize,
    },

    /// The config-lookup path found no watcher with the requested name.
    #[error("Watcher \"{name}\" not present in config")]
    WatcherNotInConfig {
        /// Requested watcher name.
        name: String,
    },

    /// A positional argument has the wrong shape.
    #[error("invalid {argument} for '{command}': {message}")]
    InvalidArgument {
        /// Command being built.
        command: &'static str,
        /// Name of the offending argument.
        argument: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// The watcher configuration could not be loaded or used.
    #[error("watcher configuration error: {message}")]
    Config {
        /// Description of the failure.
        message: String,
    },

    /// A watcher's `env` entry could not be parsed.
    #[error("invalid env for watcher '{watcher}': {message}")]
    Environment {
        /// Watcher whose entry was rejected.
        watcher: String,
        /// Parser diagnostic.
        message: String,
    },

    /// A watcher entry carries an option the daemon would refuse.
    #[error("invalid option in watcher '{watcher}': {message}")]
    WatcherOption {
        /// Watcher whose entry was rejected.
        watcher: String,
        /// Option diagnostic.
        message: String,
    },
}

/// Fault detected by the daemon while handling a received message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// The command name is not registered.
    #[error("unknown command '{name}'")]
    UnknownCommand {
        /// Name found in the request.
        name: String,
    },

    /// The request line is not a well-formed message.
    #[error("malformed request: {message}")]
    Malformed {
        /// Description of the problem.
        message: String,
    },

    /// A required property is absent.
    #[error("message invalid: property '{property}' is missing")]
    MissingProperty {
        /// Name of the absent property.
        property: String,
    },

    /// A property has the wrong type or shape.
    #[error("message invalid: '{property}' property should be {expected}")]
    InvalidProperty {
        /// Name of the offending property.
        property: String,
        /// Description of the accepted shape, e.g. `"an object"`.
        expected: &'static str,
    },

    /// A property is not part of the command's schema.
    #[error("message invalid: unexpected property '{property}'")]
    UnexpectedProperty {
        /// Name of the undeclared property.
        property: String,
    },

    /// A watcher option key is not recognised.
    #[error("unknown option '{key}'")]
    UnknownOption {
        /// The unrecognised key.
        key: String,
    },

    /// A watcher option value failed its type check.
    #[error("option '{key}' should be {expected}")]
    InvalidOption {
        /// The option key.
        key: String,
        /// Description of the accepted shape.
        expected: &'static str,
    },

    /// The caller's declared uid does not match the endpoint owner.
    #[error("uid does not match endpoint_owner")]
    EndpointOwnerMismatch,

    /// The supervisor rejected the operation.
    #[error(transparent)]
    Supervisor(#[from] SupervisorError),
}

impl MessageError {
    /// Creates a [`MessageError::Malformed`] error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Creates a [`MessageError::MissingProperty`] error.
    #[must_use]
    pub fn missing(property: impl Into<String>) -> Self {
        Self::MissingProperty {
            property: property.into(),
        }
    }

    /// Creates a [`MessageError::InvalidProperty`] error.
    #[must_use]
    pub fn invalid(property: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidProperty {
            property: property.into(),
            expected,
        }
    }

    /// Returns `true` for faults raised by the access check rather than by
    /// schema validation or the supervisor.
    #[must_use]
    pub const fn is_access_denied(&self) -> bool {
        matches!(self, Self::EndpointOwnerMismatch)
    }
}

/// Failure reported by the external supervisor engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupervisorError {
    /// A watcher with the same name already exists.
    #[error("watcher '{name}' already exists")]
    AlreadyExists {
        /// Conflicting name.
        name: String,
    },

    /// No watcher with the given name exists.
    #[error("watcher '{name}' not found")]
    WatcherNotFound {
        /// Requested name.
        name: String,
    },

    /// The watcher has no process with the given pid.
    #[error("process {pid} not found in watcher '{name}'")]
    ProcessNotFound {
        /// Watcher name.
        name: String,
        /// Requested pid.
        pid: u32,
    },

    /// Any other supervisor failure.
    #[error("supervisor error: {message}")]
    Failed {
        /// Description of the failure.
        message: String,
    },
}
