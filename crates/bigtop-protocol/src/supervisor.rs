//! Collaborator interface to the external supervisor engine.
//!
//! Commands never own supervisor state. They reach it through the
//! [`Supervisor`] trait, whose operations are the fixed set the protocol
//! consumes. The engine is expected to serialise mutations itself or to be
//! driven by a single dispatch loop; the protocol performs no locking.

use nix::sys::signal::Signal;
use serde_json::Value;

use crate::error::{MessageError, SupervisorError};
use crate::message::Properties;
use crate::response::Payload;

/// Opaque handle to a watcher created by the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatcherRef(u64);

impl WatcherRef {
    /// Wraps a supervisor-assigned token.
    #[must_use]
    pub const fn new(token: u64) -> Self {
        Self(token)
    }

    /// Supervisor-assigned token.
    #[must_use]
    pub const fn token(self) -> u64 {
        self.0
    }
}

/// Arguments of `add_watcher(name, cmd, args, **options)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherSpec {
    /// Watcher name.
    pub name: String,
    /// Full command line.
    pub cmd: String,
    /// Extra arguments passed to the command.
    pub args: Option<Vec<String>>,
    /// Validated watcher options.
    pub options: Properties,
}

/// Target of a lifecycle or count operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every watcher.
    All,
    /// A single named watcher.
    Watcher(String),
}

impl Scope {
    /// Scope for an optional watcher name.
    #[must_use]
    pub fn from_name(name: Option<&str>) -> Self {
        name.map_or(Self::All, |watcher| Self::Watcher(watcher.to_owned()))
    }
}

/// Arguments of a `signal` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalRequest {
    /// Watcher whose processes are signalled.
    pub name: String,
    /// Restricts delivery to one process of the watcher.
    pub pid: Option<u32>,
    /// Signal to deliver.
    pub signal: Signal,
    /// Also signal the children of the targeted processes.
    pub children: bool,
}

/// Identity of the endpoint owner: a numeric id or a user name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Numeric user id.
    Uid(u32),
    /// User name.
    Name(String),
}

impl Identity {
    /// JSON form compared against a caller's declared `uid`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Uid(uid) => Value::from(*uid),
            Self::Name(name) => Value::from(name.as_str()),
        }
    }

    /// Exact match against a declared `uid`; numbers never equal names.
    #[must_use]
    pub fn matches(&self, declared: &Value) -> bool {
        match (self, declared) {
            (Self::Uid(uid), Value::Number(number)) => number.as_u64() == Some(u64::from(*uid)),
            (Self::Name(name), Value::String(text)) => name == text,
            _ => false,
        }
    }
}

/// Daemon-side access state consulted by restricted commands.
///
/// The in-band `uid` check is a secondary guard. It trusts the declared uid
/// and assumes the transport already limits which peers can connect; peer
/// credentials are not verified here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    endpoint_owner_mode: bool,
    endpoint_owner: Option<Identity>,
}

impl AccessPolicy {
    /// Policy that lets every caller through.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            endpoint_owner_mode: false,
            endpoint_owner: None,
        }
    }

    /// Policy restricting mutating commands to `owner`.
    #[must_use]
    pub const fn owner_restricted(owner: Identity) -> Self {
        Self {
            endpoint_owner_mode: true,
            endpoint_owner: Some(owner),
        }
    }

    /// Whether endpoint-owner mode is active.
    #[must_use]
    pub const fn endpoint_owner_mode(&self) -> bool {
        self.endpoint_owner_mode
    }

    /// Configured endpoint owner, if any.
    #[must_use]
    pub const fn endpoint_owner(&self) -> Option<&Identity> {
        self.endpoint_owner.as_ref()
    }

    /// Checks a caller's declared `uid` against the endpoint owner.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::EndpointOwnerMismatch`] in endpoint-owner mode
    /// when `declared` is absent or differs from the owner.
    pub fn authorize_uid(&self, declared: Option<&Value>) -> Result<(), MessageError> {
        if !self.endpoint_owner_mode {
            return Ok(());
        }
        match (self.endpoint_owner.as_ref(), declared) {
            (Some(owner), Some(value)) if owner.matches(value) => Ok(()),
            _ => Err(MessageError::EndpointOwnerMismatch),
        }
    }
}

/// Operations the protocol consumes from the supervisor engine.
#[cfg_attr(test, mockall::automock)]
pub trait Supervisor {
    /// Current access policy.
    fn access_policy(&self) -> AccessPolicy;

    /// Creates a watcher.
    ///
    /// # Errors
    ///
    /// Fails when the name is taken or the engine rejects the options.
    fn add_watcher(&mut self, spec: WatcherSpec) -> Result<WatcherRef, SupervisorError>;

    /// Starts a watcher created by [`Supervisor::add_watcher`].
    ///
    /// # Errors
    ///
    /// Fails when the watcher cannot be started.
    fn start_watcher(&mut self, watcher: &WatcherRef) -> Result<Option<Payload>, SupervisorError>;

    /// Removes a watcher, stopping its processes unless `stop` is false.
    ///
    /// # Errors
    ///
    /// Fails when no watcher has that name.
    fn remove_watcher(&mut self, name: &str, stop: bool) -> Result<(), SupervisorError>;

    /// Starts the watchers in `scope`.
    ///
    /// # Errors
    ///
    /// Fails when a named watcher does not exist.
    fn start(&mut self, scope: Scope) -> Result<Option<Payload>, SupervisorError>;

    /// Stops the watchers in `scope`.
    ///
    /// # Errors
    ///
    /// Fails when a named watcher does not exist.
    fn stop(&mut self, scope: Scope) -> Result<Option<Payload>, SupervisorError>;

    /// Number of shows.
    fn numshows(&self) -> u64;

    /// Number of watchers.
    fn numwatchers(&self) -> u64;

    /// Number of processes in `scope`.
    ///
    /// # Errors
    ///
    /// Fails when a named watcher does not exist.
    fn numprocesses(&self, scope: Scope) -> Result<u64, SupervisorError>;

    /// Names of all watchers.
    fn watcher_names(&self) -> Vec<String>;

    /// Pids of the processes of a watcher.
    ///
    /// # Errors
    ///
    /// Fails when no watcher has that name.
    fn pids(&self, name: &str) -> Result<Vec<u32>, SupervisorError>;

    /// Delivers a signal.
    ///
    /// # Errors
    ///
    /// Fails when the watcher or pid does not exist.
    fn signal(&mut self, request: SignalRequest) -> Result<(), SupervisorError>;
}
