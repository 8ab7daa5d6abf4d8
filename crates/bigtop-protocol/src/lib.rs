//! Control-command protocol for the bigtop process supervisor.
//!
//! Every administrative operation is a command that can be built from CLI
//! arguments, serialised into a wire [`Message`], validated on receipt,
//! executed against live supervisor state, and rendered back to an operator.
//! The [`Command`] trait captures that contract and [`CommandName`] is the
//! closed registry of all commands, shared by the client and the daemon.
//!
//! # Architecture
//!
//! Each command declares a static [`CommandDescriptor`]: its CLI flags and
//! the typed schema of its message properties. The client builds messages
//! against that descriptor and the daemon validates received messages with
//! the same descriptor, so the two sides cannot drift apart.
//!
//! Failures are split by where they are detected. [`ArgumentError`] is raised
//! on the client while a message is being built and never crosses the
//! transport. [`MessageError`] is raised on the daemon while a received
//! message is validated or executed and always becomes an error [`Response`].
//!
//! The supervisor engine is an external collaborator reached through the
//! [`Supervisor`] trait.
//!
//! # Example
//!
//! ```
//! use bigtop_protocol::{CommandName, OptionValues, Response};
//! use serde_json::json;
//!
//! let command = CommandName::parse("numshows").expect("numshows is registered");
//! let options = OptionValues::defaults_for(command.descriptor());
//! let message = command.message(&[], &options).expect("no arguments needed");
//! assert_eq!(message.command(), "numshows");
//! assert!(message.properties().is_empty());
//!
//! let mut payload = serde_json::Map::new();
//! payload.insert("numshows".into(), json!(3));
//! assert_eq!(command.console_msg(&Response::ok(Some(payload))), "3");
//! ```

pub mod command;
pub mod commands;
pub mod error;
pub mod message;
pub mod options;
pub mod registry;
pub mod response;
pub mod schema;
pub mod supervisor;

#[cfg(test)]
mod tests;

pub use self::command::{Command, render_error};
pub use self::error::{ArgumentError, MessageError, SupervisorError};
pub use self::message::{Message, Properties};
pub use self::options::{OptionValue, OptionValues};
pub use self::registry::CommandName;
pub use self::response::{Payload, Response, Status};
pub use self::schema::{
    CommandDescriptor, OptionDefault, OptionSpec, PropertyKind, PropertySpec, validate_option,
    validate_properties,
};
pub use self::supervisor::{
    AccessPolicy, Identity, Scope, SignalRequest, Supervisor, WatcherRef, WatcherSpec,
};
