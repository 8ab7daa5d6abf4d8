//! Closed registry of control commands.
//!
//! [`CommandName`] has one variant per command. Both the client and the
//! daemon resolve wire names through [`CommandName::parse`], and every
//! contract operation is forwarded to the concrete command with an
//! exhaustive `match`, so adding a command is a compile-time change.

use std::fmt;
use std::str::FromStr;

use crate::command::Command;
use crate::commands::{
    AddWatcher, List, NumProcesses, NumShows, NumWatchers, Rm, SignalCommand, Start, Stop,
};
use crate::error::{ArgumentError, MessageError};
use crate::message::{Message, Properties};
use crate::options::OptionValues;
use crate::response::{Payload, Response};
use crate::schema::{CommandDescriptor, OptionSpec};
use crate::supervisor::Supervisor;

/// Registered control commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    /// `add`
    Add,
    /// `list`
    List,
    /// `numprocesses`
    NumProcesses,
    /// `numshows`
    NumShows,
    /// `numwatchers`
    NumWatchers,
    /// `rm`
    Rm,
    /// `signal`
    Signal,
    /// `start`
    Start,
    /// `stop`
    Stop,
}

macro_rules! with_command {
    ($name:expr, $command:ident => $body:expr) => {
        match $name {
            CommandName::Add => {
                let $command = AddWatcher;
                $body
            }
            CommandName::List => {
                let $command = List;
                $body
            }
            CommandName::NumProcesses => {
                let $command = NumProcesses;
                $body
            }
            CommandName::NumShows => {
                let $command = NumShows;
                $body
            }
            CommandName::NumWatchers => {
                let $command = NumWatchers;
                $body
            }
            CommandName::Rm => {
                let $command = Rm;
                $body
            }
            CommandName::Signal => {
                let $command = SignalCommand;
                $body
            }
            CommandName::Start => {
                let $command = Start;
                $body
            }
            CommandName::Stop => {
                let $command = Stop;
                $body
            }
        }
    };
}

impl CommandName {
    /// Every registered command, in alphabetical order of wire name.
    pub const ALL: [Self; 9] = [
        Self::Add,
        Self::List,
        Self::NumProcesses,
        Self::NumShows,
        Self::NumWatchers,
        Self::Rm,
        Self::Signal,
        Self::Start,
        Self::Stop,
    ];

    /// Resolves a wire name; matching is case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::UnknownCommand`] for unregistered names.
    pub fn parse(name: &str) -> Result<Self, MessageError> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == name)
            .ok_or_else(|| MessageError::UnknownCommand {
                name: name.to_owned(),
            })
    }

    /// Wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.descriptor().name
    }

    /// Static descriptor of the command.
    #[must_use]
    pub fn descriptor(self) -> &'static CommandDescriptor {
        with_command!(self, command => command.descriptor())
    }

    /// CLI flags accepted by the command.
    #[must_use]
    pub fn options(self) -> &'static [OptionSpec] {
        with_command!(self, command => command.options())
    }

    /// Builds the wire message; see [`Command::message`].
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] for malformed CLI input.
    pub fn message(self, args: &[String], opts: &OptionValues) -> Result<Message, ArgumentError> {
        with_command!(self, command => command.message(args, opts))
    }

    /// Validates received properties; see [`Command::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`MessageError`] when the properties violate the schema.
    pub fn validate(self, props: &Properties) -> Result<(), MessageError> {
        with_command!(self, command => command.validate(props))
    }

    /// Executes against the supervisor; see [`Command::execute`].
    ///
    /// # Errors
    ///
    /// Returns [`MessageError`] for runtime failures.
    pub fn execute<S: Supervisor + ?Sized>(
        self,
        supervisor: &mut S,
        props: &Properties,
    ) -> Result<Option<Payload>, MessageError> {
        with_command!(self, command => command.execute(supervisor, props))
    }

    /// Renders a response; see [`Command::console_msg`].
    #[must_use]
    pub fn console_msg(self, response: &Response) -> String {
        with_command!(self, command => command.console_msg(response))
    }
}

impl FromStr for CommandName {
    type Err = MessageError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::parse(name)
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
