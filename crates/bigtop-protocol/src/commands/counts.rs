//! `numwatchers` and `numprocesses`: scalar counts.

use serde_json::Value;

use super::{name_properties, optional_name, properties};
use crate::command::{Command, render_field};
use crate::error::{ArgumentError, MessageError};
use crate::message::{Message, Properties};
use crate::options::OptionValues;
use crate::response::{Payload, Response};
use crate::schema::{CommandDescriptor, PropertyKind, PropertySpec, optional_str};
use crate::supervisor::{Scope, Supervisor};

const NUMWATCHERS: &str = "numwatchers";
const NUMPROCESSES: &str = "numprocesses";

static NUMWATCHERS_DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: NUMWATCHERS,
    summary: "Get the number of watchers",
    usage: "",
    options: &[],
    properties: &[],
};

static NUMPROCESSES_DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: NUMPROCESSES,
    summary: "Get the number of processes",
    usage: "[<name>]",
    options: &[],
    properties: &[PropertySpec::optional("name", PropertyKind::String)],
};

/// Reports the number of watchers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumWatchers;

impl Command for NumWatchers {
    fn descriptor(&self) -> &'static CommandDescriptor {
        &NUMWATCHERS_DESCRIPTOR
    }

    fn message(&self, args: &[String], _opts: &OptionValues) -> Result<Message, ArgumentError> {
        if args.is_empty() {
            Ok(Message::bare(NUMWATCHERS))
        } else {
            Err(ArgumentError::InvalidArgumentCount {
                command: NUMWATCHERS,
                expected: "0",
                given: args.len(),
            })
        }
    }

    fn execute<S: Supervisor + ?Sized>(
        &self,
        supervisor: &mut S,
        _props: &Properties,
    ) -> Result<Option<Payload>, MessageError> {
        Ok(Some(properties([(
            NUMWATCHERS,
            Value::from(supervisor.numwatchers()),
        )])))
    }

    fn console_msg(&self, response: &Response) -> String {
        render_field(response, NUMWATCHERS)
    }
}

/// Reports the number of processes overall or in one watcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumProcesses;

impl Command for NumProcesses {
    fn descriptor(&self) -> &'static CommandDescriptor {
        &NUMPROCESSES_DESCRIPTOR
    }

    fn message(&self, args: &[String], _opts: &OptionValues) -> Result<Message, ArgumentError> {
        let name = optional_name(NUMPROCESSES, args)?;
        Ok(Message::new(NUMPROCESSES, name_properties(name)))
    }

    fn execute<S: Supervisor + ?Sized>(
        &self,
        supervisor: &mut S,
        props: &Properties,
    ) -> Result<Option<Payload>, MessageError> {
        let scope = Scope::from_name(optional_str(props, "name")?);
        let count = supervisor.numprocesses(scope)?;
        Ok(Some(properties([(NUMPROCESSES, Value::from(count))])))
    }

    fn console_msg(&self, response: &Response) -> String {
        render_field(response, NUMPROCESSES)
    }
}
