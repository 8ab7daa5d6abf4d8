//! `rm`: remove a watcher.

use serde_json::Value;

use super::properties;
use crate::command::Command;
use crate::error::{ArgumentError, MessageError};
use crate::message::{Message, Properties};
use crate::options::OptionValues;
use crate::response::Payload;
use crate::schema::{
    CommandDescriptor, OptionDefault, OptionSpec, PropertyKind, PropertySpec, flag, required_str,
};
use crate::supervisor::Supervisor;

const NAME: &str = "rm";

static DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: NAME,
    summary: "Remove a watcher",
    usage: "<name>",
    options: &[OptionSpec {
        short: None,
        long: "nostop",
        default: OptionDefault::Flag(false),
        help: "keep the watcher's processes running",
    }],
    properties: &[
        PropertySpec::required("name", PropertyKind::String),
        PropertySpec::optional("nostop", PropertyKind::Boolean),
    ],
};

/// Removes a watcher, stopping its processes unless `--nostop` is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rm;

impl Command for Rm {
    fn descriptor(&self) -> &'static CommandDescriptor {
        &DESCRIPTOR
    }

    fn message(&self, args: &[String], opts: &OptionValues) -> Result<Message, ArgumentError> {
        let [name] = args else {
            return Err(ArgumentError::InvalidArgumentCount {
                command: NAME,
                expected: "1",
                given: args.len(),
            });
        };
        Ok(Message::new(
            NAME,
            properties([
                ("name", Value::from(name.as_str())),
                ("nostop", Value::from(opts.flag("nostop"))),
            ]),
        ))
    }

    fn execute<S: Supervisor + ?Sized>(
        &self,
        supervisor: &mut S,
        props: &Properties,
    ) -> Result<Option<Payload>, MessageError> {
        let name = required_str(props, "name")?;
        let stop = !flag(props, "nostop")?;
        supervisor.remove_watcher(name, stop)?;
        Ok(None)
    }
}
