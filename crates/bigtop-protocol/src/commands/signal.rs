//! `signal`: deliver a signal to the processes of a watcher.

use serde_json::Value;

use super::properties;
use crate::command::Command;
use crate::error::{ArgumentError, MessageError};
use crate::message::{Message, Properties};
use crate::options::OptionValues;
use crate::response::Payload;
use crate::schema::{
    CommandDescriptor, OptionDefault, OptionSpec, PropertyKind, PropertySpec, flag,
    optional_u32, parse_signal, required_str,
};
use crate::supervisor::{SignalRequest, Supervisor};

const NAME: &str = "signal";

static DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: NAME,
    summary: "Send a signal to the processes of a watcher",
    usage: "<name> [<pid>] <signum>",
    options: &[OptionSpec {
        short: None,
        long: "children",
        default: OptionDefault::Flag(false),
        help: "also signal the children of the targeted processes",
    }],
    properties: &[
        PropertySpec::required("name", PropertyKind::String),
        PropertySpec::required("signum", PropertyKind::Signal),
        PropertySpec::optional("pid", PropertyKind::Integer),
        PropertySpec::optional("children", PropertyKind::Boolean),
    ],
};

/// Sends a signal to a watcher, or to one of its processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalCommand;

impl Command for SignalCommand {
    fn descriptor(&self) -> &'static CommandDescriptor {
        &DESCRIPTOR
    }

    fn message(&self, args: &[String], opts: &OptionValues) -> Result<Message, ArgumentError> {
        let (name, pid, signum) = match args {
            [name, signum] => (name, None, signum),
            [name, pid, signum] => (name, Some(parse_pid(pid)?), signum),
            _ => {
                return Err(ArgumentError::InvalidArgumentCount {
                    command: NAME,
                    expected: "2 or 3",
                    given: args.len(),
                });
            }
        };

        let mut props = properties([
            ("name", Value::from(name.as_str())),
            ("signum", signum_value(signum)?),
            ("children", Value::from(opts.flag("children"))),
        ]);
        if let Some(pid) = pid {
            props.insert("pid".to_owned(), Value::from(pid));
        }
        Ok(Message::new(NAME, props))
    }

    fn execute<S: Supervisor + ?Sized>(
        &self,
        supervisor: &mut S,
        props: &Properties,
    ) -> Result<Option<Payload>, MessageError> {
        let signal = props
            .get("signum")
            .ok_or_else(|| MessageError::missing("signum"))
            .and_then(|value| {
                parse_signal(value)
                    .ok_or_else(|| MessageError::invalid("signum", PropertyKind::Signal.expectation()))
            })?;

        supervisor.signal(SignalRequest {
            name: required_str(props, "name")?.to_owned(),
            pid: optional_u32(props, "pid")?,
            signal,
            children: flag(props, "children")?,
        })?;
        Ok(None)
    }
}

fn parse_pid(raw: &str) -> Result<u32, ArgumentError> {
    raw.parse().map_err(|_| ArgumentError::InvalidArgument {
        command: NAME,
        argument: "pid",
        message: format!("'{raw}' is not a process id"),
    })
}

fn signum_value(raw: &str) -> Result<Value, ArgumentError> {
    let value = raw
        .parse::<i64>()
        .map_or_else(|_| Value::from(raw), Value::from);
    if parse_signal(&value).is_some() {
        Ok(value)
    } else {
        Err(ArgumentError::InvalidArgument {
            command: NAME,
            argument: "signum",
            message: format!("'{raw}' is not a signal"),
        })
    }
}
