//! `list`: watcher names, or the pids of one watcher.

use serde_json::Value;

use super::{name_properties, optional_name, properties};
use crate::command::{Command, render_error};
use crate::error::{ArgumentError, MessageError};
use crate::message::{Message, Properties};
use crate::options::OptionValues;
use crate::response::{Payload, Response};
use crate::schema::{CommandDescriptor, PropertyKind, PropertySpec, optional_str};
use crate::supervisor::Supervisor;

const NAME: &str = "list";

static DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: NAME,
    summary: "List watchers or the processes of a watcher",
    usage: "[<name>]",
    options: &[],
    properties: &[PropertySpec::optional("name", PropertyKind::String)],
};

/// Lists watcher names, or the pids of the named watcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct List;

impl Command for List {
    fn descriptor(&self) -> &'static CommandDescriptor {
        &DESCRIPTOR
    }

    fn message(&self, args: &[String], _opts: &OptionValues) -> Result<Message, ArgumentError> {
        Ok(Message::new(NAME, name_properties(optional_name(NAME, args)?)))
    }

    fn execute<S: Supervisor + ?Sized>(
        &self,
        supervisor: &mut S,
        props: &Properties,
    ) -> Result<Option<Payload>, MessageError> {
        let payload = match optional_str(props, "name")? {
            Some(name) => properties([("pids", Value::from(supervisor.pids(name)?))]),
            None => properties([("watchers", Value::from(supervisor.watcher_names()))]),
        };
        Ok(Some(payload))
    }

    fn console_msg(&self, response: &Response) -> String {
        if !response.is_ok() {
            return render_error(response);
        }
        let items = response
            .get("watchers")
            .or_else(|| response.get("pids"))
            .and_then(Value::as_array);
        match items {
            Some(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            None => String::from("error: response has no 'watchers' or 'pids' field"),
        }
    }
}
