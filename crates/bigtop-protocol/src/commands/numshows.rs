//! `numshows`: report the number of shows.

use serde_json::Value;

use super::properties;
use crate::command::{Command, render_field};
use crate::error::{ArgumentError, MessageError};
use crate::message::{Message, Properties};
use crate::options::OptionValues;
use crate::response::{Payload, Response};
use crate::schema::CommandDescriptor;
use crate::supervisor::Supervisor;

const NAME: &str = "numshows";

static DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: NAME,
    summary: "Get the number of shows",
    usage: "",
    options: &[],
    properties: &[],
};

/// Reports the number of shows.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumShows;

impl Command for NumShows {
    fn descriptor(&self) -> &'static CommandDescriptor {
        &DESCRIPTOR
    }

    fn message(&self, args: &[String], _opts: &OptionValues) -> Result<Message, ArgumentError> {
        if args.is_empty() {
            Ok(Message::bare(NAME))
        } else {
            Err(ArgumentError::InvalidArgumentCount {
                command: NAME,
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
        Ok(Some(properties([(NAME, Value::from(supervisor.numshows()))])))
    }

    fn console_msg(&self, response: &Response) -> String {
        render_field(response, NAME)
    }
}
