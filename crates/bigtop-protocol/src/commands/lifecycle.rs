//! `start` and `stop`: drive one watcher or all of them.

use super::{name_properties, optional_name};
use crate::command::Command;
use crate::error::{ArgumentError, MessageError};
use crate::message::{Message, Properties};
use crate::options::OptionValues;
use crate::response::Payload;
use crate::schema::{CommandDescriptor, PropertyKind, PropertySpec, optional_str};
use crate::supervisor::{Scope, Supervisor};

const NAME_ONLY: &[PropertySpec] = &[PropertySpec::optional("name", PropertyKind::String)];

static START: CommandDescriptor = CommandDescriptor {
    name: "start",
    summary: "Start the arbiter or a watcher",
    usage: "[<name>]",
    options: &[],
    properties: NAME_ONLY,
};

static STOP: CommandDescriptor = CommandDescriptor {
    name: "stop",
    summary: "Stop the arbiter or a watcher",
    usage: "[<name>]",
    options: &[],
    properties: NAME_ONLY,
};

fn scoped_message(descriptor: &CommandDescriptor, args: &[String]) -> Result<Message, ArgumentError> {
    let name = optional_name(descriptor.name, args)?;
    Ok(Message::new(descriptor.name, name_properties(name)))
}

fn scope(props: &Properties) -> Result<Scope, MessageError> {
    Ok(Scope::from_name(optional_str(props, "name")?))
}

/// Starts every watcher, or the named one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Start;

impl Command for Start {
    fn descriptor(&self) -> &'static CommandDescriptor {
        &START
    }

    fn message(&self, args: &[String], _opts: &OptionValues) -> Result<Message, ArgumentError> {
        scoped_message(&START, args)
    }

    fn execute<S: Supervisor + ?Sized>(
        &self,
        supervisor: &mut S,
        props: &Properties,
    ) -> Result<Option<Payload>, MessageError> {
        Ok(supervisor.start(scope(props)?)?)
    }
}

/// Stops every watcher, or the named one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stop;

impl Command for Stop {
    fn descriptor(&self) -> &'static CommandDescriptor {
        &STOP
    }

    fn message(&self, args: &[String], _opts: &OptionValues) -> Result<Message, ArgumentError> {
        scoped_message(&STOP, args)
    }

    fn execute<S: Supervisor + ?Sized>(
        &self,
        supervisor: &mut S,
        props: &Properties,
    ) -> Result<Option<Payload>, MessageError> {
        Ok(supervisor.stop(scope(props)?)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::commands::properties;
    use crate::supervisor::MockSupervisor;

    #[test]
    fn start_without_name_targets_everything() {
        let mut supervisor = MockSupervisor::new();
        supervisor
            .expect_start()
            .withf(|scope| *scope == Scope::All)
            .times(1)
            .returning(|_| Ok(None));

        let message = Start
            .message(&[], &OptionValues::new())
            .expect("build message");
        assert!(message.properties().is_empty());
        assert_eq!(Start.execute(&mut supervisor, message.properties()), Ok(None));
    }

    #[test]
    fn stop_with_name_targets_one_watcher() {
        let mut supervisor = MockSupervisor::new();
        supervisor
            .expect_stop()
            .withf(|scope| *scope == Scope::Watcher("web".into()))
            .times(1)
            .returning(|_| Ok(Some(properties([("stopped", json!(["web"]))]))));

        let message = Stop
            .message(&["web".to_owned()], &OptionValues::new())
            .expect("build message");
        assert_eq!(Stop.validate(message.properties()), Ok(()));
        let payload = Stop
            .execute(&mut supervisor, message.properties())
            .expect("execute stop");
        assert_eq!(payload, Some(properties([("stopped", json!(["web"]))])));
    }

    #[test]
    fn too_many_arguments_fail() {
        let args = ["a".to_owned(), "b".to_owned()];
        let error = Start
            .message(&args, &OptionValues::new())
            .expect_err("should fail");
        assert_eq!(
            error,
            ArgumentError::InvalidArgumentCount {
                command: "start",
                expected: "0 or 1",
                given: 2,
            }
        );
    }
}
