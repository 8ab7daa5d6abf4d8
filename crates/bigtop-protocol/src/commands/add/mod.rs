//! `add`: create a watcher, optionally starting it.
//!
//! The message can be built two ways. With `<name> <cmd...>` the command
//! line is taken from the arguments. With a lone `<name>` and a watcher
//! configuration (`--config <path>` or an in-memory source) the definition
//! is looked up by name; its `name` and `cmd` become top-level properties
//! and every other key becomes a watcher option. Nested `hooks`,
//! `stdout_stream` and `stderr_stream` mappings are flattened into dotted
//! keys, and every option is checked before the message is built.

use std::sync::Arc;

use bigtop_config::{WatcherDefinition, WatcherFile, WatcherSource, parse_env};
use camino::Utf8Path;
use serde_json::{Map, Value};

use super::properties;
use crate::command::Command;
use crate::error::{ArgumentError, MessageError};
use crate::message::{Message, Properties};
use crate::options::OptionValues;
use crate::response::Payload;
use crate::schema::{
    CommandDescriptor, OptionDefault, OptionSpec, PropertyKind, PropertySpec, flag,
    optional_object, optional_string_list, required_str, validate_option,
};
use crate::supervisor::{Supervisor, WatcherSpec};

const NAME: &str = "add";

const NESTED_OPTIONS: &[&str] = &["hooks", "stdout_stream", "stderr_stream"];

static DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: NAME,
    summary: "Add a watcher",
    usage: "<name> [<cmd>...]",
    options: &[
        OptionSpec {
            short: None,
            long: "start",
            default: OptionDefault::Flag(false),
            help: "start the watcher immediately",
        },
        OptionSpec {
            short: Some('c'),
            long: "config",
            default: OptionDefault::Value(None),
            help: "watcher configuration file consulted when only a name is given",
        },
    ],
    properties: &[
        PropertySpec::required("name", PropertyKind::String),
        PropertySpec::required("cmd", PropertyKind::String),
        PropertySpec::optional("args", PropertyKind::StringList),
        PropertySpec::optional("options", PropertyKind::WatcherOptions),
        PropertySpec::optional("start", PropertyKind::Boolean),
    ],
};

type SharedSource = Arc<dyn WatcherSource + Send + Sync>;

/// Adds a watcher to the supervisor.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddWatcher;

impl Command for AddWatcher {
    fn descriptor(&self) -> &'static CommandDescriptor {
        &DESCRIPTOR
    }

    fn message(&self, args: &[String], opts: &OptionValues) -> Result<Message, ArgumentError> {
        let start = opts.flag("start");
        match args {
            [name] => match watcher_source(opts)? {
                Some(source) => from_config(source.as_ref(), name, start),
                None => Err(argument_count(args.len())),
            },
            [name, cmd @ ..] => Ok(Message::new(
                NAME,
                properties([
                    ("name", Value::from(name.as_str())),
                    ("cmd", Value::from(cmd.join(" "))),
                    ("start", Value::from(start)),
                ]),
            )),
            [] => Err(argument_count(0)),
        }
    }

    fn execute<S: Supervisor + ?Sized>(
        &self,
        supervisor: &mut S,
        props: &Properties,
    ) -> Result<Option<Payload>, MessageError> {
        let options = optional_object(props, "options")?;
        supervisor.access_policy().authorize_uid(options.get("uid"))?;

        let spec = WatcherSpec {
            name: required_str(props, "name")?.to_owned(),
            cmd: required_str(props, "cmd")?.to_owned(),
            args: optional_string_list(props, "args")?,
            options,
        };
        let watcher = supervisor.add_watcher(spec)?;

        if flag(props, "start")? {
            Ok(supervisor.start_watcher(&watcher)?)
        } else {
            Ok(None)
        }
    }
}

const fn argument_count(given: usize) -> ArgumentError {
    ArgumentError::InvalidArgumentCount {
        command: NAME,
        expected: "at least 2, or 1 with a watcher configuration",
        given,
    }
}

fn watcher_source(opts: &OptionValues) -> Result<Option<SharedSource>, ArgumentError> {
    if let Some(source) = opts.watcher_source() {
        return Ok(Some(source));
    }
    opts.value("config")
        .map(|path| {
            WatcherFile::load(Utf8Path::new(path))
                .map(|file| Arc::new(file) as SharedSource)
                .map_err(|error| ArgumentError::Config {
                    message: error.to_string(),
                })
        })
        .transpose()
}

fn from_config(source: &dyn WatcherSource, name: &str, start: bool) -> Result<Message, ArgumentError> {
    let mut entry = source
        .find_watcher(name)
        .ok_or_else(|| ArgumentError::WatcherNotInConfig {
            name: name.to_owned(),
        })?;

    if let Some(raw) = entry.get("env") {
        let parsed = parse_env(raw).map_err(|error| ArgumentError::Environment {
            watcher: name.to_owned(),
            message: error.to_string(),
        })?;
        let env = parsed
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        entry.insert("env".to_owned(), Value::Object(env));
    }

    let watcher_name = take_string(&mut entry, "name")?;
    let cmd = take_string(&mut entry, "cmd")?;
    let options = flatten_nested(entry);
    for (key, value) in &options {
        validate_option(key, value).map_err(|error| ArgumentError::WatcherOption {
            watcher: watcher_name.clone(),
            message: error.to_string(),
        })?;
    }
    Ok(Message::new(
        NAME,
        properties([
            ("name", Value::String(watcher_name)),
            ("cmd", Value::String(cmd)),
            ("start", Value::from(start)),
            ("options", Value::Object(options)),
        ]),
    ))
}

fn flatten_nested(entry: WatcherDefinition) -> Map<String, Value> {
    let mut options = Map::new();
    for (key, value) in entry {
        match value {
            Value::Object(nested) if NESTED_OPTIONS.contains(&key.as_str()) => {
                options.extend(
                    nested
                        .into_iter()
                        .map(|(inner, item)| (format!("{key}.{inner}"), item)),
                );
            }
            other => {
                options.insert(key, other);
            }
        }
    }
    options
}

fn take_string(entry: &mut WatcherDefinition, key: &str) -> Result<String, ArgumentError> {
    match entry.remove(key) {
        Some(Value::String(text)) => Ok(text),
        _ => Err(ArgumentError::Config {
            message: format!("watcher entry has no string '{key}'"),
        }),
    }
}
