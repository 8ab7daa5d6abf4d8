//! Configuration loading helpers for the CLI.
//!
//! Configuration flags must precede the command name. Everything from the
//! first token that is not a configuration flag onwards belongs to the
//! command parser.

use std::ffi::{OsStr, OsString};

use bigtop_config::Config;
use ortho_config::OrthoConfig;

use crate::errors::AppError;

/// CLI flags recognised by the configuration loader.
///
/// Kept in sync with the fields of [`Config`].
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--transport",
    "--watchers-path",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration from the leading configuration flags.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

/// Loads layered configuration through `ortho_config`.
pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Stop,
}

fn classify(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    let (flag, inline_value) = match text.split_once('=') {
        Some((flag, _)) => (flag, true),
        None => (&*text, false),
    };
    if CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Include {
            needs_value: !inline_value,
        }
    } else {
        FlagAction::Stop
    }
}

/// Arguments split between the configuration loader and the command parser.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ConfigArgumentSplit {
    /// Program name followed by the configuration flags.
    pub(crate) config_arguments: Vec<OsString>,
    /// Program name followed by the command tokens.
    pub(crate) command_arguments: Vec<OsString>,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_arguments: Vec::new(),
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut remaining = rest.iter();
    let mut consumed = 0_usize;
    while let Some(argument) = remaining.next() {
        match classify(argument) {
            FlagAction::Include { needs_value } => {
                config_arguments.push(argument.clone());
                consumed += 1;
                if needs_value && let Some(value) = remaining.next() {
                    config_arguments.push(value.clone());
                    consumed += 1;
                }
            }
            FlagAction::Stop => break,
        }
    }

    let mut command_arguments = vec![program.clone()];
    command_arguments.extend(rest.iter().skip(consumed).cloned());
    ConfigArgumentSplit {
        config_arguments,
        command_arguments,
    }
}
