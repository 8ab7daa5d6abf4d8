//! Command-line parser generated from the command registry.
//!
//! Every registered command becomes a subcommand whose flags come from its
//! descriptor. Positional tokens are collected verbatim and handed to the
//! command's message builder, which owns arity checking.

use std::ffi::OsString;

use bigtop_protocol::{CommandName, OptionDefault, OptionSpec, OptionValues};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use crate::errors::AppError;
use crate::output::OutputFormat;

const OUTPUT: &str = "output";
const EMIT: &str = "emit";
const ARGUMENTS: &str = "arguments";

/// Parsed command invocation.
#[derive(Debug)]
pub(crate) struct Invocation {
    pub(crate) command: CommandName,
    pub(crate) arguments: Vec<String>,
    pub(crate) options: OptionValues,
    pub(crate) output: OutputFormat,
    pub(crate) emit: bool,
}

/// Builds the `bigtop` parser.
pub(crate) fn cli_command() -> Command {
    let root = Command::new("bigtop")
        .about("Control client for the bigtop process supervisor")
        .disable_help_subcommand(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(OUTPUT)
                .long(OUTPUT)
                .global(true)
                .value_name("FORMAT")
                .value_parser(value_parser!(OutputFormat))
                .default_value("auto")
                .help("How responses are rendered"),
        )
        .arg(
            Arg::new(EMIT)
                .long(EMIT)
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print the request line instead of sending it"),
        );
    CommandName::ALL
        .into_iter()
        .fold(root, |cli, command| cli.subcommand(subcommand(command)))
}

fn subcommand(command: CommandName) -> Command {
    let descriptor = command.descriptor();
    let usage = format!("bigtop {} [OPTIONS] {}", descriptor.name, descriptor.usage);
    descriptor
        .options
        .iter()
        .fold(
            Command::new(descriptor.name)
                .about(descriptor.summary)
                .override_usage(usage.trim_end().to_owned()),
            |sub, spec| sub.arg(option_arg(spec)),
        )
        .arg(
            Arg::new(ARGUMENTS)
                .value_name("ARG")
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true),
        )
}

fn option_arg(spec: &'static OptionSpec) -> Arg {
    let arg = Arg::new(spec.long)
        .long(spec.long)
        .short(spec.short)
        .help(spec.help);
    match spec.default {
        OptionDefault::Flag(_) => arg.action(ArgAction::SetTrue),
        OptionDefault::Value(_) => arg.action(ArgAction::Set).value_name("VALUE"),
    }
}

/// Parses command tokens into an [`Invocation`].
pub(crate) fn parse_invocation(args: Vec<OsString>) -> Result<Invocation, AppError> {
    let matches = cli_command()
        .try_get_matches_from(args)
        .map_err(AppError::CliUsage)?;
    let (command, sub) = CommandName::ALL
        .into_iter()
        .find_map(|command| {
            matches
                .subcommand_matches(command.as_str())
                .map(|sub| (command, sub))
        })
        .ok_or(AppError::MissingCommand)?;

    Ok(Invocation {
        command,
        arguments: sub
            .get_many::<String>(ARGUMENTS)
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        options: collect_options(command, sub),
        output: sub.get_one::<OutputFormat>(OUTPUT).copied().unwrap_or_default(),
        emit: sub.get_flag(EMIT),
    })
}

fn collect_options(command: CommandName, sub: &ArgMatches) -> OptionValues {
    let mut options = OptionValues::defaults_for(command.descriptor());
    for spec in command.options() {
        match spec.default {
            OptionDefault::Flag(_) => {
                if sub.get_flag(spec.long) {
                    options.set_flag(spec.long, true);
                }
            }
            OptionDefault::Value(_) => {
                if let Some(value) = sub.get_one::<String>(spec.long) {
                    options.set_value(spec.long, value.as_str());
                }
            }
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn parse(tokens: &[&str]) -> Result<Invocation, AppError> {
        let mut args = vec![OsString::from("bigtop")];
        args.extend(tokens.iter().map(OsString::from));
        parse_invocation(args)
    }

    #[test]
    fn parser_definition_is_consistent() {
        cli_command().debug_assert();
    }

    #[test]
    fn every_registered_command_is_a_subcommand() {
        let cli = cli_command();
        for command in CommandName::ALL {
            assert!(
                cli.find_subcommand(command.as_str()).is_some(),
                "{command} missing"
            );
        }
    }

    #[test]
    fn collects_flags_values_and_trailing_tokens() {
        let invocation = parse(&[
            "add", "--start", "-c", "watchers.yaml", "web", "/usr/bin/web", "--port", "80",
        ])
        .expect("parse add");
        assert_eq!(invocation.command, CommandName::Add);
        assert!(invocation.options.flag("start"));
        assert_eq!(invocation.options.value("config"), Some("watchers.yaml"));
        assert_eq!(
            invocation.arguments,
            ["web", "/usr/bin/web", "--port", "80"]
        );
        assert!(!invocation.emit);
    }

    #[test]
    fn flags_default_from_the_descriptor() {
        let invocation = parse(&["add", "web", "/bin/true"]).expect("parse add");
        assert!(!invocation.options.flag("start"));
        assert_eq!(invocation.options.value("config"), None);
    }

    #[rstest]
    #[case::before(&["--output", "json", "numshows"], OutputFormat::Json, false)]
    #[case::after(&["numshows", "--emit", "--output", "human"], OutputFormat::Human, true)]
    #[case::default(&["numshows"], OutputFormat::Auto, false)]
    fn global_flags_are_accepted_anywhere_before_arguments(
        #[case] tokens: &[&str],
        #[case] output: OutputFormat,
        #[case] emit: bool,
    ) {
        let invocation = parse(tokens).expect("parse numshows");
        assert_eq!(invocation.output, output);
        assert_eq!(invocation.emit, emit);
        assert!(invocation.arguments.is_empty());
    }

    #[rstest]
    #[case::bare(&[])]
    #[case::unknown(&["restart"])]
    #[case::bad_output(&["--output", "yaml", "numshows"])]
    fn rejects_invalid_invocations(#[case] tokens: &[&str]) {
        let error = parse(tokens).expect_err("should reject");
        assert!(matches!(error, AppError::CliUsage(_)), "{error:?}");
    }
}
