//! Command-line client for the bigtop process supervisor.
//!
//! The runtime splits leading configuration flags from the command tokens,
//! parses the command with a parser generated from the command registry,
//! builds the wire message through the command's own message builder, and
//! either prints the request line or hands it to the configured transport.
//! Responses are rendered with the command's console renderer or forwarded
//! as raw JSON.
//!
//! Exit status is 0 on success, 1 when the daemon answers with an error or
//! the transport or configuration fails, and 2 for usage errors detected
//! before anything is sent.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use bigtop_config::Config;
use bigtop_protocol::Response;

mod cli;
mod config;
mod errors;
pub mod output;
mod transport;

use cli::{Invocation, parse_invocation};
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
use errors::AppError;
use output::{Destination, render_response};
pub use output::{OutputFormat, ResolvedOutputFormat};
use transport::{ShellTransport, Transport};

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(stdout: &'a mut W, stderr: &'a mut E, stdout_is_terminal: bool) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal,
        }
    }
}

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader, T: Transport> {
    io: IoStreams<'a, W, E>,
    loader: &'a L,
    transport: &'a T,
}

impl<'a, W, E, L, T> CliRunner<'a, W, E, L, T>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
    T: Transport,
{
    const fn new(io: IoStreams<'a, W, E>, loader: &'a L, transport: &'a T) -> Self {
        Self {
            io,
            loader,
            transport,
        }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        match self.try_run(&args) {
            Ok(exit_code) => exit_code,
            Err(error) => {
                let _ = if error.is_informational() {
                    write!(self.io.stdout, "{error}")
                } else {
                    writeln!(self.io.stderr, "{}", error.to_string().trim_end())
                };
                error.exit_code()
            }
        }
    }

    fn try_run(&mut self, args: &[OsString]) -> Result<ExitCode, AppError> {
        let split = split_config_arguments(args);
        let mut invocation = parse_invocation(split.command_arguments)?;
        let config = self.loader.load(&split.config_arguments)?;
        apply_config_defaults(&mut invocation, &config);

        let command = invocation.command;
        let message = command
            .message(&invocation.arguments, &invocation.options)
            .map_err(|error| AppError::Argument {
                command: command.as_str(),
                usage: command.descriptor().usage,
                error,
            })?;
        let request = serde_json::to_string(&message).map_err(AppError::SerialiseRequest)?;

        let Some(command_line) = config.transport().filter(|_| !invocation.emit) else {
            writeln!(self.io.stdout, "{request}").map_err(AppError::WriteOutput)?;
            return Ok(ExitCode::SUCCESS);
        };

        let line = self.transport.exchange(command_line, &request)?;
        let response: Response = serde_json::from_str(&line).map_err(AppError::ParseResponse)?;
        let format = invocation.output.resolve(self.io.stdout_is_terminal);
        let (destination, text) = render_response(command, &response, &line, format);
        match destination {
            Destination::Stdout => writeln!(self.io.stdout, "{text}"),
            Destination::Stderr => writeln!(self.io.stderr, "{text}"),
        }
        .map_err(AppError::WriteOutput)?;

        Ok(if response.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}

/// Fills the watcher configuration option from `watchers_path` when the
/// command accepts one and none was given.
fn apply_config_defaults(invocation: &mut Invocation, config: &Config) {
    let accepts_config = invocation.command.descriptor().option("config").is_some();
    if accepts_config
        && invocation.options.value("config").is_none()
        && let Some(path) = config.watchers_path()
    {
        invocation.options.set_value("config", path.as_str());
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E, stdout_is_terminal: bool) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let io = IoStreams::new(stdout, stderr, stdout_is_terminal);
    run_with(args, io, &OrthoConfigLoader, &ShellTransport)
}

/// Runs the CLI with a custom configuration loader and transport.
pub(crate) fn run_with<I, W, E, L, T>(
    args: I,
    io: IoStreams<'_, W, E>,
    loader: &L,
    transport: &T,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
    T: Transport,
{
    CliRunner::new(io, loader, transport).run(args)
}

#[cfg(test)]
mod tests;
