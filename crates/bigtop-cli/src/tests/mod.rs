//! Runtime tests for the CLI.

use std::cell::RefCell;
use std::ffi::OsString;
use std::process::ExitCode;

use bigtop_config::Config;

use crate::config::ConfigLoader;
use crate::errors::AppError;
use crate::transport::Transport;
use crate::{IoStreams, run_with};


pub(crate) struct StaticConfigLoader {
    config: Config,
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// Transport double that records requests and replies with a canned line.
#[derive(Default)]
pub(crate) struct FakeTransport {
    reply: String,
    pub(crate) exchanges: RefCell<Vec<(String, String)>>,
}

impl FakeTransport {
    pub(crate) fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            exchanges: RefCell::default(),
        }
    }
}

impl Transport for FakeTransport {
    fn exchange(&self, command_line: &str, request: &str) -> Result<String, AppError> {
        self.exchanges
            .borrow_mut()
            .push((command_line.to_owned(), request.to_owned()));
        Ok(self.reply.clone())
    }
}

/// Captured result of one CLI run.
#[derive(Debug)]
pub(crate) struct RunOutcome {
    pub(crate) exit: ExitCode,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

pub(crate) fn run_cli(
    command: &str,
    config: Config,
    transport: &FakeTransport,
    stdout_is_terminal: bool,
) -> RunOutcome {
    let mut args = vec![OsString::from("bigtop")];
    args.extend(command.split_whitespace().map(OsString::from));
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let loader = StaticConfigLoader { config };
    let exit = run_with(
        args,
        IoStreams::new(&mut stdout, &mut stderr, stdout_is_terminal),
        &loader,
        transport,
    );
    RunOutcome {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}
