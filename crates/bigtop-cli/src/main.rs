//! CLI entrypoint for the bigtop control client.
//!
//! The binary delegates to [`bigtop_cli::run`].

use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdout_is_terminal = io::stdout().is_terminal();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    bigtop_cli::run(
        std::env::args_os(),
        &mut stdout,
        &mut stderr,
        stdout_is_terminal,
    )
}
