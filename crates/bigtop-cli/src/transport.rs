//! External-program transport.
//!
//! The configured transport is a shell command line. It receives one
//! request line on stdin and must print the daemon's response line on
//! stdout, which lets operators reach the daemon through whatever carrier
//! they already use (`nc -U`, `socat`, `ssh`).

use std::io::{self, Write};
use std::process::{ChildStdin, Command, Stdio};

use crate::errors::AppError;

/// Carries one request line to the daemon and returns its response line.
pub(crate) trait Transport {
    fn exchange(&self, command_line: &str, request: &str) -> Result<String, AppError>;
}

/// Runs the transport command line with `sh -c`.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ShellTransport;

impl Transport for ShellTransport {
    fn exchange(&self, command_line: &str, request: &str) -> Result<String, AppError> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command_line)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| AppError::SpawnTransport {
                command: command_line.to_owned(),
                source,
            })?;

        // Dropping stdin closes the pipe so the transport sees end of input.
        let sent = child
            .stdin
            .take()
            .map_or(Ok(()), |mut stdin| write_request(&mut stdin, request));
        let output = child.wait_with_output().map_err(AppError::ReadResponse)?;
        if let Err(error) = sent
            && error.kind() != io::ErrorKind::BrokenPipe
        {
            return Err(AppError::SendRequest(error));
        }

        if !output.status.success() {
            return Err(AppError::TransportStatus {
                command: command_line.to_owned(),
                status: output.status.to_string(),
            });
        }
        first_line(&output.stdout).ok_or_else(|| AppError::MissingResponse {
            command: command_line.to_owned(),
        })
    }
}

fn write_request(stdin: &mut ChildStdin, request: &str) -> io::Result<()> {
    stdin.write_all(request.as_bytes())?;
    stdin.write_all(b"\n")?;
    stdin.flush()
}

fn first_line(stdout: &[u8]) -> Option<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_owned)
}
