//! Error types for the CLI runtime.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use bigtop_protocol::ArgumentError;
use thiserror::Error;

/// Exit status for usage faults detected before anything is sent.
pub(crate) const USAGE_EXIT: u8 = 2;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("a command must be provided")]
    MissingCommand,
    #[error("error: {error}\nusage: bigtop {command} {usage}")]
    Argument {
        command: &'static str,
        usage: &'static str,
        error: ArgumentError,
    },
    #[error("failed to serialise request: {0}")]
    SerialiseRequest(serde_json::Error),
    #[error("failed to start transport `{command}`: {source}")]
    SpawnTransport { command: String, source: io::Error },
    #[error("failed to send request to transport: {0}")]
    SendRequest(io::Error),
    #[error("failed to read response from transport: {0}")]
    ReadResponse(io::Error),
    #[error("transport `{command}` exited with {status}")]
    TransportStatus { command: String, status: String },
    #[error("transport `{command}` produced no response")]
    MissingResponse { command: String },
    #[error("failed to parse daemon response: {0}")]
    ParseResponse(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}

impl AppError {
    /// Exit status reported for this error.
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::CliUsage(error) => {
                ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(USAGE_EXIT))
            }
            Self::Argument { .. } | Self::MissingCommand => ExitCode::from(USAGE_EXIT),
            _ => ExitCode::FAILURE,
        }
    }

    /// Help and version requests are reported on stdout.
    pub(crate) fn is_informational(&self) -> bool {
        matches!(self, Self::CliUsage(error) if !error.use_stderr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_errors_exit_with_usage_status() {
        let error = AppError::Argument {
            command: "numshows",
            usage: "",
            error: ArgumentError::InvalidArgumentCount {
                command: "numshows",
                expected: "0",
                given: 1,
            },
        };
        assert_eq!(error.exit_code(), ExitCode::from(USAGE_EXIT));
        assert!(error.to_string().starts_with("error: invalid number of arguments"));
    }

    #[test]
    fn transport_errors_exit_with_failure() {
        let error = AppError::MissingResponse {
            command: "true".to_owned(),
        };
        assert_eq!(error.exit_code(), ExitCode::FAILURE);
        assert!(!error.is_informational());
    }
}
