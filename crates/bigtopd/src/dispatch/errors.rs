//! Infrastructure failures that end a serving loop.
//!
//! Protocol faults never appear here: they are reported to the client as
//! error responses and serving continues.

use std::io;

use thiserror::Error;

/// Errors raised while reading requests or writing responses.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// IO error on the request or response stream.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A response could not be serialised.
    #[error("failed to serialize response: {0}")]
    SerializeResponse(#[from] serde_json::Error),
}
