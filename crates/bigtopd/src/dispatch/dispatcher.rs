//! Registry dispatch over an owned supervisor.

use std::io::{BufRead, Write};
use std::sync::Arc;

use bigtop_protocol::{CommandName, Message, MessageError, Payload, Response, Supervisor};
use tracing::{debug, info, warn};

use super::errors::DispatchError;
use super::reader::{RequestLine, read_request_line};
use super::request::{oversized, parse_request};
use super::response::ResponseWriter;
use crate::health::{HealthReporter, StructuredHealthReporter};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Executes control messages against the supervisor it owns.
pub struct Dispatcher<S> {
    supervisor: S,
    reporter: Arc<dyn HealthReporter>,
}

impl<S: Supervisor> Dispatcher<S> {
    /// Builds a dispatcher that reports lifecycle events through `tracing`.
    pub fn new(supervisor: S) -> Self {
        Self::with_reporter(supervisor, Arc::new(StructuredHealthReporter::new()))
    }

    /// Builds a dispatcher with a custom health reporter.
    pub fn with_reporter(supervisor: S, reporter: Arc<dyn HealthReporter>) -> Self {
        Self {
            supervisor,
            reporter,
        }
    }

    /// Supervisor driven by this dispatcher.
    pub const fn supervisor(&self) -> &S {
        &self.supervisor
    }

    /// Releases the supervisor.
    pub fn into_supervisor(self) -> S {
        self.supervisor
    }

    /// Resolves, validates and executes one message.
    ///
    /// Every [`MessageError`] becomes an error response.
    pub fn handle_message(&mut self, message: &Message) -> Response {
        let result = self.execute(message);
        if let Err(error) = &result {
            warn!(
                target: DISPATCH_TARGET,
                command = message.command(),
                reason = %error,
                access_denied = error.is_access_denied(),
                "request rejected"
            );
        }
        Response::from_result(result)
    }

    /// Parses and handles one request line.
    pub fn handle_line(&mut self, line: &[u8]) -> Response {
        match parse_request(line) {
            Ok(message) => self.handle_message(&message),
            Err(error) => reject(&error),
        }
    }

    /// Serves consecutive JSONL requests until the reader is exhausted.
    ///
    /// Writes one response line per request line and returns the number of
    /// requests answered.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when reading a request or writing a
    /// response fails.
    pub fn serve<R: BufRead, W: Write>(
        &mut self,
        mut reader: R,
        writer: W,
    ) -> Result<usize, DispatchError> {
        self.reporter.serving_started();
        let mut responses = ResponseWriter::new(writer);
        let result = self.serve_lines(&mut reader, &mut responses);
        match &result {
            Ok(handled) => self.reporter.serving_stopped(*handled),
            Err(error) => self.reporter.serving_failed(error),
        }
        result
    }

    fn serve_lines<R: BufRead, W: Write>(
        &mut self,
        reader: &mut R,
        responses: &mut ResponseWriter<W>,
    ) -> Result<usize, DispatchError> {
        let mut handled = 0_usize;
        while let Some(line) = read_request_line(reader)? {
            let response = match line {
                RequestLine::Complete(bytes) => self.handle_line(&bytes),
                RequestLine::Oversized { size } => reject(&oversized(size)),
            };
            responses.write_response(&response)?;
            handled += 1;
        }
        Ok(handled)
    }

    fn execute(&mut self, message: &Message) -> Result<Option<Payload>, MessageError> {
        let command = CommandName::parse(message.command())?;
        debug!(target: DISPATCH_TARGET, %command, "dispatching request");
        command.validate(message.properties())?;
        let payload = command.execute(&mut self.supervisor, message.properties())?;
        info!(target: DISPATCH_TARGET, %command, "command executed");
        Ok(payload)
    }
}

fn reject(error: &MessageError) -> Response {
    warn!(target: DISPATCH_TARGET, reason = %error, "malformed request");
    Response::from(error)
}
