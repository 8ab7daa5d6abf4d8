//! The command contract implemented by every control command.

use crate::error::{ArgumentError, MessageError};
use crate::message::{Message, Properties};
use crate::options::OptionValues;
use crate::response::{Payload, Response};
use crate::schema::{CommandDescriptor, OptionSpec, validate_properties};
use crate::supervisor::Supervisor;

/// Contract shared by all control commands.
///
/// `message` runs on the client and fails with [`ArgumentError`]; `validate`
/// and `execute` run on the daemon and fail with [`MessageError`].
/// `console_msg` renders a response for a terminal and never fails.
pub trait Command {
    /// Static descriptor: name, CLI flags and property schema.
    fn descriptor(&self) -> &'static CommandDescriptor;

    /// CLI flags accepted by the command, each with its default.
    fn options(&self) -> &'static [OptionSpec] {
        self.descriptor().options
    }

    /// Builds the wire message from positional arguments and flag values.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when the arguments have the wrong count or
    /// shape.
    fn message(&self, args: &[String], opts: &OptionValues) -> Result<Message, ArgumentError>;

    /// Checks received properties before execution.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError`] when the properties violate the schema.
    fn validate(&self, props: &Properties) -> Result<(), MessageError> {
        validate_properties(self.descriptor(), props)
    }

    /// Performs the command against supervisor state.
    ///
    /// `Ok(None)` is a bare acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError`] for runtime failures such as an access check
    /// mismatch or an error reported by the supervisor.
    fn execute<S: Supervisor + ?Sized>(
        &self,
        supervisor: &mut S,
        props: &Properties,
    ) -> Result<Option<Payload>, MessageError>;

    /// Renders a response for a terminal.
    fn console_msg(&self, response: &Response) -> String {
        if response.is_ok() {
            String::from("ok")
        } else {
            render_error(response)
        }
    }
}

/// Shared rendering of error responses.
#[must_use]
pub fn render_error(response: &Response) -> String {
    format!("error: {}", response.reason().unwrap_or("no reason given"))
}

/// Renders a scalar payload field as bare text, falling back to the error
/// rendering when the response failed or the field is absent.
pub(crate) fn render_field(response: &Response, key: &str) -> String {
    if !response.is_ok() {
        return render_error(response);
    }
    match response.get(key) {
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(value) => value.to_string(),
        None => format!("error: response has no '{key}' field"),
    }
}
