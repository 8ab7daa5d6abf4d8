//! Response rendering.
//!
//! Human output is each command's console rendering. JSON output is the
//! response line exactly as the daemon sent it.

use bigtop_protocol::{CommandName, Response};
use clap::ValueEnum;

/// Output format selection for command responses.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render the command's console message.
    Human,
    /// Always emit the raw JSON response.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Console message.
    Human,
    /// Raw JSON response.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto if stdout_is_terminal => ResolvedOutputFormat::Human,
            Self::Auto | Self::Json => ResolvedOutputFormat::Json,
            Self::Human => ResolvedOutputFormat::Human,
        }
    }
}

/// Where a rendered response should be written.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Destination {
    Stdout,
    Stderr,
}

/// Renders `response` for `command`.
///
/// Human error renderings go to stderr; everything else goes to stdout.
pub(crate) fn render_response(
    command: CommandName,
    response: &Response,
    raw: &str,
    format: ResolvedOutputFormat,
) -> (Destination, String) {
    match format {
        ResolvedOutputFormat::Json => (Destination::Stdout, raw.trim_end().to_owned()),
        ResolvedOutputFormat::Human if response.is_ok() => {
            (Destination::Stdout, command.console_msg(response))
        }
        ResolvedOutputFormat::Human => (Destination::Stderr, command.console_msg(response)),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn response(value: serde_json::Value) -> Response {
        serde_json::from_value(value).expect("response")
    }

    #[rstest]
    #[case::auto_terminal(OutputFormat::Auto, true, ResolvedOutputFormat::Human)]
    #[case::auto_redirected(OutputFormat::Auto, false, ResolvedOutputFormat::Json)]
    #[case::human(OutputFormat::Human, false, ResolvedOutputFormat::Human)]
    #[case::json(OutputFormat::Json, true, ResolvedOutputFormat::Json)]
    fn resolves_output_format(
        #[case] format: OutputFormat,
        #[case] terminal: bool,
        #[case] expected: ResolvedOutputFormat,
    ) {
        assert_eq!(format.resolve(terminal), expected);
    }

    #[test]
    fn human_output_uses_the_command_rendering() {
        let ok = response(json!({"status": "ok", "numshows": 4, "time": 1.5}));
        assert_eq!(
            render_response(CommandName::NumShows, &ok, "", ResolvedOutputFormat::Human),
            (Destination::Stdout, "4".to_owned())
        );
    }

    #[test]
    fn human_errors_go_to_stderr() {
        let failed = response(json!({"status": "error", "reason": "boom", "time": 1.5}));
        assert_eq!(
            render_response(CommandName::Add, &failed, "", ResolvedOutputFormat::Human),
            (Destination::Stderr, "error: boom".to_owned())
        );
    }

    #[test]
    fn json_output_forwards_the_raw_line() {
        let raw = "{\"status\":\"error\",\"reason\":\"boom\",\"time\":1.5}\n";
        let failed = response(json!({"status": "error", "reason": "boom", "time": 1.5}));
        let (destination, text) =
            render_response(CommandName::Add, &failed, raw, ResolvedOutputFormat::Json);
        assert_eq!(destination, Destination::Stdout);
        insta::assert_snapshot!(text, @r#"{"status":"error","reason":"boom","time":1.5}"#);
    }
}
