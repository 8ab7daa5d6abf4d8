//! Request line parsing.

use bigtop_protocol::{Message, MessageError};

/// Maximum size of a single request line in bytes, terminator included.
pub const MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// Parses one JSONL request line into a [`Message`].
///
/// Trailing whitespace, including the newline delimiter, is ignored.
///
/// # Errors
///
/// Returns [`MessageError::Malformed`] when the line is empty, longer than
/// [`MAX_REQUEST_BYTES`], or not a JSON message object.
pub fn parse_request(line: &[u8]) -> Result<Message, MessageError> {
    if line.len() > MAX_REQUEST_BYTES {
        return Err(oversized(line.len()));
    }
    let trimmed = line.trim_ascii_end();
    if trimmed.is_empty() {
        return Err(MessageError::malformed("empty request line"));
    }
    serde_json::from_slice(trimmed).map_err(|error| MessageError::malformed(error.to_string()))
}

pub(super) fn oversized(size: usize) -> MessageError {
    MessageError::malformed(format!(
        "request too large: {size} bytes exceeds {MAX_REQUEST_BYTES} byte limit"
    ))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn parses_a_message_line() {
        let message =
            parse_request(br#"{"command":"rm","properties":{"name":"web"}}"#).expect("parse");
        assert_eq!(message.command(), "rm");
        assert_eq!(
            message.properties().get("name"),
            Some(&serde_json::Value::from("web"))
        );
    }

    #[test]
    fn trims_the_line_terminator() {
        let message = parse_request(b"{\"command\":\"numshows\"}  \r\n").expect("parse");
        assert_eq!(message.command(), "numshows");
        assert!(message.properties().is_empty());
    }

    #[rstest]
    #[case::empty(b"".as_slice())]
    #[case::blank(b"   \n".as_slice())]
    #[case::not_json(b"numshows\n".as_slice())]
    #[case::missing_command(br#"{"properties":{}}"#.as_slice())]
    #[case::properties_not_object(br#"{"command":"add","properties":[1]}"#.as_slice())]
    fn rejects_malformed_lines(#[case] line: &[u8]) {
        let error = parse_request(line).expect_err("should reject");
        assert!(matches!(error, MessageError::Malformed { .. }), "{error:?}");
    }

    #[test]
    fn rejects_oversized_lines() {
        let line = vec![b' '; MAX_REQUEST_BYTES + 1];
        let error = parse_request(&line).expect_err("should reject");
        assert!(error.to_string().contains("request too large"));
    }
}
