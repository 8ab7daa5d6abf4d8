//! Bounded JSONL line reading.

use std::io::{self, BufRead};

use super::request::MAX_REQUEST_BYTES;

/// One framed request read from the stream.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum RequestLine {
    /// A complete line, terminator included when present.
    Complete(Vec<u8>),
    /// A line longer than [`MAX_REQUEST_BYTES`]; its bytes were discarded.
    Oversized { size: usize },
}

/// Reads the next request line without buffering more than
/// [`MAX_REQUEST_BYTES`].
///
/// Returns `Ok(None)` at end of stream. The remainder of an oversized line
/// is drained so the next call starts on a fresh line.
pub(crate) fn read_request_line<R: BufRead>(reader: &mut R) -> io::Result<Option<RequestLine>> {
    let mut buffer = Vec::new();
    let mut size = 0_usize;

    loop {
        let (consumed, terminated) = {
            let available = match reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(error),
            };
            if available.is_empty() {
                return Ok((size > 0).then(|| finish(buffer, size)));
            }

            let (chunk, terminated) = match available.iter().position(|byte| *byte == b'\n') {
                Some(newline) => (available.split_at(newline + 1).0, true),
                None => (available, false),
            };
            let room = MAX_REQUEST_BYTES.saturating_sub(buffer.len());
            buffer.extend(chunk.iter().take(room));
            size += chunk.len();
            (chunk.len(), terminated)
        };

        reader.consume(consumed);
        if terminated {
            return Ok(Some(finish(buffer, size)));
        }
    }
}

fn finish(buffer: Vec<u8>, size: usize) -> RequestLine {
    if size > MAX_REQUEST_BYTES {
        RequestLine::Oversized { size }
    } else {
        RequestLine::Complete(buffer)
    }
}
