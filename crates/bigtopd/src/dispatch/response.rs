//! JSONL response framing.

use std::io::Write;

use bigtop_protocol::Response;

use super::errors::DispatchError;

/// Writer that frames responses as JSON lines.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    /// Wraps an output stream.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes one response line and flushes the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation, writing or flushing fails.
    pub fn write_response(&mut self, response: &Response) -> Result<(), DispatchError> {
        serde_json::to_writer(&mut self.writer, response)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Releases the wrapped stream.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_response() {
        let mut writer = ResponseWriter::new(Vec::new());
        writer
            .write_response(&Response::ok(None))
            .expect("write ok");
        writer
            .write_response(&Response::error("boom"))
            .expect("write error");

        let output = String::from_utf8(writer.into_inner()).expect("valid utf8");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.first().is_some_and(|line| line.contains(r#""status":"ok""#)));
        assert!(lines.get(1).is_some_and(|line| line.contains(r#""reason":"boom""#)));
        assert!(output.ends_with('\n'));
    }
}
