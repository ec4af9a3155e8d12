//! Newline-delimited JSON framing over tokio streams.

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::errors::ServerError;

/// Serialize `msg` as compact JSON, write it as one line, and flush.
pub async fn write_jsonl<W: AsyncWrite + Unpin, T: Serialize>(
    writer: &mut W,
    msg: &T,
) -> Result<(), ServerError> {
    let json = serde_json::to_string(msg)?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// One line of input, with surrounding whitespace removed.
#[derive(Debug, PartialEq, Eq)]
pub enum Line {
    Text(String),
    /// The line's bytes are not valid UTF-8; carries the decoding error.
    NotUtf8(String),
}

/// Read one line. Returns `Ok(None)` on EOF.
///
/// Bytes are read up to the newline before decoding, so a line that is not
/// valid UTF-8 is consumed whole and the next read starts on the next line.
pub async fn read_line<R: AsyncBufRead + Unpin>(
    reader: &mut R,
) -> Result<Option<Line>, ServerError> {
    let mut buf = Vec::new();
    let bytes_read = reader.read_until(b'\n', &mut buf).await?;
    if bytes_read == 0 {
        return Ok(None);
    }
    Ok(Some(match String::from_utf8(buf) {
        Ok(text) => Line::Text(text.trim().to_string()),
        Err(e) => Line::NotUtf8(e.utf8_error().to_string()),
    }))
}
