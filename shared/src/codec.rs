//! Newline-delimited codec for the MCP stdio transport
//!
//! All messages are framed as:
//! ```text
//! [ N bytes: UTF-8 JSON object ][ '\n' ]
//! ```
//!
//! A trailing `'\r'` before the newline is tolerated and stripped. Blank
//! lines are skipped.

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;
use thiserror::Error;

use crate::limits::MAX_MESSAGE_SIZE;

/// Errors that can occur during encoding/decoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Message too large: {0} bytes")]
    MessageTooLarge(usize),

    #[error("JSON encode error: {0}")]
    EncodeError(#[from] serde_json::Error),
}

/// Encode a message as one JSON line
pub fn encode<T: Serialize>(message: &T) -> Result<Bytes, CodecError> {
    let mut buf = BytesMut::new();
    encode_into(message, &mut buf)?;
    Ok(buf.freeze())
}

/// Encode a message directly into a provided buffer
pub fn encode_into<T: Serialize>(message: &T, buf: &mut BytesMut) -> Result<(), CodecError> {
    let json = serde_json::to_vec(message)?;

    if json.len() > MAX_MESSAGE_SIZE {
        return Err(CodecError::MessageTooLarge(json.len()));
    }

    buf.reserve(json.len() + 1);
    buf.put_slice(&json);
    buf.put_u8(b'\n');

    Ok(())
}

/// Try to split one complete line from a buffer
///
/// Returns:
/// - `Ok(Some(line))` if a complete non-empty line was found
/// - `Ok(None)` if more data is needed
/// - `Err(...)` if the pending data exceeds the frame limit
pub fn decode(buf: &mut BytesMut, max_len: usize) -> Result<Option<Bytes>, CodecError> {
    loop {
        let newline = match buf.iter().position(|b| *b == b'\n') {
            Some(pos) => pos,
            None => {
                if buf.len() > max_len {
                    return Err(CodecError::MessageTooLarge(buf.len()));
                }
                return Ok(None);
            }
        };

        if newline > max_len {
            let _ = buf.split_to(newline + 1);
            return Err(CodecError::MessageTooLarge(newline));
        }

        let mut line = buf.split_to(newline + 1);
        line.truncate(newline);
        if line.last() == Some(&b'\r') {
            line.truncate(newline - 1);
        }

        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        return Ok(Some(line.freeze()));
    }
}

/// Decoder state machine for streaming decoding
#[derive(Debug)]
pub struct FrameDecoder {
    /// Partial line data being accumulated
    buffer: BytesMut,
    max_len: usize,
    /// Set after an oversized line until its newline shows up
    discarding: bool,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    /// Create a new frame decoder with the default frame limit
    pub fn new() -> Self {
        Self::with_max_len(MAX_MESSAGE_SIZE)
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(4096),
            max_len,
            discarding: false,
        }
    }

    /// Add data to the decoder buffer
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode the next frame from the buffer
    ///
    /// Call this repeatedly until it returns `Ok(None)` to drain all complete frames.
    /// After a `MessageTooLarge` error the rest of the offending line is dropped
    /// and decoding resumes at the following line.
    pub fn decode_next(&mut self) -> Result<Option<Bytes>, CodecError> {
        if self.discarding {
            match self.buffer.iter().position(|b| *b == b'\n') {
                Some(pos) => {
                    let _ = self.buffer.split_to(pos + 1);
                    self.discarding = false;
                }
                None => {
                    self.buffer.clear();
                    return Ok(None);
                }
            }
        }

        if self.buffer.len() > self.max_len && !self.buffer.contains(&b'\n') {
            let len = self.buffer.len();
            self.buffer.clear();
            self.discarding = true;
            return Err(CodecError::MessageTooLarge(len));
        }

        decode(&mut self.buffer, self.max_len)
    }

    /// Get the current buffer length (for debugging)
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }
}
