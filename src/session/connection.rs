//! Framed reader/writer pair for one MCP client

use anyhow::Result;
use bytes::Bytes;
use maps_shared::codec::{self, CodecError, FrameDecoder};
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// A frame pulled off the input stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    /// One complete JSON line
    Line(Bytes),
    /// A line longer than the frame limit was dropped
    Oversized(usize),
}

/// Client connection over an arbitrary reader/writer pair
pub struct StdioConnection<R, W> {
    reader: R,
    writer: W,
    decoder: FrameDecoder,
    read_buf: Vec<u8>,
}

impl<R, W> StdioConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, max_frame_bytes: usize, read_chunk_size: usize) -> Self {
        Self {
            reader,
            writer,
            decoder: FrameDecoder::with_max_len(max_frame_bytes),
            read_buf: vec![0u8; read_chunk_size.max(1)],
        }
    }

    /// Read the next frame
    /// Returns `Ok(None)` once the input is closed
    pub async fn recv(&mut self) -> Result<Option<Incoming>> {
        loop {
            // First try to decode from existing buffer
            match self.decoder.decode_next() {
                Ok(Some(line)) => return Ok(Some(Incoming::Line(line))),
                Ok(None) => {
                    // Need more data
                }
                Err(CodecError::MessageTooLarge(len)) => {
                    warn!(bytes = len, "Dropping oversized frame");
                    return Ok(Some(Incoming::Oversized(len)));
                }
                Err(e) => return Err(e.into()),
            }

            let n = self.reader.read(&mut self.read_buf).await?;
            if n == 0 {
                if self.decoder.buffer_len() > 0 {
                    debug!(bytes = self.decoder.buffer_len(), "Discarding unterminated trailing input");
                }
                return Ok(None);
            }
            self.decoder.extend(&self.read_buf[..n]);
        }
    }

    /// Write one message as a JSON line and flush it
    pub async fn send<T: Serialize>(&mut self, message: &T) -> Result<()> {
        let encoded = codec::encode(message)?;
        self.writer.write_all(&encoded).await?;
        self.writer.flush().await?;
        Ok(())
    }
}
