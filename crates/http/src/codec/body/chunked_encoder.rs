use bytes::{BufMut, BytesMut};
use std::io::Write;
use tracing::trace;

use crate::codec::rows::CRLF;
use crate::protocol::FormatError;
use crate::utils::FastWrite;

/// Number of characters carried by each encoded chunk.
pub(crate) const CHUNK_WINDOW: usize = 25;

const LAST_CHUNK: &[u8] = b"0\r\n\r\n";

/// Encodes a complete body with the chunked transfer coding.
///
/// The text is cut into windows of [`CHUNK_WINDOW`] characters, each written as
/// `<HEX-BYTE-LENGTH>\r\n<window>\r\n`. The size line counts bytes, so windows
/// holding multi-byte characters still frame correctly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkedEncoder {
    /// Append the terminating zero-size chunk.
    last_chunk: bool,
}

impl ChunkedEncoder {
    pub fn new(last_chunk: bool) -> Self {
        Self { last_chunk }
    }

    pub fn encode(&self, text: &str, dst: &mut BytesMut) -> Result<(), FormatError> {
        dst.reserve(text.len() + text.len() / CHUNK_WINDOW * 8 + 8);

        let mut remaining = text;
        while !remaining.is_empty() {
            let window_end = remaining.char_indices().nth(CHUNK_WINDOW).map_or(remaining.len(), |(index, _)| index);
            let (window, rest) = remaining.split_at(window_end);

            write!(FastWrite(dst), "{:X}\r\n", window.len())?;
            dst.put_slice(window.as_bytes());
            dst.put_slice(CRLF.as_bytes());
            trace!(len = window.len(), "wrote chunk");

            remaining = rest;
        }

        if self.last_chunk {
            dst.put_slice(LAST_CHUNK);
        }
        Ok(())
    }
}
