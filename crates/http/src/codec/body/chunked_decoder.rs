//! Decoder for the chunked transfer coding of a complete body.
//!
//! Each chunk is a size line holding the data length in hexadecimal, followed
//! by exactly that many bytes of data and a line separator. Decoding stops when
//! the text is exhausted. Every iteration consumes input or fails, so malformed
//! input never loops.

use httparse::Status;
use tracing::trace;

use crate::codec::rows::{CRLF, first_row};
use crate::protocol::FormatError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkedDecoder {
    /// Accept a terminating zero-size chunk.
    last_chunk: bool,
}

impl ChunkedDecoder {
    pub fn new(last_chunk: bool) -> Self {
        Self { last_chunk }
    }

    /// Decodes the chunked `src` into the concatenated chunk data.
    ///
    /// # Errors
    ///
    /// Returns a chunked [`FormatError`] if:
    /// - a size line is missing, not hexadecimal or zero (unless the last
    ///   chunk is accepted)
    /// - fewer bytes remain than the size line announced
    /// - the chunk data is not followed by a line separator
    pub fn decode(&self, src: &str) -> Result<String, FormatError> {
        let mut decoded = String::with_capacity(src.len());
        let mut remaining = src;

        while !remaining.is_empty() {
            let (size_line_len, size) = match httparse::parse_chunk_size(remaining.as_bytes()) {
                Ok(Status::Complete(parsed)) => parsed,
                Ok(Status::Partial) | Err(_) => {
                    return Err(FormatError::chunked("invalid chunk size line").with_details(first_row(remaining)));
                }
            };

            if size == 0 {
                if self.last_chunk && &remaining[size_line_len..] == CRLF {
                    trace!("read last chunk");
                    break;
                }
                return Err(FormatError::chunked("chunk size must be positive").with_details(first_row(remaining)));
            }

            let data_end = usize::try_from(size)
                .ok()
                .and_then(|size| size_line_len.checked_add(size))
                .ok_or_else(|| FormatError::chunked("chunk size overflow").with_details(first_row(remaining)))?;

            let data = remaining.get(size_line_len..data_end).ok_or_else(|| {
                FormatError::chunked(format!("chunk data is shorter than chunk size {size}")).with_details(first_row(remaining))
            })?;
            trace!(size, "read chunk");
            decoded.push_str(data);

            remaining = remaining[data_end..]
                .strip_prefix(CRLF)
                .ok_or_else(|| FormatError::chunked("chunk data must end with line separator").with_details(data))?;
        }

        Ok(decoded)
    }
}
