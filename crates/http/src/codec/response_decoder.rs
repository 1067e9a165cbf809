//! HTTP response decoder module
//!
//! The response pipeline mirrors the request one without the target
//! resolution and host checks: rows, status-line, headers, `Set-Cookie` rows,
//! then the body.

use tracing::trace;

use crate::codec::CodecOptions;
use crate::codec::body::PayloadDecoder;
use crate::codec::cookie::decode_response_cookies;
use crate::codec::header::HeaderDecoder;
use crate::codec::rows::RawMessage;
use crate::codec::start_line::StatusLine;
use crate::protocol::{FormatError, ResponseMessage};

/// A decoder for complete HTTP responses
#[derive(Debug, Clone, Default)]
pub struct ResponseDecoder {
    header_decoder: HeaderDecoder,
    options: CodecOptions,
}

impl ResponseDecoder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { header_decoder: HeaderDecoder, options }
    }

    /// Decodes `raw` into a response.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if any stage fails.
    pub fn decode(&self, raw: &str) -> Result<ResponseMessage, FormatError> {
        let rows = RawMessage::split(raw)?;
        let status_line = StatusLine::decode(rows.start_line)?;

        let headers = self.header_decoder.decode(&rows.header_rows)?;
        let cookies = decode_response_cookies(&headers)?;
        let body = PayloadDecoder::from_headers(&headers, &self.options).decode(rows.body)?;

        trace!(status_code = status_line.status_code, "decoded response");
        Ok(ResponseMessage {
            protocol_version: status_line.protocol_version,
            status_code: status_line.status_code,
            status_message: status_line.status_message.to_string(),
            headers,
            cookies,
            body,
            headers_size: rows.headers_size,
            body_size: rows.body_size,
        })
    }
}
