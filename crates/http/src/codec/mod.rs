//! HTTP codec module for parsing and building HTTP messages
//!
//! This module converts between raw HTTP/1.x message text and the message
//! model in [`crate::protocol`]. Every conversion works on a complete message
//! held in memory, there is no streaming and no I/O.
//!
//! # Architecture
//!
//! - Entry points:
//!   - [`parse`] / [`parse_with`]: classify the first row and decode the message
//!   - [`build`] / [`build_with`]: render a [`Message`] as text
//!
//! - Request handling:
//!   - [`RequestDecoder`]: decodes a raw request
//!   - [`RequestEncoder`]: encodes a request
//!
//! - Response handling:
//!   - [`ResponseDecoder`]: decodes a raw response
//!   - [`ResponseEncoder`]: encodes a response
//!
//! - Shared stages: header rows via the [`header`] module, bodies via the
//!   [`body`] module
//!
//! - [`MessageDecoder`] / [`MessageEncoder`]: `tokio-util` codec adapters for
//!   use with framed readers and writers
//!
//! # Example
//!
//! ```
//! use micro_http_text::codec::{build, parse};
//!
//! let raw = "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhello";
//! let message = parse(raw).unwrap();
//! assert!(message.is_response());
//! assert_eq!(build(&message).unwrap(), raw);
//! ```

pub mod body;
mod cookie;
pub mod header;
mod options;
mod request_decoder;
mod request_encoder;
mod response_decoder;
mod response_encoder;
mod rows;
mod start_line;

pub use options::CodecOptions;
pub use request_decoder::{RequestDecoder, UNSPECIFIED_HOST};
pub use request_encoder::RequestEncoder;
pub use response_decoder::ResponseDecoder;
pub use response_encoder::ResponseEncoder;

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, trace};

use crate::codec::rows::first_row;
use crate::codec::start_line::{RequestLine, StatusLine};
use crate::protocol::{FormatError, Message};

/// Parses a raw message with default options.
///
/// # Errors
///
/// Returns a [`FormatError`] if the first row is neither a request-line nor a
/// status-line, or if any stage of the matching pipeline fails.
pub fn parse(raw: &str) -> Result<Message, FormatError> {
    parse_with(raw, &CodecOptions::default())
}

/// Parses a raw message.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with(raw: &str, options: &CodecOptions) -> Result<Message, FormatError> {
    let start_line = first_row(raw);

    if RequestLine::matches(start_line) {
        trace!(start_line, "parse request");
        RequestDecoder::with_options(*options).decode(raw).map(Message::Request)
    } else if StatusLine::matches(start_line) {
        trace!(start_line, "parse response");
        ResponseDecoder::with_options(*options).decode(raw).map(Message::Response)
    } else {
        debug!(start_line, "unknown message format");
        Err(FormatError::structure("unknown message format").with_details(start_line))
    }
}

/// Builds a message with default options.
///
/// # Errors
///
/// Returns a [`FormatError`] if a field of the model can't be rendered.
pub fn build(message: &Message) -> Result<String, FormatError> {
    build_with(message, &CodecOptions::default())
}

/// Builds a message.
///
/// # Errors
///
/// See [`build`]. A request also fails when `Host` is mandatory and missing.
pub fn build_with(message: &Message, options: &CodecOptions) -> Result<String, FormatError> {
    let mut dst = BytesMut::new();
    MessageEncoder::with_options(*options).encode(message, &mut dst)?;
    String::from_utf8(dst.to_vec()).map_err(|e| FormatError::structure(format!("built message is not valid utf-8: {e}")))
}

/// Encodes a [`Message`] of either kind.
///
/// Nothing is written to `dst` when encoding fails.
#[derive(Debug, Clone, Default)]
pub struct MessageEncoder {
    request_encoder: RequestEncoder,
    response_encoder: ResponseEncoder,
}

impl MessageEncoder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self {
            request_encoder: RequestEncoder::with_options(options),
            response_encoder: ResponseEncoder::with_options(options),
        }
    }
}

impl<'a> Encoder<&'a Message> for MessageEncoder {
    type Error = FormatError;

    fn encode(&mut self, item: &'a Message, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let mut encoded = BytesMut::new();
        match item {
            Message::Request(request) => self.request_encoder.encode(request, &mut encoded)?,
            Message::Response(response) => self.response_encoder.encode(response, &mut encoded)?,
        }
        dst.extend_from_slice(&encoded);
        Ok(())
    }
}

/// Decodes one complete [`Message`] once the input ends.
///
/// A raw message carries no framing that tells where it ends, so
/// [`Decoder::decode`] never yields and the whole buffer is parsed by
/// [`Decoder::decode_eof`].
#[derive(Debug, Clone, Default)]
pub struct MessageDecoder {
    options: CodecOptions,
}

impl MessageDecoder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }
}

impl Decoder for MessageDecoder {
    type Item = Message;
    type Error = FormatError;

    fn decode(&mut self, _src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        let raw = src.split();
        let raw = std::str::from_utf8(&raw).map_err(|e| FormatError::structure(format!("message is not valid utf-8: {e}")))?;
        parse_with(raw, &self.options).map(Some)
    }
}
