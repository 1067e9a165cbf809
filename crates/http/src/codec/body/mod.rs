//! Message body handling.
//!
//! A body goes through two independent layers:
//!
//! - the transfer layer: [`chunked_decoder`] and [`chunked_encoder`] remove or
//!   add chunked framing when `Transfer-Encoding` contains `chunked`
//! - the content layer, picked by the primary media type of the content type:
//!   [`url_encoded`] pairs, [`multipart`] parts, or verbatim text
//!
//! [`PayloadDecoder`] and [`PayloadEncoder`] sequence both layers.

pub(crate) mod chunked_decoder;
pub(crate) mod chunked_encoder;
pub(crate) mod multipart;
mod payload_decoder;
mod payload_encoder;
pub(crate) mod url_encoded;

pub use payload_decoder::PayloadDecoder;
pub use payload_encoder::PayloadEncoder;

use crate::protocol::Header;

/// Returns the primary media type of a content type: the part before the
/// first `;`, trimmed and lower-cased.
pub(crate) fn media_type(content_type: &str) -> String {
    content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase()
}

/// Returns true if any `Transfer-Encoding` header lists `chunked`.
pub(crate) fn is_chunked(headers: &[Header]) -> bool {
    headers
        .iter()
        .filter(|header| header.is(http::header::TRANSFER_ENCODING.as_str()))
        .any(|header| header.value.to_ascii_lowercase().contains("chunked"))
}
