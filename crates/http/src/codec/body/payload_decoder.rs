//! Decoder for complete message bodies.
//!
//! The decoder is selected from the message headers:
//! - `Transfer-Encoding` containing `chunked` first removes the chunked framing
//! - the primary media type of `Content-Type` then picks how the text is read:
//!   url-encoded pairs, multipart parts, or plain text for anything else

use tracing::trace;

use crate::codec::CodecOptions;
use crate::codec::body::chunked_decoder::ChunkedDecoder;
use crate::codec::body::{is_chunked, media_type, multipart, url_encoded};
use crate::protocol::{Body, FormatError, Header, find_header};

/// A decoder for the body of one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadDecoder<'h> {
    kind: Kind,
    /// The raw `Content-Type` header value
    content_type: Option<&'h str>,
    chunked: Option<ChunkedDecoder>,
}

/// How the body text is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    /// Keep the text verbatim
    Text,
    /// Decode `application/x-www-form-urlencoded` pairs
    UrlEncoded,
    /// Decode `multipart/*` parts
    Multipart,
}

impl Kind {
    pub(crate) fn from_media_type(media_type: Option<&str>) -> Self {
        match media_type {
            Some(media_type) if media_type == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str() => Kind::UrlEncoded,
            Some(media_type) if multipart::is_multipart(media_type) => Kind::Multipart,
            _ => Kind::Text,
        }
    }
}

impl<'h> PayloadDecoder<'h> {
    /// Selects the decoder from the `Content-Type` and `Transfer-Encoding` headers.
    pub fn from_headers(headers: &'h [Header], options: &CodecOptions) -> Self {
        let content_type = find_header(headers, http::header::CONTENT_TYPE.as_str()).map(|header| header.value.as_str());
        let kind = Kind::from_media_type(content_type.map(media_type).as_deref());
        let chunked = is_chunked(headers).then(|| ChunkedDecoder::new(options.last_chunk()));

        Self { kind, content_type, chunked }
    }

    pub fn is_chunked(&self) -> bool {
        self.chunked.is_some()
    }

    /// Decodes the raw body text, `None` when the body is empty.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if the chunked framing, the url-encoded text
    /// or the multipart parts are malformed.
    pub fn decode(&self, raw: &str) -> Result<Option<Body>, FormatError> {
        if raw.is_empty() {
            return Ok(None);
        }

        let text = match &self.chunked {
            Some(chunked_decoder) => chunked_decoder.decode(raw)?,
            None => raw.to_string(),
        };

        let content_type = self.content_type.map(media_type);
        trace!(kind = ?self.kind, content_type, chunked = self.is_chunked(), "decode body");

        let body = match self.kind {
            Kind::Text => Body { content_type, text: Some(text), ..Default::default() },
            Kind::UrlEncoded => Body { content_type, params: Some(url_encoded::decode(&text)?), ..Default::default() },
            Kind::Multipart => {
                let boundary = multipart::boundary(self.content_type)?;
                let params = multipart::decode(&text, &boundary)?;
                Body { content_type, params: Some(params), boundary: Some(boundary), ..Default::default() }
            }
        };

        Ok(Some(body))
    }
}
