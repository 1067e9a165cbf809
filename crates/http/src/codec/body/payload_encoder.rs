use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::codec::CodecOptions;
use crate::codec::body::chunked_encoder::ChunkedEncoder;
use crate::codec::body::payload_decoder::Kind;
use crate::codec::body::{is_chunked, media_type, multipart, url_encoded};
use crate::protocol::{Body, FormatError, Header};

/// encode the body of one message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayloadEncoder {
    chunked: Option<ChunkedEncoder>,
}

impl PayloadEncoder {
    /// Frames the body with the chunked transfer coding when `Transfer-Encoding` asks for it.
    pub fn from_headers(headers: &[Header], options: &CodecOptions) -> Self {
        let chunked = is_chunked(headers).then(|| ChunkedEncoder::new(options.last_chunk()));
        Self { chunked }
    }

    pub fn is_chunked(&self) -> bool {
        self.chunked.is_some()
    }

    /// Renders `body` into `dst`, dispatched on the body content type.
    ///
    /// The body is rendered into a local buffer first, so chunked framing never
    /// touches the caller's model.
    pub fn encode(&self, body: &Body, dst: &mut BytesMut) -> Result<(), FormatError> {
        let media_type = body.content_type.as_deref().map(media_type);
        let kind = Kind::from_media_type(media_type.as_deref());
        trace!(?kind, chunked = self.is_chunked(), "encode body");

        let mut rendered = BytesMut::new();
        match kind {
            Kind::Text => rendered.put_slice(body.text.as_deref().unwrap_or_default().as_bytes()),
            Kind::UrlEncoded => match &body.params {
                Some(params) => rendered.put_slice(url_encoded::encode(params)?.as_bytes()),
                None => rendered.put_slice(body.text.as_deref().unwrap_or_default().as_bytes()),
            },
            Kind::Multipart => {
                let boundary = body.boundary.as_deref().unwrap_or_default();
                if boundary.is_empty() {
                    return Err(FormatError::multipart("multipart body must have boundary"));
                }
                multipart::encode(body.params(), boundary, &mut rendered)?;
            }
        }

        match &self.chunked {
            Some(chunked_encoder) => {
                // rendered from `&str` pieces only
                let text = std::str::from_utf8(&rendered)
                    .map_err(|e| FormatError::structure(format!("body is not valid utf-8: {e}")))?;
                chunked_encoder.encode(text, dst)
            }
            None => {
                dst.put_slice(&rendered);
                Ok(())
            }
        }
    }
}
