use bytes::BytesMut;
use tokio_util::codec::Encoder;
use tracing::trace;

use crate::codec::CodecOptions;
use crate::codec::body::PayloadEncoder;
use crate::codec::cookie::encode_response_cookies;
use crate::codec::header::HeaderEncoder;
use crate::codec::rows::CRLF;
use crate::codec::start_line::encode_status_line;
use crate::protocol::{FormatError, ResponseMessage};

/// Renders a [`ResponseMessage`]: status-line, header rows, `Set-Cookie`
/// rows for the cookie list, the empty line and the body.
#[derive(Debug, Clone, Default)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
    options: CodecOptions,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { header_encoder: HeaderEncoder, options }
    }
}

impl<'a> Encoder<&'a ResponseMessage> for ResponseEncoder {
    type Error = FormatError;

    fn encode(&mut self, item: &'a ResponseMessage, dst: &mut BytesMut) -> Result<(), Self::Error> {
        encode_status_line(item, dst)?;
        self.header_encoder.encode(&item.headers, dst)?;
        encode_response_cookies(item.cookies.as_deref(), &item.headers, dst)?;
        dst.extend_from_slice(CRLF.as_bytes());

        if let Some(body) = &item.body {
            PayloadEncoder::from_headers(&item.headers, &self.options).encode(body, dst)?;
        }

        trace!(status_code = item.status_code, len = dst.len(), "encoded response");
        Ok(())
    }
}
