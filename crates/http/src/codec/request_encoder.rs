//! HTTP request encoder module
//!
//! Renders a [`RequestMessage`] as `request-line`, header rows, the `Cookie`
//! row when the cookie list is not already present in the headers, the empty
//! line and the body. The model is only borrowed, chunked framing is applied
//! to a rendered copy of the body.

use bytes::BytesMut;
use http::header::HOST;
use tokio_util::codec::Encoder;
use tracing::trace;

use crate::codec::CodecOptions;
use crate::codec::body::PayloadEncoder;
use crate::codec::cookie::encode_request_cookies;
use crate::codec::header::HeaderEncoder;
use crate::codec::rows::CRLF;
use crate::codec::start_line::encode_request_line;
use crate::protocol::{FormatError, RequestMessage, find_header};

#[derive(Debug, Clone, Default)]
pub struct RequestEncoder {
    header_encoder: HeaderEncoder,
    options: CodecOptions,
}

impl RequestEncoder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { header_encoder: HeaderEncoder, options }
    }
}

impl<'a> Encoder<&'a RequestMessage> for RequestEncoder {
    type Error = FormatError;

    fn encode(&mut self, item: &'a RequestMessage, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if self.options.mandatory_host() && find_header(&item.headers, HOST.as_str()).is_none() {
            return Err(FormatError::required("host header must be present").with_details(&item.target));
        }

        encode_request_line(item, dst)?;
        self.header_encoder.encode(&item.headers, dst)?;
        encode_request_cookies(item.cookies.as_deref(), &item.headers, dst)?;
        dst.extend_from_slice(CRLF.as_bytes());

        if let Some(body) = &item.body {
            PayloadEncoder::from_headers(&item.headers, &self.options).encode(body, dst)?;
        }

        trace!(method = %item.method, len = dst.len(), "encoded request");
        Ok(())
    }
}
