//! HTTP request decoder module
//!
//! This module decodes a complete raw request into a [`RequestMessage`]. The
//! stages run in a fixed order and the first failure aborts the whole decode:
//!
//! 1. Rows: the raw text is split into the start-line, header rows and body
//! 2. Start-line: the request-line gives method, target and version, the
//!    target is resolved into path and query params
//! 3. Headers: [`HeaderDecoder`] decodes the header rows
//! 4. Cookies: the `Cookie` rows are decoded into the cookie list
//! 5. Body: [`PayloadDecoder`] removes chunked framing and decodes the content
//!
//! # Example
//!
//! ```
//! use micro_http_text::codec::RequestDecoder;
//!
//! let decoder = RequestDecoder::new();
//! let request = decoder.decode("GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n").unwrap();
//! assert_eq!(request.host, "example.com");
//! assert_eq!(request.path, "/index.html");
//! ```

use http::header::HOST;
use tracing::{debug, trace};

use crate::codec::CodecOptions;
use crate::codec::body::PayloadDecoder;
use crate::codec::cookie::decode_request_cookies;
use crate::codec::header::HeaderDecoder;
use crate::codec::rows::RawMessage;
use crate::codec::start_line::{RequestLine, ResolvedTarget};
use crate::protocol::{FormatError, RequestMessage, find_header};

/// Host reported when neither the `Host` header nor the target names one.
pub const UNSPECIFIED_HOST: &str = "unspecified-host";

/// A decoder for complete HTTP requests
#[derive(Debug, Clone, Default)]
pub struct RequestDecoder {
    header_decoder: HeaderDecoder,
    options: CodecOptions,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance with default options
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { header_decoder: HeaderDecoder, options }
    }

    /// Decodes `raw` into a request.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if any stage fails, or if a `Host` header is
    /// mandatory and missing or empty.
    pub fn decode(&self, raw: &str) -> Result<RequestMessage, FormatError> {
        let rows = RawMessage::split(raw)?;

        let request_line = RequestLine::decode(rows.start_line)?;
        let target = ResolvedTarget::resolve(request_line.target)?;

        let headers = self.header_decoder.decode(&rows.header_rows)?;
        let host_header = find_header(&headers, HOST.as_str()).map(|header| header.value.as_str());
        if self.options.mandatory_host() {
            let host_header = host_header.ok_or_else(|| FormatError::required("host header must be present"))?;
            if host_header.is_empty() {
                return Err(FormatError::required("host header must be not empty").with_details(rows.start_line));
            }
        }

        let host = match (host_header, target.host) {
            (Some(host), _) if !host.is_empty() => host.to_string(),
            (_, Some(host)) => host,
            _ => {
                debug!(request_target = request_line.target, "request has no host");
                UNSPECIFIED_HOST.to_string()
            }
        };

        let cookies = decode_request_cookies(&headers)?;
        let body = PayloadDecoder::from_headers(&headers, &self.options).decode(rows.body)?;

        trace!(method = %request_line.method, request_target = request_line.target, %host, "decoded request");
        Ok(RequestMessage {
            method: request_line.method,
            protocol_version: request_line.protocol_version,
            target: request_line.target.to_string(),
            host,
            path: target.path,
            query_params: target.query_params,
            headers,
            cookies,
            body,
            headers_size: rows.headers_size,
            body_size: rows.body_size,
        })
    }
}
