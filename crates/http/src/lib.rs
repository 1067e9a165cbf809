//! Parse and build raw HTTP/1.x message text
//!
//! This crate converts between the text of an HTTP/1.x request or response and a
//! strongly typed message model, in both directions. It is meant for tools that
//! construct or inspect messages without a live socket: debuggers, proxies and
//! test fixtures.
//!
//! # Features
//!
//! - Request-line and status-line recognition, request-target resolution
//! - Header rows with Train-Case names, order and duplicates preserved
//! - `Cookie` and `Set-Cookie` rows, with `Set-Cookie` rows never merged
//! - Bodies dispatched by content type: plain text, url-encoded, multipart
//! - Chunked transfer coding layered under any content type
//! - A lossless round trip for well-formed messages
//! - JSON fixtures through `serde`
//!
//! # Example
//!
//! ```
//! use micro_http_text::protocol::{Message, Method};
//! use micro_http_text::{build, parse};
//!
//! let message = parse("GET /features?p1=v1 HTTP/1.1\r\nHost: example.com\r\n\r\n").unwrap();
//!
//! let Message::Request(request) = &message else { panic!("expect request") };
//! assert_eq!(request.method, Method::Get);
//! assert_eq!(request.host, "example.com");
//! assert_eq!(request.path, "/features");
//!
//! assert_eq!(build(&message).unwrap(), "GET /features?p1=v1 HTTP/1.1\r\nHost: example.com\r\n\r\n");
//! ```
//!
//! The codecs log through `tracing` at `trace` and `debug` level. Install any
//! subscriber to see them:
//!
//! ```no_run
//! use tracing::Level;
//! use tracing_subscriber::FmtSubscriber;
//!
//! let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
//! tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
//!
//! let message = micro_http_text::parse("HTTP/1.1 204 No Content\r\n\r\n").unwrap();
//! assert!(message.is_response());
//! ```
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - [`protocol`]: the message model and [`protocol::FormatError`]
//! - [`codec`]: the decoders and encoders turning text into the model and back
//!
//! Parsing runs a strictly linear pipeline: the rows are split, the start-line
//! picks the request or response path, then headers, cookies and finally the
//! body are decoded. Building is the mirror sequence. Any stage failure aborts
//! the whole call, partial results are never returned.
//!
//! # Error Handling
//!
//! Every failure is a [`protocol::FormatError`] carrying a short message, a
//! [`protocol::FormatErrorKind`] and optional details holding the offending raw
//! text.
//!
//! # Limitations
//!
//! - CRLF line separators only, LF-only messages are rejected
//! - No obsolete header line folding
//! - Cookie attributes are kept as opaque strings
//! - JSON and other content types are kept as opaque text
//! - Request targets must be valid [`http::Uri`] text, so characters such as
//!   `{`, `}` or `"` have to be percent-encoded
//! - An empty body is parsed as no body at all

pub mod codec;
pub mod protocol;

mod utils;

pub use codec::{build, build_with, parse, parse_with};
