//! HTTP message model.
//!
//! This module provides the plain data types produced by parsing and consumed by
//! building. Values are owned and immutable once returned, they can be freely
//! cloned, compared and shared across threads.
//!
//! # Architecture
//!
//! - **Message** ([`message`]): [`Message`] is either a request or a response
//! - **Request** ([`request`]): [`RequestMessage`], [`Method`] and query [`Param`]s
//! - **Response** ([`response`]): [`ResponseMessage`]
//! - **Header fields** ([`header`]): [`Header`] with Train-Case names
//! - **Cookies** ([`cookie`]): [`Cookie`] for `Cookie` and `Set-Cookie` rows
//! - **Body** ([`body`]): [`Body`] and its multipart/url-encoded [`BodyParam`]s
//! - **Error Handling** ([`error`]): [`FormatError`], the only error raised
//!
//! Every type derives `serde` traits with camelCase field names, so a message
//! can be kept as a JSON fixture next to its raw text form.

mod message;
pub use message::Message;

mod request;
pub use request::Method;
pub use request::Param;
pub use request::RequestMessage;

mod response;
pub use response::ResponseMessage;

mod http_version;
pub use http_version::ProtocolVersion;

mod header;
pub(crate) use header::find_header;
pub use header::Header;
pub use header::prettify_header_name;

mod cookie;
pub use cookie::Cookie;

mod error;
pub use error::FormatError;
pub use error::FormatErrorKind;

pub mod body;
pub use body::Body;
pub use body::BodyParam;
pub use body::DispositionType;
