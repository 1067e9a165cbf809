//! HTTP response model.

use serde::{Deserialize, Serialize};

use crate::protocol::{Body, Cookie, Header, ProtocolVersion};

/// A decoded response, or a response to encode.
///
/// `status_message` may be empty, the status-line then ends right after the
/// code. `cookies` holds one entry per `Set-Cookie` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage {
    #[serde(default)]
    pub protocol_version: ProtocolVersion,
    pub status_code: u16,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<Cookie>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    #[serde(default)]
    pub headers_size: usize,
    #[serde(default)]
    pub body_size: usize,
}

impl ResponseMessage {
    pub fn new<M: Into<String>>(status_code: u16, status_message: M) -> Self {
        Self { status_code, status_message: status_message.into(), ..Default::default() }
    }

    #[must_use]
    pub fn with_header<N: AsRef<str>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_cookies(mut self, cookies: Vec<Cookie>) -> Self {
        self.cookies = Some(cookies);
        self
    }
}
