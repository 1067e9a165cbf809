//! HTTP protocol version tokens accepted in start-lines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::protocol::FormatError;

/// The protocol version of a message.
///
/// `HTTP/2` and `HTTP/2.0` (and the same for `3`) are distinct variants so the
/// spelling found in a start-line survives a round trip.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolVersion {
    #[serde(rename = "HTTP/1.0")]
    Http10,
    #[default]
    #[serde(rename = "HTTP/1.1")]
    Http11,
    #[serde(rename = "HTTP/2")]
    Http2,
    #[serde(rename = "HTTP/2.0")]
    Http20,
    #[serde(rename = "HTTP/3")]
    Http3,
    #[serde(rename = "HTTP/3.0")]
    Http30,
}

impl ProtocolVersion {
    pub const ALL: [ProtocolVersion; 6] = [
        ProtocolVersion::Http10,
        ProtocolVersion::Http11,
        ProtocolVersion::Http2,
        ProtocolVersion::Http20,
        ProtocolVersion::Http3,
        ProtocolVersion::Http30,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolVersion::Http10 => "HTTP/1.0",
            ProtocolVersion::Http11 => "HTTP/1.1",
            ProtocolVersion::Http2 => "HTTP/2",
            ProtocolVersion::Http20 => "HTTP/2.0",
            ProtocolVersion::Http3 => "HTTP/3",
            ProtocolVersion::Http30 => "HTTP/3.0",
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolVersion {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|version| version.as_str() == s)
            .ok_or_else(|| FormatError::structure("invalid protocol version").with_details(s))
    }
}

impl From<ProtocolVersion> for http::Version {
    fn from(version: ProtocolVersion) -> Self {
        match version {
            ProtocolVersion::Http10 => http::Version::HTTP_10,
            ProtocolVersion::Http11 => http::Version::HTTP_11,
            ProtocolVersion::Http2 | ProtocolVersion::Http20 => http::Version::HTTP_2,
            ProtocolVersion::Http3 | ProtocolVersion::Http30 => http::Version::HTTP_3,
        }
    }
}
