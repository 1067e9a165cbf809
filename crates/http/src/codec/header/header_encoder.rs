//! Header row encoder.
//!
//! Each header is written as `Name: value\r\n` with the name in Train-Case,
//! in the order given. The empty line ending the head block is left to the
//! caller, which may append cookie rows first.

use bytes::{BufMut, BytesMut};
use std::io::Write;

use crate::codec::rows::CRLF;
use crate::protocol::{FormatError, Header, prettify_header_name};
use crate::utils::{FastWrite, assert_not_empty, ensure};

/// Initial buffer size reserved for header rows
const INIT_HEADER_SIZE: usize = 1024;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderEncoder;

impl HeaderEncoder {
    /// Writes `headers` into `dst`.
    ///
    /// # Errors
    ///
    /// Returns a required-field [`FormatError`] if a name is empty, and a
    /// structural one if a name or value would break the row framing.
    pub fn encode(&self, headers: &[Header], dst: &mut BytesMut) -> Result<(), FormatError> {
        dst.reserve(INIT_HEADER_SIZE);
        for header in headers {
            encode_row(&header.name, &header.value, dst)?;
        }
        Ok(())
    }
}

/// Writes a single `Name: value` row, shared with the cookie rows.
pub(crate) fn encode_row(name: &str, value: &str, dst: &mut BytesMut) -> Result<(), FormatError> {
    assert_not_empty(name, "header name")?;
    ensure!(
        !name.contains([':', '\r', '\n']),
        FormatError::structure("header name must not contain colon or line separator").with_details(name)
    );
    ensure!(
        !value.contains(['\r', '\n']),
        FormatError::structure("header value must not contain line separator").with_details(name)
    );

    write!(FastWrite(dst), "{}: {}", prettify_header_name(name.trim()), value)?;
    dst.put_slice(CRLF.as_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::FormatErrorKind;

    fn encode(headers: &[Header]) -> Result<String, FormatError> {
        let mut dst = BytesMut::new();
        HeaderEncoder.encode(headers, &mut dst)?;
        Ok(String::from_utf8(dst.to_vec()).unwrap())
    }

    #[test]
    fn rows_in_order() {
        let headers = [Header::new("host", "example.com"), Header::new("x-request-id", "1"), Header::new("Accept", "")];
        assert_eq!(encode(&headers).unwrap(), "Host: example.com\r\nX-Request-Id: 1\r\nAccept: \r\n");
    }

    #[test]
    fn name_is_prettified_on_render() {
        let header = Header { name: "content-type".into(), value: "text/plain".into() };
        assert_eq!(encode(&[header]).unwrap(), "Content-Type: text/plain\r\n");
    }

    #[test]
    fn empty_name() {
        let header = Header { name: String::new(), value: "v".into() };
        assert_eq!(encode(&[header]).unwrap_err().kind(), FormatErrorKind::RequiredField);
    }

    #[test]
    fn value_with_line_separator() {
        let header = Header::new("X-Injected", "a\r\nEvil: 1");
        assert_eq!(encode(&[header]).unwrap_err().kind(), FormatErrorKind::Structure);
    }
}
