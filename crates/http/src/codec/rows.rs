//! Frames raw message text into a start-line, header rows and a body.

use tracing::trace;

use crate::protocol::FormatError;

/// The only line separator supported.
pub(crate) const CRLF: &str = "\r\n";

/// Separates the head block from the body block.
const HEAD_SEPARATOR: &str = "\r\n\r\n";

/// A message split into its rows, borrowing from the raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawMessage<'a> {
    pub(crate) start_line: &'a str,
    pub(crate) header_rows: Vec<&'a str>,
    pub(crate) body: &'a str,
    /// Size of the head block plus both line separators ending it.
    pub(crate) headers_size: usize,
    pub(crate) body_size: usize,
}

impl<'a> RawMessage<'a> {
    /// Splits `raw` on the first empty line.
    ///
    /// # Errors
    ///
    /// Returns a structural [`FormatError`] if there is no empty line.
    pub(crate) fn split(raw: &'a str) -> Result<Self, FormatError> {
        let (head, body) = raw.split_once(HEAD_SEPARATOR).ok_or_else(|| {
            FormatError::structure("message must contain headers and body separated by empty line")
                .with_details(first_row(raw))
        })?;

        let mut rows = head.split(CRLF);
        // `split` always yields at least one item
        let start_line = rows.next().unwrap_or_default();
        let header_rows: Vec<&str> = rows.collect();

        let headers_size = head.len() + 2 * CRLF.len();
        let body_size = body.len();
        trace!(header_rows = header_rows.len(), headers_size, body_size, "split message rows");

        Ok(Self { start_line, header_rows, body, headers_size, body_size })
    }
}

/// Returns the first row of `raw`, used to classify the message.
pub(crate) fn first_row(raw: &str) -> &str {
    raw.split(CRLF).next().unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_head_and_body() {
        let raw = "POST / HTTP/1.1\r\nHost: example.com\r\nContent-Length: 5\r\n\r\nhello";
        let rows = RawMessage::split(raw).unwrap();

        assert_eq!(rows.start_line, "POST / HTTP/1.1");
        assert_eq!(rows.header_rows, vec!["Host: example.com", "Content-Length: 5"]);
        assert_eq!(rows.body, "hello");
        assert_eq!(rows.headers_size, raw.len() - 5);
        assert_eq!(rows.body_size, 5);
    }

    #[test]
    fn split_without_headers() {
        let rows = RawMessage::split("HTTP/1.1 204 No Content\r\n\r\n").unwrap();
        assert_eq!(rows.start_line, "HTTP/1.1 204 No Content");
        assert!(rows.header_rows.is_empty());
        assert_eq!(rows.body, "");
        assert_eq!(rows.headers_size, 27);
        assert_eq!(rows.body_size, 0);
    }

    #[test]
    fn body_keeps_following_empty_lines() {
        let rows = RawMessage::split("GET / HTTP/1.1\r\n\r\n\r\n\r\ntail").unwrap();
        assert_eq!(rows.body, "\r\n\r\ntail");
    }

    #[test]
    fn missing_empty_line() {
        let error = RawMessage::split("GET / HTTP/1.1\r\nHost: example.com\r\n").unwrap_err();
        assert_eq!(error.details(), Some("GET / HTTP/1.1"));
    }

    #[test]
    fn lf_only_is_not_supported() {
        assert!(RawMessage::split("GET / HTTP/1.1\nHost: example.com\n\n").is_err());
    }
}
