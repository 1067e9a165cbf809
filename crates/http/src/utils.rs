//! Utility macros and validation helpers for the crate.
//!
//! The helpers here carry no protocol knowledge. They turn the small
//! validation checks repeated by the codecs into [`FormatError`] values.

use bytes::{BufMut, BytesMut};
use std::io;

use crate::protocol::FormatError;

/// A macro for early returns with an error if a condition is not met.
///
/// This is similar to the `assert!` macro, but returns an error instead of panicking.
///
/// # Example
///
/// ```ignore
/// ensure!(!name.is_empty(), FormatError::required("header name must be not empty"));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;

/// Fails with a required-field error when `value` is empty or only whitespace.
pub(crate) fn assert_not_empty(value: &str, field: &str) -> Result<(), FormatError> {
    ensure!(!value.trim().is_empty(), FormatError::required(format!("{field} must be not empty string")));
    Ok(())
}

/// Fails with a required-field error when `value` is zero.
pub(crate) fn assert_positive(value: u64, field: &str) -> Result<(), FormatError> {
    ensure!(value > 0, FormatError::required(format!("{field} must be positive number")).with_details(value));
    Ok(())
}

/// Removes the surrounding quotes of a value that is exactly one quoted-string.
///
/// The inner text is kept verbatim, escape sequences are not processed. A value
/// like `"a", "b"` is not a single quoted-string and is returned unchanged.
pub(crate) fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'"' || bytes[bytes.len() - 1] != b'"' {
        return value;
    }

    let inner = &bytes[1..bytes.len() - 1];
    let mut escaped = false;
    for &b in inner {
        match b {
            _ if escaped => escaped = false,
            b'\\' => escaped = true,
            b'"' => return value,
            _ => {}
        }
    }

    // a trailing backslash escapes the closing quote
    if escaped {
        return value;
    }

    &value[1..value.len() - 1]
}

/// Writes formatted text straight into a [`BytesMut`].
pub(crate) struct FastWrite<'a>(pub(crate) &'a mut BytesMut);

impl io::Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquote_single_quoted_string() {
        assert_eq!(unquote(r#""macOS""#), "macOS");
        assert_eq!(unquote(r#""""#), "");
        assert_eq!(unquote(r#""a \"b\" c""#), r#"a \"b\" c"#);
    }

    #[test]
    fn unquote_keeps_other_values() {
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote(r#"""#), r#"""#);
        assert_eq!(unquote(r#""a", "b""#), r#""a", "b""#);
        assert_eq!(unquote(r#""a\""#), r#""a\""#);
        assert_eq!(unquote(r#"W/"etag""#), r#"W/"etag""#);
    }

    #[test]
    fn not_empty_check() {
        assert!(assert_not_empty("value", "name").is_ok());

        let error = assert_not_empty("  ", "name").unwrap_err();
        assert_eq!(error.message(), "name must be not empty string");
    }

    #[test]
    fn positive_check() {
        assert!(assert_positive(1, "statusCode").is_ok());

        let error = assert_positive(0, "statusCode").unwrap_err();
        assert_eq!(error.details(), Some("0"));
    }
}
