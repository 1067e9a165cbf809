//! Header fields as they appear in the message model.

use serde::{Deserialize, Serialize};

/// A single header field.
///
/// The order of headers in a message is significant and preserved, and the
/// same name may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    /// Creates a header whose name is converted to Train-Case.
    pub fn new<N: AsRef<str>, V: Into<String>>(name: N, value: V) -> Self {
        Self { name: prettify_header_name(name.as_ref()), value: value.into() }
    }

    /// Returns true if this header has the given name, compared ignoring case.
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Converts a header name to Train-Case: every hyphen separated segment is
/// capitalized and the rest of the segment is lower-cased.
///
/// ```
/// use micro_http_text::protocol::prettify_header_name;
///
/// assert_eq!(prettify_header_name("content-type"), "Content-Type");
/// assert_eq!(prettify_header_name("X-REQUEST-ID"), "X-Request-Id");
/// ```
pub fn prettify_header_name(name: &str) -> String {
    let mut pretty = String::with_capacity(name.len());
    let mut segment_start = true;
    for c in name.chars() {
        if c == '-' {
            segment_start = true;
            pretty.push(c);
        } else if segment_start {
            segment_start = false;
            pretty.extend(c.to_uppercase());
        } else {
            pretty.extend(c.to_lowercase());
        }
    }
    pretty
}

/// Finds the first header with the given name, compared ignoring case.
pub(crate) fn find_header<'a>(headers: &'a [Header], name: &str) -> Option<&'a Header> {
    headers.iter().find(|header| header.is(name))
}
