//! Header row decoder.
//!
//! Every row must have the form `Name ":" Value`. Both sides are trimmed, the
//! value may be empty. A value that is exactly one quoted-string is unwrapped
//! and its inner text kept verbatim. Names are stored in Train-Case.
//!
//! Obsolete line folding is not supported, a continuation row has no colon
//! and is rejected like any other malformed row.

use http::HeaderName;
use tracing::trace;

use crate::protocol::{FormatError, Header};
use crate::utils::{ensure, unquote};

/// Decoder for the header rows between the start-line and the empty line.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderDecoder;

impl HeaderDecoder {
    /// Decodes `rows` into headers, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns a structural [`FormatError`] citing the offending row if a row
    /// has no colon, an empty name or a name that is not a valid token.
    pub fn decode(&self, rows: &[&str]) -> Result<Vec<Header>, FormatError> {
        let headers = rows.iter().map(|row| decode_row(row)).collect::<Result<Vec<_>, _>>()?;
        trace!(headers = headers.len(), "decoded header rows");
        Ok(headers)
    }
}

fn decode_row(row: &str) -> Result<Header, FormatError> {
    let (name, value) = row.split_once(':').ok_or_else(|| FormatError::structure("invalid header row").with_details(row))?;

    let name = name.trim();
    ensure!(!name.is_empty(), FormatError::structure("header row must have name").with_details(row));
    ensure!(
        HeaderName::from_bytes(name.as_bytes()).is_ok(),
        FormatError::structure("invalid header name").with_details(row)
    );

    Ok(Header::new(name, unquote(value.trim())))
}
