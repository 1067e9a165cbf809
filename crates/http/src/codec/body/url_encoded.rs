//! `application/x-www-form-urlencoded` pairs, shared by url-encoded bodies and
//! request-target query strings.

use tracing::trace;

use crate::protocol::{BodyParam, FormatError};
use crate::utils::ensure;

/// Decodes `text` into ordered name/value pairs, duplicates preserved.
///
/// A name without `=` decodes to an empty value.
pub(crate) fn decode_pairs(text: &str) -> Result<Vec<(String, String)>, FormatError> {
    serde_urlencoded::from_str::<Vec<(String, String)>>(text)
        .map_err(|e| FormatError::structure(format!("invalid url-encoded text: {e}")).with_details(text))
}

/// Encodes name/value pairs, in order.
pub(crate) fn encode_pairs<'a, I>(pairs: I) -> Result<String, FormatError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let pairs: Vec<(&str, &str)> = pairs.into_iter().collect();
    serde_urlencoded::to_string(&pairs).map_err(|e| FormatError::required(format!("params can't be url-encoded: {e}")))
}

pub(crate) fn decode(text: &str) -> Result<Vec<BodyParam>, FormatError> {
    let params: Vec<BodyParam> = decode_pairs(text)?.into_iter().map(|(name, value)| BodyParam::new(name, value)).collect();
    trace!(params = params.len(), "decoded url-encoded body");
    Ok(params)
}

pub(crate) fn encode(params: &[BodyParam]) -> Result<String, FormatError> {
    let mut pairs = Vec::with_capacity(params.len());
    for param in params {
        let name = param.name.as_deref().unwrap_or_default();
        ensure!(!name.is_empty(), FormatError::required("url-encoded param name must be not empty").with_details(&param.value));
        pairs.push((name, param.value.as_str()));
    }
    encode_pairs(pairs)
}
