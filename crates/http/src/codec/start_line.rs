//! Request-line and status-line grammars.
//!
//! ```text
//! request-line := METHOD SP request-target SP HTTP-VERSION
//! status-line  := HTTP-VERSION SP 3DIGIT SP reason-phrase
//! ```
//!
//! The request-target is kept raw and also resolved into host, path and query
//! params. Origin-form (`/path?query`), absolute-form
//! (`http://host:port/path?query`), authority-form (`host:port`) and the
//! asterisk form are all accepted.

use bytes::{BufMut, BytesMut};
use http::{StatusCode, Uri};
use tracing::trace;

use crate::codec::body::url_encoded::{decode_pairs, encode_pairs};
use crate::codec::rows::CRLF;
use crate::protocol::{FormatError, Method, Param, ProtocolVersion, RequestMessage, ResponseMessage};
use crate::utils::{assert_positive, ensure};

const SP: char = ' ';

const STATUS_CODE_DIGITS: usize = 3;

/// A decoded request-line, borrowing the raw target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestLine<'a> {
    pub(crate) method: Method,
    pub(crate) target: &'a str,
    pub(crate) protocol_version: ProtocolVersion,
}

impl<'a> RequestLine<'a> {
    pub(crate) fn decode(line: &'a str) -> Result<Self, FormatError> {
        let invalid = || FormatError::structure("invalid request line").with_details(line);

        let mut parts = line.split(SP);
        let (Some(method), Some(target), Some(version), None) = (parts.next(), parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        ensure!(!target.is_empty(), invalid());

        let method = method.parse::<Method>().map_err(|e| e.with_details(line))?;
        let protocol_version = version.parse::<ProtocolVersion>().map_err(|e| e.with_details(line))?;

        Ok(Self { method, target, protocol_version })
    }

    pub(crate) fn matches(line: &str) -> bool {
        RequestLine::decode(line).is_ok()
    }
}

/// A decoded status-line, borrowing the raw reason phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatusLine<'a> {
    pub(crate) protocol_version: ProtocolVersion,
    pub(crate) status_code: u16,
    pub(crate) status_message: &'a str,
}

impl<'a> StatusLine<'a> {
    pub(crate) fn decode(line: &'a str) -> Result<Self, FormatError> {
        let invalid = || FormatError::structure("invalid status line").with_details(line);

        let mut parts = line.splitn(3, SP);
        let (Some(version), Some(code)) = (parts.next(), parts.next()) else {
            return Err(invalid());
        };
        // the reason phrase may be empty, with or without the separating space
        let status_message = parts.next().unwrap_or_default();

        let protocol_version = version.parse::<ProtocolVersion>().map_err(|e| e.with_details(line))?;

        ensure!(code.len() == STATUS_CODE_DIGITS && code.bytes().all(|b| b.is_ascii_digit()), invalid());
        let status_code = StatusCode::from_bytes(code.as_bytes())
            .map_err(|e| FormatError::structure(format!("invalid status code: {e}")).with_details(line))?
            .as_u16();

        Ok(Self { protocol_version, status_code, status_message })
    }

    pub(crate) fn matches(line: &str) -> bool {
        StatusLine::decode(line).is_ok()
    }
}

/// The parts of a request-target that the request model exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResolvedTarget {
    /// `host[:port]` of an absolute-form or authority-form target
    pub(crate) host: Option<String>,
    pub(crate) path: String,
    pub(crate) query_params: Vec<Param>,
}

impl ResolvedTarget {
    pub(crate) fn resolve(target: &str) -> Result<Self, FormatError> {
        let uri: Uri = target.parse().map_err(|e| FormatError::structure(format!("invalid request target: {e}")).with_details(target))?;

        let host = uri.host().map(|host| match uri.port_u16() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        });

        let query_params = match uri.query() {
            Some(query) => decode_pairs(query)?.into_iter().map(|(name, value)| Param { name, value }).collect(),
            None => Vec::new(),
        };

        trace!(?host, path = uri.path(), query_params = query_params.len(), "resolved request target");
        Ok(Self { host, path: uri.path().to_string(), query_params })
    }
}

/// Writes `METHOD SP target SP VERSION CRLF`.
///
/// The raw `target` is used when it is set, otherwise the target is rendered
/// from `path` (defaulting to `/`) and the encoded query params.
pub(crate) fn encode_request_line(request: &RequestMessage, dst: &mut BytesMut) -> Result<(), FormatError> {
    let target = if request.target.is_empty() {
        let path = if request.path.is_empty() { "/" } else { request.path.as_str() };
        if request.query_params.is_empty() {
            path.to_string()
        } else {
            let query = encode_pairs(request.query_params.iter().map(|param| (param.name.as_str(), param.value.as_str())))?;
            format!("{path}?{query}")
        }
    } else {
        request.target.clone()
    };

    ensure!(
        !target.contains(char::is_whitespace),
        FormatError::structure("request target must not contain whitespace").with_details(&target)
    );

    put_parts(&[request.method.as_str(), &target, request.protocol_version.as_str()], dst);
    Ok(())
}

/// Writes `VERSION SP CODE SP reason CRLF`.
pub(crate) fn encode_status_line(response: &ResponseMessage, dst: &mut BytesMut) -> Result<(), FormatError> {
    assert_positive(u64::from(response.status_code), "status code")?;
    let status_code = StatusCode::from_u16(response.status_code)
        .map_err(|e| FormatError::required(format!("invalid status code: {e}")).with_details(response.status_code))?;

    ensure!(
        !response.status_message.contains(['\r', '\n']),
        FormatError::structure("status message must not contain line separator").with_details(&response.status_message)
    );

    put_parts(&[response.protocol_version.as_str(), status_code.as_str(), &response.status_message], dst);
    Ok(())
}

fn put_parts(parts: &[&str], dst: &mut BytesMut) {
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            dst.put_u8(b' ');
        }
        dst.put_slice(part.as_bytes());
    }
    dst.put_slice(CRLF.as_bytes());
}
