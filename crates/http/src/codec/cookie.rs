//! `Cookie` and `Set-Cookie` rows.
//!
//! A request carries its cookies as `name=value` pairs joined by `;` in the
//! `Cookie` row. A response carries one cookie per `Set-Cookie` row: the first
//! `;` segment is the `name=value` pair, every following segment is an
//! attribute string kept verbatim and uninterpreted.
//!
//! Headers stay authoritative when building: the cookie list is rendered only
//! if the headers do not already hold the matching rows, so a parsed message
//! builds back without duplicated cookie rows.

use bytes::BytesMut;
use http::header::{COOKIE, SET_COOKIE};
use tracing::trace;

use crate::codec::header::encode_row;
use crate::protocol::{Cookie, FormatError, Header, find_header};
use crate::utils::{assert_not_empty, ensure};

const SEPARATOR: char = ';';

/// Decodes every `Cookie` row, `None` when there is no such row.
pub(crate) fn decode_request_cookies(headers: &[Header]) -> Result<Option<Vec<Cookie>>, FormatError> {
    let mut rows = headers.iter().filter(|header| header.is(COOKIE.as_str())).peekable();
    if rows.peek().is_none() {
        return Ok(None);
    }

    let mut cookies = Vec::new();
    for row in rows {
        for pair in row.value.split(SEPARATOR).map(str::trim).filter(|pair| !pair.is_empty()) {
            cookies.push(decode_pair(pair, &row.value)?);
        }
    }
    trace!(cookies = cookies.len(), "decoded request cookies");
    Ok(Some(cookies))
}

/// Decodes every `Set-Cookie` row into its own cookie, `None` when there is no such row.
pub(crate) fn decode_response_cookies(headers: &[Header]) -> Result<Option<Vec<Cookie>>, FormatError> {
    let cookies = headers
        .iter()
        .filter(|header| header.is(SET_COOKIE.as_str()))
        .map(|row| {
            let mut segments = row.value.split(SEPARATOR).map(str::trim);
            let mut cookie = decode_pair(segments.next().unwrap_or_default(), &row.value)?;
            cookie.params = segments.filter(|param| !param.is_empty()).map(str::to_string).collect();
            Ok(cookie)
        })
        .collect::<Result<Vec<_>, FormatError>>()?;

    trace!(cookies = cookies.len(), "decoded response cookies");
    Ok((!cookies.is_empty()).then_some(cookies))
}

fn decode_pair(pair: &str, row: &str) -> Result<Cookie, FormatError> {
    let cookie = match pair.split_once('=') {
        Some((name, value)) => Cookie::new(name.trim(), value.trim()),
        None => Cookie::name_only(pair.trim()),
    };
    ensure!(!cookie.name.is_empty(), FormatError::structure("cookie must have name").with_details(row));
    Ok(cookie)
}

/// Writes a single `Cookie` row, unless the headers already hold one.
pub(crate) fn encode_request_cookies(
    cookies: Option<&[Cookie]>,
    headers: &[Header],
    dst: &mut BytesMut,
) -> Result<(), FormatError> {
    let Some(cookies) = cookies.filter(|cookies| !cookies.is_empty()) else {
        return Ok(());
    };
    if find_header(headers, COOKIE.as_str()).is_some() {
        trace!("cookie header present, skip cookie list");
        return Ok(());
    }

    let pairs = cookies.iter().map(encode_pair).collect::<Result<Vec<_>, _>>()?;
    encode_row(COOKIE.as_str(), &pairs.join("; "), dst)
}

/// Writes one `Set-Cookie` row per cookie, unless the headers already hold any.
pub(crate) fn encode_response_cookies(
    cookies: Option<&[Cookie]>,
    headers: &[Header],
    dst: &mut BytesMut,
) -> Result<(), FormatError> {
    let Some(cookies) = cookies.filter(|cookies| !cookies.is_empty()) else {
        return Ok(());
    };
    if find_header(headers, SET_COOKIE.as_str()).is_some() {
        trace!("set-cookie header present, skip cookie list");
        return Ok(());
    }

    for cookie in cookies {
        let mut value = encode_pair(cookie)?;
        for param in &cookie.params {
            ensure!(
                !param.contains(SEPARATOR),
                FormatError::structure("cookie param must not contain separator").with_details(param)
            );
            value.push_str("; ");
            value.push_str(param);
        }
        encode_row(SET_COOKIE.as_str(), &value, dst)?;
    }
    Ok(())
}

fn encode_pair(cookie: &Cookie) -> Result<String, FormatError> {
    assert_not_empty(&cookie.name, "cookie name")?;
    ensure!(
        !cookie.name.contains([SEPARATOR, '=']),
        FormatError::structure("cookie name must not contain separator").with_details(&cookie.name)
    );

    match &cookie.value {
        Some(value) => {
            ensure!(
                !value.contains(SEPARATOR),
                FormatError::structure("cookie value must not contain separator").with_details(value)
            );
            Ok(format!("{}={value}", cookie.name))
        }
        None => Ok(cookie.name.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::FormatErrorKind;

    fn rendered(dst: &BytesMut) -> &str {
        std::str::from_utf8(dst).unwrap()
    }

    #[test]
    fn request_cookies_in_order() {
        let headers = [Header::new("Host", "example.com"), Header::new("cookie", "a=1; flag; b= 2 ;")];
        let cookies = decode_request_cookies(&headers).unwrap().unwrap();
        assert_eq!(cookies, vec![Cookie::new("a", "1"), Cookie::name_only("flag"), Cookie::new("b", "2")]);
    }

    #[test]
    fn request_without_cookie_row() {
        assert_eq!(decode_request_cookies(&[Header::new("Host", "example.com")]).unwrap(), None);
    }

    #[test]
    fn request_cookie_without_name() {
        let error = decode_request_cookies(&[Header::new("Cookie", "a=1; =2")]).unwrap_err();
        assert_eq!(error.kind(), FormatErrorKind::Structure);
        assert_eq!(error.details(), Some("a=1; =2"));
    }

    #[test]
    fn set_cookie_rows_are_never_merged() {
        let headers = [
            Header::new("Set-Cookie", "id=a3fWa; Expires=Wed, 21 Oct 2015 07:28:00 GMT; Secure"),
            Header::new("Content-Type", "text/plain"),
            Header::new("Set-Cookie", "lang=en; Path=/"),
        ];
        let cookies = decode_response_cookies(&headers).unwrap().unwrap();
        assert_eq!(
            cookies,
            vec![
                Cookie::new("id", "a3fWa").with_param("Expires=Wed, 21 Oct 2015 07:28:00 GMT").with_param("Secure"),
                Cookie::new("lang", "en").with_param("Path=/"),
            ]
        );
    }

    #[test]
    fn encode_request_cookie_row() {
        let mut dst = BytesMut::new();
        let cookies = [Cookie::new("a", "1"), Cookie::name_only("flag")];
        encode_request_cookies(Some(&cookies), &[], &mut dst).unwrap();
        assert_eq!(rendered(&dst), "Cookie: a=1; flag\r\n");
    }

    #[test]
    fn headers_take_precedence() {
        let mut dst = BytesMut::new();
        let cookies = [Cookie::new("a", "1")];
        encode_request_cookies(Some(&cookies), &[Header::new("Cookie", "a=1")], &mut dst).unwrap();
        encode_response_cookies(Some(&cookies), &[Header::new("Set-Cookie", "a=1")], &mut dst).unwrap();
        assert!(dst.is_empty());
    }

    #[test]
    fn encode_set_cookie_rows() {
        let mut dst = BytesMut::new();
        let cookies = [Cookie::new("id", "1").with_param("HttpOnly"), Cookie::new("lang", "en")];
        encode_response_cookies(Some(&cookies), &[], &mut dst).unwrap();
        assert_eq!(rendered(&dst), "Set-Cookie: id=1; HttpOnly\r\nSet-Cookie: lang=en\r\n");
    }

    #[test]
    fn encode_requires_name() {
        let mut dst = BytesMut::new();
        let cookies = [Cookie::new("", "1")];
        let error = encode_request_cookies(Some(&cookies), &[], &mut dst).unwrap_err();
        assert_eq!(error.kind(), FormatErrorKind::RequiredField);
    }
}
