//! Multipart bodies (`multipart/form-data`, `alternative`, `mixed`, `related`).
//!
//! A body is split on `--<boundary>`. The preamble before the first delimiter
//! and the closing `--` segment are dropped, every segment in between is one
//! part:
//!
//! ```text
//! --boundary\r\n
//! Content-Disposition: form-data; name="file"; filename="a.txt"\r\n
//! Content-Type: text/plain\r\n
//! \r\n
//! value\r\n
//! --boundary--
//! ```

use bytes::{BufMut, BytesMut};
use tracing::{debug, trace};

use crate::codec::rows::CRLF;
use crate::protocol::{BodyParam, DispositionType, FormatError};
use crate::utils::{assert_not_empty, ensure, unquote};

const DELIMITER_PREFIX: &str = "--";

const CONTENT_DISPOSITION: &str = "content-disposition";

/// Returns true if `media_type` is one of the multipart kinds decoded as parts.
pub(crate) fn is_multipart(media_type: &str) -> bool {
    matches!(media_type, "multipart/form-data" | "multipart/alternative" | "multipart/mixed" | "multipart/related")
}

/// Extracts the `boundary` parameter from a `Content-Type` header value.
///
/// # Errors
///
/// Returns a multipart [`FormatError`] if the header is missing, has no
/// parameters or its boundary is missing or empty.
pub(crate) fn boundary(content_type: Option<&str>) -> Result<String, FormatError> {
    let content_type = content_type.ok_or_else(|| FormatError::multipart("content-type header must be present for multipart body"))?;

    let mime: mime::Mime =
        content_type.parse().map_err(|e| FormatError::multipart(format!("invalid multipart content-type: {e}")).with_details(content_type))?;

    ensure!(
        mime.params().next().is_some(),
        FormatError::multipart("multipart content-type must have parameters").with_details(content_type)
    );

    let boundary = mime
        .get_param(mime::BOUNDARY)
        .map(|boundary| unquote(boundary.as_str()).to_string())
        .ok_or_else(|| FormatError::multipart("multipart content-type must have boundary parameter").with_details(content_type))?;

    ensure!(!boundary.is_empty(), FormatError::multipart("multipart boundary must be not empty").with_details(content_type));
    Ok(boundary)
}

/// Decodes every part of a multipart `text` delimited by `boundary`.
pub(crate) fn decode(text: &str, boundary: &str) -> Result<Vec<BodyParam>, FormatError> {
    let delimiter = format!("{DELIMITER_PREFIX}{boundary}");
    let segments: Vec<&str> = text.split(delimiter.as_str()).collect();

    // at least the opening delimiter and the closing one
    let closing = segments.last().copied().unwrap_or_default();
    ensure!(
        segments.len() >= 2 && closing.starts_with(DELIMITER_PREFIX),
        FormatError::multipart("multipart body must end with closing boundary").with_details(delimiter)
    );

    let params = segments[1..segments.len() - 1].iter().map(|part| decode_part(part)).collect::<Result<Vec<_>, _>>()?;
    trace!(parts = params.len(), "decoded multipart body");
    Ok(params)
}

fn decode_part(part: &str) -> Result<BodyParam, FormatError> {
    let malformed = || FormatError::multipart("malformed multipart part").with_details(part);

    let mut remaining = part.strip_prefix(CRLF).and_then(|part| part.strip_suffix(CRLF)).ok_or_else(malformed)?;

    let mut param = BodyParam::default();
    let mut has_disposition = false;

    // part header lines end at the first empty line, the value follows it
    loop {
        let (line, rest) = remaining.split_once(CRLF).ok_or_else(malformed)?;
        remaining = rest;

        if line.is_empty() {
            break;
        }

        let (name, value) = line.split_once(':').ok_or_else(malformed)?;
        let name = name.trim();
        if name.eq_ignore_ascii_case(CONTENT_DISPOSITION) {
            let (disposition, part_name, file_name) = parse_content_disposition(value.trim())?;
            param.disposition = (disposition != DispositionType::FormData).then_some(disposition);
            param.name = part_name;
            param.file_name = file_name;
            has_disposition = true;
        } else if name.eq_ignore_ascii_case(http::header::CONTENT_TYPE.as_str()) {
            param.content_type = Some(value.trim().to_string());
        } else {
            debug!(header = name, "skip unsupported multipart part header");
        }
    }

    ensure!(has_disposition, FormatError::multipart("multipart part must have content-disposition").with_details(part));

    param.value = remaining.to_string();
    Ok(param)
}

/// Parses `form-data; name="field"; filename="a.txt"`.
fn parse_content_disposition(value: &str) -> Result<(DispositionType, Option<String>, Option<String>), FormatError> {
    let mut segments = split_parameters(value).into_iter();
    let disposition: DispositionType = segments.next().unwrap_or_default().trim().parse()?;

    let mut name = None;
    let mut file_name = None;
    for segment in segments {
        let Some((key, raw_value)) = segment.split_once('=') else {
            continue;
        };

        let key = key.trim();
        if key.eq_ignore_ascii_case("name") {
            name = Some(parameter_value(raw_value));
        } else if key.eq_ignore_ascii_case("filename") {
            file_name = Some(parameter_value(raw_value));
        }
    }

    ensure!(
        disposition != DispositionType::FormData || name.is_some(),
        FormatError::multipart("form-data content-disposition must have name").with_details(value)
    );

    Ok((disposition, name, file_name))
}

/// Splits on `;` outside of quoted-strings.
fn split_parameters(value: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;

    for (index, b) in value.bytes().enumerate() {
        match b {
            _ if escaped => escaped = false,
            b'\\' if quoted => escaped = true,
            b'"' => quoted = !quoted,
            b';' if !quoted => {
                segments.push(&value[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }

    segments.push(&value[start..]);
    segments
}

/// A bare token, or a quoted-string with its escapes resolved.
fn parameter_value(raw: &str) -> String {
    let raw = raw.trim();
    let Some(inner) = raw.strip_prefix('"').and_then(|raw| raw.strip_suffix('"')) else {
        return raw.to_string();
    };

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => value.extend(chars.next()),
            c => value.push(c),
        }
    }
    value
}

/// Encodes `params` as multipart parts, terminated by the closing delimiter.
pub(crate) fn encode(params: &[BodyParam], boundary: &str, dst: &mut BytesMut) -> Result<(), FormatError> {
    assert_not_empty(boundary, "multipart boundary")?;

    for param in params {
        let disposition = param.disposition();
        if disposition == DispositionType::FormData {
            assert_not_empty(param.name.as_deref().unwrap_or_default(), "form-data param name")?;
        }

        put_delimiter(boundary, dst);
        dst.put_slice(CRLF.as_bytes());

        dst.put_slice(b"Content-Disposition: ");
        dst.put_slice(disposition.as_str().as_bytes());
        if let Some(name) = &param.name {
            put_parameter("name", name, dst)?;
        }
        if let Some(file_name) = &param.file_name {
            put_parameter("filename", file_name, dst)?;
        }
        dst.put_slice(CRLF.as_bytes());

        if let Some(content_type) = &param.content_type {
            dst.put_slice(b"Content-Type: ");
            dst.put_slice(content_type.as_bytes());
            dst.put_slice(CRLF.as_bytes());
        }

        dst.put_slice(CRLF.as_bytes());
        dst.put_slice(param.value.as_bytes());
        dst.put_slice(CRLF.as_bytes());
    }

    put_delimiter(boundary, dst);
    dst.put_slice(DELIMITER_PREFIX.as_bytes());
    Ok(())
}

fn put_delimiter(boundary: &str, dst: &mut BytesMut) {
    dst.put_slice(DELIMITER_PREFIX.as_bytes());
    dst.put_slice(boundary.as_bytes());
}

fn put_parameter(key: &str, value: &str, dst: &mut BytesMut) -> Result<(), FormatError> {
    ensure!(
        !value.contains(['\r', '\n']),
        FormatError::multipart(format!("multipart {key} must not contain line separator")).with_details(value)
    );

    dst.put_slice(b"; ");
    dst.put_slice(key.as_bytes());
    dst.put_slice(b"=\"");
    for b in value.bytes() {
        if matches!(b, b'"' | b'\\') {
            dst.put_u8(b'\\');
        }
        dst.put_u8(b);
    }
    dst.put_u8(b'"');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::FormatErrorKind;
    use indoc::indoc;

    fn crlf(text: &str) -> String {
        text.replace('\n', "\r\n")
    }

    fn encode_to_string(params: &[BodyParam], boundary: &str) -> String {
        let mut dst = BytesMut::new();
        encode(params, boundary, &mut dst).unwrap();
        String::from_utf8(dst.to_vec()).unwrap()
    }

    #[test]
    fn boundary_from_content_type() {
        assert_eq!(boundary(Some("multipart/form-data; boundary=1234")).unwrap(), "1234");
        assert_eq!(boundary(Some("multipart/form-data; charset=utf-8; boundary=\"ab cd\"")).unwrap(), "ab cd");
        assert_eq!(boundary(Some("Multipart/Mixed; boundary=xYz")).unwrap(), "xYz");
    }

    #[test]
    fn boundary_errors() {
        assert_eq!(boundary(None).unwrap_err().kind(), FormatErrorKind::Multipart);
        assert_eq!(boundary(Some("multipart/form-data")).unwrap_err().message(), "multipart content-type must have parameters");
        assert_eq!(
            boundary(Some("multipart/form-data; charset=utf-8")).unwrap_err().message(),
            "multipart content-type must have boundary parameter"
        );
        assert_eq!(boundary(Some("multipart/form-data; boundary=\"\"")).unwrap_err().kind(), FormatErrorKind::Multipart);
    }

    #[test]
    fn decode_simple_parts() {
        let text = crlf(indoc! {r#"
            --11136253119209
            Content-Disposition: form-data; name="firstName"

            Smith
            --11136253119209
            Content-Disposition: form-data; name="lastName"

            John
            --11136253119209--"#});

        let params = decode(&text, "11136253119209").unwrap();
        assert_eq!(params, vec![BodyParam::new("firstName", "Smith"), BodyParam::new("lastName", "John")]);
    }

    #[test]
    fn decode_file_part() {
        let text = crlf(indoc! {r#"
            preamble
            --xyz
            Content-Disposition: form-data; name="upload"; filename="notes.txt"
            Content-Type: text/plain

            line 1
            line 2
            --xyz--
            "#});

        let params = decode(&text, "xyz").unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name.as_deref(), Some("upload"));
        assert_eq!(params[0].file_name.as_deref(), Some("notes.txt"));
        assert_eq!(params[0].content_type.as_deref(), Some("text/plain"));
        assert_eq!(params[0].value, "line 1\r\nline 2");
    }

    #[test]
    fn decode_empty_value() {
        let text = "--b\r\nContent-Disposition: form-data; name=\"empty\"\r\n\r\n\r\n--b--";
        let params = decode(text, "b").unwrap();
        assert_eq!(params, vec![BodyParam::new("empty", "")]);
    }

    #[test]
    fn decode_attachment_without_name() {
        let text = "--b\r\nContent-Disposition: attachment; filename=report.pdf\r\n\r\n%PDF\r\n--b--";
        let params = decode(text, "b").unwrap();
        assert_eq!(params[0].disposition, Some(DispositionType::Attachment));
        assert_eq!(params[0].name, None);
        assert_eq!(params[0].file_name.as_deref(), Some("report.pdf"));
    }

    #[test]
    fn decode_errors() {
        // no empty line before the value
        let error = decode("--b\r\nContent-Disposition: form-data; name=\"a\"\r\nvalue\r\n--b--", "b").unwrap_err();
        assert_eq!(error.message(), "malformed multipart part");

        // form-data without name
        let error = decode("--b\r\nContent-Disposition: form-data\r\n\r\nvalue\r\n--b--", "b").unwrap_err();
        assert_eq!(error.message(), "form-data content-disposition must have name");

        // unknown disposition type
        let error = decode("--b\r\nContent-Disposition: signal; name=\"a\"\r\n\r\nvalue\r\n--b--", "b").unwrap_err();
        assert_eq!(error.message(), "invalid content-disposition type");

        // missing content-disposition
        let error = decode("--b\r\nContent-Type: text/plain\r\n\r\nvalue\r\n--b--", "b").unwrap_err();
        assert_eq!(error.message(), "multipart part must have content-disposition");

        // no closing delimiter
        let error = decode("--b\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nvalue\r\n", "b").unwrap_err();
        assert_eq!(error.message(), "multipart body must end with closing boundary");
    }

    #[test]
    fn encode_parts() {
        let params = vec![
            BodyParam::new("firstName", "Smith"),
            BodyParam::new("file", "content").with_file_name("a.txt").with_content_type("text/plain"),
            BodyParam { value: "inline text".into(), ..Default::default() }.with_disposition(DispositionType::Inline),
        ];

        let expected = crlf(indoc! {r#"
            --b
            Content-Disposition: form-data; name="firstName"

            Smith
            --b
            Content-Disposition: form-data; name="file"; filename="a.txt"
            Content-Type: text/plain

            content
            --b
            Content-Disposition: inline

            inline text
            --b--"#});

        let text = encode_to_string(&params, "b");
        assert_eq!(text, expected);
        assert_eq!(decode(&text, "b").unwrap(), params);
    }

    #[test]
    fn encode_empty_value_round_trip() {
        let params = vec![BodyParam::new("empty", "")];
        let text = encode_to_string(&params, "b");
        assert_eq!(decode(&text, "b").unwrap()[0].value, "");
    }

    #[test]
    fn encode_requires_form_data_name() {
        let mut dst = BytesMut::new();
        let param = BodyParam { value: "v".into(), ..Default::default() };
        assert!(encode(&[param], "b", &mut dst).is_err());
        assert!(encode(&[], "", &mut dst).is_err());
    }

    #[test]
    fn decode_quoted_semicolon() {
        let text = "--b\r\nContent-Disposition: form-data; name=\"f\"; filename=\"a;b.txt\"\r\n\r\nx\r\n--b--";
        let params = decode(text, "b").unwrap();
        assert_eq!(params[0].name.as_deref(), Some("f"));
        assert_eq!(params[0].file_name.as_deref(), Some("a;b.txt"));

        let text = encode_to_string(&params, "b");
        assert!(text.contains(r#"filename="a;b.txt""#));
        assert_eq!(decode(&text, "b").unwrap(), params);
    }

    #[test]
    fn encode_escapes_quoted_parameters() {
        let params = vec![BodyParam::new("a\"b", "v").with_file_name(r"C:\tmp\x.txt")];
        let text = encode_to_string(&params, "b");
        assert!(text.contains(r#"name="a\"b"; filename="C:\\tmp\\x.txt""#));
        assert_eq!(decode(&text, "b").unwrap(), params);
    }

    #[test]
    fn encode_rejects_line_separator_in_parameters() {
        let mut dst = BytesMut::new();
        let error = encode(&[BodyParam::new("a\r\nb", "v")], "b", &mut dst).unwrap_err();
        assert_eq!(error.kind(), FormatErrorKind::Multipart);

        let error = encode(&[BodyParam::new("a", "v").with_file_name("x\ny")], "b", &mut dst).unwrap_err();
        assert_eq!(error.message(), "multipart filename must not contain line separator");
    }
}
