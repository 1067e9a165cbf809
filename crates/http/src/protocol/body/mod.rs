//! Message body model.
//!
//! A [`Body`] keeps the shape the body was decoded into:
//!
//! - plain text (including JSON and any unknown content type): `text`
//! - `application/x-www-form-urlencoded`: `params` holding name/value pairs
//! - `multipart/*`: `boundary` plus one [`BodyParam`] per part in `params`
//!
//! `content_type` is always the lower-cased primary media type, parameters such
//! as `charset` or `boundary` are stripped from it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::protocol::FormatError;

/// A decoded message body.
///
/// Empty body text parses as no body, so `Body::text("")` does not survive a
/// build then parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<BodyParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<String>,
}

impl Body {
    /// Creates a text body without content type.
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self { text: Some(text.into()), ..Default::default() }
    }

    /// Creates an `application/x-www-form-urlencoded` body.
    pub fn url_encoded(params: Vec<BodyParam>) -> Self {
        Self {
            content_type: Some(mime::APPLICATION_WWW_FORM_URLENCODED.essence_str().to_string()),
            params: Some(params),
            ..Default::default()
        }
    }

    /// Creates a `multipart/form-data` body.
    pub fn form_data<B: Into<String>>(boundary: B, params: Vec<BodyParam>) -> Self {
        Self {
            content_type: Some(mime::MULTIPART_FORM_DATA.essence_str().to_string()),
            params: Some(params),
            boundary: Some(boundary.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the params, or an empty slice when there are none.
    pub fn params(&self) -> &[BodyParam] {
        self.params.as_deref().unwrap_or_default()
    }
}

/// A url-encoded pair or a multipart part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyParam {
    /// `None` means the default `form-data` disposition.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub disposition: Option<DispositionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl BodyParam {
    /// Creates a named param, used for both url-encoded pairs and form-data parts.
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self { name: Some(name.into()), value: value.into(), ..Default::default() }
    }

    #[must_use]
    pub fn with_disposition(mut self, disposition: DispositionType) -> Self {
        self.disposition = Some(disposition);
        self
    }

    #[must_use]
    pub fn with_file_name<S: Into<String>>(mut self, file_name: S) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    #[must_use]
    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the disposition type, `form-data` when it is not set.
    pub fn disposition(&self) -> DispositionType {
        self.disposition.unwrap_or_default()
    }
}

/// The type token of a part's `Content-Disposition` row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispositionType {
    #[default]
    FormData,
    Inline,
    Attachment,
}

impl DispositionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispositionType::FormData => "form-data",
            DispositionType::Inline => "inline",
            DispositionType::Attachment => "attachment",
        }
    }
}

impl fmt::Display for DispositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DispositionType {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("form-data") {
            Ok(DispositionType::FormData)
        } else if s.eq_ignore_ascii_case("inline") {
            Ok(DispositionType::Inline)
        } else if s.eq_ignore_ascii_case("attachment") {
            Ok(DispositionType::Attachment)
        } else {
            Err(FormatError::multipart("invalid content-disposition type").with_details(s))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_disposition_is_omitted() {
        let param = BodyParam::new("firstName", "John");
        assert_eq!(param.disposition(), DispositionType::FormData);

        let json = serde_json::to_string(&param).unwrap();
        assert_eq!(json, r#"{"name":"firstName","value":"John"}"#);
    }

    #[test]
    fn explicit_disposition_is_serialized() {
        let param = BodyParam { value: "data".into(), ..Default::default() }
            .with_disposition(DispositionType::Attachment)
            .with_file_name("a.txt");

        let json = serde_json::to_string(&param).unwrap();
        assert_eq!(json, r#"{"type":"attachment","value":"data","fileName":"a.txt"}"#);
        assert_eq!(serde_json::from_str::<BodyParam>(&json).unwrap(), param);
    }

    #[test]
    fn parse_disposition_ignores_case() {
        assert_eq!("Form-Data".parse::<DispositionType>().unwrap(), DispositionType::FormData);
        assert_eq!("INLINE".parse::<DispositionType>().unwrap(), DispositionType::Inline);
        assert!("form".parse::<DispositionType>().is_err());
    }
}
