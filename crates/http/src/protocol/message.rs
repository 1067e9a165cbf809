use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::{FormatError, RequestMessage, ResponseMessage};

/// Represents either a HTTP request or a HTTP response.
///
/// When parsed from text the start-line decides the variant. When read from a
/// JSON document, a `method` field makes it a request and a `statusCode`
/// field makes it a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Request(RequestMessage),
    Response(ResponseMessage),
}

impl Message {
    /// Returns true if this message is a request
    #[inline]
    pub fn is_request(&self) -> bool {
        matches!(self, Message::Request(_))
    }

    /// Returns true if this message is a response
    #[inline]
    pub fn is_response(&self) -> bool {
        matches!(self, Message::Response(_))
    }

    /// Returns the request if this message is one
    pub fn as_request(&self) -> Option<&RequestMessage> {
        match self {
            Message::Request(request) => Some(request),
            Message::Response(_) => None,
        }
    }

    /// Returns the response if this message is one
    pub fn as_response(&self) -> Option<&ResponseMessage> {
        match self {
            Message::Request(_) => None,
            Message::Response(response) => Some(response),
        }
    }

    /// Reads a message model from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if the document is not a JSON object, has
    /// neither a `method` nor a `statusCode` field, or does not match the
    /// model.
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| FormatError::required("message must be valid json").with_details(e))?;

        let Value::Object(fields) = &value else {
            return Err(FormatError::required("message must be json object").with_details(value));
        };

        if fields.contains_key("method") {
            serde_json::from_value(value).map(Message::Request).map_err(|e| FormatError::required("invalid request model").with_details(e))
        } else if fields.contains_key("statusCode") {
            serde_json::from_value(value).map(Message::Response).map_err(|e| FormatError::required("invalid response model").with_details(e))
        } else {
            Err(FormatError::structure("unknown message format"))
        }
    }

    /// Writes this message model as a pretty printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if serialization fails.
    pub fn to_json(&self) -> Result<String, FormatError> {
        serde_json::to_string_pretty(self).map_err(|e| FormatError::required("message can't be serialized").with_details(e))
    }
}

impl From<RequestMessage> for Message {
    fn from(request: RequestMessage) -> Self {
        Message::Request(request)
    }
}

impl From<ResponseMessage> for Message {
    fn from(response: ResponseMessage) -> Self {
        Message::Response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{FormatErrorKind, Method, ProtocolVersion};

    #[test]
    fn json_with_method_is_request() {
        let message = Message::from_json(
            r#"{"method":"GET","protocolVersion":"HTTP/1.1","target":"/","headers":[{"name":"Host","value":"example.com"}]}"#,
        )
        .unwrap();

        let request = message.as_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.protocol_version, ProtocolVersion::Http11);
        assert_eq!(request.target, "/");
        assert_eq!(request.headers.len(), 1);
        assert!(request.cookies.is_none());
    }

    #[test]
    fn json_with_status_code_is_response() {
        let message = Message::from_json(r#"{"protocolVersion":"HTTP/2","statusCode":204,"statusMessage":"No Content"}"#).unwrap();

        let response = message.as_response().unwrap();
        assert_eq!(response.status_code, 204);
        assert_eq!(response.protocol_version, ProtocolVersion::Http2);
        assert!(response.headers.is_empty());
    }

    #[test]
    fn json_rejects_other_shapes() {
        assert_eq!(Message::from_json("null").unwrap_err().kind(), FormatErrorKind::RequiredField);
        assert_eq!(Message::from_json("[1, 2]").unwrap_err().kind(), FormatErrorKind::RequiredField);
        assert_eq!(Message::from_json(r#"{"target":"/"}"#).unwrap_err().message(), "unknown message format");
        assert_eq!(Message::from_json(r#"{"method":"FETCH"}"#).unwrap_err().message(), "invalid request model");
    }

    #[test]
    fn json_round_trip() {
        let message = Message::Response(ResponseMessage::new(200, "OK").with_header("content-type", "text/plain"));
        let json = message.to_json().unwrap();
        assert_eq!(Message::from_json(&json).unwrap(), message);
    }
}
