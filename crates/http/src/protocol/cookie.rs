use serde::{Deserialize, Serialize};

/// A cookie carried by a `Cookie` (request) or `Set-Cookie` (response) row.
///
/// `params` holds the raw attribute strings of a `Set-Cookie` row, such as
/// `Path=/` or `HttpOnly`, in order and uninterpreted. Request cookies never
/// have params.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
}

impl Cookie {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self { name: name.into(), value: Some(value.into()), params: Vec::new() }
    }

    /// Creates a cookie that has a name only, rendered without `=`.
    pub fn name_only<N: Into<String>>(name: N) -> Self {
        Self { name: name.into(), value: None, params: Vec::new() }
    }

    #[must_use]
    pub fn with_param<P: Into<String>>(mut self, param: P) -> Self {
        self.params.push(param.into());
        self
    }
}
