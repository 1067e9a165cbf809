use serde::{Deserialize, Serialize};

/// Options shared by parsing and building.
///
/// # Example
///
/// ```
/// use micro_http_text::codec::CodecOptions;
///
/// let options = CodecOptions::default().with_mandatory_host(true);
/// assert!(options.mandatory_host());
/// assert!(!options.last_chunk());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodecOptions {
    mandatory_host: bool,
    last_chunk: bool,
}

impl CodecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a request to carry a non-empty `Host` header.
    ///
    /// Parsing fails if the header or its value is missing, building fails if
    /// the header is missing.
    #[must_use]
    pub fn with_mandatory_host(mut self, mandatory_host: bool) -> Self {
        self.mandatory_host = mandatory_host;
        self
    }

    /// Frames chunked bodies with the terminating zero-size chunk.
    ///
    /// When enabled, building appends `0\r\n\r\n` after the last chunk and
    /// parsing accepts it. When disabled, a zero-size chunk is an error.
    #[must_use]
    pub fn with_last_chunk(mut self, last_chunk: bool) -> Self {
        self.last_chunk = last_chunk;
        self
    }

    #[inline]
    pub fn mandatory_host(&self) -> bool {
        self.mandatory_host
    }

    #[inline]
    pub fn last_chunk(&self) -> bool {
        self.last_chunk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_from_json() {
        let options: CodecOptions = serde_json::from_str(r#"{"mandatoryHost":true}"#).unwrap();
        assert!(options.mandatory_host());
        assert!(!options.last_chunk());

        let options: CodecOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, CodecOptions::default());
    }
}
