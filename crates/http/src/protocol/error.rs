use std::fmt;
use std::io;
use thiserror::Error;

/// The category a [`FormatError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatErrorKind {
    /// The message frame is broken: missing blank line, bad start-line, bad header row.
    Structure,
    /// A required model field is missing, empty or out of range.
    RequiredField,
    /// The multipart body or its content-type parameters are malformed.
    Multipart,
    /// The chunked transfer coding is malformed.
    Chunked,
    /// An io error raised while writing into a codec buffer.
    Io,
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            FormatErrorKind::Structure => "structure",
            FormatErrorKind::RequiredField => "required field",
            FormatErrorKind::Multipart => "multipart",
            FormatErrorKind::Chunked => "chunked",
            FormatErrorKind::Io => "io",
        };
        f.write_str(kind)
    }
}

/// The single error raised by parsing and building.
///
/// Every error carries a short message plus optional details holding the
/// offending raw text, which helps when debugging a broken fixture.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}{}", DetailsDisplay(.details))]
pub struct FormatError {
    kind: FormatErrorKind,
    message: String,
    details: Option<String>,
}

impl FormatError {
    pub fn new<S: ToString>(kind: FormatErrorKind, message: S) -> Self {
        Self { kind, message: message.to_string(), details: None }
    }

    pub fn structure<S: ToString>(message: S) -> Self {
        Self::new(FormatErrorKind::Structure, message)
    }

    pub fn required<S: ToString>(message: S) -> Self {
        Self::new(FormatErrorKind::RequiredField, message)
    }

    pub fn multipart<S: ToString>(message: S) -> Self {
        Self::new(FormatErrorKind::Multipart, message)
    }

    pub fn chunked<S: ToString>(message: S) -> Self {
        Self::new(FormatErrorKind::Chunked, message)
    }

    /// Attaches the raw text that caused the error.
    #[must_use]
    pub fn with_details<S: ToString>(mut self, details: S) -> Self {
        self.details = Some(details.to_string());
        self
    }

    pub fn kind(&self) -> FormatErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

impl From<io::Error> for FormatError {
    fn from(e: io::Error) -> Self {
        Self::new(FormatErrorKind::Io, e)
    }
}

struct DetailsDisplay<'a>(&'a Option<String>);

impl fmt::Display for DetailsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(details) => write!(f, ", details: {details:?}"),
            None => Ok(()),
        }
    }
}
