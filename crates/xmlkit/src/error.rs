//! Error types for xmlkit

use std::fmt;
use thiserror::Error;

/// Position in source input
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.offset, self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// What exactly was wrong with malformed input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    UnexpectedToken { expected: String, found: String },
    MismatchedTag { expected: String, found: String },
    UnexpectedClosingTag { name: String },
    UnterminatedElement { name: String },
    UnterminatedAttribute,
    UnterminatedMarkup,
    DuplicateAttribute { name: String },
    DuplicateNamespace { prefix: String },
    InvalidEntity { entity: String },
    InvalidName,
    InvalidUtf8,
    TrailingContent,
    MissingRoot,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::MismatchedTag { expected, found } => {
                write!(f, "mismatched closing tag: expected </{expected}>, found </{found}>")
            }
            Self::UnexpectedClosingTag { name } => write!(f, "unexpected closing tag </{name}>"),
            Self::UnterminatedElement { name } => write!(f, "unterminated element <{name}>"),
            Self::UnterminatedAttribute => write!(f, "unterminated attribute value"),
            Self::UnterminatedMarkup => write!(f, "unterminated markup"),
            Self::DuplicateAttribute { name } => write!(f, "duplicate attribute: {name}"),
            Self::DuplicateNamespace { prefix } => {
                write!(f, "duplicate namespace declaration: {prefix}")
            }
            Self::InvalidEntity { entity } => write!(f, "invalid entity reference: &{entity};"),
            Self::InvalidName => write!(f, "invalid name"),
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
            Self::TrailingContent => write!(f, "content after root element"),
            Self::MissingRoot => write!(f, "missing root element"),
        }
    }
}

/// Failure to turn bytes into a document
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed xml at {pos}: {kind}")]
    Malformed { pos: Pos, kind: ErrorKind },
    #[error("max depth exceeded: {max}")]
    MaxDepthExceeded { max: u16, pos: Pos },
    #[error("max size exceeded: {max}")]
    MaxSizeExceeded { max: usize },
}

impl ParseError {
    /// Create a malformed-input error at a specific position
    pub const fn at(kind: ErrorKind, pos: Pos) -> Self {
        Self::Malformed { pos, kind }
    }

    /// Byte offset the error refers to
    pub const fn offset(&self) -> usize {
        match self {
            Self::Malformed { pos, .. } | Self::MaxDepthExceeded { pos, .. } => pos.offset,
            Self::MaxSizeExceeded { max } => *max,
        }
    }

    pub const fn kind(&self) -> Option<&ErrorKind> {
        match self {
            Self::Malformed { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

/// Failure to build a typed value from a document
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("missing field: {key}")]
    MissingField { key: String },
    #[error("type mismatch for {key}: expected {expected}")]
    TypeMismatch { key: String, expected: &'static str },
    #[error("expected at least one {key}")]
    Empty { key: String },
}

impl DecodeError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingField { key: key.into() }
    }

    pub fn mismatch(key: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            expected,
        }
    }
}

/// Failure to build a document from a typed value
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum EncodeError {
    #[error("value for {key} has no canonical text form")]
    UnrepresentableValue { key: String },
}

/// Any failure of the one-shot helpers
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Result type alias for xmlkit
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_display() {
        let pos = Pos::new(42, 10, 5);
        assert_eq!(pos.to_string(), "42:10:5");
    }

    #[test]
    fn test_malformed_offset() {
        let err = ParseError::at(ErrorKind::InvalidName, Pos::new(7, 1, 8));
        assert_eq!(err.offset(), 7);
        assert_eq!(err.kind(), Some(&ErrorKind::InvalidName));
    }

    #[test]
    fn test_error_display() {
        let err = ParseError::at(
            ErrorKind::MismatchedTag {
                expected: "a".to_string(),
                found: "b".to_string(),
            },
            Pos::new(10, 2, 5),
        );
        let display = err.to_string();
        assert!(display.contains("malformed xml at 10:2:5"));
        assert!(display.contains("</a>"));
    }

    #[test]
    fn test_decode_error_display() {
        assert_eq!(
            DecodeError::mismatch("precision", "f64").to_string(),
            "type mismatch for precision: expected f64"
        );
        assert_eq!(DecodeError::missing("id").to_string(), "missing field: id");
    }

    #[test]
    fn test_unified_error_from() {
        let err: Error = DecodeError::missing("title").into();
        assert!(matches!(err, Error::Decode(DecodeError::MissingField { .. })));
    }
}
