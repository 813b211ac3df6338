//! Error types for pdfsift.

use thiserror::Error;

/// Primary error type for parsing and extraction.
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input at line {line}: {context}")]
    UnexpectedEndOfInput { line: usize, context: &'static str },

    #[error("unexpected token at line {line}: got {found}, expected {expected}")]
    UnexpectedToken {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("missing delimiter at line {line}: {delimiter}")]
    MissingDelimiter {
        line: usize,
        delimiter: &'static str,
    },

    #[error("malformed number at line {line}: {token}")]
    MalformedNumber { line: usize, token: String },

    #[error("nesting too deep at line {line}: {depth} levels")]
    NestingTooDeep { line: usize, depth: usize },

    #[error("stream is empty")]
    EmptyStream,

    #[error("{filter} failed: {message}")]
    CodecFailure {
        filter: &'static str,
        message: String,
    },

    #[error("object index {index} out of range (document has {count} objects)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("type error: expected {expected}, got {got}")]
    TypeError {
        expected: &'static str,
        got: &'static str,
    },

    #[error("pipeline cancelled")]
    Cancelled,

    #[error("worker pool: {0}")]
    ThreadPool(String),
}

impl PdfError {
    /// Source line of a structural parse error, if it carries one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::UnexpectedEndOfInput { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::MissingDelimiter { line, .. }
            | Self::MalformedNumber { line, .. }
            | Self::NestingTooDeep { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Structural errors abort the whole document; everything else is
    /// local to one object or one read.
    pub fn is_structural(&self) -> bool {
        self.line().is_some()
    }
}

/// Convenience Result type alias for PdfError.
pub type Result<T> = std::result::Result<T, PdfError>;
