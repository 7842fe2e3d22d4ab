//! Error types for docindex
//!
//! This module defines all error types raised while extracting and encoding
//! index keys. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.

use crate::json::PathParseError;
use crate::limits::LimitError;
use thiserror::Error;

/// Result type alias for docindex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for key extraction and encoding
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Document buffer is not syntactically valid JSON
    #[error("invalid json")]
    InvalidJson,

    /// Path query could not be parsed
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathParseError),

    /// Node at path is an object or boolean and cannot be indexed
    ///
    /// Carries the compact JSON text of the offending node.
    #[error("type at path not supported for indexing: {0}")]
    UnsupportedType(String),

    /// Matched subtree is valid JSON the parser still refuses to build
    ///
    /// Raised for nesting past [`crate::limits::PARSER_NESTING_LIMIT`] along
    /// the match, or a string escape that is not a Unicode scalar value
    /// (an unpaired surrogate such as `"\ud800"`). Carries the parser message.
    #[error("matched value cannot be read: {0}")]
    Unreadable(String),

    /// Value cannot be canonically encoded
    #[error("couldn't convert {type_name} to key bytes")]
    Conversion {
        /// Type name of the rejected value
        type_name: &'static str,
    },

    /// Document or path exceeds the configured limits
    #[error("limit exceeded: {0}")]
    LimitExceeded(#[from] LimitError),
}

impl Error {
    /// Get the reason code for logs and callers that branch on error kind
    pub fn reason_code(&self) -> &'static str {
        match self {
            Error::InvalidJson => "invalid_json",
            Error::InvalidPath(_) => "invalid_path",
            Error::UnsupportedType(_) => "unsupported_type",
            Error::Unreadable(_) => "unreadable",
            Error::Conversion { .. } => "conversion_error",
            Error::LimitExceeded(_) => "limit_exceeded",
        }
    }
}
