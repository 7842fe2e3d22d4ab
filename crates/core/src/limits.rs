//! Size limits for documents and path queries
//!
//! This module defines configurable limits that are enforced by the
//! extractor. Violations result in `LimitExceeded` errors.
//!
//! ## Defaults
//!
//! | Limit | Value |
//! |-------|-------|
//! | Max document size | 16 MB |
//! | Max path length | 256 segments |
//! | Max array nesting while flattening | 128 levels |
//!
//! The plain extraction calls use [`Limits::unbounded`]; pass these defaults
//! to the `_with_limits` variants to cap untrusted input. Independent of any
//! configured limit, the JSON parser refuses to build a matched subtree nested
//! deeper than [`PARSER_NESTING_LIMIT`] levels from the document root.

use thiserror::Error;

/// Container nesting the JSON parser accepts while materializing a match
///
/// This is serde_json's recursion limit. Subtrees the path does not select
/// are skipped without it.
pub const PARSER_NESTING_LIMIT: usize = 128;

/// Limits applied while extracting values from a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum document size in bytes (default: 16MB)
    pub max_document_bytes: usize,

    /// Maximum number of segments in a path query (default: 256)
    pub max_path_segments: usize,

    /// Maximum array nesting depth while flattening (default: 128)
    ///
    /// 128 matches serde_json's own recursion limit, so the default never
    /// rejects a document the parser accepted.
    pub max_nesting_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_document_bytes: 16 * 1024 * 1024, // 16MB
            max_path_segments: 256,
            max_nesting_depth: 128,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    ///
    /// This is useful for unit tests that need to test limit enforcement
    /// without creating extremely large documents.
    pub fn with_small_limits() -> Self {
        Limits {
            max_document_bytes: 1000,
            max_path_segments: 4,
            max_nesting_depth: 4,
        }
    }

    /// Limits that never reject anything
    ///
    /// Used by the plain `values_at_path` / `keys_at_path` calls.
    pub fn unbounded() -> Self {
        Limits {
            max_document_bytes: usize::MAX,
            max_path_segments: usize::MAX,
            max_nesting_depth: usize::MAX,
        }
    }

    /// Validate a document buffer length
    pub fn validate_document_size(&self, size: usize) -> Result<(), LimitError> {
        if size > self.max_document_bytes {
            return Err(LimitError::DocumentTooLarge {
                size,
                max: self.max_document_bytes,
            });
        }
        Ok(())
    }

    /// Validate the number of segments in a parsed path
    pub fn validate_path_length(&self, length: usize) -> Result<(), LimitError> {
        if length > self.max_path_segments {
            return Err(LimitError::PathTooLong {
                length,
                max: self.max_path_segments,
            });
        }
        Ok(())
    }

    /// Validate the current flattening depth
    pub fn validate_depth(&self, depth: usize) -> Result<(), LimitError> {
        if depth > self.max_nesting_depth {
            return Err(LimitError::NestingTooDeep {
                depth,
                max: self.max_nesting_depth,
            });
        }
        Ok(())
    }
}

/// Error type for limit violations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimitError {
    /// Document exceeds maximum size
    #[error("document size {size} exceeds maximum of {max} bytes")]
    DocumentTooLarge {
        /// Actual document size
        size: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// Path exceeds maximum length
    #[error("path length {length} exceeds maximum of {max} segments")]
    PathTooLong {
        /// Actual path length
        length: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Array nesting exceeds maximum depth
    #[error("nesting depth {depth} exceeds maximum of {max} levels")]
    NestingTooDeep {
        /// Depth reached
        depth: usize,
        /// Maximum allowed depth
        max: usize,
    },
}

impl LimitError {
    /// Get the reason code for logs
    pub fn reason_code(&self) -> &'static str {
        match self {
            LimitError::DocumentTooLarge { .. } => "document_too_large",
            LimitError::PathTooLong { .. } => "path_too_long",
            LimitError::NestingTooDeep { .. } => "nesting_too_deep",
        }
    }
}
