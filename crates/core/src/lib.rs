//! Core types for docindex
//!
//! This crate turns JSON documents into index key material:
//! - Document: immutable JSON buffer with path-based value extraction
//! - IndexValue: normalized scalar (Text or Number) produced by extraction
//! - Value: general value model accepted by the canonical encoder
//! - Key: canonically encoded index key, plus `encode`
//! - Reference: pointer to an indexed document (usually a digest)
//! - JsonPath: path micro-syntax and evaluator
//! - Limits: extraction limits
//! - Error: error type hierarchy
//!
//! Everything here is pure and synchronous; all public types are
//! `Send + Sync`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod json;
pub mod key;
pub mod limits;
pub mod reference;
pub mod value;

pub use document::Document;
pub use error::{Error, Result};
pub use json::{evaluate, JsonPath, Match, PathParseError, PathSegment};
pub use key::{encode, Key, KEY_DELIMITER, NUMBER_KEY_LEN};
pub use limits::{LimitError, Limits, PARSER_NESTING_LIMIT};
pub use reference::Reference;
pub use value::{IndexValue, Value};

/// Default file mode for the storage engine's database file
///
/// Not used by this crate; exported for the storage layer.
pub const DB_FILE_MODE: u32 = 0o600;
