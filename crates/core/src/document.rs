//! Document value extraction
//!
//! A [`Document`] wraps an immutable JSON buffer. Extraction validates the
//! buffer, evaluates a path query and flattens the match into an ordered list
//! of [`IndexValue`]s:
//!
//! | Node | Result |
//! |------|--------|
//! | string | `[Text]` |
//! | number | `[Number]` (always f64) |
//! | null / missing | `[]` |
//! | array | concatenation of the flattened elements, depth first |
//! | object / boolean | `Error::UnsupportedType`, nothing returned |
//!
//! Extraction is all-or-nothing: one unsupported node anywhere in the match
//! fails the whole call.
//!
//! Only the matched part of the document is built. Numbers are read from
//! their text, so a literal past the f64 range becomes an infinity instead of
//! failing, and the first of two repeated object keys is the one indexed.

use crate::error::{Error, Result};
use crate::json::{evaluate, JsonPath, Match};
use crate::key::Key;
use crate::limits::Limits;
use crate::value::IndexValue;
use tracing::{debug, trace};

/// Immutable JSON document
///
/// # Examples
///
/// ```
/// use docindex_core::{Document, IndexValue};
///
/// let doc = Document::from(r#"{"a":"Hello","b":[1,2,3]}"#);
///
/// let values = doc.values_at_path("b").unwrap();
/// assert_eq!(values, vec![
///     IndexValue::Number(1.0),
///     IndexValue::Number(2.0),
///     IndexValue::Number(3.0),
/// ]);
///
/// let keys = doc.keys_at_path("a").unwrap();
/// assert_eq!(keys[0].as_bytes(), b"Hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    raw: Vec<u8>,
}

impl Document {
    /// Create a document from raw JSON bytes
    ///
    /// The buffer is not validated until extraction.
    pub fn new(raw: impl Into<Vec<u8>>) -> Self {
        Document { raw: raw.into() }
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Check whether the buffer is syntactically valid UTF-8 JSON text
    ///
    /// Nothing is built, so nesting depth and number magnitude are not
    /// limited here.
    pub fn is_valid_json(&self) -> bool {
        std::str::from_utf8(&self.raw)
            .map(|text| serde_json::from_str::<serde::de::IgnoredAny>(text).is_ok())
            .unwrap_or(false)
    }

    /// Values found at the path query, without size limits
    ///
    /// A path that does not parse fails with `InvalidPath`; it is never
    /// treated as matching nothing. See
    /// [`Document::values_at_path_with_limits`] for every error.
    pub fn values_at_path(&self, path: &str) -> Result<Vec<IndexValue>> {
        self.values_at_path_with_limits(path, &Limits::unbounded())
    }

    /// Values found at the path query
    ///
    /// # Errors
    ///
    /// - `LimitExceeded` if the document, path or array nesting is too large
    /// - `InvalidJson` if the buffer is not valid JSON (checked before the
    ///   path is looked at)
    /// - `InvalidPath` if the path cannot be parsed
    /// - `UnsupportedType` if an object or boolean is matched at any depth
    /// - `Unreadable` if the matched subtree nests past
    ///   [`crate::limits::PARSER_NESTING_LIMIT`] or holds an unpaired
    ///   surrogate escape
    pub fn values_at_path_with_limits(
        &self,
        path: &str,
        limits: &Limits,
    ) -> Result<Vec<IndexValue>> {
        self.extract(path, limits).map_err(|err| {
            debug!(
                path,
                reason = err.reason_code(),
                "rejecting document for indexing: {}",
                err
            );
            err
        })
    }

    /// Keys for the values found at the path query, without size limits
    pub fn keys_at_path(&self, path: &str) -> Result<Vec<Key>> {
        self.keys_at_path_with_limits(path, &Limits::unbounded())
    }

    /// Keys for the values found at the path query
    ///
    /// Same errors as [`Document::values_at_path_with_limits`]. Encoding
    /// itself cannot fail, so the result always has one key per value.
    pub fn keys_at_path_with_limits(&self, path: &str, limits: &Limits) -> Result<Vec<Key>> {
        let values = self.values_at_path_with_limits(path, limits)?;
        Ok(values.iter().map(IndexValue::to_key).collect())
    }

    fn extract(&self, path: &str, limits: &Limits) -> Result<Vec<IndexValue>> {
        limits.validate_document_size(self.raw.len())?;

        if !self.is_valid_json() {
            return Err(Error::InvalidJson);
        }

        let path: JsonPath = path.parse()?;
        limits.validate_path_length(path.len())?;

        // The buffer is valid, so the parser can only refuse the matched subtree
        let matched =
            evaluate(&self.raw, &path).map_err(|err| Error::Unreadable(err.to_string()))?;

        let mut values = Vec::new();
        flatten_match(&matched, limits, 0, &mut values)?;

        trace!(path = %path, count = values.len(), "extracted index values");
        Ok(values)
    }
}

impl From<&str> for Document {
    fn from(json: &str) -> Self {
        Document::new(json)
    }
}

impl From<String> for Document {
    fn from(json: String) -> Self {
        Document::new(json)
    }
}

impl From<&[u8]> for Document {
    fn from(json: &[u8]) -> Self {
        Document::new(json)
    }
}

impl From<Vec<u8>> for Document {
    fn from(json: Vec<u8>) -> Self {
        Document::new(json)
    }
}

fn flatten_match(
    matched: &Match,
    limits: &Limits,
    depth: usize,
    out: &mut Vec<IndexValue>,
) -> Result<()> {
    match matched {
        Match::Missing => Ok(()),
        Match::Node(node) => flatten_value(node, limits, depth, out),
        Match::Each(matches) => {
            let depth = depth + 1;
            limits.validate_depth(depth)?;
            for m in matches {
                flatten_match(m, limits, depth, out)?;
            }
            Ok(())
        }
    }
}

fn flatten_value(
    node: &serde_json::Value,
    limits: &Limits,
    depth: usize,
    out: &mut Vec<IndexValue>,
) -> Result<()> {
    use serde_json::Value;

    match node {
        Value::String(s) => out.push(IndexValue::Text(s.clone())),
        // Out-of-range literals parse to an infinity
        Value::Number(n) => match n.as_str().parse::<f64>() {
            Ok(f) => out.push(IndexValue::Number(f)),
            Err(_) => return Err(Error::UnsupportedType(n.to_string())),
        },
        Value::Null => {}
        Value::Array(elements) => {
            let depth = depth + 1;
            limits.validate_depth(depth)?;
            for element in elements {
                flatten_value(element, limits, depth, out)?;
            }
        }
        Value::Object(_) | Value::Bool(_) => {
            return Err(Error::UnsupportedType(node.to_string()));
        }
    }
    Ok(())
}
