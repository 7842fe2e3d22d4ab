//! Value types for docindex
//!
//! This module defines:
//! - IndexValue: the normalized scalar produced by document extraction
//! - Value: the general value model accepted by the canonical encoder and by
//!   transforms
//!
//! ## Type Rules
//!
//! - Extraction only ever yields `IndexValue::Text` or `IndexValue::Number`.
//!   Nulls and arrays are resolved while flattening, every other JSON shape is
//!   rejected, so no other variant can reach the encoder through extraction.
//! - `Int(1) != Float(1.0)` and `Bytes(b"a") != String("a")`: different
//!   variants are never equal.
//! - Float equality follows IEEE-754: `NaN != NaN`, `-0.0 == 0.0`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Normalized scalar extracted from a document
///
/// Every JSON number becomes a `Number`, whatever its lexical form (`1`,
/// `1.0`, `1e0` all yield `Number(1.0)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexValue {
    /// JSON string
    Text(String),
    /// JSON number, always widened to f64
    Number(f64),
}

impl IndexValue {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            IndexValue::Text(_) => "Text",
            IndexValue::Number(_) => "Number",
        }
    }

    /// Get as &str if this is a Text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            IndexValue::Text(s) => Some(s),
            IndexValue::Number(_) => None,
        }
    }

    /// Get as f64 if this is a Number value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            IndexValue::Number(n) => Some(*n),
            IndexValue::Text(_) => None,
        }
    }
}

impl fmt::Display for IndexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexValue::Text(s) => write!(f, "{}", s),
            IndexValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for IndexValue {
    fn from(s: &str) -> Self {
        IndexValue::Text(s.to_string())
    }
}

impl From<String> for IndexValue {
    fn from(s: String) -> Self {
        IndexValue::Text(s)
    }
}

impl From<f64> for IndexValue {
    fn from(n: f64) -> Self {
        IndexValue::Number(n)
    }
}

/// General value model
///
/// Used as input to [`crate::key::encode`] and to transforms. Only `String`,
/// `Bytes` and `Float` are canonically encodable; the remaining variants exist
/// so callers can hand arbitrary values to the encoder and get a
/// `Conversion` error instead of a panic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Array of values
    Array(Vec<Value>),
    /// Object with string keys
    Object(HashMap<String, Value>),
}

// Custom PartialEq implementation for IEEE-754 float semantics
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            _ => false,
        }
    }
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<IndexValue> for Value {
    fn from(v: IndexValue) -> Self {
        match v {
            IndexValue::Text(s) => Value::String(s),
            IndexValue::Number(n) => Value::Float(n),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}
