//! Canonical key encoding
//!
//! This module turns a single value into the byte sequence an index stores
//! as its lookup key.
//!
//! ## Contract
//!
//! These encoding rules are FROZEN; stored indexes depend on them:
//! - String: UTF-8 bytes, unmodified, no length prefix, no terminator
//! - Bytes: passed through unmodified
//! - Float: 8-byte big-endian IEEE-754 bit pattern
//! - Anything else: `Error::Conversion`
//!
//! Encoding is deterministic: the same value always yields the same bytes.
//!
//! ## Ordering
//!
//! Keys compare as unsigned byte strings. For floats this matches numeric
//! order only among non-negative values; negative numbers sort after positive
//! ones and in reverse, and NaN payloads sort by bit pattern.
//!
//! ## Composite keys
//!
//! [`KEY_DELIMITER`] is reserved for the composite-key builder. Encoding never
//! inserts or strips it, and text keys may contain it.

use crate::error::{Error, Result};
use crate::value::{IndexValue, Value};
use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte reserved for joining key segments in composite index keys
pub const KEY_DELIMITER: u8 = 0x10;

/// Size of an encoded number key in bytes
pub const NUMBER_KEY_LEN: usize = 8;

/// Canonically encoded index key
///
/// Owned by the caller once produced. Ordering is plain byte ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key(Vec<u8>);

impl Key {
    /// Wrap already-encoded bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Key(bytes.into())
    }

    /// Encode text as its UTF-8 bytes
    pub fn from_text(text: &str) -> Self {
        Key(text.as_bytes().to_vec())
    }

    /// Encode a number as its big-endian IEEE-754 bit pattern
    pub fn from_number(n: f64) -> Self {
        let mut buf = [0u8; NUMBER_KEY_LEN];
        BigEndian::write_f64(&mut buf, n);
        Key(buf.to_vec())
    }

    /// Borrow the key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the key, returning its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Number of bytes in the key
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the key is empty (encoded from an empty string)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Key> for Vec<u8> {
    fn from(key: Key) -> Self {
        key.0
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        Value::Bytes(key.0)
    }
}

// Keys are usually text; render lossily for logs
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl IndexValue {
    /// Encode this value as a key
    ///
    /// Infallible: every extracted value is encodable. Produces the same
    /// bytes as [`encode`] on the equivalent [`Value`].
    pub fn to_key(&self) -> Key {
        match self {
            IndexValue::Text(s) => Key::from_text(s),
            IndexValue::Number(n) => Key::from_number(*n),
        }
    }
}

/// Canonically encode a value
///
/// # Errors
///
/// Returns `Error::Conversion` naming the variant when the value is not a
/// string, bytes or float.
///
/// # Examples
///
/// ```
/// use docindex_core::{encode, Value};
///
/// let key = encode(&Value::from("Hello")).unwrap();
/// assert_eq!(key.as_bytes(), b"Hello");
///
/// let key = encode(&Value::Float(1.0)).unwrap();
/// assert_eq!(key.as_bytes(), &[0x3f, 0xf0, 0, 0, 0, 0, 0, 0]);
///
/// assert!(encode(&Value::Bool(true)).is_err());
/// ```
pub fn encode(value: &Value) -> Result<Key> {
    match value {
        Value::String(s) => Ok(Key::from_text(s)),
        Value::Bytes(b) => Ok(Key::from_bytes(b.as_slice())),
        Value::Float(n) => Ok(Key::from_number(*n)),
        other => Err(Error::Conversion {
            type_name: other.type_name(),
        }),
    }
}
