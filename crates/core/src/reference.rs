//! Document references
//!
//! A [`Reference`] is the value half of an index entry: usually the digest of
//! the indexed document. It is never produced here, only carried and
//! rendered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pointer to an indexed document, typically a content hash
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reference(Vec<u8>);

impl Reference {
    /// Create a reference from raw bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Reference(bytes.into())
    }

    /// Size of the reference in bytes, e.g. 32 for a sha256
    pub fn byte_size(&self) -> usize {
        self.0.len()
    }

    /// Lowercase hex rendering, for diagnostics only
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Borrow the reference bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the reference, returning its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Reference {
    fn from(bytes: Vec<u8>) -> Self {
        Reference(bytes)
    }
}

impl From<&[u8]> for Reference {
    fn from(bytes: &[u8]) -> Self {
        Reference(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Reference {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}
