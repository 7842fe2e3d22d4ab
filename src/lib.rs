//! docindex - index key extraction for JSON documents
//!
//! docindex turns JSON documents into the key material a key-value store
//! needs to maintain secondary indexes over arbitrary document fields.
//!
//! # Quick Start
//!
//! ```
//! use docindex::{Analyzer, Document, IndexValue};
//!
//! let doc = Document::from(r#"{"name":"Alice Smith","scores":[10, 20, null]}"#);
//!
//! // Exact-match keys for a field
//! let values = doc.values_at_path("scores")?;
//! assert_eq!(values, vec![IndexValue::Number(10.0), IndexValue::Number(20.0)]);
//! let keys = doc.keys_at_path("scores")?;
//! assert_eq!(keys.len(), 2);
//!
//! // Full-text keys for a field
//! let analyzer = Analyzer::case_insensitive();
//! for value in doc.values_at_path("name")? {
//!     if let Some(text) = value.as_text() {
//!         let terms = analyzer.keys(text)?;
//!         assert_eq!(terms[0].as_bytes(), b"alice");
//!     }
//! }
//! # Ok::<(), docindex::Error>(())
//! ```
//!
//! # Architecture
//!
//! - [`docindex_core`]: documents, path queries, canonical key encoding
//! - [`docindex_search`]: tokenizers, transforms and analyzers
//!
//! Storing keys, maintaining indexes and transactions belong to the
//! surrounding storage engine.

pub use docindex_core::*;
pub use docindex_search::*;
