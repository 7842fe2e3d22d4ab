//! Full-text key infrastructure for docindex
//!
//! This crate provides:
//! - Tokenizer trait with whitespace and UAX#29 word tokenizers
//! - Transform trait, ToLower and transform pipelines
//! - Analyzer combining both into index keys
//!
//! Tokenizers and transforms are independent of document extraction and can
//! be applied to query terms as well as indexed text.
//!
//! # Usage
//!
//! ```
//! use docindex_search::Analyzer;
//!
//! let analyzer = Analyzer::case_insensitive();
//! let keys = analyzer.keys("Hello World").unwrap();
//! assert_eq!(keys[0].as_bytes(), b"hello");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analyzer;
pub mod tokenizer;
pub mod transform;

// Re-export commonly used types
pub use analyzer::{index_terms, Analyzer};
pub use tokenizer::{
    is_separator, tokenize_unique, whitespace_tokenize, word_tokenize, Tokenizer,
    WhitespaceTokenizer, WordTokenizer,
};
pub use transform::{to_lower, Pipeline, ToLower, Transform};
