//! Full-text key analysis
//!
//! Pipeline: tokenizer → transform (per token) → canonical encoding
//!
//! Use the same [`Analyzer`] for indexed text and for query text; keys
//! produced by both sides then compare byte for byte.

use crate::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::transform::{Pipeline, ToLower, Transform};
use docindex_core::{encode, Key, Result, Value};
use tracing::debug;

/// Tokenizer plus transform pipeline producing index keys from text
pub struct Analyzer {
    tokenizer: Box<dyn Tokenizer>,
    transforms: Pipeline,
}

impl Analyzer {
    /// Create an analyzer with no transforms
    pub fn new(tokenizer: impl Tokenizer + 'static) -> Self {
        Analyzer {
            tokenizer: Box::new(tokenizer),
            transforms: Pipeline::new(),
        }
    }

    /// Whitespace tokens, lowercased
    pub fn case_insensitive() -> Self {
        Analyzer::new(WhitespaceTokenizer).with_transform(ToLower)
    }

    /// Append a transform applied to every token (builder pattern)
    pub fn with_transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transforms = self.transforms.then(transform);
        self
    }

    /// Tokenize text and transform each token
    pub fn analyze(&self, text: &str) -> Vec<Value> {
        self.tokenizer
            .tokenize(text)
            .into_iter()
            .map(|token| self.transforms.apply(Value::String(token)))
            .collect()
    }

    /// Index keys for text, one per token, in token order
    ///
    /// # Errors
    ///
    /// Returns `Error::Conversion` if a transform turned a token into a value
    /// that cannot be encoded. No keys are returned in that case.
    pub fn keys(&self, text: &str) -> Result<Vec<Key>> {
        index_terms(self.tokenizer.as_ref(), &self.transforms, text)
    }
}

/// Index keys for text: tokenize, transform each token, encode
///
/// # Example
///
/// ```
/// use docindex_core::Key;
/// use docindex_search::{index_terms, ToLower, WhitespaceTokenizer};
///
/// let keys = index_terms(&WhitespaceTokenizer, &ToLower, "Red  FISH").unwrap();
/// assert_eq!(keys, vec![Key::from_text("red"), Key::from_text("fish")]);
/// ```
pub fn index_terms<T, F>(tokenizer: &T, transform: &F, text: &str) -> Result<Vec<Key>>
where
    T: Tokenizer + ?Sized,
    F: Transform + ?Sized,
{
    tokenizer
        .tokenize(text)
        .into_iter()
        .map(|token| encode(&transform.apply(Value::String(token))))
        .collect::<Result<Vec<_>>>()
        .map_err(|err| {
            debug!(
                reason = err.reason_code(),
                "token transform produced unencodable value: {}",
                err
            );
            err
        })
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::new(WhitespaceTokenizer)
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("transforms", &self.transforms)
            .finish_non_exhaustive()
    }
}
