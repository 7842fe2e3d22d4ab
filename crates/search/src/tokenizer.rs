//! Text tokenizers for full-text keys
//!
//! A tokenizer splits text into an ordered list of terms. The same tokenizer
//! should be applied to indexed text and to query text so terms match.
//!
//! - [`WhitespaceTokenizer`]: maximal runs of characters other than ASCII
//!   space, tab, newline, form feed and carriage return
//! - [`WordTokenizer`]: UAX#29 word boundaries, punctuation dropped

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into terms
///
/// Implemented for any `Fn(&str) -> Vec<String>`, so plain functions can be
/// used wherever a tokenizer is expected.
pub trait Tokenizer: Send + Sync {
    /// Split text into terms, in left-to-right order
    fn tokenize(&self, text: &str) -> Vec<String>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Tokenizer producing maximal runs of non-separator characters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        whitespace_tokenize(text)
    }
}

/// Tokenizer producing UAX#29 words
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        word_tokenize(text)
    }
}

/// Split text on ASCII whitespace separators
///
/// Separators are space, `\t`, `\n`, form feed and `\r`. Other Unicode
/// spaces (U+00A0, U+3000, vertical tab) are part of a token, so existing
/// keys built from text holding them keep their bytes.
///
/// Empty or all-separator input yields no tokens, and leading or trailing
/// separators never produce empty tokens.
///
/// # Example
///
/// ```
/// use docindex_search::tokenizer::whitespace_tokenize;
///
/// assert_eq!(whitespace_tokenize("foo   bar\tbaz"), vec!["foo", "bar", "baz"]);
/// assert!(whitespace_tokenize("   ").is_empty());
/// assert_eq!(whitespace_tokenize("a\u{a0}b"), vec!["a\u{a0}b"]);
/// ```
pub fn whitespace_tokenize(text: &str) -> Vec<String> {
    text.split(is_separator)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Token separators for [`whitespace_tokenize`]
pub fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r')
}

/// Split text on UAX#29 word boundaries
///
/// Punctuation and whitespace segments are dropped; case is preserved.
///
/// # Example
///
/// ```
/// use docindex_search::tokenizer::word_tokenize;
///
/// assert_eq!(word_tokenize("Hello, World!"), vec!["Hello", "World"]);
/// ```
pub fn word_tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(String::from).collect()
}

/// Tokenize and deduplicate, keeping the first occurrence of each term
///
/// # Example
///
/// ```
/// use docindex_search::tokenizer::{tokenize_unique, WhitespaceTokenizer};
///
/// let tokens = tokenize_unique(&WhitespaceTokenizer, "b a b c a");
/// assert_eq!(tokens, vec!["b", "a", "c"]);
/// ```
pub fn tokenize_unique<T: Tokenizer + ?Sized>(tokenizer: &T, text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tokenizer
        .tokenize(text)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
