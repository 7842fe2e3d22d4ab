//! Path queries over JSON documents
//!
//! This module defines the path micro-syntax used to select nodes for
//! indexing, and its evaluator:
//! - JsonPath: parsed path (e.g., `user.name`, `items[0]`, `items.#.sku`)
//! - PathSegment: individual path component (Key, Index or Each)
//! - Match: result of evaluating a path against a JSON buffer
//!
//! Missing fields, out-of-range indexes and type mismatches all evaluate to
//! [`Match::Missing`]; only the parser can fail an evaluation. Deciding what a
//! match means for indexing is the extractor's job (see [`crate::document`]).

use serde::de::{self, DeserializeSeed, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// JsonPath and PathSegment
// =============================================================================

/// Error type for JSON path parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// Empty key in path
    #[error("empty key in path at position {0}")]
    EmptyKey(usize),
    /// Unclosed bracket
    #[error("unclosed bracket starting at position {0}")]
    UnclosedBracket(usize),
    /// Invalid array index
    #[error("invalid array index at position {0}: {1}")]
    InvalidIndex(usize, String),
    /// Unexpected character
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    /// Path ends with an escape character
    #[error("dangling escape at position {0}")]
    DanglingEscape(usize),
}

/// A segment in a JSON path
///
/// # Examples
///
/// ```
/// use docindex_core::json::PathSegment;
///
/// let key = PathSegment::Key("name".to_string());
/// let idx = PathSegment::Index(0);
/// let each = PathSegment::Each;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    /// Object key: `.foo`
    ///
    /// An all-digit key applied to an array selects that element, so `a.0`
    /// and `a[0]` agree on arrays.
    Key(String),
    /// Array index: `[0]`
    Index(usize),
    /// Every array element: `.#`
    Each,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => write!(f, ".{}", escape_key(k)),
            PathSegment::Index(i) => write!(f, "[{}]", i),
            PathSegment::Each => write!(f, ".#"),
        }
    }
}

fn escape_key(key: &str) -> String {
    if key == "#" {
        return "\\#".to_string();
    }
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        if matches!(c, '.' | '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// A path into a JSON document
///
/// # Path Syntax
///
/// | Syntax | Meaning | Example |
/// |--------|---------|---------|
/// | `key` | Object property | `user` |
/// | `.key1.key2` | Nested property | `user.name` |
/// | `[n]` | Array index | `items[0]` |
/// | `.n` | Array index when the node is an array | `items.0` |
/// | `.#` | Each array element | `items.#.sku` |
/// | `\c` | Literal character inside a key | `a\.b` |
/// | (empty) | Root | `` |
///
/// # Examples
///
/// ```
/// use docindex_core::json::JsonPath;
///
/// let path: JsonPath = "items.#.sku".parse().unwrap();
/// assert_eq!(path, JsonPath::root().key("items").each().key("sku"));
///
/// let path: JsonPath = "user.tags[1]".parse().unwrap();
/// assert_eq!(path, JsonPath::root().key("user").key("tags").index(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Create the root path (empty path)
    pub fn root() -> Self {
        JsonPath {
            segments: Vec::new(),
        }
    }

    /// Create a path from a vector of segments
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        JsonPath { segments }
    }

    /// Get the path segments
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Get the number of segments in the path
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if this is the root path (empty)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a key segment (builder pattern)
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    /// Append an index segment (builder pattern)
    pub fn index(mut self, idx: usize) -> Self {
        self.segments.push(PathSegment::Index(idx));
        self
    }

    /// Append an each-element segment (builder pattern)
    pub fn each(mut self) -> Self {
        self.segments.push(PathSegment::Each);
        self
    }

    /// Convert to a string representation that parses back to this path
    pub fn to_path_string(&self) -> String {
        let mut result: String = self.segments.iter().map(|s| s.to_string()).collect();
        if result.starts_with('.') {
            result.remove(0);
        }
        result
    }
}

impl FromStr for JsonPath {
    type Err = PathParseError;

    /// Parse a path from a string
    ///
    /// Supported syntax:
    /// - `foo` or `.foo` - object key
    /// - `[0]` - array index
    /// - `foo.bar` - nested keys
    /// - `foo[0]` / `foo.0` - key then index
    /// - `foo.#.bar` - key, each element, key
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(JsonPath::root());
        }

        let mut segments = Vec::new();
        let chars: Vec<char> = s.chars().collect();
        let mut i = 0;

        // Skip leading dot if present
        if chars[0] == '.' {
            i += 1;
            if i >= chars.len() || chars[i] == '.' {
                return Err(PathParseError::EmptyKey(i));
            }
        }

        while i < chars.len() {
            if chars[i] == '.' {
                // Separator before a key segment
                i += 1;
                if i >= chars.len() || chars[i] == '.' || chars[i] == '[' {
                    return Err(PathParseError::EmptyKey(i));
                }
            }

            if chars[i] == '[' {
                // Array index segment
                let start = i;
                i += 1;
                let idx_start = i;

                while i < chars.len() && chars[i] != ']' {
                    i += 1;
                }

                if i >= chars.len() {
                    return Err(PathParseError::UnclosedBracket(start));
                }

                let idx_str: String = chars[idx_start..i].iter().collect();
                let idx = parse_index(&idx_str)
                    .ok_or_else(|| PathParseError::InvalidIndex(idx_start, idx_str))?;

                segments.push(PathSegment::Index(idx));
                i += 1; // Skip closing bracket

                if i < chars.len() && chars[i] != '.' && chars[i] != '[' {
                    return Err(PathParseError::UnexpectedChar(chars[i], i));
                }
            } else if chars[i] == ']' {
                return Err(PathParseError::UnexpectedChar(']', i));
            } else {
                // Key segment, runs until an unescaped '.' or '['
                let mut key = String::new();
                let mut escaped = false;
                while i < chars.len() && chars[i] != '.' && chars[i] != '[' {
                    match chars[i] {
                        '\\' => {
                            i += 1;
                            if i >= chars.len() {
                                return Err(PathParseError::DanglingEscape(i - 1));
                            }
                            escaped = true;
                            key.push(chars[i]);
                        }
                        ']' => return Err(PathParseError::UnexpectedChar(']', i)),
                        c => key.push(c),
                    }
                    i += 1;
                }

                if key == "#" && !escaped {
                    segments.push(PathSegment::Each);
                } else {
                    segments.push(PathSegment::Key(key));
                }
            }
        }

        Ok(JsonPath { segments })
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path_string())
    }
}

/// Parse an all-ASCII-digit array index
fn parse_index(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

// =============================================================================
// Evaluation
// =============================================================================

/// Result of evaluating a path against a document
#[derive(Debug, Clone, PartialEq)]
pub enum Match {
    /// Nothing at the path
    Missing,
    /// A single node
    Node(serde_json::Value),
    /// One match per element of an array selected with `#`, in array order
    Each(Vec<Match>),
}

impl Match {
    /// Check if nothing matched
    pub fn is_missing(&self) -> bool {
        matches!(self, Match::Missing)
    }

    /// Get the node if this is a single-node match
    pub fn node(&self) -> Option<&serde_json::Value> {
        match self {
            Match::Node(v) => Some(v),
            _ => None,
        }
    }
}

/// Evaluate a path against a JSON buffer
///
/// The buffer is read once. Only nodes the path selects are built; every
/// other subtree is skipped unparsed, so an out-of-range number or deep
/// nesting elsewhere in the document has no effect on the result. When an
/// object repeats a key, the first occurrence is followed.
///
/// # Errors
///
/// Returns the parser error if the buffer is not valid JSON, if a selected
/// subtree nests deeper than [`crate::limits::PARSER_NESTING_LIMIT`] levels,
/// or if a key or string on the path holds an unpaired surrogate escape.
///
/// # Examples
///
/// ```
/// use docindex_core::json::{evaluate, JsonPath, Match};
///
/// let doc = br#"{"user": {"tags": ["a", "b"]}}"#;
///
/// let path: JsonPath = "user.tags[1]".parse().unwrap();
/// let matched = evaluate(doc, &path).unwrap();
/// assert_eq!(matched.node(), Some(&serde_json::json!("b")));
///
/// let path: JsonPath = "user.missing".parse().unwrap();
/// assert_eq!(evaluate(doc, &path).unwrap(), Match::Missing);
/// ```
pub fn evaluate(json: &[u8], path: &JsonPath) -> Result<Match, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_slice(json);
    let matched = PathSeed {
        segments: path.segments(),
    }
    .deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(matched)
}

/// Follows the remaining segments into one JSON value
#[derive(Clone, Copy)]
struct PathSeed<'p> {
    segments: &'p [PathSegment],
}

impl<'de, 'p> DeserializeSeed<'de> for PathSeed<'p> {
    type Value = Match;

    fn deserialize<D>(self, deserializer: D) -> Result<Match, D::Error>
    where
        D: Deserializer<'de>,
    {
        match self.segments.split_first() {
            None => serde_json::Value::deserialize(deserializer).map(Match::Node),
            Some((segment, rest)) => {
                deserializer.deserialize_any(SegmentVisitor { segment, rest })
            }
        }
    }
}

/// Applies one segment to whatever value the parser finds
///
/// Every child it does not descend into is consumed as [`IgnoredAny`].
struct SegmentVisitor<'p> {
    segment: &'p PathSegment,
    rest: &'p [PathSegment],
}

impl<'p> SegmentVisitor<'p> {
    fn descend(&self) -> PathSeed<'p> {
        PathSeed { segments: self.rest }
    }
}

impl<'de, 'p> Visitor<'de> for SegmentVisitor<'p> {
    type Value = Match;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    // Scalars have nothing below them
    fn visit_unit<E: de::Error>(self) -> Result<Match, E> {
        Ok(Match::Missing)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Match, E> {
        Ok(Match::Missing)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Match, E> {
        Ok(Match::Missing)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Match, E> {
        Ok(Match::Missing)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Match, E> {
        Ok(Match::Missing)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Match, E> {
        Ok(Match::Missing)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Match, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let wanted = match self.segment {
            PathSegment::Each => {
                let mut matches = Vec::new();
                while let Some(matched) = seq.next_element_seed(self.descend())? {
                    matches.push(matched);
                }
                return Ok(Match::Each(matches));
            }
            PathSegment::Index(idx) => Some(*idx),
            PathSegment::Key(key) => parse_index(key),
        };

        let mut matched = Match::Missing;
        let mut position = 0;
        loop {
            if wanted == Some(position) {
                match seq.next_element_seed(self.descend())? {
                    Some(m) => matched = m,
                    None => break,
                }
            } else if seq.next_element::<IgnoredAny>()?.is_none() {
                break;
            }
            position += 1;
        }
        Ok(matched)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Match, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut matched = None;
        while let Some(key) = map.next_key::<String>()? {
            match self.segment {
                PathSegment::Key(wanted) if matched.is_none() && *wanted == key => {
                    matched = Some(map.next_value_seed(self.descend())?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(matched.unwrap_or(Match::Missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === Parsing ===

    #[test]
    fn test_parse_empty_is_root() {
        let path: JsonPath = "".parse().unwrap();
        assert!(path.is_empty());
        assert_eq!(path, JsonPath::root());
    }

    #[test]
    fn test_parse_simple_key() {
        let path: JsonPath = "name".parse().unwrap();
        assert_eq!(path.segments(), &[PathSegment::Key("name".into())]);
    }

    #[test]
    fn test_parse_leading_dot() {
        let a: JsonPath = ".user.name".parse().unwrap();
        let b: JsonPath = "user.name".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_parse_index() {
        let path: JsonPath = "items[2]".parse().unwrap();
        assert_eq!(path, JsonPath::root().key("items").index(2));
    }

    #[test]
    fn test_parse_root_index() {
        let path: JsonPath = "[0].name".parse().unwrap();
        assert_eq!(path, JsonPath::root().index(0).key("name"));
    }

    #[test]
    fn test_parse_consecutive_indexes() {
        let path: JsonPath = "m[1][0]".parse().unwrap();
        assert_eq!(path, JsonPath::root().key("m").index(1).index(0));
    }

    #[test]
    fn test_parse_each() {
        let path: JsonPath = "items.#.sku".parse().unwrap();
        assert_eq!(path, JsonPath::root().key("items").each().key("sku"));
    }

    #[test]
    fn test_parse_escaped_dot() {
        let path: JsonPath = r"a\.b.c".parse().unwrap();
        assert_eq!(path, JsonPath::root().key("a.b").key("c"));
    }

    #[test]
    fn test_parse_escaped_hash_is_key() {
        let path: JsonPath = r"\#".parse().unwrap();
        assert_eq!(path, JsonPath::root().key("#"));
    }

    #[test]
    fn test_parse_unicode_and_symbols() {
        let path: JsonPath = "名前.e-mail_1".parse().unwrap();
        assert_eq!(path, JsonPath::root().key("名前").key("e-mail_1"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "a..b".parse::<JsonPath>(),
            Err(PathParseError::EmptyKey(2))
        );
        assert_eq!("a.".parse::<JsonPath>(), Err(PathParseError::EmptyKey(2)));
        assert_eq!(".".parse::<JsonPath>(), Err(PathParseError::EmptyKey(1)));
        assert_eq!(
            "a[0".parse::<JsonPath>(),
            Err(PathParseError::UnclosedBracket(1))
        );
        assert!(matches!(
            "a[x]".parse::<JsonPath>(),
            Err(PathParseError::InvalidIndex(2, _))
        ));
        assert!(matches!(
            "a[-1]".parse::<JsonPath>(),
            Err(PathParseError::InvalidIndex(..))
        ));
        assert_eq!(
            "a[0]b".parse::<JsonPath>(),
            Err(PathParseError::UnexpectedChar('b', 4))
        );
        assert_eq!(
            "a]".parse::<JsonPath>(),
            Err(PathParseError::UnexpectedChar(']', 1))
        );
        assert_eq!(
            r"a\".parse::<JsonPath>(),
            Err(PathParseError::DanglingEscape(1))
        );
    }

    #[test]
    fn test_path_string_round_trip() {
        for s in ["a", "a.b", "a[0]", "a.#.b", "[1].x", r"a\.b", r"\#", "m[1][0]"] {
            let path: JsonPath = s.parse().unwrap();
            assert_eq!(path.to_path_string(), s);
            assert_eq!(path.to_string().parse::<JsonPath>().unwrap(), path);
        }
    }

    // === Evaluation ===

    fn eval(doc: &serde_json::Value, path: &str) -> Match {
        let json = serde_json::to_vec(doc).unwrap();
        evaluate(&json, &path.parse().unwrap()).unwrap()
    }

    fn eval_raw(json: &str, path: &str) -> Match {
        evaluate(json.as_bytes(), &path.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_evaluate_root() {
        let doc = json!({"a": 1});
        assert_eq!(eval(&doc, ""), Match::Node(doc.clone()));
    }

    #[test]
    fn test_evaluate_nested_key() {
        let doc = json!({"user": {"name": "Alice"}});
        assert_eq!(eval(&doc, "user.name").node(), Some(&json!("Alice")));
    }

    #[test]
    fn test_evaluate_index_and_dotted_index_agree() {
        let doc = json!({"xs": [10, 20, 30]});
        assert_eq!(eval(&doc, "xs[1]").node(), Some(&json!(20)));
        assert_eq!(eval(&doc, "xs[1]"), eval(&doc, "xs.1"));
    }

    #[test]
    fn test_evaluate_numeric_key_on_object() {
        let doc = json!({"0": "zero"});
        assert_eq!(eval(&doc, "0").node(), Some(&json!("zero")));
    }

    #[test]
    fn test_evaluate_missing() {
        let doc = json!({"a": {"b": 1}, "xs": [1]});
        for p in ["c", "a.c", "a.b.c", "xs[5]", "xs.x", "a[0]", "a.#"] {
            assert!(eval(&doc, p).is_missing(), "path {}", p);
        }
    }

    #[test]
    fn test_evaluate_each() {
        let doc = json!({"items": [{"sku": "A"}, {"other": 1}, {"sku": "C"}]});
        assert_eq!(
            eval(&doc, "items.#.sku"),
            Match::Each(vec![
                Match::Node(json!("A")),
                Match::Missing,
                Match::Node(json!("C")),
            ])
        );
    }

    #[test]
    fn test_evaluate_trailing_each() {
        let doc = json!({"xs": [1, 2]});
        assert_eq!(
            eval(&doc, "xs.#"),
            Match::Each(vec![Match::Node(json!(1)), Match::Node(json!(2))])
        );
    }

    #[test]
    fn test_evaluate_escaped_key() {
        let doc = json!({"a.b": "dotted", "a": {"b": "nested"}});
        assert_eq!(eval(&doc, r"a\.b").node(), Some(&json!("dotted")));
        assert_eq!(eval(&doc, "a.b").node(), Some(&json!("nested")));
    }

    #[test]
    fn test_evaluate_first_duplicate_key_wins() {
        let json = r#"{"a":"first","a":"second"}"#;
        assert_eq!(eval_raw(json, "a").node(), Some(&json!("first")));

        let json = r#"{"o":{"k":1},"o":{"k":2},"o":null}"#;
        assert_eq!(eval_raw(json, "o.k").node(), Some(&json!(1)));
    }

    #[test]
    fn test_evaluate_keeps_number_text() {
        let json = r#"{"a":"x","n":1e400,"m":-0.0}"#;
        assert_eq!(eval_raw(json, "a").node(), Some(&json!("x")));

        let n = eval_raw(json, "n");
        let Some(serde_json::Value::Number(n)) = n.node() else {
            panic!("expected a number, got {:?}", n);
        };
        assert_eq!(n.as_str(), "1e400");

        let m = eval_raw(json, "m");
        let Some(serde_json::Value::Number(m)) = m.node() else {
            panic!("expected a number, got {:?}", m);
        };
        assert_eq!(m.as_str(), "-0.0");
    }

    #[test]
    fn test_evaluate_skips_deep_sibling() {
        let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
        let json = format!(r#"{{"deep":{},"a":"ok"}}"#, deep);
        assert_eq!(eval_raw(&json, "a").node(), Some(&json!("ok")));
        assert!(eval_raw(&json, "b").is_missing());
    }

    #[test]
    fn test_evaluate_deep_selection_fails() {
        let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
        let json = format!(r#"{{"deep":{}}}"#, deep);
        assert!(evaluate(json.as_bytes(), &"deep".parse().unwrap()).is_err());
    }

    #[test]
    fn test_evaluate_malformed_buffer() {
        assert!(evaluate(br#"{"a":"#, &JsonPath::root().key("a")).is_err());
        assert!(evaluate(br#"{"a":1} x"#, &JsonPath::root().key("a")).is_err());
    }
}
