//! Value transforms for index keys and search terms
//!
//! A transform normalizes a value before it is encoded or compared, e.g.
//! case folding so that `"Alice"` and `"alice"` hit the same key. Apply the
//! same transform at index time and at query time.
//!
//! Transforms are pure and return their input unchanged for variants they
//! don't handle.

use docindex_core::{Key, Value};

/// Maps one value to another
///
/// Implemented for any `Fn(Value) -> Value`, so plain functions such as
/// [`to_lower`] can be used directly.
pub trait Transform: Send + Sync {
    /// Transform a value
    fn apply(&self, value: Value) -> Value;
}

impl<F> Transform for F
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn apply(&self, value: Value) -> Value {
        self(value)
    }
}

/// Unicode-aware lowercasing
///
/// - `String`: lowercased
/// - `Bytes` holding valid UTF-8 (e.g. a text key): lowercased, still `Bytes`
/// - anything else, including non-UTF-8 bytes: unchanged
///
/// # Example
///
/// ```
/// use docindex_core::Value;
/// use docindex_search::transform::{to_lower, Transform, ToLower};
///
/// assert_eq!(to_lower(Value::from("HeLLo")), Value::from("hello"));
/// assert_eq!(ToLower.apply(Value::Float(1.0)), Value::Float(1.0));
/// ```
pub fn to_lower(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.to_lowercase()),
        Value::Bytes(b) => Value::Bytes(lower_utf8_bytes(b)),
        other => other,
    }
}

fn lower_utf8_bytes(bytes: Vec<u8>) -> Vec<u8> {
    match String::from_utf8(bytes) {
        Ok(s) => s.to_lowercase().into_bytes(),
        Err(e) => e.into_bytes(),
    }
}

/// Lowercasing transform, see [`to_lower`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToLower;

impl ToLower {
    /// Lowercase a key holding UTF-8 text; other keys are returned unchanged
    pub fn apply_key(&self, key: Key) -> Key {
        Key::from_bytes(lower_utf8_bytes(key.into_bytes()))
    }
}

impl Transform for ToLower {
    fn apply(&self, value: Value) -> Value {
        to_lower(value)
    }
}

/// Ordered composition of transforms
///
/// An empty pipeline is the identity.
///
/// # Example
///
/// ```
/// use docindex_core::Value;
/// use docindex_search::transform::{Pipeline, ToLower, Transform};
///
/// let trim = |v: Value| match v {
///     Value::String(s) => Value::String(s.trim().to_string()),
///     other => other,
/// };
/// let pipeline = Pipeline::new().then(trim).then(ToLower);
/// assert_eq!(pipeline.apply(Value::from("  MiXed ")), Value::from("mixed"));
/// ```
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    /// Create an empty (identity) pipeline
    pub fn new() -> Self {
        Pipeline { stages: Vec::new() }
    }

    /// Append a transform (builder pattern)
    pub fn then(mut self, transform: impl Transform + 'static) -> Self {
        self.stages.push(Box::new(transform));
        self
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check if the pipeline has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Transform for Pipeline {
    fn apply(&self, value: Value) -> Value {
        self.stages.iter().fold(value, |v, stage| stage.apply(v))
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages.len())
            .finish()
    }
}
