//! End-to-end indexing tests
//!
//! Exercises the public facade the way an index builder uses it: extract
//! values from documents, encode keys, and produce full-text keys.

use docindex::{
    encode, Analyzer, Document, Error, IndexValue, Key, Reference, ToLower, Transform, Value,
    KEY_DELIMITER,
};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// Test Helpers
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Composite key the way a storage engine would build one
fn composite_key(field: &str, key: &Key, reference: &Reference) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(field.as_bytes());
    out.push(KEY_DELIMITER);
    out.extend_from_slice(key.as_bytes());
    out.push(KEY_DELIMITER);
    out.extend_from_slice(reference.as_bytes());
    out
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_text_field_scenario() {
    init_tracing();
    let doc = Document::from(r#"{"a":"Hello","b":[1,2,3]}"#);

    assert_eq!(
        doc.values_at_path("a").unwrap(),
        vec![IndexValue::Text("Hello".into())]
    );
    assert_eq!(
        doc.keys_at_path("a").unwrap(),
        vec![Key::from_bytes("Hello".as_bytes())]
    );
}

#[test]
fn test_mixed_array_scenario() {
    init_tracing();
    let doc = Document::from(r#"{"arr":[1,2,null,"x"]}"#);

    assert_eq!(
        doc.values_at_path("arr").unwrap(),
        vec![
            IndexValue::Number(1.0),
            IndexValue::Number(2.0),
            IndexValue::Text("x".into()),
        ]
    );
}

#[test]
fn test_object_scenario() {
    init_tracing();
    let doc = Document::from(r#"{"obj":{"x":1}}"#);

    match doc.values_at_path("obj") {
        Err(Error::UnsupportedType(text)) => assert_eq!(text, r#"{"x":1}"#),
        other => panic!("expected UnsupportedType, got {:?}", other),
    }
}

#[test]
fn test_malformed_document_scenario() {
    init_tracing();
    let doc = Document::from(r#"{"a":"#);

    assert_eq!(doc.values_at_path("a"), Err(Error::InvalidJson));
    assert_eq!(doc.keys_at_path("a"), Err(Error::InvalidJson));
}

#[test]
fn test_tokenizer_scenarios() {
    assert_eq!(
        docindex::whitespace_tokenize("foo   bar\tbaz"),
        vec!["foo", "bar", "baz"]
    );
    assert!(docindex::whitespace_tokenize("").is_empty());
    assert_eq!(docindex::whitespace_tokenize("  a   b "), vec!["a", "b"]);
}

// ============================================================================
// Index building
// ============================================================================

#[test]
fn test_documents_with_same_value_share_keys() {
    let a = Document::from(r#"{"user":{"email":"a@example.com"}}"#);
    let b = Document::from(r#"{"user":{"email":"a@example.com","age":3}}"#);

    assert_eq!(
        a.keys_at_path("user.email").unwrap(),
        b.keys_at_path("user.email").unwrap()
    );
}

#[test]
fn test_composite_keys_per_document() {
    let doc = Document::from(r#"{"tags":["red","blue"]}"#);
    let reference = Reference::new(vec![0xab; 32]);

    let entries: Vec<Vec<u8>> = doc
        .keys_at_path("tags")
        .unwrap()
        .iter()
        .map(|k| composite_key("tags", k, &reference))
        .collect();

    assert_eq!(entries.len(), 2);
    assert!(entries[0].starts_with(b"tags\x10red\x10"));
    assert!(entries[1].starts_with(b"tags\x10blue\x10"));
    assert_eq!(reference.byte_size(), 32);
    assert_eq!(reference.to_hex(), "ab".repeat(32));
}

#[test]
fn test_case_insensitive_field_keys() {
    let doc = Document::from(r#"{"name":["Alice","ALICE","alice"]}"#);

    let keys: Vec<Key> = doc
        .values_at_path("name")
        .unwrap()
        .into_iter()
        .map(|v| encode(&ToLower.apply(Value::from(v))).unwrap())
        .collect();

    assert_eq!(keys.len(), 3);
    assert!(keys.iter().all(|k| k == &Key::from_text("alice")));
}

#[test]
fn test_full_text_keys_from_extracted_values() {
    init_tracing();
    let doc = Document::from(
        r#"{"posts":[{"body":"Rust is  Fast"},{"body":null},{"body":"fast AND safe"}]}"#,
    );
    let analyzer = Analyzer::case_insensitive();

    let mut terms = Vec::new();
    for value in doc.values_at_path("posts.#.body").unwrap() {
        if let Some(text) = value.as_text() {
            terms.extend(analyzer.keys(text).unwrap());
        }
    }

    let rendered: Vec<String> = terms.iter().map(|k| k.to_string()).collect();
    assert_eq!(rendered, vec!["rust", "is", "fast", "fast", "and", "safe"]);
}

#[test]
fn test_failed_document_does_not_stop_others() {
    init_tracing();
    let docs = [
        Document::from(r#"{"k":"one"}"#),
        Document::from(r#"{"k":true}"#),
        Document::from(r#"{"k":"#),
        Document::from(r#"{"k":["two",3]}"#),
    ];

    let mut indexed = Vec::new();
    let mut rejected = Vec::new();
    for doc in &docs {
        match doc.keys_at_path("k") {
            Ok(keys) => indexed.extend(keys),
            Err(err) => rejected.push(err.reason_code()),
        }
    }

    assert_eq!(indexed.len(), 3);
    assert_eq!(rejected, vec!["unsupported_type", "invalid_json"]);
}

#[test]
fn test_unusual_but_valid_documents_still_index() {
    init_tracing();
    let deep = format!("{}{}", "[".repeat(300), "]".repeat(300));
    let docs = [
        Document::from(r#"{"k":"one","huge":1e999}"#),
        Document::new(format!(r#"{{"pad":{},"k":"two"}}"#, deep)),
        Document::from(r#"{"k":"three","k":"ignored"}"#),
    ];

    let mut keys = Vec::new();
    for doc in &docs {
        assert!(doc.is_valid_json());
        keys.extend(doc.keys_at_path("k").unwrap());
    }
    assert_eq!(
        keys,
        vec![
            Key::from_text("one"),
            Key::from_text("two"),
            Key::from_text("three")
        ]
    );
}

#[test]
fn test_documents_usable_across_threads() {
    let doc = std::sync::Arc::new(Document::from(r#"{"n":[1,2,3]}"#));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let doc = doc.clone();
            std::thread::spawn(move || doc.keys_at_path("n").unwrap())
        })
        .collect();

    let expected = doc.keys_at_path("n").unwrap();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

// ============================================================================
// Properties
// ============================================================================

fn scalar_or_null() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<i32>().prop_map(|n| json!(n)),
        // quarters survive a JSON text round trip exactly
        (-4_000_000i32..4_000_000).prop_map(|n| json!(n as f64 / 4.0)),
        "\\PC{0,12}".prop_map(|s| json!(s)),
    ]
}

fn indexable_tree() -> impl Strategy<Value = serde_json::Value> {
    scalar_or_null().prop_recursive(4, 32, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(serde_json::Value::Array)
    })
}

fn expected_values(node: &serde_json::Value, out: &mut Vec<IndexValue>) {
    match node {
        serde_json::Value::String(s) => out.push(IndexValue::Text(s.clone())),
        serde_json::Value::Number(n) => out.push(IndexValue::Number(n.as_f64().unwrap())),
        serde_json::Value::Array(xs) => xs.iter().for_each(|x| expected_values(x, out)),
        _ => {}
    }
}

proptest! {
    #[test]
    fn prop_keys_and_values_have_same_length(tree in indexable_tree()) {
        let doc = Document::from(json!({ "field": tree }).to_string());
        let values = doc.values_at_path("field").unwrap();
        let keys = doc.keys_at_path("field").unwrap();
        prop_assert_eq!(values.len(), keys.len());
        for (value, key) in values.iter().zip(&keys) {
            prop_assert_eq!(&value.to_key(), key);
        }
    }

    #[test]
    fn prop_flattening_preserves_order_and_drops_nulls(tree in indexable_tree()) {
        let doc = Document::from(json!({ "field": tree.clone() }).to_string());
        let mut expected = Vec::new();
        expected_values(&tree, &mut expected);
        prop_assert_eq!(doc.values_at_path("field").unwrap(), expected);
    }

    #[test]
    fn prop_extraction_is_deterministic(tree in indexable_tree()) {
        let doc = Document::from(json!({ "field": tree }).to_string());
        prop_assert_eq!(doc.keys_at_path("field").unwrap(), doc.keys_at_path("field").unwrap());
    }
}
