use std::collections::BTreeSet;

use serde_json::{Map, Value, json};

use crate::{extractor::document::Document, utils::refs::SCHEMA_REF_PREFIX};

pub(super) const PETSTORE_JSON: &str = include_str!("../../../fixtures/petstore.json");

pub(super) fn petstore() -> Document {
  Document::from_slice(PETSTORE_JSON.as_bytes()).expect("petstore fixture should parse")
}

pub(super) fn document(value: Value) -> Document {
  Document::from_value(value).expect("test document should be an object")
}

pub(super) fn schema_ref(name: &str) -> Value {
  json!({ "$ref": format!("{SCHEMA_REF_PREFIX}{name}") })
}

/// An object schema with one property per referenced name.
pub(super) fn object_referencing(names: &[&str]) -> Value {
  let properties = names
    .iter()
    .map(|name| (format!("to_{}", name.to_lowercase()), schema_ref(name)))
    .collect::<Map<String, Value>>();
  json!({ "type": "object", "properties": properties })
}

/// A document whose only content is `components.schemas`, built from
/// `(name, referenced names)` pairs.
pub(super) fn schema_graph(edges: &[(&str, &[&str])]) -> Document {
  let schemas = edges
    .iter()
    .map(|(name, refs)| ((*name).to_string(), object_referencing(refs)))
    .collect::<Map<String, Value>>();
  document(json!({
    "openapi": "3.0.0",
    "info": { "title": "Graph", "version": "1" },
    "paths": {},
    "components": { "schemas": schemas }
  }))
}

pub(super) fn string_set(values: &[&str]) -> BTreeSet<String> {
  values.iter().map(|value| (*value).to_string()).collect()
}

pub(super) fn assert_contains(text: &str, expected: &str, context: &str) {
  assert!(text.contains(expected), "missing {context}: expected '{expected}' in:\n{text}");
}

pub(super) fn assert_not_contains(text: &str, pattern: &str, context: &str) {
  assert!(!text.contains(pattern), "{context}: '{pattern}' should not appear in:\n{text}");
}

/// Asserts each pattern occurs, and that they occur in the given order.
pub(super) fn assert_in_order(text: &str, patterns: &[&str]) {
  let mut offset = 0;
  for pattern in patterns {
    let Some(found) = text[offset..].find(pattern) else {
      panic!("expected '{pattern}' after byte {offset} in:\n{text}");
    };
    offset += found + pattern.len();
  }
}
