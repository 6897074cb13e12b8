use std::{collections::BTreeSet, sync::LazyLock};

use itertools::Itertools;
use serde_json::{Map, Value};

use crate::utils::refs::{parse_schema_ref_path, ref_pointer};

static EMPTY_MAP: LazyLock<Map<String, Value>> = LazyLock::new(Map::new);

/// Errors that prevent a specification document from being used at all.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
  #[error("specification is not valid JSON: {0}")]
  InvalidJson(#[from] serde_json::Error),
  #[error("specification root must be a JSON object, found {0}")]
  NotAnObject(&'static str),
}

/// Read-only view over a parsed OpenAPI document.
///
/// The document is kept as a plain JSON tree. Lookups are defensive: a
/// missing or mistyped section reads as empty instead of failing.
#[derive(Debug, Clone)]
pub struct Document {
  root: Value,
}

impl Document {
  pub fn from_slice(bytes: &[u8]) -> Result<Self, DocumentError> {
    let root = serde_json::from_slice::<Value>(bytes)?;
    Self::from_value(root)
  }

  pub fn from_value(root: Value) -> Result<Self, DocumentError> {
    if root.is_object() {
      Ok(Self { root })
    } else {
      Err(DocumentError::NotAnObject(json_kind(&root)))
    }
  }

  pub fn title(&self) -> Option<&str> {
    self.root.pointer("/info/title").and_then(Value::as_str)
  }

  pub fn version(&self) -> Option<&str> {
    self.root.pointer("/info/version").and_then(Value::as_str)
  }

  /// The `paths` mapping, or an empty mapping when absent.
  pub fn paths(&self) -> &Map<String, Value> {
    self.root.get("paths").and_then(Value::as_object).unwrap_or(&EMPTY_MAP)
  }

  pub fn path_item(&self, path: &str) -> Option<&Map<String, Value>> {
    self.paths().get(path).and_then(Value::as_object)
  }

  /// The `components.schemas` mapping, or an empty mapping when absent.
  pub fn schemas(&self) -> &Map<String, Value> {
    self
      .root
      .get("components")
      .and_then(|components| components.get("schemas"))
      .and_then(Value::as_object)
      .unwrap_or(&EMPTY_MAP)
  }

  pub fn schema(&self, name: &str) -> Option<&Value> {
    self.schemas().get(name)
  }
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

/// Tagged view of a schema node.
///
/// Every schema-like node (component schema, property definition, array
/// items, parameter or media type schema) is classified into exactly one
/// shape so that rendering can match on it instead of probing fields.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaShape<'a> {
  /// `$ref` to `#/components/schemas/<name>`.
  Reference(String),
  /// `$ref` that does not point at a component schema.
  Unresolved(&'a str),
  Object {
    properties: Option<&'a Map<String, Value>>,
    required: BTreeSet<&'a str>,
  },
  Array {
    items: Option<Box<SchemaShape<'a>>>,
  },
  Enum {
    schema_type: Option<String>,
    values: &'a [Value],
  },
  Primitive {
    schema_type: Option<String>,
    format: Option<&'a str>,
  },
}

impl<'a> SchemaShape<'a> {
  pub fn classify(node: &'a Value) -> Self {
    if let Some(pointer) = ref_pointer(node) {
      return match parse_schema_ref_path(pointer) {
        Some(name) if !name.is_empty() => Self::Reference(name),
        _ => Self::Unresolved(pointer),
      };
    }

    let schema_type = declared_type(node);
    let properties = node.get("properties").and_then(Value::as_object);
    let values = declared_enum(node);

    // `{ "allOf": [X], "nullable": true }` wraps a single schema.
    if schema_type.is_none()
      && properties.is_none()
      && values.is_none()
      && node.get("items").is_none()
      && let Some([member]) = node.get("allOf").and_then(Value::as_array).map(Vec::as_slice)
    {
      return Self::classify(member);
    }

    if let Some(properties) = properties {
      return Self::object(node, Some(properties));
    }

    if let Some(values) = values {
      return Self::Enum { schema_type, values };
    }

    if schema_type.as_deref() == Some("array") || (schema_type.is_none() && node.get("items").is_some()) {
      let items = node
        .get("items")
        .filter(|items| items.is_object())
        .map(|items| Box::new(Self::classify(items)));
      return Self::Array { items };
    }

    if schema_type.as_deref() == Some("object") {
      return Self::object(node, None);
    }

    Self::Primitive {
      schema_type,
      format: node.get("format").and_then(Value::as_str),
    }
  }

  fn object(node: &'a Value, properties: Option<&'a Map<String, Value>>) -> Self {
    let required = node
      .get("required")
      .and_then(Value::as_array)
      .map(|names| names.iter().filter_map(Value::as_str).collect())
      .unwrap_or_default();
    Self::Object { properties, required }
  }

  /// One-line description of the shape, e.g. `string(date-time)` or `array of Pet`.
  pub fn label(&self) -> String {
    match self {
      Self::Reference(name) => name.clone(),
      Self::Unresolved(pointer) => (*pointer).to_string(),
      Self::Object { .. } => "object".to_string(),
      Self::Array { items } => {
        let element = items.as_ref().map_or_else(|| "unknown".to_string(), |items| items.label());
        format!("array of {element}")
      }
      Self::Enum { schema_type, .. } => schema_type.clone().unwrap_or_else(|| "unknown".to_string()),
      Self::Primitive { schema_type, format } => {
        let base = schema_type.as_deref().unwrap_or("unknown");
        match format {
          Some(format) => format!("{base}({format})"),
          None => base.to_string(),
        }
      }
    }
  }

  pub fn enum_values(&self) -> Option<&'a [Value]> {
    match self {
      Self::Enum { values, .. } => Some(*values),
      _ => None,
    }
  }
}

/// The declared `type` of a node. OpenAPI 3.1 type lists are joined with ` | `.
pub fn declared_type(node: &Value) -> Option<String> {
  match node.get("type")? {
    Value::String(schema_type) => Some(schema_type.clone()),
    Value::Array(types) => {
      let joined = types.iter().filter_map(Value::as_str).join(" | ");
      if joined.is_empty() { None } else { Some(joined) }
    }
    _ => None,
  }
}

/// The non-empty `enum` list of a node, whatever its shape.
pub fn declared_enum(node: &Value) -> Option<&[Value]> {
  node
    .get("enum")
    .and_then(Value::as_array)
    .filter(|values| !values.is_empty())
    .map(Vec::as_slice)
}

/// Renders a single enum member as text.
///
/// Strings are shown verbatim, `null`, numbers and booleans by their JSON
/// text, and composite values as compact JSON.
pub fn enum_value_text(value: &Value) -> String {
  match value {
    Value::String(text) => text.clone(),
    other => other.to_string(),
  }
}

pub fn join_enum_values(values: &[Value]) -> String {
  values.iter().map(enum_value_text).join(", ")
}

pub fn text_field<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
  node.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_document_rejects_non_object_root() {
    let result = Document::from_value(json!(["not", "a", "spec"]));
    assert!(matches!(result, Err(DocumentError::NotAnObject("an array"))));

    let result = Document::from_slice(b"{ not json");
    assert!(matches!(result, Err(DocumentError::InvalidJson(_))));
  }

  #[test]
  fn test_document_defaults_for_missing_sections() {
    let document = Document::from_value(json!({ "openapi": "3.0.0" })).unwrap();
    assert!(document.paths().is_empty(), "missing paths should read as empty");
    assert!(document.schemas().is_empty(), "missing schemas should read as empty");
    assert!(document.title().is_none());

    let document = Document::from_value(json!({ "components": { "schemas": [] } })).unwrap();
    assert!(document.schemas().is_empty(), "mistyped schemas should read as empty");
  }

  #[test]
  fn test_classify_shapes() {
    let cases = [
      (json!({ "$ref": "#/components/schemas/Pet" }), "Pet"),
      (json!({ "$ref": "#/components/parameters/limit" }), "#/components/parameters/limit"),
      (json!({ "type": "string", "format": "date-time" }), "string(date-time)"),
      (json!({ "type": "integer" }), "integer"),
      (json!({}), "unknown"),
      (json!({ "type": "array", "items": { "$ref": "#/components/schemas/Pet" } }), "array of Pet"),
      (json!({ "type": "array", "items": { "type": "string" } }), "array of string"),
      (json!({ "type": "array" }), "array of unknown"),
      (
        json!({ "type": "array", "items": { "type": "array", "items": { "type": "number", "format": "double" } } }),
        "array of array of number(double)",
      ),
      (json!({ "type": "object" }), "object"),
      (json!({ "properties": { "id": { "type": "string" } } }), "object"),
      (json!({ "type": "string", "enum": ["A", "B"] }), "string"),
      (json!({ "type": ["string", "null"] }), "string | null"),
      (json!({ "$ref": "#/components/schemas/Pet/properties/id" }), "Pet"),
      (json!({ "$ref": "#/components/schemas/" }), "#/components/schemas/"),
    ];
    for (node, expected) in cases {
      assert_eq!(SchemaShape::classify(&node).label(), expected, "failed for node {node}");
    }
  }

  #[test]
  fn test_classify_object_collects_required() {
    let node = json!({
      "type": "object",
      "required": ["id", 7, "name"],
      "properties": { "id": { "type": "string" } }
    });
    let SchemaShape::Object { properties, required } = SchemaShape::classify(&node) else {
      panic!("expected object shape");
    };
    assert_eq!(properties.map(Map::len), Some(1));
    assert_eq!(required.into_iter().collect::<Vec<_>>(), vec!["id", "name"]);
  }

  #[test]
  fn test_enum_values_are_never_dropped() {
    let values = [json!("GOLD"), json!(3), json!(true), json!(null), json!({ "k": 1 })];
    assert_eq!(join_enum_values(&values), r#"GOLD, 3, true, null, {"k":1}"#);
  }

  #[test]
  fn test_classify_single_all_of_as_member() {
    let node = json!({ "allOf": [{ "$ref": "#/components/schemas/Owner" }], "nullable": true });
    assert_eq!(SchemaShape::classify(&node), SchemaShape::Reference("Owner".to_string()));

    let node = json!({ "allOf": [{ "type": "string", "format": "uuid" }], "description": "Id." });
    assert_eq!(SchemaShape::classify(&node).label(), "string(uuid)");

    let node = json!({
      "allOf": [{ "$ref": "#/components/schemas/Owner" }, { "$ref": "#/components/schemas/Pet" }]
    });
    assert_eq!(SchemaShape::classify(&node).label(), "unknown", "several members stay a composition");

    let node = json!({ "type": "object", "allOf": [{ "$ref": "#/components/schemas/Owner" }] });
    assert_eq!(SchemaShape::classify(&node).label(), "object", "a declared type wins");
  }

  #[test]
  fn test_classify_object_with_enum_keeps_properties() {
    let node = json!({
      "type": "object",
      "enum": [{ "id": "a" }],
      "properties": { "id": { "type": "string" } }
    });
    let shape = SchemaShape::classify(&node);
    assert!(
      matches!(shape, SchemaShape::Object { properties: Some(_), .. }),
      "properties should win over enum: {shape:?}"
    );
    assert_eq!(declared_enum(&node).map(<[Value]>::len), Some(1));
    assert_eq!(declared_enum(&json!({ "enum": [] })), None);
  }
}
