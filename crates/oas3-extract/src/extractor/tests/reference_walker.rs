use std::collections::BTreeSet;

use serde_json::{Map, Value, json};

use super::support::{document, petstore, schema_graph, schema_ref, string_set};
use crate::extractor::reference_walker::{detect_cycles, expand_closure, find_references};

/// Reachability computed independently of `expand_closure`, by iterating
/// one-hop expansion until nothing changes.
fn reachable_fixed_point(seeds: &BTreeSet<String>, schemas: &Map<String, Value>) -> BTreeSet<String> {
  let mut reached = seeds.clone();
  loop {
    let next = reached
      .iter()
      .filter_map(|name| schemas.get(name))
      .flat_map(find_references)
      .filter(|name| !reached.contains(name))
      .collect::<BTreeSet<_>>();
    if next.is_empty() {
      return reached;
    }
    reached.extend(next);
  }
}

#[test]
fn test_find_references_scans_every_level() {
  let node = json!({
    "parameters": [
      { "name": "q", "schema": schema_ref("Query") },
      { "$ref": "#/components/parameters/limit" }
    ],
    "requestBody": {
      "content": {
        "application/json": {
          "schema": {
            "type": "array",
            "items": { "oneOf": [schema_ref("Cat"), schema_ref("Dog")] }
          }
        }
      }
    },
    "responses": {
      "200": { "content": { "application/json": { "schema": schema_ref("Cat") } } }
    },
    "x-note": "#/components/schemas/NotAPointer"
  });

  assert_eq!(find_references(&node), string_set(&["Cat", "Dog", "Query"]));
}

#[test]
fn test_find_references_ignores_foreign_pointers() {
  let node = json!([
    { "$ref": "other.json#/components/schemas/Pet" },
    { "$ref": "#/definitions/Pet" },
    { "$ref": "#/components/parameters/Pet" },
    { "$ref": 7 }
  ]);
  assert!(find_references(&node).is_empty(), "foreign pointers contribute no edges");
  assert!(find_references(&json!("scalar")).is_empty());
  assert!(find_references(&json!(null)).is_empty());
}

#[test]
fn test_find_references_resolves_nested_and_empty_names() {
  let node = json!([
    { "$ref": "#/components/schemas/Pet/properties/id" },
    { "$ref": "#/components/schemas/Owner/items" },
    { "$ref": "#/components/schemas/" }
  ]);
  assert_eq!(
    find_references(&node),
    string_set(&["", "Owner", "Pet"]),
    "a nested pointer names its top-level schema and an empty name is kept"
  );
}

#[test]
fn test_find_references_has_no_depth_limit() {
  let mut node = schema_ref("Leaf");
  for depth in 0..1_000 {
    node = if depth % 2 == 0 {
      Value::Object(Map::from_iter([("items".to_string(), node)]))
    } else {
      Value::Array(vec![node])
    };
  }
  assert_eq!(find_references(&node), string_set(&["Leaf"]));
}

#[test]
fn test_expand_closure_follows_chain() {
  let doc = schema_graph(&[("A", &["B"]), ("B", &["C"]), ("C", &[])]);
  let closure = expand_closure(["A"], doc.schemas());
  assert_eq!(closure, string_set(&["A", "B", "C"]));

  let closure = expand_closure(["B"], doc.schemas());
  assert_eq!(closure, string_set(&["B", "C"]), "closure never walks backwards");
}

#[test]
fn test_expand_closure_terminates_on_cycles() {
  let doc = schema_graph(&[("A", &["B"]), ("B", &["A"])]);
  assert_eq!(expand_closure(["A"], doc.schemas()), string_set(&["A", "B"]));

  let doc = schema_graph(&[("X", &["X"])]);
  assert_eq!(expand_closure(["X"], doc.schemas()), string_set(&["X"]));

  let doc = schema_graph(&[("A", &["B", "C"]), ("B", &["C", "A"]), ("C", &["A", "B", "C"])]);
  assert_eq!(expand_closure(["C"], doc.schemas()), string_set(&["A", "B", "C"]));
}

#[test]
fn test_expand_closure_keeps_missing_names() {
  let doc = schema_graph(&[("A", &["Ghost"])]);
  assert_eq!(
    expand_closure(["A", "Phantom"], doc.schemas()),
    string_set(&["A", "Ghost", "Phantom"]),
    "missing names are discovered but not expanded"
  );
  assert!(expand_closure(Vec::<String>::new(), doc.schemas()).is_empty());
}

#[test]
fn test_expand_closure_follows_nested_pointers() {
  let doc = document(json!({
    "components": {
      "schemas": {
        "A": { "properties": { "id": { "$ref": "#/components/schemas/B/properties/id" } } },
        "B": { "properties": { "id": { "type": "string" }, "c": schema_ref("C") } },
        "C": { "type": "string" }
      }
    }
  }));
  assert_eq!(expand_closure(["A"], doc.schemas()), string_set(&["A", "B", "C"]));
}

#[test]
fn test_expand_closure_is_complete_and_exact() {
  let doc = petstore();
  let schemas = doc.schemas();
  let seed_sets = [
    vec!["Pets"],
    vec!["Category"],
    vec!["Broken"],
    vec!["NewPet", "Error"],
    vec!["Unused"],
    vec!["Dimensions", "Missing"],
  ];

  for seeds in seed_sets {
    let seeds = string_set(&seeds);
    let closure = expand_closure(seeds.iter().cloned(), schemas);
    assert_eq!(
      closure,
      reachable_fixed_point(&seeds, schemas),
      "closure of {seeds:?} should be exactly the reachable set"
    );
    assert!(closure.is_superset(&seeds), "closure of {seeds:?} should contain its seeds");
  }
}

#[test]
fn test_expand_closure_is_monotonic() {
  let doc = petstore();
  let schemas = doc.schemas();
  let names = schemas.keys().cloned().collect::<Vec<_>>();

  for left in &names {
    for right in &names {
      let union = expand_closure([left.clone(), right.clone()], schemas);
      let separate = expand_closure([left.clone()], schemas)
        .into_iter()
        .chain(expand_closure([right.clone()], schemas))
        .collect::<BTreeSet<_>>();
      assert!(union.is_superset(&separate), "closure of {{{left}, {right}}} lost names");
    }
  }
}

#[test]
fn test_expand_closure_petstore_from_pets() {
  let doc = petstore();
  assert_eq!(
    expand_closure(["Pets"], doc.schemas()),
    string_set(&["Dimensions", "Owner", "Pet", "PetStatus", "Pets", "Photo"])
  );
}

#[test]
fn test_detect_cycles() {
  let doc = petstore();
  let names = string_set(&["Category", "Dimensions", "Owner", "Pet", "Photo"]);
  assert_eq!(
    detect_cycles(&names, doc.schemas()),
    vec![
      vec!["Category".to_string()],
      vec!["Owner".to_string(), "Pet".to_string()],
    ]
  );

  let names = string_set(&["Dimensions", "Photo", "Missing"]);
  assert!(detect_cycles(&names, doc.schemas()).is_empty());

  let names = string_set(&["Pet"]);
  assert!(
    detect_cycles(&names, doc.schemas()).is_empty(),
    "cycles leaving the discovered set are not counted"
  );
}
