//! Transitive discovery of component schemas through `$ref` pointers.
//!
//! The reference graph is never materialized for discovery: edges are found
//! lazily by scanning each schema body the first time its name is visited.

use std::collections::{BTreeSet, VecDeque};

use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};
use serde_json::{Map, Value};

use crate::utils::extract_schema_ref_name;

/// Collects every schema name referenced anywhere beneath `node`.
///
/// Walks mappings and sequences with an explicit stack, so nesting depth is
/// bounded only by memory. Pointers that do not target
/// `#/components/schemas/` are ignored.
pub(crate) fn find_references(node: &Value) -> BTreeSet<String> {
  let mut refs = BTreeSet::new();
  let mut stack = vec![node];

  while let Some(current) = stack.pop() {
    match current {
      Value::Object(map) => {
        if let Some(name) = extract_schema_ref_name(current) {
          refs.insert(name);
        }
        stack.extend(map.values());
      }
      Value::Array(items) => stack.extend(items),
      Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
  }

  refs
}

/// Expands `seeds` to every schema name reachable through references.
///
/// Names missing from `schemas` stay in the result but are not expanded.
/// Each name is scanned at most once, which also makes cycles terminate.
pub(crate) fn expand_closure<I, S>(seeds: I, schemas: &Map<String, Value>) -> BTreeSet<String>
where
  I: IntoIterator<Item = S>,
  S: Into<String>,
{
  let mut visited = BTreeSet::new();
  let mut queue = VecDeque::new();

  for seed in seeds {
    let seed = seed.into();
    if visited.insert(seed.clone()) {
      queue.push_back(seed);
    }
  }

  while let Some(name) = queue.pop_front() {
    let Some(schema) = schemas.get(&name) else {
      continue;
    };

    for reference in find_references(schema) {
      if !visited.contains(&reference) {
        visited.insert(reference.clone());
        queue.push_back(reference);
      }
    }
  }

  visited
}

/// Finds reference cycles among `names`.
///
/// Returns each strongly connected component with more than one member, plus
/// schemas that reference themselves. Members of a cycle are sorted, and the
/// cycles are sorted by their first member.
pub(crate) fn detect_cycles(names: &BTreeSet<String>, schemas: &Map<String, Value>) -> Vec<Vec<String>> {
  let edges = names
    .iter()
    .filter_map(|name| schemas.get(name).map(|schema| (name, find_references(schema))))
    .collect::<Vec<_>>();

  let mut graph = DiGraphMap::<&str, ()>::new();
  for name in names {
    graph.add_node(name.as_str());
  }
  for (from, targets) in &edges {
    for target in targets.iter().filter(|target| names.contains(*target)) {
      graph.add_edge(from.as_str(), target.as_str(), ());
    }
  }

  let mut cycles = kosaraju_scc(&graph)
    .into_iter()
    .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
    .map(|scc| {
      let mut cycle = scc.into_iter().map(String::from).collect::<Vec<_>>();
      cycle.sort();
      cycle
    })
    .collect::<Vec<_>>();
  cycles.sort();
  cycles
}
