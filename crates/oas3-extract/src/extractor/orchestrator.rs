//! Runs a complete extraction: operation discovery, schema closure and the
//! final report.
//!
//! ## Usage
//!
//! ```ignore
//! let document = load_document(Path::new("openapi.json"))?;
//! let mut selection = Selection::new();
//! selection.add_path("/pets", [HttpMethod::Get]);
//!
//! let output = Extractor::new(&document, ReportOptions::default()).run(&selection);
//! print!("{}", output.report);
//! ```

use std::collections::BTreeSet;

use serde_json::Value;

use crate::extractor::{
  document::Document,
  metrics::ExtractionStats,
  reference_walker::{detect_cycles, expand_closure, find_references},
  report::{ReportBuffer, ReportOptions, render_operations, render_schema_index, render_schemas},
  selection::Selection,
};

/// Result of a single extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionOutput {
  /// The full plain-text report.
  pub report: String,
  /// Every schema name discovered, in ascending order.
  pub schemas: BTreeSet<String>,
  pub stats: ExtractionStats,
}

/// Extracts reports from one immutable document.
pub struct Extractor<'a> {
  document: &'a Document,
  options: ReportOptions,
}

impl<'a> Extractor<'a> {
  pub fn new(document: &'a Document, options: ReportOptions) -> Self {
    Self { document, options }
  }

  /// Schema names referenced directly by the selected operations, including
  /// parameters shared at the path level. Missing paths and methods
  /// contribute nothing.
  pub fn operation_references(&self, selection: &Selection) -> BTreeSet<String> {
    let mut refs = BTreeSet::new();

    for (path, methods) in selection.paths() {
      let Some(path_item) = self.document.path_item(path) else {
        continue;
      };

      let resolved = methods.resolve(path_item);
      let operations = resolved
        .iter()
        .filter_map(|method| path_item.get(method.key()))
        .collect::<Vec<_>>();
      if operations.is_empty() {
        continue;
      }

      if let Some(shared) = path_item.get("parameters") {
        refs.extend(find_references(shared));
      }
      for operation in operations {
        refs.extend(find_references(operation));
      }
    }

    refs
  }

  /// Every schema reachable from the selected operations and seed schemas.
  pub fn discover(&self, selection: &Selection) -> BTreeSet<String> {
    let mut seeds = self.operation_references(selection);
    seeds.extend(selection.seed_schemas().iter().cloned());
    expand_closure(seeds, self.document.schemas())
  }

  pub fn run(&self, selection: &Selection) -> ExtractionOutput {
    let mut stats = ExtractionStats {
      paths_requested: selection.path_count(),
      ..Default::default()
    };
    let mut report = ReportBuffer::new();

    report.banner(self.title(selection), '=');

    if selection.has_paths() {
      let section = render_operations(self.document, selection, &self.options);
      report.line(section.text.trim_end_matches('\n'));
      stats.operations_rendered = section.rendered;
      stats.record_warnings(section.warnings);
    }

    stats.referenced_from_operations = self.operation_references(selection).len();
    let schemas = self.discover(selection);
    stats.schemas_discovered = schemas.len();
    stats.record_cycles(detect_cycles(&schemas, self.document.schemas()));

    report.blank();
    report.blank();
    report.banner("COMPONENT SCHEMAS", '=');
    report.line(render_schema_index(&schemas).trim_end_matches('\n'));

    report.blank();
    report.blank();
    report.line("Detailed schema definitions:");
    let section = render_schemas(self.document, schemas.iter().map(String::as_str), &self.options);
    report.line(section.text.trim_end_matches('\n'));
    stats.schemas_rendered = section.rendered;
    stats.record_warnings(section.warnings);

    report.blank();
    report.blank();
    report.banner("END OF EXTRACTION", '=');

    ExtractionOutput {
      report: report.into_string(),
      schemas,
      stats,
    }
  }

  fn title(&self, selection: &Selection) -> String {
    let api = match (self.document.title(), self.document.version()) {
      (Some(title), Some(version)) => format!("{} v{version}", title.to_uppercase()),
      (Some(title), None) => title.to_uppercase(),
      (None, _) => "API".to_string(),
    };
    if selection.has_paths() {
      format!("{api} - ENDPOINT SPECIFICATIONS")
    } else {
      format!("{api} - REFERENCED SCHEMAS")
    }
  }
}

/// Number of direct schema references in each component schema, by name.
pub(crate) fn direct_reference_counts(document: &Document) -> Vec<(&str, &Value, usize)> {
  document
    .schemas()
    .iter()
    .map(|(name, schema)| (name.as_str(), schema, find_references(schema).len()))
    .collect()
}
