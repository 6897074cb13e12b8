use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  extractor::{
    Document, HttpMethod,
    document::{SchemaShape, declared_type, text_field},
    orchestrator::direct_reference_counts,
  },
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::spec::load_document,
};

/// Identifier for an operation without an `operationId`, e.g.
/// `get_pets_by_id` for `GET /pets/{petId}`.
fn derive_operation_id(method: HttpMethod, path: &str) -> String {
  let segments = path
    .split('/')
    .filter(|segment| !segment.is_empty())
    .map(|segment| {
      if segment.starts_with('{') && segment.ends_with('}') {
        "by_id"
      } else {
        segment
      }
    })
    .collect::<Vec<_>>();

  if segments.is_empty() {
    method.key().to_string()
  } else {
    format!("{}_{}", method.key(), segments.join("_"))
  }
}

/// `(id, METHOD, path)` for every operation in the document, sorted by id.
fn collect_operations(document: &Document) -> Vec<(String, String, String)> {
  let mut operations = document
    .paths()
    .iter()
    .filter_map(|(path, item)| item.as_object().map(|item| (path, item)))
    .flat_map(|(path, item)| {
      HttpMethod::defined_on(item).into_iter().map(move |method| {
        let id = item
          .get(method.key())
          .and_then(|operation| text_field(operation, "operationId"))
          .map_or_else(|| derive_operation_id(method, path), ToString::to_string);
        (id, method.upper(), path.clone())
      })
    })
    .collect::<Vec<_>>();

  operations.sort();
  operations
}

/// `(name, type label, direct reference count)` for every component schema,
/// sorted by name.
fn collect_schemas(document: &Document) -> Vec<(String, String, usize)> {
  let mut schemas = direct_reference_counts(document)
    .into_iter()
    .map(|(name, schema, count)| {
      let label = declared_type(schema).unwrap_or_else(|| SchemaShape::classify(schema).label());
      (name.to_string(), label, count)
    })
    .collect::<Vec<_>>();

  schemas.sort();
  schemas
}

fn new_table(headers: &[&str], colors: &Colors) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in headers {
    row.add_cell(Cell::new(header).fg(IntoComfyColor::into(colors.heading())));
  }
  table.set_header(row);
  table
}

pub fn list_operations(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let document = load_document(input)?;
  let mut table = new_table(&["OPERATION ID", "METHOD", "PATH"], colors);

  for (operation_id, method, path) in collect_operations(&document) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(operation_id)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(method)
        .fg(IntoComfyColor::into(colors.warning()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(path).fg(IntoComfyColor::into(colors.label())));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}

pub fn list_schemas(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let document = load_document(input)?;
  let mut table = new_table(&["SCHEMA", "TYPE", "REFS"], colors);

  for (name, label, count) in collect_schemas(&document) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(name)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(label).fg(IntoComfyColor::into(colors.label())));
    row.add_cell(
      Cell::new(count)
        .fg(IntoComfyColor::into(colors.muted()))
        .set_alignment(CellAlignment::Right),
    );
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
