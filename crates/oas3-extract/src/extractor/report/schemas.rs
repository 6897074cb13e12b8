use std::collections::BTreeSet;

use itertools::Itertools;
use serde_json::Value;

use super::{ReportBuffer, ReportOptions, RenderedSection, properties::render_properties, sorted_names};
use crate::{
  extractor::{
    document::{Document, SchemaShape, declared_enum, declared_type, join_enum_values, text_field},
    metrics::ExtractionWarning,
  },
  utils::text::truncate,
};

const COMPOSITIONS: [(&str, &str); 3] = [("allOf", "All of"), ("oneOf", "One of"), ("anyOf", "Any of")];

/// Renders the total count and the sorted list of discovered schema names.
pub(crate) fn render_schema_index(names: &BTreeSet<String>) -> String {
  let mut buffer = ReportBuffer::new();
  buffer.blank();
  buffer.line(format!("Total schemas referenced: {}", names.len()));
  buffer.blank();
  buffer.line("Schema names:");
  for name in names {
    buffer.line(format!("  - {name}"));
  }
  buffer.into_string()
}

/// Renders a detailed block for each schema, always in ascending name order.
///
/// The order of `names` is irrelevant; duplicates are rendered once. Names
/// absent from `components.schemas` produce a warning instead of a block.
pub(crate) fn render_schemas<'a, I>(document: &Document, names: I, options: &ReportOptions) -> RenderedSection
where
  I: IntoIterator<Item = &'a str>,
{
  let mut buffer = ReportBuffer::new();

  for name in sorted_names(names) {
    let Some(schema) = document.schema(name) else {
      buffer.blank();
      buffer.warn(
        "",
        ExtractionWarning::SchemaNotFound {
          schema_name: name.to_string(),
        },
      );
      continue;
    };

    render_schema(&mut buffer, name, schema, options);
    buffer.count_rendered();
  }

  buffer.finish()
}

fn render_schema(buffer: &mut ReportBuffer, name: &str, schema: &Value, options: &ReportOptions) {
  let shape = SchemaShape::classify(schema);

  buffer.blank();
  buffer.banner(format!("SCHEMA: {name}"), '-');
  buffer.line(format!(
    "Type: {}",
    declared_type(schema).unwrap_or_else(|| shape.label())
  ));

  if let Some(description) = text_field(schema, "description")
    && !description.is_empty()
  {
    buffer.line(format!("Description: {}", truncate(description, options.description_limit)));
  }

  match &shape {
    SchemaShape::Object {
      properties: Some(properties),
      required,
    } if !properties.is_empty() => {
      buffer.blank();
      buffer.line("Properties:");
      render_properties(buffer, properties, required, options, "  ");
    }
    SchemaShape::Array { items: Some(items) } => {
      buffer.line(format!("Items: {}", items.label()));
    }
    _ => {}
  }

  for (key, label) in COMPOSITIONS {
    if let Some(members) = schema.get(key).and_then(Value::as_array)
      && !members.is_empty()
    {
      let labels = members.iter().map(|member| SchemaShape::classify(member).label()).join(", ");
      buffer.line(format!("{label}: {labels}"));
    }
  }

  if let Some(values) = declared_enum(schema) {
    buffer.blank();
    buffer.line(format!("Enum values: {}", join_enum_values(values)));
  }

  if let Some(additional) = schema.get("additionalProperties") {
    buffer.blank();
    buffer.line(format!("Additional properties: {}", additional_properties_text(additional)));
  }
}

fn additional_properties_text(node: &Value) -> String {
  match node {
    Value::Bool(allowed) => allowed.to_string(),
    Value::Object(map) if map.is_empty() => "true".to_string(),
    other => SchemaShape::classify(other).label(),
  }
}
