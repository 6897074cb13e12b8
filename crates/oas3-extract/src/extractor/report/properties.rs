use std::collections::BTreeSet;

use serde_json::{Map, Value};

use super::{ReportBuffer, ReportOptions};
use crate::{
  extractor::document::{SchemaShape, join_enum_values, text_field},
  utils::text::{hanging_indent, truncate, wrap},
};

/// Column that indented property descriptions are filled to.
const DESCRIPTION_WIDTH: usize = 76;

/// Enum values declared by a property, or by the items of an array property.
fn property_enum<'a>(shape: &SchemaShape<'a>) -> Option<&'a [Value]> {
  match shape {
    SchemaShape::Array { items: Some(items) } => items.enum_values(),
    other => other.enum_values(),
  }
}

/// Writes one entry per property: name, shape label, required marker, then
/// the description and enum values indented beneath it.
pub(crate) fn render_properties(
  buffer: &mut ReportBuffer,
  properties: &Map<String, Value>,
  required: &BTreeSet<&str>,
  options: &ReportOptions,
  indent: &str,
) {
  let mut entries = properties.iter().collect::<Vec<_>>();
  if options.sort_properties {
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
  }

  let detail_indent = format!("{indent}  ");
  let text_width = DESCRIPTION_WIDTH.saturating_sub(detail_indent.len()).max(1);
  for (name, definition) in entries {
    let shape = SchemaShape::classify(definition);
    let marker = if required.contains(name.as_str()) {
      "(required)"
    } else {
      "(optional)"
    };
    buffer.line(format!("{indent}- {name}: {} {marker}", shape.label()));

    if let Some(description) = text_field(definition, "description")
      && !description.is_empty()
    {
      let text = wrap(&truncate(description, options.detail_limit), text_width);
      buffer.line(format!("{detail_indent}{}", hanging_indent(&text, &detail_indent)));
    }

    if let Some(values) = property_enum(&shape) {
      buffer.line(format!("{detail_indent}Enum: {}", join_enum_values(values)));
    }
  }
}
