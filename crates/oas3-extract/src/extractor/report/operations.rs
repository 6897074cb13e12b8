use serde_json::{Map, Value};

use super::{ReportBuffer, ReportOptions, RenderedSection, properties::render_properties};
use crate::{
  extractor::{
    document::{Document, SchemaShape, join_enum_values, text_field},
    metrics::ExtractionWarning,
    selection::{HttpMethod, Selection},
  },
  utils::{refs::ref_pointer, text::truncate},
};

/// Renders every selected operation in selection order.
///
/// A path absent from the document, or a method absent from its path, is
/// reported inline and skipped; the remaining selection is still rendered.
pub(crate) fn render_operations(document: &Document, selection: &Selection, options: &ReportOptions) -> RenderedSection {
  let mut buffer = ReportBuffer::new();

  for (path, methods) in selection.paths() {
    let Some(path_item) = document.path_item(path) else {
      buffer.blank();
      buffer.warn(
        "",
        ExtractionWarning::PathNotFound {
          path: path.to_string(),
        },
      );
      continue;
    };

    buffer.blank();
    buffer.banner(format!("PATH: {path}"), '=');

    if let Some(shared) = path_item.get("parameters").and_then(Value::as_array)
      && !shared.is_empty()
    {
      buffer.blank();
      buffer.line("SHARED PARAMETERS:");
      render_parameters(&mut buffer, shared, options);
    }

    for method in methods.resolve(path_item) {
      let Some(operation) = path_item.get(method.key()) else {
        buffer.warn(
          "  ",
          ExtractionWarning::MethodNotFound {
            method: method.upper(),
            path: path.to_string(),
          },
        );
        continue;
      };

      render_operation(&mut buffer, path, method, operation, options);
      buffer.count_rendered();
    }
  }

  buffer.finish()
}

fn render_operation(buffer: &mut ReportBuffer, path: &str, method: HttpMethod, operation: &Value, options: &ReportOptions) {
  let description = text_field(operation, "description").unwrap_or("No description");

  buffer.blank();
  buffer.line(format!("{} {path}", method.upper()));
  buffer.line(format!(
    "Operation ID: {}",
    text_field(operation, "operationId").unwrap_or("unknown")
  ));
  buffer.line(format!("Summary: {}", text_field(operation, "summary").unwrap_or("No summary")));
  buffer.line(format!(
    "Description: {}",
    truncate(description, options.description_limit)
  ));
  if operation.get("deprecated").and_then(Value::as_bool) == Some(true) {
    buffer.line("Deprecated: true");
  }

  if let Some(parameters) = operation.get("parameters").and_then(Value::as_array)
    && !parameters.is_empty()
  {
    buffer.blank();
    buffer.line("PARAMETERS:");
    render_parameters(buffer, parameters, options);
  }

  if let Some(request_body) = operation.get("requestBody").filter(|body| is_non_empty_object(body)) {
    buffer.blank();
    buffer.line("REQUEST BODY:");
    render_request_body(buffer, request_body, options);
  }

  if let Some(responses) = operation.get("responses").and_then(Value::as_object)
    && !responses.is_empty()
  {
    buffer.blank();
    buffer.line("RESPONSES:");
    render_responses(buffer, responses, options);
  }
}

fn render_parameters(buffer: &mut ReportBuffer, parameters: &[Value], options: &ReportOptions) {
  for parameter in parameters {
    if let Some(pointer) = ref_pointer(parameter) {
      buffer.line(format!("  - $ref: {pointer}"));
      continue;
    }

    let name = text_field(parameter, "name").unwrap_or("unknown");
    let location = text_field(parameter, "in").unwrap_or("unknown");
    let required = parameter.get("required").and_then(Value::as_bool).unwrap_or(false);
    let shape = SchemaShape::classify(parameter_schema(parameter).unwrap_or(parameter));

    buffer.line(format!("  - {name} ({location})"));
    buffer.line(format!("    Type: {}", shape.label()));
    buffer.line(format!("    Required: {required}"));

    if let Some(description) = text_field(parameter, "description")
      && !description.is_empty()
    {
      buffer.line(format!("    Description: {}", truncate(description, options.detail_limit)));
    }

    if let Some(values) = shape.enum_values() {
      buffer.line(format!("    Enum: {}", join_enum_values(values)));
    }
  }
}

/// The schema describing a parameter value, either directly or through its
/// first `content` entry.
fn parameter_schema(parameter: &Value) -> Option<&Value> {
  parameter.get("schema").or_else(|| {
    parameter
      .get("content")
      .and_then(Value::as_object)
      .and_then(|content| content.values().find_map(|media| media.get("schema")))
  })
}

fn render_request_body(buffer: &mut ReportBuffer, request_body: &Value, options: &ReportOptions) {
  if let Some(pointer) = ref_pointer(request_body) {
    buffer.line(format!("  $ref: {pointer}"));
    return;
  }

  if let Some(description) = text_field(request_body, "description")
    && !description.is_empty()
  {
    buffer.line(format!("  Description: {}", truncate(description, options.detail_limit)));
  }
  if let Some(required) = request_body.get("required").and_then(Value::as_bool) {
    buffer.line(format!("  Required: {required}"));
  }

  for (content_type, media) in media_types(request_body) {
    buffer.line(format!("  Content-Type: {content_type}"));
    if let Some(schema) = media.get("schema") {
      render_media_schema(buffer, schema, "  ", "Schema", options);
    }
  }
}

fn render_responses(buffer: &mut ReportBuffer, responses: &Map<String, Value>, options: &ReportOptions) {
  for (status, response) in responses {
    if let Some(pointer) = ref_pointer(response) {
      buffer.line(format!("  {status}: $ref {pointer}"));
      continue;
    }

    buffer.line(format!("  {status}: {}", text_field(response, "description").unwrap_or_default()));

    for (content_type, media) in media_types(response) {
      let Some(schema) = media.get("schema").filter(|schema| is_non_empty_object(schema)) else {
        continue;
      };
      buffer.line(format!("    Content-Type: {content_type}"));
      render_media_schema(buffer, schema, "    ", "Schema Type", options);
    }
  }
}

/// Shows a body schema by name when it is a reference, otherwise by its
/// shape label followed by any inline properties.
fn render_media_schema(buffer: &mut ReportBuffer, schema: &Value, indent: &str, inline_label: &str, options: &ReportOptions) {
  match SchemaShape::classify(schema) {
    SchemaShape::Reference(name) => buffer.line(format!("{indent}Schema: {name}")),
    SchemaShape::Object {
      properties: Some(properties),
      required,
    } if !properties.is_empty() => {
      buffer.line(format!("{indent}{inline_label}: object"));
      buffer.line(format!("{indent}Properties:"));
      render_properties(buffer, properties, &required, options, &format!("{indent}  "));
    }
    shape => buffer.line(format!("{indent}{inline_label}: {}", shape.label())),
  }
}

fn media_types(node: &Value) -> impl Iterator<Item = (&String, &Value)> {
  node.get("content").and_then(Value::as_object).into_iter().flatten()
}

fn is_non_empty_object(node: &Value) -> bool {
  node.as_object().is_some_and(|map| !map.is_empty())
}
