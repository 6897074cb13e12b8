use std::borrow::Cow;

use oas3::spec::Ref;
use percent_encoding::percent_decode_str;
use serde_json::Value;

pub(crate) const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Parses a schema `$ref` path and extracts the referenced schema name.
///
/// Any internal pointer that starts with `#/components/schemas/` resolves to
/// the first segment after the prefix, so `#/components/schemas/B/properties/id`
/// names `B`. The segment is decoded (`~1` to `/`, `~0` to `~`, then percent
/// escapes) so the returned name matches the key as it appears in
/// `components.schemas`. An empty segment yields an empty name, which never
/// matches a schema and is reported as missing downstream.
///
/// Returns `None` for external references and other component kinds.
pub fn parse_schema_ref_path(ref_path: &str) -> Option<String> {
  let rest = ref_path.strip_prefix(SCHEMA_REF_PREFIX)?;
  let segment = rest.split('/').next().unwrap_or_default();
  if segment.is_empty() {
    return Some(String::new());
  }

  // `Ref` panics on names outside its pattern, which excludes line breaks.
  if segment.contains('\n') {
    return Some(decode_pointer_segment(segment));
  }

  let component = format!("{SCHEMA_REF_PREFIX}{segment}").parse::<Ref>().ok()?;
  Some(decode_pointer_segment(&component.name))
}

/// Returns the raw `$ref` string of a mapping node, if it has one.
pub fn ref_pointer(node: &Value) -> Option<&str> {
  node.as_object()?.get("$ref")?.as_str()
}

/// Extracts the schema name a mapping node points to through `$ref`.
pub fn extract_schema_ref_name(node: &Value) -> Option<String> {
  ref_pointer(node).and_then(parse_schema_ref_path)
}

fn decode_pointer_segment(segment: &str) -> String {
  let unescaped: Cow<'_, str> = if segment.contains('~') {
    Cow::Owned(segment.replace("~1", "/").replace("~0", "~"))
  } else {
    Cow::Borrowed(segment)
  };
  percent_decode_str(&unescaped).decode_utf8_lossy().into_owned()
}
