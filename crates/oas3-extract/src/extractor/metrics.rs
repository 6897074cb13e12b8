use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractionStats {
  pub paths_requested: usize,
  pub operations_rendered: usize,
  pub referenced_from_operations: usize,
  pub schemas_discovered: usize,
  pub schemas_rendered: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<ExtractionWarning>,
}

impl ExtractionStats {
  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    self.cycles_detected += cycles.len();
    self.cycle_details.extend(cycles);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = ExtractionWarning>) {
    self.warnings.extend(warnings);
  }
}

/// Non-fatal conditions met while assembling a report.
///
/// The display text is exactly what appears after `WARNING:` in the report.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ExtractionWarning {
  #[strum(to_string = "Path {path} not found in spec")]
  PathNotFound { path: String },
  #[strum(to_string = "Method {method} not found for {path}")]
  MethodNotFound { method: String, path: String },
  #[strum(to_string = "Schema {schema_name} not found in components/schemas")]
  SchemaNotFound { schema_name: String },
}

impl ExtractionWarning {
  /// Whether a whole path, rather than one of its parts, was skipped.
  pub fn is_skipped_path(&self) -> bool {
    matches!(self, Self::PathNotFound { .. })
  }
}
