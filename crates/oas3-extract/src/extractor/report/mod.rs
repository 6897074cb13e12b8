//! Plain-text rendering of selected operations and resolved schemas.
//!
//! Rendering never fails: anything missing from the document becomes an
//! inline `WARNING:` line and is also returned as an [`ExtractionWarning`].

mod operations;
mod properties;
mod schemas;

use std::collections::BTreeSet;

pub(crate) use operations::render_operations;
pub(crate) use schemas::{render_schema_index, render_schemas};

use crate::extractor::metrics::ExtractionWarning;

pub(crate) const RULE_WIDTH: usize = 80;
pub(crate) const DEFAULT_DESCRIPTION_LIMIT: usize = 200;
pub(crate) const DEFAULT_DETAIL_LIMIT: usize = 100;

/// Formatting knobs for a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
  /// Maximum characters of operation and schema descriptions.
  pub description_limit: Option<usize>,
  /// Maximum characters of parameter and property descriptions.
  pub detail_limit: Option<usize>,
  /// Render schema properties by name instead of document order.
  pub sort_properties: bool,
}

impl Default for ReportOptions {
  fn default() -> Self {
    Self {
      description_limit: Some(DEFAULT_DESCRIPTION_LIMIT),
      detail_limit: Some(DEFAULT_DETAIL_LIMIT),
      sort_properties: false,
    }
  }
}

impl ReportOptions {
  pub fn untruncated(self) -> Self {
    Self {
      description_limit: None,
      detail_limit: None,
      ..self
    }
  }
}

/// Output of one report section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedSection {
  pub text: String,
  /// Operations or schemas actually rendered, excluding skipped items.
  pub rendered: usize,
  pub warnings: Vec<ExtractionWarning>,
}

#[derive(Debug, Default)]
pub(crate) struct ReportBuffer {
  out: String,
  warnings: Vec<ExtractionWarning>,
  rendered: usize,
}

impl ReportBuffer {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn line(&mut self, text: impl AsRef<str>) {
    self.out.push_str(text.as_ref());
    self.out.push('\n');
  }

  pub(crate) fn blank(&mut self) {
    self.out.push('\n');
  }

  pub(crate) fn rule(&mut self, fill: char) {
    self.line(fill.to_string().repeat(RULE_WIDTH));
  }

  pub(crate) fn banner(&mut self, title: impl AsRef<str>, fill: char) {
    self.rule(fill);
    self.line(title);
    self.rule(fill);
  }

  pub(crate) fn warn(&mut self, indent: &str, warning: ExtractionWarning) {
    self.line(format!("{indent}WARNING: {warning}"));
    self.warnings.push(warning);
  }

  pub(crate) fn count_rendered(&mut self) {
    self.rendered += 1;
  }

  pub(crate) fn finish(self) -> RenderedSection {
    RenderedSection {
      text: self.out,
      rendered: self.rendered,
      warnings: self.warnings,
    }
  }

  pub(crate) fn into_string(self) -> String {
    self.out
  }
}

/// Sorted, deduplicated view over any collection of names.
pub(crate) fn sorted_names<'a, I>(names: I) -> BTreeSet<&'a str>
where
  I: IntoIterator<Item = &'a str>,
{
  names.into_iter().collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_report_buffer_banner_and_warnings() {
    let mut buffer = ReportBuffer::new();
    buffer.banner("PATH: /pets", '=');
    buffer.warn(
      "  ",
      ExtractionWarning::MethodNotFound {
        method: "PATCH".to_string(),
        path: "/pets".to_string(),
      },
    );
    let section = buffer.finish();

    let rule = "=".repeat(RULE_WIDTH);
    assert_eq!(
      section.text,
      format!("{rule}\nPATH: /pets\n{rule}\n  WARNING: Method PATCH not found for /pets\n")
    );
    assert_eq!(section.warnings.len(), 1);
    assert_eq!(section.rendered, 0);
  }

  #[test]
  fn test_untruncated_options() {
    let options = ReportOptions {
      sort_properties: true,
      ..ReportOptions::default()
    }
    .untruncated();
    assert_eq!(options.description_limit, None);
    assert_eq!(options.detail_limit, None);
    assert!(options.sort_properties, "other options are preserved");
  }
}
