use std::{
  io::Write,
  path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  extractor::{ExtractionOutput, Extractor, ReportOptions, Selection, metrics::ExtractionStats},
  ui::{Colors, ExtractCommand},
  utils::spec::SpecLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct ExtractConfig {
  pub input: PathBuf,
  pub output: Option<PathBuf>,
  pub selection: Selection,
  pub options: ReportOptions,
  pub verbose: bool,
  pub quiet: bool,
}

impl ExtractConfig {
  pub fn from_command(command: ExtractCommand) -> anyhow::Result<Self> {
    let ExtractCommand {
      input,
      select,
      paths,
      schemas,
      output,
      description_limit,
      detail_limit,
      no_truncate,
      sort_properties,
      verbose,
      quiet,
    } = command;

    let selection = build_selection(select.as_deref(), &paths, schemas)?;
    if selection.is_empty() {
      anyhow::bail!("Nothing to extract: select at least one path (-p, --select) or schema (--schema)");
    }

    let options = ReportOptions {
      description_limit: Some(description_limit),
      detail_limit: Some(detail_limit),
      sort_properties,
    };
    let options = if no_truncate { options.untruncated() } else { options };

    Ok(Self {
      input,
      output,
      selection,
      options,
      verbose,
      quiet,
    })
  }

  fn write_output(&self, report: &str) -> anyhow::Result<()> {
    let Some(output) = &self.output else {
      let mut stdout = std::io::stdout().lock();
      stdout.write_all(report.as_bytes()).context("Failed to write report to stdout")?;
      return stdout.flush().context("Failed to write report to stdout");
    };

    if let Some(parent) = output.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(output, report).with_context(|| format!("Failed to write report to {}", output.display()))
  }
}

/// Combines the selection file with command-line paths and schemas. File
/// entries come first; command-line entries are merged after them.
fn build_selection(select: Option<&Path>, paths: &[String], schemas: Vec<String>) -> anyhow::Result<Selection> {
  let mut selection = match select {
    Some(file) => {
      let bytes = std::fs::read(file).with_context(|| format!("Failed to read selection file {}", file.display()))?;
      Selection::from_json_slice(&bytes).with_context(|| format!("Failed to parse selection file {}", file.display()))?
    }
    None => Selection::new(),
  };

  let mut flags = Selection::new();
  for entry in paths {
    let (path, methods) = Selection::parse_path_entry(entry)?;
    flags.add_path(path, methods);
  }
  for schema in schemas.into_iter().map(|name| name.trim().to_string()) {
    if !schema.is_empty() {
      flags.add_schema(schema);
    }
  }

  selection.extend(flags);
  Ok(selection)
}

/// Progress and summary lines. Written to stderr so that stdout carries only
/// the report.
struct ExtractLogger<'a> {
  config: &'a ExtractConfig,
  colors: &'a Colors,
}

impl<'a> ExtractLogger<'a> {
  fn new(config: &'a ExtractConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      eprintln!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      eprintln!(
        "            {:<28} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI spec from: {}", self.config.input.display())
        .with(self.colors.heading())
        .to_string(),
    );
  }

  fn log_extracting(&self) {
    let selection = &self.config.selection;
    let message = format!(
      "Extracting {} path(s) and {} seed schema(s)...",
      selection.path_count(),
      selection.seed_schemas().len()
    );
    self.info(&message.with(self.colors.heading()).to_string());
  }

  fn print_statistics(&self, stats: &ExtractionStats) {
    if self.config.quiet {
      return;
    }

    if stats.paths_requested > 0 {
      self.stat("Paths requested:", stats.paths_requested.to_string());
      self.stat("Operations rendered:", stats.operations_rendered.to_string());
      self.stat("Referenced by operations:", stats.referenced_from_operations.to_string());
    }
    self.stat("Schemas discovered:", stats.schemas_discovered.to_string());
    self.stat("Schemas rendered:", stats.schemas_rendered.to_string());
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_cycles(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &ExtractionStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        eprintln!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.warning()),
          cycle.join(" <-> ").with(self.colors.muted())
        );
      }
    }
  }

  /// Skipped paths are always listed; other warnings only when verbose.
  fn print_warnings(&self, stats: &ExtractionStats) {
    let shown = stats
      .warnings
      .iter()
      .filter(|warning| warning.is_skipped_path() || self.config.verbose)
      .collect::<Vec<_>>();
    if shown.is_empty() {
      return;
    }

    eprintln!();
    for warning in shown {
      let prefix = if warning.is_skipped_path() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        prefix.with(self.colors.warning()),
        warning.to_string().with(self.colors.muted())
      );
    }
  }

  fn log_writing(&self) {
    let destination = self
      .config
      .output
      .as_ref()
      .map_or_else(|| "stdout".to_string(), |path| path.display().to_string());
    self.info(
      &format!("Writing report to: {destination}")
        .with(self.colors.heading())
        .to_string(),
    );
  }

  fn log_success(&self, output: &ExtractionOutput) {
    if !self.config.quiet {
      let message = format!("Extracted {} schema(s)", output.schemas.len());
      eprintln!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        message.with(self.colors.success())
      );
    }
  }
}

pub fn extract_report(config: &ExtractConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = ExtractLogger::new(config, colors);

  logger.log_loading();
  let document = SpecLoader::open(&config.input)?.parse()?;

  logger.log_extracting();
  let output = Extractor::new(&document, config.options.clone()).run(&config.selection);
  logger.print_statistics(&output.stats);

  logger.log_writing();
  config.write_output(&output.report)?;

  logger.log_success(&output);
  Ok(())
}
