use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-extract")]
#[command(author, version, about = "Extract endpoints and the schemas they reference from an OpenAPI specification")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Write a report of selected endpoints and every schema they reach
  Extract(ExtractCommand),
  /// List information from OpenAPI specification
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
}

#[derive(Args, Debug, Clone)]
pub struct ExtractCommand {
  /// Path to the OpenAPI JSON specification file
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// JSON selection file: {"paths": {"/pets": ["get"]}, "schemas": ["Error"]}
  #[arg(short, long, value_name = "FILE")]
  pub select: Option<PathBuf>,

  /// Select a path, optionally restricted to some methods (e.g. '/pets=get,post').
  /// May be repeated; entries are added after those from --select
  #[arg(short = 'p', long = "path", value_name = "PATH[=METHODS]")]
  pub paths: Vec<String>,

  /// Seed schema names to include with everything they reference (comma-separated)
  #[arg(long = "schema", value_name = "NAMES", value_delimiter = ',')]
  pub schemas: Vec<String>,

  /// Write the report to this file instead of stdout
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Maximum characters of operation and schema descriptions
  #[arg(long, value_name = "N", default_value_t = 200)]
  pub description_limit: usize,

  /// Maximum characters of parameter and property descriptions
  #[arg(long, value_name = "N", default_value_t = 100)]
  pub detail_limit: usize,

  /// Never truncate descriptions
  #[arg(long, default_value_t = false)]
  pub no_truncate: bool,

  /// List schema properties by name instead of document order
  #[arg(long, default_value_t = false)]
  pub sort_properties: bool,

  /// Enable verbose output with cycle details and every warning
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations defined in the OpenAPI specification
  Operations {
    /// Path to the OpenAPI JSON specification file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
  /// List all component schemas with their direct reference counts
  Schemas {
    /// Path to the OpenAPI JSON specification file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
