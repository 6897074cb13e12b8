#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use clap::Parser;

use crate::ui::{Cli, Colors, Commands, ListCommands, colors};

mod extractor;
mod ui;
mod utils;

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let theme = colors::detect_theme(cli.theme);

  match cli.command {
    Commands::List { list_command } => {
      let colors = Colors::new(colors::colors_enabled(cli.color, &std::io::stdout()), theme);
      match list_command {
        ListCommands::Operations { input } => ui::commands::list_operations(&input, &colors)?,
        ListCommands::Schemas { input } => ui::commands::list_schemas(&input, &colors)?,
      }
    }
    Commands::Extract(command) => {
      let colors = Colors::new(colors::colors_enabled(cli.color, &std::io::stderr()), theme);
      let config = ui::commands::ExtractConfig::from_command(command)?;
      ui::commands::extract_report(&config, &colors)?;
    }
  }

  Ok(())
}
