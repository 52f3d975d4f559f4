//! Manage the widget configuration file.
//!
//! ```bash
//! widgets config init          # create ./widgets.toml with an example
//! widgets config init --force  # overwrite an existing file
//! widgets config show          # effective configuration (defaults if no file)
//! widgets config               # same as show
//! widgets config path          # where the file is looked up
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

use super::CliConfig;
use crate::config::WidgetsConfig;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Create a configuration file with example content.
    ///
    /// Refuses to overwrite an existing file unless `--force` is given.
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Display the effective configuration.
    Show,

    /// Display the path of the configuration file.
    Path,
}

impl ConfigCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let path = config.widgets_config_path();

        match self.command {
            Some(ConfigSubcommands::Init {
                force,
            }) => Self::init(&path, force).await,
            Some(ConfigSubcommands::Show) | None => Self::show(&path).await,
            Some(ConfigSubcommands::Path) => {
                println!("{}", path.display());
                Ok(())
            }
        }
    }

    async fn init(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            println!("❌ Widget config already exists at: {}", path.display());
            println!("   Use --force to overwrite");
            return Ok(());
        }

        let config = WidgetsConfig::init_example();
        config.save_to(path).await?;

        println!("✅ Created widget config at: {}", path.display());
        println!("\n{}", "Example configuration:".bold());
        println!("{}", toml::to_string_pretty(&config)?);
        println!("{}", "Next steps:".yellow());
        println!("  1. Point default_namespace at the namespace holding your widgets");
        println!("  2. Add [custom_namespaces] entries for widgets living elsewhere");

        Ok(())
    }

    async fn show(path: &Path) -> Result<()> {
        let config = WidgetsConfig::load_with_optional(Some(path.to_path_buf())).await?;

        println!("{}", "Widget Configuration".bold());
        if path.exists() {
            println!("Location: {}\n", path.display());
        } else {
            println!("Location: {} {}\n", path.display(), "(not found, using defaults)".dimmed());
        }

        println!("{}", toml::to_string_pretty(&config)?);
        println!("Follow-up endpoint: {}", config.load_widget_path());

        if !path.exists() {
            println!("\n{}", "Tip:".yellow());
            println!("  Run 'widgets config init' to create a configuration file");
        }

        Ok(())
    }
}
