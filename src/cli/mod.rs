//! Command-line interface for the widget renderer.
//!
//! The `widgets` binary is an inspection tool for a widget setup: it shows how names
//! resolve under the current configuration, which route the follow-up endpoint needs,
//! which cache keys renders will use, and manages the configuration file itself.
//!
//! # Available Commands
//!
//! - `resolve` - Show the fully-qualified class for one or more widget names
//! - `route` - Show the follow-up endpoint the host must register
//! - `cache-key` - Compute the render cache key for a widget call
//! - `config` - Show, locate or create `widgets.toml`
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all logging
//! - `--config` - Path to the configuration file
//!
//! # Example
//!
//! ```bash
//! widgets resolve slider profile.testNamespace.testFeed
//! widgets --config ./widgets.toml route --json
//! widgets cache-key recentNews --params '{"count": 5}' --arg '"asc"'
//! widgets config init
//! ```

mod cache_key;
mod config;
mod resolve;
mod route;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::WidgetsConfig;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can drive commands without touching process-wide
/// logging state.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` leaves logging off.
    pub log_level: Option<String>,

    /// Explicit configuration file, overriding `WIDGETS_CONFIG_PATH` and `./widgets.toml`.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global `tracing` subscriber, writing to stderr.
    ///
    /// `RUST_LOG` wins over the default `info` level but not over `--verbose`. Calling
    /// this more than once is harmless.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let filter = if level == "info" {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
        } else {
            EnvFilter::new(level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load the widget configuration this invocation points at.
    pub async fn load_widgets_config(&self) -> Result<WidgetsConfig> {
        WidgetsConfig::load_with_optional(self.config_path.clone()).await
    }

    /// Where the configuration file lives (or would be created).
    pub fn widgets_config_path(&self) -> PathBuf {
        self.config_path.clone().unwrap_or_else(WidgetsConfig::default_path)
    }
}

/// Inspect and configure a widget rendering setup.
#[derive(Parser)]
#[command(
    name = "widgets",
    about = "Inspect widget name resolution, routes and cache keys",
    version,
    long_about = "Resolves widget names the way the renderer does, shows the follow-up \
                  endpoint for deferred widgets, and manages widgets.toml."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logging; only command output and errors are printed.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file.
    ///
    /// Defaults to `WIDGETS_CONFIG_PATH`, then `./widgets.toml`.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the fully-qualified class each widget name resolves to.
    Resolve(resolve::ResolveCommand),

    /// Show the follow-up endpoint for deferred widgets.
    Route(route::RouteCommand),

    /// Compute the render cache key of a widget call.
    CacheKey(cache_key::CacheKeyCommand),

    /// Manage the widget configuration file.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Execute the CLI with the configuration implied by the global flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    ///
    /// - `--verbose` → `debug`
    /// - `--quiet` → logging off
    /// - otherwise `info` (or `RUST_LOG`)
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit configuration. Does not install a log subscriber.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Resolve(cmd) => cmd.execute(&config).await,
            Commands::Route(cmd) => cmd.execute(&config).await,
            Commands::CacheKey(cmd) => cmd.execute(&config).await,
            Commands::Config(cmd) => cmd.execute(&config).await,
        }
    }
}
