//! `widgets` CLI entry point
//!
//! Parses arguments, runs the command, and renders failures as user-friendly errors.
//!
//! - `resolve` - Show how widget names qualify
//! - `route` - Show the follow-up endpoint
//! - `cache-key` - Compute a render cache key
//! - `config` - Manage `widgets.toml`

use anyhow::Result;
use clap::Parser;
use widget_render::cli;
use widget_render::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
