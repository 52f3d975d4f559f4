//! Show the follow-up endpoint the host application must register.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CliConfig;
use crate::factory::WidgetFactory;
use crate::http::{LoadWidgetHandler, WidgetRoute};
use crate::resolver::WidgetRegistry;

#[derive(Args)]
pub struct RouteCommand {
    /// Print the route as JSON
    #[arg(long)]
    json: bool,
}

impl RouteCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let settings = config.load_widgets_config().await?;
        let handler = LoadWidgetHandler::new(WidgetFactory::new(settings, WidgetRegistry::new()));
        let route = handler.route();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&route)?);
        } else {
            println!("{}", format_route(&route));
        }
        Ok(())
    }
}

fn format_route(route: &WidgetRoute) -> String {
    let mut out = format!("{} {}", route.method.bold(), route.path);
    if !route.middleware.is_empty() {
        out.push_str(&format!("\n  middleware: {}", route.middleware.join(", ")));
    }
    out
}
