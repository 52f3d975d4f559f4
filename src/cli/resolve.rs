//! Show how widget names qualify under the configured namespaces.
//!
//! Qualification is purely textual: the command has no widget registry, so it reports
//! the class a name *would* load rather than checking that the class exists.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CliConfig;
use crate::resolver::NamespaceConfig;

#[derive(Args)]
pub struct ResolveCommand {
    /// Widget names as written in templates, e.g. `slider` or `profile.testNamespace.testFeed`
    #[arg(required = true)]
    names: Vec<String>,

    /// Print only the qualified identifiers, one per line
    #[arg(long)]
    plain: bool,
}

impl ResolveCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let settings = config.load_widgets_config().await?;
        let namespaces = NamespaceConfig::from_config(&settings);

        for line in self.resolve_all(&namespaces)? {
            println!("{line}");
        }
        Ok(())
    }

    fn resolve_all(&self, namespaces: &NamespaceConfig) -> Result<Vec<String>> {
        self.names
            .iter()
            .map(|name| {
                let qualified = namespaces.qualify(name)?;
                Ok(if self.plain {
                    qualified
                } else {
                    format!("{} {} {}", name.bold(), "→".dimmed(), qualified)
                })
            })
            .collect()
    }
}
