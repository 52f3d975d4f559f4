//! Compute the render cache key of a widget call.
//!
//! Useful when invalidating a cached render by hand: the key printed here is the one the
//! factory stores the markup under, as long as the widget keeps the default key.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use super::CliConfig;
use crate::cache::cache_key;
use crate::resolver::{NamespaceConfig, WidgetClass};
use crate::widget::WidgetConfig;

#[derive(Args)]
pub struct CacheKeyCommand {
    /// Widget name as written in templates
    name: String,

    /// Widget configuration as a JSON object
    #[arg(long, default_value = "{}")]
    params: String,

    /// Runtime argument as JSON; repeat for several
    #[arg(long = "arg")]
    args: Vec<String>,
}

impl CacheKeyCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let settings = config.load_widgets_config().await?;
        let namespaces = NamespaceConfig::from_config(&settings);
        println!("{}", self.compute(&namespaces)?);
        Ok(())
    }

    fn compute(&self, namespaces: &NamespaceConfig) -> Result<String> {
        let class = WidgetClass::new(namespaces.qualify(&self.name)?);

        let params: Value = serde_json::from_str(&self.params)
            .with_context(|| format!("--params is not valid JSON: {}", self.params))?;
        let params = WidgetConfig::from_value(params)?;

        let args = self
            .args
            .iter()
            .map(|raw| {
                serde_json::from_str(raw).with_context(|| format!("--arg is not valid JSON: {raw}"))
            })
            .collect::<Result<Vec<Value>>>()?;

        tracing::debug!("Computing cache key for {} with {} runtime arguments", class, args.len());
        Ok(cache_key(&class, &params, &args))
    }
}
