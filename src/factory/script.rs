//! Client-side loader scripts for deferred and reloadable widgets.

use serde_json::Value;
use std::time::Duration;

use crate::container::container_element_id;
use crate::core::Result;
use crate::http::LoadWidgetRequest;
use crate::widget::WidgetConfig;

/// Everything a loader script needs to request a widget again.
pub(crate) struct LoaderScript<'a> {
    pub id: u64,
    pub name: &'a str,
    pub config: &'a WidgetConfig,
    pub args: &'a [Value],
    pub token: String,
    pub endpoint: &'a str,
    pub delay: Duration,
}

impl LoaderScript<'_> {
    /// `<script>` element that loads the widget into its container after `delay`.
    pub(crate) fn render(&self) -> Result<String> {
        let request = LoadWidgetRequest {
            id: self.id,
            name: self.name.to_string(),
            params: LoadWidgetRequest::encode_params(self.config, self.args)?,
            token: self.token.clone(),
        };
        // No raw `<` inside the script element: `</script>` and `<!--` change how it parses.
        let data = serde_json::to_string(&request)?.replace('<', "\\u003c");

        Ok(format!(
            "<script type=\"text/javascript\">setTimeout( function() {{ $('#{}').load('{}', {}) }}, {})</script>",
            container_element_id(self.id),
            self.endpoint,
            data,
            self.delay.as_millis()
        ))
    }
}
