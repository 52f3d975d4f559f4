//! The follow-up endpoint for deferred and reloadable widgets.
//!
//! A deferred render embeds a script that requests `GET /arrilot/load-widget` with a
//! [`LoadWidgetRequest`] payload. [`LoadWidgetHandler`] is the transport-agnostic side of
//! that endpoint: the host web server decodes the request, hands it over, and returns the
//! produced markup as the response body. Routing itself stays with the host; [`WidgetRoute`]
//! only describes what to register.
//!
//! The handler shares no in-memory state with the page that issued the request: it
//! re-resolves the widget and renders it from scratch, numbering the container with the
//! id the placeholder was given.

mod token;

pub use token::{CsrfTokenProvider, StaticToken};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::container::ContainerIds;
use crate::core::{Result, WidgetError};
use crate::factory::WidgetFactory;
use crate::widget::WidgetConfig;

/// Payload of a follow-up request.
///
/// Field order matters: it is the order of the JSON object embedded in the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadWidgetRequest {
    /// Container id of the placeholder being filled.
    pub id: u64,
    /// Widget name as written at the call site.
    pub name: String,
    /// JSON text of `[config, runtimeArgs...]`.
    pub params: String,
    /// Anti-forgery token.
    #[serde(rename = "_token")]
    pub token: String,
}

impl LoadWidgetRequest {
    /// Serialize a call's parameters the way [`params`](Self::params) carries them.
    pub fn encode_params(config: &WidgetConfig, args: &[Value]) -> Result<String> {
        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(Value::Object(config.as_map().clone()));
        all.extend(args.iter().cloned());
        Ok(serde_json::to_string(&all)?)
    }

    /// Split [`params`](Self::params) back into the configuration and runtime arguments.
    ///
    /// Accepts an empty string (no parameters), a bare object (configuration only) or an
    /// array whose first element is the configuration.
    pub fn decode_params(&self) -> Result<(WidgetConfig, Vec<Value>)> {
        if self.params.trim().is_empty() {
            return Ok((WidgetConfig::new(), Vec::new()));
        }

        let decoded: Value =
            serde_json::from_str(&self.params).map_err(|e| WidgetError::InvalidRequest {
                reason: format!("params are not valid JSON: {e}"),
            })?;

        match decoded {
            Value::Array(mut values) => {
                if values.is_empty() {
                    return Ok((WidgetConfig::new(), Vec::new()));
                }
                let args = values.split_off(1);
                let config = values.into_iter().next().unwrap_or(Value::Null);
                Ok((WidgetConfig::from_value(config)?, args))
            }
            object @ Value::Object(_) => Ok((WidgetConfig::from_value(object)?, Vec::new())),
            other => Err(WidgetError::InvalidRequest {
                reason: format!("params must be an array or object, found {other}"),
            }),
        }
    }
}

/// Route the host should register for the follow-up endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetRoute {
    pub method: &'static str,
    pub path: String,
    pub middleware: Vec<String>,
}

/// Serves follow-up requests by rendering the named widget immediately.
#[derive(Clone)]
pub struct LoadWidgetHandler {
    factory: WidgetFactory,
}

impl LoadWidgetHandler {
    pub fn new(factory: WidgetFactory) -> Self {
        Self {
            factory,
        }
    }

    /// Method, path and middleware of the endpoint.
    pub fn route(&self) -> WidgetRoute {
        let settings = self.factory.settings();
        WidgetRoute {
            method: "GET",
            path: settings.load_widget_path(),
            middleware: settings.route_middleware.clone(),
        }
    }

    /// Validate the token and render the requested widget.
    pub fn handle(&self, request: &LoadWidgetRequest) -> Result<String> {
        if !self.factory.tokens().verify(&request.token) {
            tracing::warn!("Rejected load-widget request for '{}': token mismatch", request.name);
            return Err(WidgetError::TokenMismatch {
                name: request.name.clone(),
            });
        }

        let (config, args) = request.decode_params()?;
        tracing::debug!("Loading widget '{}' into container {}", request.name, request.id);

        self.factory
            .with_container_ids(ContainerIds::starting_at(request.id))
            .run_immediate(&request.name, config, &args)
    }

    /// Decode a JSON request body and [`handle`](Self::handle) it.
    pub fn handle_json(&self, body: &str) -> Result<String> {
        let request: LoadWidgetRequest =
            serde_json::from_str(body).map_err(|e| WidgetError::InvalidRequest {
                reason: e.to_string(),
            })?;
        self.handle(&request)
    }
}
