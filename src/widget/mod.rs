//! The widget abstraction.
//!
//! A widget is a self-contained renderable unit: it is constructed from a
//! [`WidgetConfig`], declares the parameters its [`Widget::run`] entry point takes,
//! and produces a markup string. Everything else (wrapping, caching, deferring) is
//! done by the [`WidgetFactory`](crate::factory::WidgetFactory) around it.
//!
//! # Example
//!
//! ```rust
//! use widget_render::widget::{Parameter, RunArguments, Widget, WidgetConfig};
//! use serde_json::json;
//!
//! struct RecentNews {
//!     config: WidgetConfig,
//! }
//!
//! impl RecentNews {
//!     fn new(config: WidgetConfig) -> Self {
//!         Self { config: config.with_defaults(json!({"count": 5})) }
//!     }
//! }
//!
//! impl Widget for RecentNews {
//!     fn parameters(&self) -> Vec<Parameter> {
//!         vec![Parameter::optional("order", "desc")]
//!     }
//!
//!     fn run(&self, args: &RunArguments) -> anyhow::Result<String> {
//!         Ok(format!(
//!             "{} news, {}",
//!             self.config.get_i64("count").unwrap_or_default(),
//!             args.str(0).unwrap_or("desc")
//!         ))
//!     }
//! }
//! ```

mod arguments;
mod config;

pub use arguments::{Argument, Parameter, RunArguments, Service};
pub use config::WidgetConfig;

use std::time::Duration;

/// How a widget type wants to be rendered by [`WidgetFactory::run`](crate::factory::WidgetFactory::run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Run now and return the wrapped markup.
    #[default]
    Immediate,
    /// Emit a placeholder container and load the markup with a follow-up request.
    Deferred,
    /// Serve from the render cache, rendering and storing on a miss.
    Cached {
        ttl: Duration,
    },
}

impl RenderMode {
    /// Cached with the default TTL.
    pub fn cached() -> Self {
        Self::Cached {
            ttl: crate::constants::default_cache_ttl(),
        }
    }
}

/// A renderable widget.
///
/// Only [`run`](Widget::run) is required; the remaining methods describe the widget type
/// and have defaults matching a plain, immediately rendered widget.
pub trait Widget: Send + Sync {
    /// Rendering entry point. Returns raw markup without the container element.
    fn run(&self, args: &RunArguments) -> anyhow::Result<String>;

    /// Parameters of [`run`](Widget::run), in positional order.
    fn parameters(&self) -> Vec<Parameter> {
        Vec::new()
    }

    /// CSS class for the container element, replacing the configured default.
    fn container_class(&self) -> Option<&str> {
        None
    }

    fn render_mode(&self) -> RenderMode {
        RenderMode::Immediate
    }

    /// Markup shown inside the container until a deferred render arrives.
    fn placeholder(&self) -> String {
        String::new()
    }

    /// When set, the rendered container reloads itself after this interval.
    fn reload_timeout(&self) -> Option<Duration> {
        None
    }

    /// Final cache key, given the key derived from the widget's name and parameters.
    fn cache_key(&self, default_key: &str) -> String {
        default_key.to_string()
    }
}
