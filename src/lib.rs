//! widget-render - server-side widget rendering
//!
//! Templates reference widgets by short names (`recentNews`, `profile.feed`). This crate
//! turns such a name into a registered widget, runs it with injected dependencies, and
//! wraps the markup in a uniquely numbered container element. Widgets can also be
//! rendered later through a follow-up request, or served from a render cache.
//!
//! # Architecture Overview
//!
//! ```text
//! name ──▶ resolver ──▶ invoker ──▶ container ──▶ markup
//!              │            │
//!              │            └── dependency pool (typed `run` parameters)
//!              └── registry (class identifier → constructor)
//!
//! deferred: placeholder + loader script ──▶ GET /arrilot/load-widget ──▶ http handler
//! cached:   cache key ──▶ render cache ──▶ (miss) immediate path
//! ```
//!
//! # Core Modules
//!
//! - [`resolver`] - Name → class identifier, with default and custom namespaces
//! - [`invoker`] - Instantiation and argument injection
//! - [`container`] - Sequential container ids and the wrapper element
//! - [`factory`] - The entry point tying the paths together
//! - [`http`] - Follow-up endpoint for deferred and reloadable widgets
//! - [`cache`] - Render cache abstraction and the in-memory store
//! - [`group`] - Named, ordered widget groups
//!
//! ## Supporting Modules
//! - [`widget`] - The [`Widget`](widget::Widget) trait, configuration and arguments
//! - [`config`] - `widgets.toml`
//! - [`core`] - Error types and user-facing error rendering
//! - [`cli`] - The `widgets` inspection binary
//! - [`constants`] - Shared defaults
//!
//! # Example
//!
//! ```rust
//! use widget_render::config::WidgetsConfig;
//! use widget_render::factory::WidgetFactory;
//! use widget_render::resolver::WidgetRegistry;
//! use widget_render::widget::{RunArguments, Widget, WidgetConfig};
//!
//! struct Clock;
//!
//! impl Widget for Clock {
//!     fn run(&self, _args: &RunArguments) -> anyhow::Result<String> {
//!         Ok("12:00".to_string())
//!     }
//! }
//!
//! let registry = WidgetRegistry::new().with("App\\Widgets\\Clock", |_| Clock);
//! let factory = WidgetFactory::new(WidgetsConfig::default(), registry);
//!
//! let first = factory.run("clock", WidgetConfig::new(), &[]).unwrap();
//! let second = factory.run("clock", WidgetConfig::new(), &[]).unwrap();
//! assert!(first.contains("widget-container-1"));
//! assert!(second.contains("widget-container-2"));
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod container;
pub mod core;
pub mod factory;
pub mod group;
pub mod http;
pub mod invoker;
pub mod resolver;
pub mod widget;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
