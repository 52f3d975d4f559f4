//! The widget factory: name → class → instance → markup → container.
//!
//! [`WidgetFactory`] is what template helpers call. It owns the resolution rules, the
//! widget registry, the container id counter and the collaborators (dependency pool,
//! render cache, token provider), and picks a rendering path per call:
//!
//! - **Immediate**: invoke the widget and wrap its markup.
//! - **Deferred**: wrap the widget's placeholder plus a script that fetches the real
//!   markup from the follow-up endpoint ([`LoadWidgetHandler`](crate::http::LoadWidgetHandler)).
//! - **Cached**: look the render up in the [`RenderCache`]; render and store on a miss.
//!
//! [`WidgetFactory::run`] follows the widget's declared [`RenderMode`];
//! [`run_async`](WidgetFactory::run_async), [`run_immediate`](WidgetFactory::run_immediate)
//! and [`run_cached`](WidgetFactory::run_cached) force a path.
//!
//! Errors surface before any container id is allocated: a failed render never consumes
//! an id and never yields partial markup.
//!
//! # Example
//!
//! ```rust
//! use widget_render::config::WidgetsConfig;
//! use widget_render::factory::WidgetFactory;
//! use widget_render::resolver::WidgetRegistry;
//! use widget_render::widget::{RunArguments, Widget, WidgetConfig};
//!
//! struct Hello;
//!
//! impl Widget for Hello {
//!     fn run(&self, _args: &RunArguments) -> anyhow::Result<String> {
//!         Ok("Hello".to_string())
//!     }
//! }
//!
//! let registry = WidgetRegistry::new().with("App\\Widgets\\Hello", |_| Hello);
//! let factory = WidgetFactory::new(WidgetsConfig::default(), registry);
//!
//! let html = factory.run("hello", WidgetConfig::new(), &[]).unwrap();
//! assert_eq!(
//!     html,
//!     r#"<div id="widget-container-1" style="display:inline" class="arrilot-widget-container">Hello</div>"#
//! );
//! ```

mod script;

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{InMemoryCache, RenderCache, cache_key};
use crate::config::WidgetsConfig;
use crate::container::{ContainerIds, wrap};
use crate::core::Result;
use crate::http::{CsrfTokenProvider, StaticToken};
use crate::invoker::{DependencyPool, EmptyPool, Invoker};
use crate::resolver::{NamespaceConfig, WidgetClass, WidgetRegistry, WidgetResolver};
use crate::widget::{RenderMode, Widget, WidgetConfig};
use script::LoaderScript;

/// Resolves, invokes, wraps, defers and caches widgets.
///
/// Cloning is cheap; clones share the registry, collaborators and container counter.
#[derive(Clone)]
pub struct WidgetFactory {
    settings: Arc<WidgetsConfig>,
    resolver: WidgetResolver,
    invoker: Invoker,
    cache: Arc<dyn RenderCache>,
    tokens: Arc<dyn CsrfTokenProvider>,
    ids: ContainerIds,
}

/// Builder for [`WidgetFactory`] collaborators.
pub struct WidgetFactoryBuilder {
    settings: WidgetsConfig,
    registry: WidgetRegistry,
    pool: Arc<dyn DependencyPool>,
    cache: Arc<dyn RenderCache>,
    tokens: Arc<dyn CsrfTokenProvider>,
    ids: ContainerIds,
}

impl WidgetFactoryBuilder {
    /// Dependency pool for typed `run` parameters. Defaults to an empty pool.
    #[must_use]
    pub fn pool(mut self, pool: Arc<dyn DependencyPool>) -> Self {
        self.pool = pool;
        self
    }

    /// Render cache. Defaults to a private [`InMemoryCache`].
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn RenderCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Anti-forgery token provider. Defaults to an empty token that never verifies.
    #[must_use]
    pub fn tokens(mut self, tokens: Arc<dyn CsrfTokenProvider>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Container id counter, e.g. one shared with other factories rendering the same page.
    #[must_use]
    pub fn container_ids(mut self, ids: ContainerIds) -> Self {
        self.ids = ids;
        self
    }

    pub fn build(self) -> WidgetFactory {
        let registry = Arc::new(self.registry);
        let namespaces = NamespaceConfig::from_config(&self.settings);

        WidgetFactory {
            resolver: WidgetResolver::new(namespaces, Arc::clone(&registry)),
            invoker: Invoker::new(registry, self.pool),
            settings: Arc::new(self.settings),
            cache: self.cache,
            tokens: self.tokens,
            ids: self.ids,
        }
    }
}

impl WidgetFactory {
    pub fn builder(settings: WidgetsConfig, registry: WidgetRegistry) -> WidgetFactoryBuilder {
        WidgetFactoryBuilder {
            settings,
            registry,
            pool: Arc::new(EmptyPool),
            cache: Arc::new(InMemoryCache::new()),
            tokens: Arc::new(StaticToken::default()),
            ids: ContainerIds::new(),
        }
    }

    /// Factory with default collaborators.
    pub fn new(settings: WidgetsConfig, registry: WidgetRegistry) -> Self {
        Self::builder(settings, registry).build()
    }

    pub fn settings(&self) -> &WidgetsConfig {
        &self.settings
    }

    pub fn tokens(&self) -> &dyn CsrfTokenProvider {
        self.tokens.as_ref()
    }

    pub fn container_ids(&self) -> &ContainerIds {
        &self.ids
    }

    /// Restart container numbering at 1.
    pub fn reset_container_ids(&self) {
        self.ids.reset();
    }

    /// A clone of this factory numbering containers with `ids` instead.
    #[must_use]
    pub fn with_container_ids(&self, ids: ContainerIds) -> Self {
        Self {
            ids,
            ..self.clone()
        }
    }

    /// Resolve `name` to a registered widget class.
    pub fn resolve(&self, name: &str) -> Result<WidgetClass> {
        self.resolver.resolve(name)
    }

    /// Render `name` the way the widget declares ([`Widget::render_mode`]).
    pub fn run(&self, name: &str, config: WidgetConfig, args: &[Value]) -> Result<String> {
        let (class, widget) = self.prepare(name, &config)?;

        match widget.render_mode() {
            RenderMode::Immediate => self.render_now(name, &class, widget.as_ref(), &config, args),
            RenderMode::Deferred => self.render_deferred(name, widget.as_ref(), &config, args),
            RenderMode::Cached {
                ttl,
            } => self.render_cached(name, &class, widget.as_ref(), &config, args, ttl),
        }
    }

    /// Render `name` through the follow-up endpoint, whatever the widget declares.
    pub fn run_async(&self, name: &str, config: WidgetConfig, args: &[Value]) -> Result<String> {
        let (_, widget) = self.prepare(name, &config)?;
        self.render_deferred(name, widget.as_ref(), &config, args)
    }

    /// Render `name` synchronously, bypassing deferral and caching.
    pub fn run_immediate(&self, name: &str, config: WidgetConfig, args: &[Value]) -> Result<String> {
        let (class, widget) = self.prepare(name, &config)?;
        self.render_now(name, &class, widget.as_ref(), &config, args)
    }

    /// Render `name` through the cache with an explicit TTL.
    pub fn run_cached(
        &self,
        name: &str,
        config: WidgetConfig,
        args: &[Value],
        ttl: Duration,
    ) -> Result<String> {
        let (class, widget) = self.prepare(name, &config)?;
        self.render_cached(name, &class, widget.as_ref(), &config, args, ttl)
    }

    fn prepare(&self, name: &str, config: &WidgetConfig) -> Result<(WidgetClass, Box<dyn Widget>)> {
        let class = self.resolver.resolve(name)?;
        let widget = self.invoker.instantiate(&class, config.clone())?;
        Ok((class, widget))
    }

    fn container_class(&self, widget: &dyn Widget) -> String {
        widget.container_class().unwrap_or(&self.settings.container_class).to_string()
    }

    fn loader_script(
        &self,
        id: u64,
        name: &str,
        config: &WidgetConfig,
        args: &[Value],
        delay: Duration,
    ) -> Result<String> {
        let endpoint = self.settings.load_widget_path();
        LoaderScript {
            id,
            name,
            config,
            args,
            token: self.tokens.token(),
            endpoint: &endpoint,
            delay,
        }
        .render()
    }

    fn render_now(
        &self,
        name: &str,
        class: &WidgetClass,
        widget: &dyn Widget,
        config: &WidgetConfig,
        args: &[Value],
    ) -> Result<String> {
        let mut body = self.invoker.call(class, widget, args)?;
        let id = self.ids.next_id();

        if let Some(timeout) = widget.reload_timeout() {
            body.push_str(&self.loader_script(id, name, config, args, timeout)?);
        }

        Ok(wrap(id, &self.container_class(widget), &body))
    }

    fn render_deferred(
        &self,
        name: &str,
        widget: &dyn Widget,
        config: &WidgetConfig,
        args: &[Value],
    ) -> Result<String> {
        let delay = Duration::from_millis(self.settings.async_delay_ms);
        let id = self.ids.next_id();

        let mut body = widget.placeholder();
        body.push_str(&self.loader_script(id, name, config, args, delay)?);
        tracing::debug!("Deferred widget '{}' into container {}", name, id);

        Ok(wrap(id, &self.container_class(widget), &body))
    }

    fn render_cached(
        &self,
        name: &str,
        class: &WidgetClass,
        widget: &dyn Widget,
        config: &WidgetConfig,
        args: &[Value],
        ttl: Duration,
    ) -> Result<String> {
        let key = widget.cache_key(&cache_key(class, config, args));

        if let Some(markup) = self.cache.get(&key)? {
            tracing::debug!("Render cache hit for '{}' ({})", name, key);
            return Ok(markup);
        }

        tracing::debug!("Render cache miss for '{}' ({})", name, key);
        let markup = self.render_now(name, class, widget, config, args)?;
        self.cache.put(&key, &markup, ttl)?;
        Ok(markup)
    }
}
