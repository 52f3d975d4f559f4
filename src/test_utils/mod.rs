//! Test utilities for the widget renderer
//!
//! Fixture widgets, a matching registry and configuration, and logging setup shared by
//! the unit and integration test suites.
//!
//! # Example
//!
//! ```rust,ignore
//! use widget_render::test_utils::{TestWidgets, init_test_logging};
//! use widget_render::widget::WidgetConfig;
//!
//! init_test_logging(None);
//! let widgets = TestWidgets::new();
//! let html = widgets.factory().run("slider", WidgetConfig::new(), &[]).unwrap();
//! assert!(html.contains("Slider was executed"));
//! ```

pub mod widgets;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::WidgetsConfig;
use crate::factory::{WidgetFactory, WidgetFactoryBuilder};
use crate::http::StaticToken;
use crate::invoker::ServicePool;
use crate::resolver::WidgetRegistry;
use widgets::{
    Slider, TestAsyncWidget, TestBrokenWidget, TestCachedWidget, TestDefaultSlider, TestFeed,
    TestMyClass, TestRepeatableFeed, TestWidgetWithCustomCssClass, TestWidgetWithDIInRun,
    TestWidgetWithParamsInRun,
};

/// Token the fixture factory embeds and accepts.
pub const TEST_TOKEN: &str = "token_stub";

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise `RUST_LOG`; with
/// neither, logging stays off.
///
/// ```bash
/// RUST_LOG=widget_render=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Namespaces used by the fixtures: default `App\Widgets`, with `slider` and
/// `testRepeatableFeed` living in `Tests\Dummies` and `testWidgetName` in the root.
pub fn test_config() -> WidgetsConfig {
    let mut config = WidgetsConfig::default();
    config.custom_namespaces.insert("slider".to_string(), "Tests\\Dummies".to_string());
    config.custom_namespaces.insert("testRepeatableFeed".to_string(), "Tests\\Dummies".to_string());
    config.custom_namespaces.insert("testWidgetName".to_string(), String::new());
    config
}

/// Fixture registry plus the run counter of [`TestCachedWidget`].
pub struct TestWidgets {
    cached_runs: Arc<AtomicUsize>,
}

impl TestWidgets {
    pub fn new() -> Self {
        Self {
            cached_runs: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times a cached fixture widget actually ran.
    pub fn cached_runs(&self) -> usize {
        self.cached_runs.load(Ordering::SeqCst)
    }

    pub fn registry(&self) -> WidgetRegistry {
        let runs = Arc::clone(&self.cached_runs);

        WidgetRegistry::new()
            .with("Tests\\Dummies\\Slider", Slider::new)
            .with("Tests\\Dummies\\TestRepeatableFeed", |_| TestRepeatableFeed)
            .with("App\\Widgets\\TestDefaultSlider", TestDefaultSlider::new)
            .with("App\\Widgets\\Profile\\TestNamespace\\TestFeed", |_| TestFeed)
            .with("App\\Widgets\\TestWidgetWithParamsInRun", |_| TestWidgetWithParamsInRun)
            .with("App\\Widgets\\TestWidgetWithDIInRun", |_| TestWidgetWithDIInRun)
            .with("App\\Widgets\\TestWidgetWithCustomCssClass", |_| TestWidgetWithCustomCssClass)
            .with("App\\Widgets\\TestCachedWidget", move |config| {
                TestCachedWidget::new(config, Arc::clone(&runs))
            })
            .with("App\\Widgets\\TestAsyncWidget", TestAsyncWidget::new)
            .with("App\\Widgets\\TestBrokenWidget", |_| TestBrokenWidget)
    }

    /// Builder preloaded with the fixture registry, a pool providing [`TestMyClass`] and
    /// the [`TEST_TOKEN`] token provider.
    pub fn builder(&self) -> WidgetFactoryBuilder {
        WidgetFactory::builder(test_config(), self.registry())
            .pool(Arc::new(ServicePool::new().with_instance(TestMyClass)))
            .tokens(Arc::new(StaticToken::new(TEST_TOKEN)))
    }

    pub fn factory(&self) -> WidgetFactory {
        self.builder().build()
    }
}

impl Default for TestWidgets {
    fn default() -> Self {
        Self::new()
    }
}
