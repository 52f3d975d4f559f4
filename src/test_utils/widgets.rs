//! Fixture widgets used across the test suites.

use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::widget::{Parameter, RenderMode, RunArguments, Widget, WidgetConfig};

fn slides(config: &WidgetConfig) -> i64 {
    config.get_i64("slides").unwrap_or_default()
}

fn with_slides(config: WidgetConfig) -> WidgetConfig {
    config.with_defaults(json!({"slides": 6}))
}

pub struct Slider {
    config: WidgetConfig,
}

impl Slider {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config: with_slides(config),
        }
    }
}

impl Widget for Slider {
    fn run(&self, _args: &RunArguments) -> anyhow::Result<String> {
        Ok(format!("Slider was executed with $slides = {}", slides(&self.config)))
    }
}

pub struct TestDefaultSlider {
    config: WidgetConfig,
}

impl TestDefaultSlider {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config: with_slides(config),
        }
    }
}

impl Widget for TestDefaultSlider {
    fn run(&self, _args: &RunArguments) -> anyhow::Result<String> {
        Ok(format!("Default test slider was executed with $slides = {}", slides(&self.config)))
    }
}

/// Nested widget living at `App\Widgets\Profile\TestNamespace\TestFeed`.
///
/// Ignores call-site configuration, so it always reports six slides.
pub struct TestFeed;

impl Widget for TestFeed {
    fn run(&self, _args: &RunArguments) -> anyhow::Result<String> {
        Ok("Feed was executed with $slides = 6".to_string())
    }
}

pub struct TestWidgetWithParamsInRun;

impl Widget for TestWidgetWithParamsInRun {
    fn parameters(&self) -> Vec<Parameter> {
        vec![Parameter::required("flag")]
    }

    fn run(&self, args: &RunArguments) -> anyhow::Result<String> {
        let flag = args.str(0).unwrap_or_default();
        Ok(format!("TestWidgetWithParamsInRun was executed with $flag = {flag}"))
    }
}

/// Service injected into [`TestWidgetWithDIInRun`].
#[derive(Debug, Default)]
pub struct TestMyClass;

impl TestMyClass {
    pub fn foo(&self) -> &'static str {
        "bar"
    }
}

pub struct TestWidgetWithDIInRun;

impl Widget for TestWidgetWithDIInRun {
    fn parameters(&self) -> Vec<Parameter> {
        vec![Parameter::service::<TestMyClass>("class")]
    }

    fn run(&self, args: &RunArguments) -> anyhow::Result<String> {
        let class = args
            .service::<TestMyClass>(0)
            .ok_or_else(|| anyhow::anyhow!("argument 0 is not a TestMyClass"))?;
        Ok(class.foo().to_string())
    }
}

pub struct TestWidgetWithCustomCssClass;

impl Widget for TestWidgetWithCustomCssClass {
    fn container_class(&self) -> Option<&str> {
        Some("dummyClass")
    }

    fn run(&self, _args: &RunArguments) -> anyhow::Result<String> {
        Ok("Dummy Content".to_string())
    }
}

/// Cached widget (default TTL) counting how often its entry point actually runs.
pub struct TestCachedWidget {
    config: WidgetConfig,
    runs: Arc<AtomicUsize>,
}

impl TestCachedWidget {
    pub fn new(config: WidgetConfig, runs: Arc<AtomicUsize>) -> Self {
        Self {
            config: with_slides(config),
            runs,
        }
    }
}

impl Widget for TestCachedWidget {
    fn render_mode(&self) -> RenderMode {
        RenderMode::cached()
    }

    fn run(&self, _args: &RunArguments) -> anyhow::Result<String> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(format!("Cached widget was executed with $slides = {}", slides(&self.config)))
    }
}

/// Widget that reloads itself every ten seconds.
pub struct TestRepeatableFeed;

impl Widget for TestRepeatableFeed {
    fn reload_timeout(&self) -> Option<Duration> {
        Some(Duration::from_secs(10))
    }

    fn run(&self, _args: &RunArguments) -> anyhow::Result<String> {
        Ok("Feed was executed with $slides = 6".to_string())
    }
}

/// Widget declared as deferred, showing a placeholder until loaded.
pub struct TestAsyncWidget {
    config: WidgetConfig,
}

impl TestAsyncWidget {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config: with_slides(config),
        }
    }
}

impl Widget for TestAsyncWidget {
    fn render_mode(&self) -> RenderMode {
        RenderMode::Deferred
    }

    fn placeholder(&self) -> String {
        "Loading...".to_string()
    }

    fn run(&self, _args: &RunArguments) -> anyhow::Result<String> {
        Ok(format!("Async widget was executed with $slides = {}", slides(&self.config)))
    }
}

/// Widget whose entry point always fails.
pub struct TestBrokenWidget;

impl Widget for TestBrokenWidget {
    fn run(&self, _args: &RunArguments) -> anyhow::Result<String> {
        anyhow::bail!("broken on purpose")
    }
}
