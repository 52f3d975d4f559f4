//! Rendering through `WidgetFactory`: containers, injection, deferral and caching.

use serde_json::json;
use std::time::Duration;

use widget_render::core::WidgetError;
use widget_render::test_utils::{TestWidgets, init_test_logging};
use widget_render::widget::WidgetConfig;

fn container(id: u64, class: &str, body: &str) -> String {
    format!(r#"<div id="widget-container-{id}" style="display:inline" class="{class}">{body}</div>"#)
}

fn config(value: serde_json::Value) -> WidgetConfig {
    WidgetConfig::from_value(value).unwrap()
}

#[test]
fn renders_widget_from_custom_namespace() {
    init_test_logging(None);
    let factory = TestWidgets::new().factory();

    let html = factory.run("slider", WidgetConfig::new(), &[]).unwrap();
    assert_eq!(
        html,
        container(1, "arrilot-widget-container", "Slider was executed with $slides = 6")
    );
}

#[test]
fn call_site_config_overrides_widget_defaults() {
    let factory = TestWidgets::new().factory();

    let html = factory.run("slider", config(json!({"slides": 5})), &[]).unwrap();
    assert_eq!(
        html,
        container(1, "arrilot-widget-container", "Slider was executed with $slides = 5")
    );
}

#[test]
fn container_ids_increase_per_render_and_reset() {
    let factory = TestWidgets::new().factory();

    let first = factory.run("testDefaultSlider", WidgetConfig::new(), &[]).unwrap();
    let second = factory.run("testDefaultSlider", WidgetConfig::new(), &[]).unwrap();
    assert_eq!(
        first,
        container(1, "arrilot-widget-container", "Default test slider was executed with $slides = 6")
    );
    assert_eq!(
        second,
        container(2, "arrilot-widget-container", "Default test slider was executed with $slides = 6")
    );

    factory.reset_container_ids();
    let third = factory.run("testDefaultSlider", WidgetConfig::new(), &[]).unwrap();
    assert!(third.starts_with(r#"<div id="widget-container-1""#));
}

#[test]
fn clones_share_the_container_counter() {
    let factory = TestWidgets::new().factory();
    let clone = factory.clone();

    factory.run("slider", WidgetConfig::new(), &[]).unwrap();
    let html = clone.run("slider", WidgetConfig::new(), &[]).unwrap();

    assert!(html.starts_with(r#"<div id="widget-container-2""#));
}

#[test]
fn nested_names_in_every_notation() {
    let factory = TestWidgets::new().factory();
    let expected_body = "Feed was executed with $slides = 6";

    for (id, name) in
        ["profile.testNamespace.testFeed", "profile/testNamespace/testFeed", "Profile\\TestNamespace\\TestFeed"]
            .into_iter()
            .enumerate()
    {
        let html = factory.run(name, WidgetConfig::new(), &[]).unwrap();
        assert_eq!(html, container(id as u64 + 1, "arrilot-widget-container", expected_body), "{name}");
    }
}

#[test]
fn runtime_arguments_are_passed_to_run() {
    let factory = TestWidgets::new().factory();

    let html = factory.run("testWidgetWithParamsInRun", WidgetConfig::new(), &[json!("asc")]).unwrap();
    assert_eq!(
        html,
        container(1, "arrilot-widget-container", "TestWidgetWithParamsInRun was executed with $flag = asc")
    );
}

#[test]
fn missing_required_argument_is_unresolvable() {
    let factory = TestWidgets::new().factory();

    let err = factory.run("testWidgetWithParamsInRun", WidgetConfig::new(), &[]).unwrap_err();
    assert!(matches!(
        err,
        WidgetError::UnresolvableDependency { ref parameter, .. } if parameter == "flag"
    ));
    assert_eq!(factory.container_ids().peek(), 1);
}

#[test]
fn services_are_injected_from_the_pool() {
    let factory = TestWidgets::new().factory();

    let html = factory.run("testWidgetWithDIInRun", WidgetConfig::new(), &[]).unwrap();
    assert_eq!(html, container(1, "arrilot-widget-container", "bar"));
}

#[test]
fn service_without_binding_is_unresolvable() {
    let widgets = TestWidgets::new();
    let factory = widgets
        .builder()
        .pool(std::sync::Arc::new(widget_render::invoker::EmptyPool))
        .build();

    let err = factory.run("testWidgetWithDIInRun", WidgetConfig::new(), &[]).unwrap_err();
    assert!(matches!(err, WidgetError::UnresolvableDependency { .. }));
}

#[test]
fn widget_css_class_replaces_default() {
    let factory = TestWidgets::new().factory();

    let html = factory.run("testWidgetWithCustomCssClass", WidgetConfig::new(), &[]).unwrap();
    assert_eq!(html, container(1, "dummyClass", "Dummy Content"));
}

#[test]
fn unknown_widget_is_an_invalid_class_and_consumes_no_id() {
    let factory = TestWidgets::new().factory();

    let err = factory.run("testBadSlider", WidgetConfig::new(), &[]).unwrap_err();
    match err {
        WidgetError::InvalidWidgetClass {
            name,
            class,
            suggestions,
        } => {
            assert_eq!(name, "testBadSlider");
            assert_eq!(class, "App\\Widgets\\TestBadSlider");
            assert_eq!(suggestions.first().map(String::as_str), Some("App\\Widgets\\TestDefaultSlider"));
        }
        other => panic!("expected InvalidWidgetClass, got {other:?}"),
    }

    let html = factory.run("slider", WidgetConfig::new(), &[]).unwrap();
    assert!(html.starts_with(r#"<div id="widget-container-1""#));
}

#[test]
fn failing_widget_reports_render_failure() {
    let factory = TestWidgets::new().factory();

    let err = factory.run("testBrokenWidget", WidgetConfig::new(), &[]).unwrap_err();
    assert!(matches!(err, WidgetError::RenderFailed { .. }));
    assert_eq!(factory.container_ids().peek(), 1);
}

#[test]
fn run_async_emits_placeholder_and_loader_script() {
    let factory = TestWidgets::new().factory();

    let html = factory.run_async("slider", WidgetConfig::new(), &[]).unwrap();
    assert_eq!(
        html,
        container(
            1,
            "arrilot-widget-container",
            "<script type=\"text/javascript\">setTimeout( function() { $('#widget-container-1').load('/arrilot/load-widget', \
             {\"id\":1,\"name\":\"slider\",\"params\":\"[{}]\",\"_token\":\"token_stub\"}) }, 0)</script>"
        )
    );
}

#[test]
fn run_async_carries_config_and_arguments() {
    let factory = TestWidgets::new().factory();

    let html = factory.run_async("slider", config(json!({"slides": 5})), &[json!("asc")]).unwrap();
    assert!(html.contains(r#""params":"[{\"slides\":5},\"asc\"]""#), "{html}");
}

#[test]
fn run_async_does_not_invoke_the_widget() {
    let widgets = TestWidgets::new();
    let factory = widgets.factory();

    let html = factory.run_async("testCachedWidget", WidgetConfig::new(), &[]).unwrap();
    assert!(!html.contains("Cached widget was executed"));
    assert_eq!(widgets.cached_runs(), 0);
}

#[test]
fn deferred_widget_uses_its_placeholder_and_configured_delay() {
    let widgets = TestWidgets::new();
    let mut settings = widget_render::test_utils::test_config();
    settings.async_delay_ms = 250;
    let factory =
        widget_render::factory::WidgetFactory::builder(settings, widgets.registry()).build();

    let html = factory.run("testAsyncWidget", WidgetConfig::new(), &[]).unwrap();
    assert!(html.starts_with(
        r#"<div id="widget-container-1" style="display:inline" class="arrilot-widget-container">Loading...<script"#
    ));
    assert!(html.ends_with(" }, 250)</script></div>"));
    assert!(!html.contains("Async widget was executed"));
}

#[test]
fn reloadable_widget_appends_reload_script() {
    let factory = TestWidgets::new().factory();

    let html = factory.run("testRepeatableFeed", WidgetConfig::new(), &[]).unwrap();
    assert_eq!(
        html,
        container(
            1,
            "arrilot-widget-container",
            "Feed was executed with $slides = 6<script type=\"text/javascript\">setTimeout( function() { \
             $('#widget-container-1').load('/arrilot/load-widget', \
             {\"id\":1,\"name\":\"testRepeatableFeed\",\"params\":\"[{}]\",\"_token\":\"token_stub\"}) }, 10000)</script>"
        )
    );
}

#[test]
fn cache_hit_skips_invocation_and_id_allocation() {
    let widgets = TestWidgets::new();
    let factory = widgets.factory();

    let first = factory.run("testCachedWidget", WidgetConfig::new(), &[]).unwrap();
    let second = factory.run("testCachedWidget", WidgetConfig::new(), &[]).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first,
        container(1, "arrilot-widget-container", "Cached widget was executed with $slides = 6")
    );
    assert_eq!(widgets.cached_runs(), 1);
    assert_eq!(factory.container_ids().peek(), 2);
}

#[test]
fn different_parameters_use_different_cache_entries() {
    let widgets = TestWidgets::new();
    let factory = widgets.factory();

    let six = factory.run("testCachedWidget", WidgetConfig::new(), &[]).unwrap();
    let five = factory.run("testCachedWidget", config(json!({"slides": 5})), &[]).unwrap();

    assert_ne!(six, five);
    assert!(five.contains("$slides = 5"));
    assert_eq!(widgets.cached_runs(), 2);
}

#[test]
fn run_cached_forces_the_cache_path() {
    let factory = TestWidgets::new().factory();

    let first = factory.run_cached("slider", WidgetConfig::new(), &[], Duration::from_secs(60)).unwrap();
    let second = factory.run_cached("slider", WidgetConfig::new(), &[], Duration::from_secs(60)).unwrap();

    assert_eq!(first, second);
    assert_eq!(factory.container_ids().peek(), 2);
}

#[test]
fn expired_cache_entries_render_again() {
    let widgets = TestWidgets::new();
    let factory = widgets.factory();

    factory.run_cached("testCachedWidget", WidgetConfig::new(), &[], Duration::ZERO).unwrap();
    factory.run_cached("testCachedWidget", WidgetConfig::new(), &[], Duration::ZERO).unwrap();

    assert_eq!(widgets.cached_runs(), 2);
}

#[test]
fn unbounded_ttl_caches_forever() {
    let widgets = TestWidgets::new();
    let factory = widgets.factory();

    let first = factory.run_cached("testCachedWidget", WidgetConfig::new(), &[], Duration::MAX).unwrap();
    let second = factory.run_cached("testCachedWidget", WidgetConfig::new(), &[], Duration::MAX).unwrap();

    assert_eq!(first, second);
    assert_eq!(widgets.cached_runs(), 1);
    assert_eq!(factory.container_ids().peek(), 2);
}

#[test]
fn run_immediate_bypasses_cache_and_deferral() {
    let widgets = TestWidgets::new();
    let factory = widgets.factory();

    factory.run_immediate("testCachedWidget", WidgetConfig::new(), &[]).unwrap();
    factory.run_immediate("testCachedWidget", WidgetConfig::new(), &[]).unwrap();
    assert_eq!(widgets.cached_runs(), 2);

    let html = factory.run_immediate("testAsyncWidget", WidgetConfig::new(), &[]).unwrap();
    assert!(html.contains("Async widget was executed with $slides = 6"));
    assert!(!html.contains("<script"));
}
