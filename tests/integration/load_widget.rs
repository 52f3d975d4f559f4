//! Deferred renders and the follow-up endpoint working together.

use serde_json::json;

use widget_render::core::WidgetError;
use widget_render::http::{LoadWidgetHandler, LoadWidgetRequest};
use widget_render::test_utils::{TEST_TOKEN, TestWidgets, init_test_logging};
use widget_render::widget::WidgetConfig;

/// Pull the JSON payload out of an embedded loader script.
fn embedded_request(html: &str) -> LoadWidgetRequest {
    let start = html.find("', {").map(|i| i + 3).expect("loader payload start");
    let end = html.rfind("}) }").map(|i| i + 1).expect("loader payload end");
    serde_json::from_str(&html[start..end]).expect("loader payload is JSON")
}

#[test]
fn deferred_render_round_trips_through_the_handler() {
    init_test_logging(None);
    let factory = TestWidgets::new().factory();

    factory.run("slider", WidgetConfig::new(), &[]).unwrap();
    let placeholder = factory
        .run_async("slider", WidgetConfig::from_value(json!({"slides": 5})).unwrap(), &[])
        .unwrap();
    assert!(placeholder.starts_with(r#"<div id="widget-container-2""#));

    let request = embedded_request(&placeholder);
    assert_eq!(request.id, 2);
    assert_eq!(request.name, "slider");
    assert_eq!(request.token, TEST_TOKEN);

    // The follow-up runs in a fresh request: new factory, same registry and settings.
    let handler = LoadWidgetHandler::new(TestWidgets::new().factory());
    let html = handler.handle(&request).unwrap();

    assert_eq!(
        html,
        r#"<div id="widget-container-2" style="display:inline" class="arrilot-widget-container">Slider was executed with $slides = 5</div>"#
    );
}

#[test]
fn handler_passes_runtime_arguments() {
    let factory = TestWidgets::new().factory();
    let placeholder =
        factory.run_async("testWidgetWithParamsInRun", WidgetConfig::new(), &[json!("desc")]).unwrap();

    let handler = LoadWidgetHandler::new(factory);
    let html = handler.handle(&embedded_request(&placeholder)).unwrap();

    assert!(html.contains("TestWidgetWithParamsInRun was executed with $flag = desc"));
}

#[test]
fn handler_renders_deferred_widgets_immediately() {
    let factory = TestWidgets::new().factory();
    let placeholder = factory.run("testAsyncWidget", WidgetConfig::new(), &[]).unwrap();
    assert!(placeholder.contains("Loading..."));

    let handler = LoadWidgetHandler::new(factory);
    let html = handler.handle(&embedded_request(&placeholder)).unwrap();

    assert_eq!(
        html,
        r#"<div id="widget-container-1" style="display:inline" class="arrilot-widget-container">Async widget was executed with $slides = 6</div>"#
    );
}

#[test]
fn handler_rejects_a_wrong_token() {
    let handler = LoadWidgetHandler::new(TestWidgets::new().factory());
    let request = LoadWidgetRequest {
        id: 1,
        name: "slider".to_string(),
        params: "[{}]".to_string(),
        token: "forged".to_string(),
    };

    let err = handler.handle(&request).unwrap_err();
    assert!(matches!(err, WidgetError::TokenMismatch { .. }));
}

#[test]
fn handler_without_token_provider_rejects_everything() {
    let widgets = TestWidgets::new();
    let factory = widget_render::factory::WidgetFactory::new(
        widget_render::test_utils::test_config(),
        widgets.registry(),
    );
    let handler = LoadWidgetHandler::new(factory);

    let body = r#"{"id":1,"name":"slider","params":"[{}]","_token":""}"#;
    assert!(matches!(handler.handle_json(body), Err(WidgetError::TokenMismatch { .. })));
}

#[test]
fn handler_accepts_json_bodies() {
    let handler = LoadWidgetHandler::new(TestWidgets::new().factory());
    let body = format!(r#"{{"id":7,"name":"testDefaultSlider","params":"","_token":"{TEST_TOKEN}"}}"#);

    let html = handler.handle_json(&body).unwrap();
    assert!(html.starts_with(r#"<div id="widget-container-7""#));
    assert!(html.contains("Default test slider was executed with $slides = 6"));
}

#[test]
fn handler_reports_malformed_requests() {
    let handler = LoadWidgetHandler::new(TestWidgets::new().factory());

    assert!(matches!(handler.handle_json("not json"), Err(WidgetError::InvalidRequest { .. })));

    let body = format!(r#"{{"id":1,"name":"slider","params":"42","_token":"{TEST_TOKEN}"}}"#);
    assert!(matches!(handler.handle_json(&body), Err(WidgetError::InvalidRequest { .. })));
}

#[test]
fn handler_reports_unknown_widgets() {
    let handler = LoadWidgetHandler::new(TestWidgets::new().factory());
    let body = format!(r#"{{"id":1,"name":"testBadSlider","params":"[{{}}]","_token":"{TEST_TOKEN}"}}"#);

    assert!(matches!(handler.handle_json(&body), Err(WidgetError::InvalidWidgetClass { .. })));
}

#[test]
fn route_uses_configured_prefix_and_middleware() {
    let widgets = TestWidgets::new();
    let mut settings = widget_render::test_utils::test_config();
    settings.route_prefix = "widgets".to_string();
    settings.route_middleware = vec!["web".to_string()];
    let factory = widget_render::factory::WidgetFactory::new(settings, widgets.registry());

    let route = LoadWidgetHandler::new(factory.clone()).route();
    assert_eq!(route.method, "GET");
    assert_eq!(route.path, "/widgets/load-widget");
    assert_eq!(route.middleware, vec!["web"]);

    let placeholder = factory.run_async("slider", WidgetConfig::new(), &[]).unwrap();
    assert!(placeholder.contains(".load('/widgets/load-widget'"));
}
