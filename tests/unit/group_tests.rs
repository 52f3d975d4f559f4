//! Widget groups rendered through a factory.

use widget_render::group::{WidgetGroup, WidgetGroupCollection};
use widget_render::test_utils::TestWidgets;
use widget_render::widget::WidgetConfig;

#[test]
fn group_renders_by_position_then_insertion() {
    let factory = TestWidgets::new().factory();
    let mut group = WidgetGroup::new("sidebar");

    group.add_widget("testDefaultSlider", WidgetConfig::new(), vec![]);
    group.position(10).add_widget("testWidgetWithCustomCssClass", WidgetConfig::new(), vec![]);
    group.add_widget("slider", WidgetConfig::new(), vec![]);

    let html = group.display(&factory).unwrap();

    let custom = html.find("Dummy Content").unwrap();
    let default_slider = html.find("Default test slider").unwrap();
    let slider = html.find("Slider was executed").unwrap();
    assert!(custom < default_slider);
    assert!(default_slider < slider);

    // Ids follow render order, not insertion order.
    assert!(html.starts_with(r#"<div id="widget-container-1" style="display:inline" class="dummyClass">"#));
}

#[test]
fn group_separator_joins_widgets() {
    let factory = TestWidgets::new().factory();
    let mut groups = WidgetGroupCollection::new();

    groups
        .group("footer")
        .set_separator("<hr>")
        .add_widget("testWidgetWithDIInRun", WidgetConfig::new(), vec![])
        .add_widget("testWidgetWithDIInRun", WidgetConfig::new(), vec![]);

    let html = groups.display("footer", &factory).unwrap();
    assert_eq!(html.matches("<hr>").count(), 1);
    assert_eq!(groups.get("footer").map(WidgetGroup::count), Some(2));
}

#[test]
fn async_group_entries_are_deferred() {
    let widgets = TestWidgets::new();
    let factory = widgets.factory();
    let mut groups = WidgetGroupCollection::new();

    groups.group("sidebar").add_async_widget("testCachedWidget", WidgetConfig::new(), vec![]);

    let html = groups.display("sidebar", &factory).unwrap();
    assert!(html.contains("$('#widget-container-1').load('/arrilot/load-widget'"));
    assert_eq!(widgets.cached_runs(), 0);
}

#[test]
fn unknown_or_empty_groups_render_nothing() {
    let factory = TestWidgets::new().factory();
    let mut groups = WidgetGroupCollection::new();

    assert_eq!(groups.display("missing", &factory).unwrap(), "");
    assert!(groups.group("empty").is_empty());
    assert_eq!(groups.display("empty", &factory).unwrap(), "");
}

#[test]
fn failing_entry_fails_the_group() {
    let factory = TestWidgets::new().factory();
    let mut group = WidgetGroup::new("broken");
    group.add_widget("slider", WidgetConfig::new(), vec![]);
    group.add_widget("testBadSlider", WidgetConfig::new(), vec![]);

    assert!(group.display(&factory).is_err());
}
