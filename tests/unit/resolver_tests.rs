//! Name resolution against the fixture registry and namespaces.

use widget_render::core::WidgetError;
use widget_render::resolver::NamespaceConfig;
use widget_render::test_utils::{TestWidgets, test_config};

#[test]
fn resolves_registered_classes() {
    let factory = TestWidgets::new().factory();

    let cases = [
        ("slider", "Tests\\Dummies\\Slider"),
        ("testRepeatableFeed", "Tests\\Dummies\\TestRepeatableFeed"),
        ("testDefaultSlider", "App\\Widgets\\TestDefaultSlider"),
        ("profile.testNamespace.testFeed", "App\\Widgets\\Profile\\TestNamespace\\TestFeed"),
    ];

    for (name, expected) in cases {
        assert_eq!(factory.resolve(name).unwrap().as_str(), expected, "{name}");
    }
}

#[test]
fn resolution_is_case_insensitive_for_custom_keys() {
    let factory = TestWidgets::new().factory();
    assert_eq!(factory.resolve("Slider").unwrap().as_str(), "Tests\\Dummies\\Slider");
}

#[test]
fn resolution_is_deterministic() {
    let factory = TestWidgets::new().factory();
    let first = factory.resolve("profile.testNamespace.testFeed").unwrap();
    let second = factory.resolve("profile.testNamespace.testFeed").unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_custom_namespace_resolves_from_root() {
    let namespaces = NamespaceConfig::from_config(&test_config());
    assert_eq!(namespaces.qualify("testWidgetName").unwrap(), "TestWidgetName");
    assert_eq!(namespaces.qualify("testWidgetName.inner").unwrap(), "Inner");
}

#[test]
fn malformed_names_are_rejected() {
    let factory = TestWidgets::new().factory();

    for name in ["", "slider..feed", "9lives", "bad name", "slider."] {
        assert!(
            matches!(factory.resolve(name), Err(WidgetError::InvalidWidgetClass { .. })),
            "{name:?} should be rejected"
        );
    }
}
