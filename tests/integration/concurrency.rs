//! Factories shared between threads.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use widget_render::cache::{InMemoryCache, RenderCache};
use widget_render::container::ContainerIds;
use widget_render::test_utils::TestWidgets;
use widget_render::widget::WidgetConfig;

fn container_id(html: &str) -> u64 {
    let rest = &html[r#"<div id="widget-container-"#.len()..];
    rest[..rest.find('"').unwrap()].parse().unwrap()
}

#[test]
fn concurrent_renders_get_distinct_ids() {
    let factory = TestWidgets::new().factory();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let factory = factory.clone();
            thread::spawn(move || {
                (0..25)
                    .map(|_| container_id(&factory.run("slider", WidgetConfig::new(), &[]).unwrap()))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: Vec<u64> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
    let unique: HashSet<u64> = ids.iter().copied().collect();

    assert_eq!(ids.len(), 200);
    assert_eq!(unique.len(), 200);
    assert_eq!(unique.iter().min(), Some(&1));
    assert_eq!(unique.iter().max(), Some(&200));
}

#[test]
fn factories_can_share_one_counter() {
    let ids = ContainerIds::new();
    let widgets = TestWidgets::new();
    let page = widgets.builder().container_ids(ids.clone()).build();
    let sidebar = widgets.builder().container_ids(ids.clone()).build();

    page.run("slider", WidgetConfig::new(), &[]).unwrap();
    let html = sidebar.run("slider", WidgetConfig::new(), &[]).unwrap();

    assert_eq!(container_id(&html), 2);
    assert_eq!(ids.peek(), 3);
}

#[test]
fn shared_cache_serves_every_factory() {
    let cache = Arc::new(InMemoryCache::new());
    let widgets = TestWidgets::new();
    let first = widgets.builder().cache(cache.clone()).build();
    let second = widgets.builder().cache(cache.clone()).build();

    let a = first.run("testCachedWidget", WidgetConfig::new(), &[]).unwrap();
    let b = second.run("testCachedWidget", WidgetConfig::new(), &[]).unwrap();

    assert_eq!(a, b);
    assert_eq!(widgets.cached_runs(), 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.stats(), (1, 1));
}

#[test]
fn forgetting_an_entry_forces_a_render() {
    let cache = Arc::new(InMemoryCache::new());
    let widgets = TestWidgets::new();
    let factory = widgets.builder().cache(cache.clone()).build();

    factory.run("testCachedWidget", WidgetConfig::new(), &[]).unwrap();
    let class = factory.resolve("testCachedWidget").unwrap();
    let key = widget_render::cache::cache_key(&class, &WidgetConfig::new(), &[]);
    cache.forget(&key).unwrap();

    factory.run("testCachedWidget", WidgetConfig::new(), &[]).unwrap();
    assert_eq!(widgets.cached_runs(), 2);
}

#[test]
fn concurrent_cached_renders_agree() {
    let widgets = TestWidgets::new();
    let factory = widgets.factory();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let factory = factory.clone();
            thread::spawn(move || factory.run("testCachedWidget", WidgetConfig::new(), &[]).unwrap())
        })
        .collect();
    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Racing misses may each render, but every later read sees a stored value.
    let cached = factory.run("testCachedWidget", WidgetConfig::new(), &[]).unwrap();
    assert!(results.contains(&cached));
    assert!(widgets.cached_runs() <= 4);
}
