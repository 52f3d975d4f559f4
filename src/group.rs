//! Widget groups: named, ordered collections of widgets rendered together.
//!
//! A layout can declare a group (say, `sidebar`) and let different parts of the
//! application contribute widgets to it; the layout then displays the group in one call.
//!
//! ```rust
//! use widget_render::group::WidgetGroupCollection;
//! use widget_render::widget::WidgetConfig;
//!
//! let mut groups = WidgetGroupCollection::new();
//! groups.group("sidebar").position(5).add_widget("recentNews", WidgetConfig::new(), vec![]);
//! groups.group("sidebar").add_async_widget("weather", WidgetConfig::new(), vec![]);
//!
//! assert_eq!(groups.group("sidebar").count(), 2);
//! ```

use serde_json::Value;
use std::collections::HashMap;

use crate::constants::DEFAULT_GROUP_POSITION;
use crate::core::Result;
use crate::factory::WidgetFactory;
use crate::widget::WidgetConfig;

#[derive(Debug, Clone)]
struct GroupEntry {
    position: i32,
    name: String,
    config: WidgetConfig,
    args: Vec<Value>,
    deferred: bool,
}

/// One named group of widgets.
#[derive(Debug, Clone)]
pub struct WidgetGroup {
    name: String,
    separator: String,
    next_position: i32,
    entries: Vec<GroupEntry>,
}

impl WidgetGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            separator: String::new(),
            next_position: DEFAULT_GROUP_POSITION,
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the next widget added. Lower positions display first.
    pub fn position(&mut self, position: i32) -> &mut Self {
        self.next_position = position;
        self
    }

    /// Markup placed between rendered widgets.
    pub fn set_separator(&mut self, separator: impl Into<String>) -> &mut Self {
        self.separator = separator.into();
        self
    }

    pub fn add_widget(&mut self, name: impl Into<String>, config: WidgetConfig, args: Vec<Value>) -> &mut Self {
        self.push(name.into(), config, args, false)
    }

    /// Add a widget that always renders through the follow-up endpoint.
    pub fn add_async_widget(
        &mut self,
        name: impl Into<String>,
        config: WidgetConfig,
        args: Vec<Value>,
    ) -> &mut Self {
        self.push(name.into(), config, args, true)
    }

    fn push(&mut self, name: String, config: WidgetConfig, args: Vec<Value>, deferred: bool) -> &mut Self {
        self.entries.push(GroupEntry {
            position: self.next_position,
            name,
            config,
            args,
            deferred,
        });
        self.next_position = DEFAULT_GROUP_POSITION;
        self
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render every widget, ordered by position then insertion, joined by the separator.
    ///
    /// Stops at the first failing widget and returns its error.
    pub fn display(&self, factory: &WidgetFactory) -> Result<String> {
        let mut ordered: Vec<&GroupEntry> = self.entries.iter().collect();
        ordered.sort_by_key(|entry| entry.position);

        let rendered = ordered
            .into_iter()
            .map(|entry| {
                if entry.deferred {
                    factory.run_async(&entry.name, entry.config.clone(), &entry.args)
                } else {
                    factory.run(&entry.name, entry.config.clone(), &entry.args)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Displayed widget group '{}' ({} widgets)", self.name, rendered.len());
        Ok(rendered.join(&self.separator))
    }
}

/// All widget groups of a page, created on first use.
#[derive(Debug, Clone, Default)]
pub struct WidgetGroupCollection {
    groups: HashMap<String, WidgetGroup>,
}

impl WidgetGroupCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The group called `name`, created empty if it does not exist yet.
    pub fn group(&mut self, name: &str) -> &mut WidgetGroup {
        self.groups.entry(name.to_string()).or_insert_with(|| WidgetGroup::new(name))
    }

    pub fn get(&self, name: &str) -> Option<&WidgetGroup> {
        self.groups.get(name)
    }

    /// Render group `name`; an unknown group renders as an empty string.
    pub fn display(&self, name: &str, factory: &WidgetFactory) -> Result<String> {
        match self.groups.get(name) {
            Some(group) => group.display(factory),
            None => Ok(String::new()),
        }
    }
}
