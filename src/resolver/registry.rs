//! Registry mapping fully-qualified widget class identifiers to constructors.
//!
//! Stands in for dynamic class loading: a class is "loadable" exactly when a constructor
//! has been registered under its identifier. Lookups ignore case, like class names in
//! most host frameworks; the identifier as registered is what gets reported.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use strsim::levenshtein;

use super::WidgetClass;
use crate::widget::{Widget, WidgetConfig};

/// Maximum allowed Levenshtein distance as a percentage of the identifier length for
/// "did you mean" suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Constructor for one widget class.
pub type WidgetFactoryFn = Arc<dyn Fn(WidgetConfig) -> Box<dyn Widget> + Send + Sync>;

struct Registration {
    class: WidgetClass,
    constructor: WidgetFactoryFn,
}

/// Widget classes known to the application, populated at startup.
#[derive(Default)]
pub struct WidgetRegistry {
    entries: HashMap<String, Registration>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `constructor` under the fully-qualified `class` identifier.
    ///
    /// Registering the same identifier twice replaces the earlier constructor.
    pub fn register<F, W>(&mut self, class: &str, constructor: F) -> &mut Self
    where
        F: Fn(WidgetConfig) -> W + Send + Sync + 'static,
        W: Widget + 'static,
    {
        let constructor: WidgetFactoryFn =
            Arc::new(move |config| Box::new(constructor(config)) as Box<dyn Widget>);
        let class = WidgetClass::new(class);
        tracing::debug!("Registered widget class {}", class);
        self.entries.insert(
            class.as_str().to_lowercase(),
            Registration {
                class,
                constructor,
            },
        );
        self
    }

    /// Builder-style variant of [`register`](Self::register).
    #[must_use]
    pub fn with<F, W>(mut self, class: &str, constructor: F) -> Self
    where
        F: Fn(WidgetConfig) -> W + Send + Sync + 'static,
        W: Widget + 'static,
    {
        self.register(class, constructor);
        self
    }

    pub fn contains(&self, class: &str) -> bool {
        self.entries.contains_key(&class.to_lowercase())
    }

    /// The identifier `class` was registered under, if any.
    pub fn canonical(&self, class: &str) -> Option<WidgetClass> {
        self.entries.get(&class.to_lowercase()).map(|entry| entry.class.clone())
    }

    /// Construct a fresh instance of `class`. Returns `None` for unregistered classes.
    pub fn instantiate(&self, class: &WidgetClass, config: WidgetConfig) -> Option<Box<dyn Widget>> {
        self.entries
            .get(&class.as_str().to_lowercase())
            .map(|entry| (entry.constructor)(config))
    }

    /// Registered identifiers sorted alphabetically.
    pub fn classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> =
            self.entries.values().map(|entry| entry.class.as_str()).collect();
        classes.sort_unstable();
        classes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Up to three registered identifiers close to `class`.
    pub(crate) fn similar(&self, class: &str) -> Vec<String> {
        let mut scored: Vec<(&str, usize)> = self
            .entries
            .values()
            .map(|entry| (entry.class.as_str(), levenshtein(class, entry.class.as_str())))
            .collect();

        scored.sort_by(|(a, da), (b, db)| da.cmp(db).then_with(|| a.cmp(b)));

        scored
            .into_iter()
            .filter(|(_, dist)| *dist <= class.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .take(3)
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

impl fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetRegistry").field("classes", &self.classes()).finish()
    }
}
