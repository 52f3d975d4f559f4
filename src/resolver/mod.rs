//! Widget name resolution.
//!
//! Translates the short names used at call sites into fully-qualified widget class
//! identifiers, then checks them against the [`WidgetRegistry`].
//!
//! # Resolution Rules
//!
//! Names containing a path separator (`.`, `/` or `\`) are split into segments. The first
//! segment is looked up case-insensitively in the custom namespace map:
//!
//! | Lookup result            | Identifier                              |
//! |--------------------------|-----------------------------------------|
//! | found, non-empty `ns`    | `ns\Seg2\...\SegN`                      |
//! | found, empty             | `Seg2\...\SegN` (root namespace)        |
//! | not found                | `default\Seg1\...\SegN`                 |
//!
//! Plain names are looked up whole: a match gives `ns\Name` (or `Name` for an empty
//! override), otherwise `default\Name`. Every emitted segment has its first character
//! upper-cased.
//!
//! ```rust
//! use widget_render::resolver::NamespaceConfig;
//!
//! let namespaces = NamespaceConfig::new("App\\Widgets").with_custom("slider", "Tests\\Dummies");
//!
//! assert_eq!(namespaces.qualify("slider").unwrap(), "Tests\\Dummies\\Slider");
//! assert_eq!(namespaces.qualify("testDefaultSlider").unwrap(), "App\\Widgets\\TestDefaultSlider");
//! assert_eq!(
//!     namespaces.qualify("profile.testNamespace.testFeed").unwrap(),
//!     "App\\Widgets\\Profile\\TestNamespace\\TestFeed"
//! );
//! ```

mod registry;

pub use registry::{WidgetFactoryFn, WidgetRegistry};

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::config::WidgetsConfig;
use crate::constants::NAMESPACE_SEPARATOR;
use crate::core::{Result, WidgetError};

const SEGMENT_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

static SEGMENT: OnceLock<Option<Regex>> = OnceLock::new();

fn is_valid_segment(segment: &str) -> bool {
    SEGMENT
        .get_or_init(|| Regex::new(SEGMENT_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(segment))
}

fn is_path_separator(c: char) -> bool {
    matches!(c, '.' | '/' | '\\')
}

/// Upper-case the first character, leaving the rest untouched.
fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A fully-qualified widget class identifier, e.g. `App\Widgets\Slider`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetClass(String);

impl WidgetClass {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last namespace segment, i.e. the bare class name.
    pub fn short_name(&self) -> &str {
        self.0.rsplit(NAMESPACE_SEPARATOR).next().unwrap_or(&self.0)
    }
}

impl fmt::Display for WidgetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Default namespace plus per-widget namespace overrides.
///
/// Override keys are stored lowercased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceConfig {
    default_namespace: String,
    custom: HashMap<String, String>,
}

impl NamespaceConfig {
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self {
            default_namespace: trim_namespace(&default_namespace.into()).to_string(),
            custom: HashMap::new(),
        }
    }

    /// Map widget key `key` to `namespace`. An empty namespace means the root namespace.
    #[must_use]
    pub fn with_custom(mut self, key: &str, namespace: &str) -> Self {
        self.custom.insert(key.to_lowercase(), trim_namespace(namespace).to_string());
        self
    }

    pub fn from_config(config: &WidgetsConfig) -> Self {
        config
            .custom_namespaces
            .iter()
            .fold(Self::new(config.default_namespace.as_str()), |namespaces, (key, ns)| {
                namespaces.with_custom(key, ns)
            })
    }

    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    fn custom_namespace(&self, key: &str) -> Option<&str> {
        self.custom.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Turn a widget name into a fully-qualified identifier.
    ///
    /// Pure: depends only on `name` and this configuration. Fails with
    /// [`WidgetError::InvalidWidgetClass`] for empty names, empty segments and segments
    /// that are not identifiers. Does not check that the class exists; see
    /// [`WidgetResolver::resolve`] for that.
    pub fn qualify(&self, name: &str) -> Result<String> {
        let segments: Vec<&str> = name.split(is_path_separator).collect();
        if segments.iter().any(|segment| !is_valid_segment(segment)) {
            return Err(WidgetError::InvalidWidgetClass {
                name: name.to_string(),
                class: String::new(),
                suggestions: Vec::new(),
            });
        }

        let (namespace, rest) = match self.custom_namespace(segments[0]) {
            Some(namespace) if segments.len() > 1 => (namespace, &segments[1..]),
            Some(namespace) => (namespace, &segments[..]),
            None => (self.default_namespace.as_str(), &segments[..]),
        };

        let mut parts: Vec<String> = Vec::with_capacity(rest.len() + 1);
        if !namespace.is_empty() {
            parts.push(namespace.to_string());
        }
        parts.extend(rest.iter().map(|segment| capitalize(segment)));

        Ok(parts.join(&NAMESPACE_SEPARATOR.to_string()))
    }
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_NAMESPACE)
    }
}

fn trim_namespace(namespace: &str) -> &str {
    namespace.trim_matches(NAMESPACE_SEPARATOR)
}

/// Resolves widget names to registered widget classes.
#[derive(Clone)]
pub struct WidgetResolver {
    namespaces: NamespaceConfig,
    registry: Arc<WidgetRegistry>,
}

impl WidgetResolver {
    pub fn new(namespaces: NamespaceConfig, registry: Arc<WidgetRegistry>) -> Self {
        Self {
            namespaces,
            registry,
        }
    }

    pub fn namespaces(&self) -> &NamespaceConfig {
        &self.namespaces
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// Qualify `name` and check that the class is registered.
    pub fn resolve(&self, name: &str) -> Result<WidgetClass> {
        let class = self.namespaces.qualify(name)?;

        match self.registry.canonical(&class) {
            Some(registered) => {
                tracing::debug!("Resolved widget '{}' to {}", name, registered);
                Ok(registered)
            }
            None => {
                tracing::debug!("Widget '{}' resolved to unregistered class {}", name, class);
                let suggestions = self.registry.similar(&class);
                Err(WidgetError::InvalidWidgetClass {
                    name: name.to_string(),
                    class,
                    suggestions,
                })
            }
        }
    }
}
