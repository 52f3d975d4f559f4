//! Widget configuration file (`widgets.toml`).
//!
//! # File Format
//!
//! ```toml
//! default_namespace = 'App\Widgets'
//! route_middleware = ["web"]
//! container_class = "arrilot-widget-container"
//! async_delay_ms = 0
//!
//! [custom_namespaces]
//! slider = 'Tests\Dummies'
//! legacy = ''              # resolve `legacy.*` names under the root namespace
//! ```
//!
//! The camelCase spellings `defaultNamespace` and `customNamespaces` are accepted too.
//!
//! # Location
//!
//! 1. An explicit path (the `--config` flag)
//! 2. `WIDGETS_CONFIG_PATH` environment variable
//! 3. `widgets.toml` in the working directory
//!
//! A missing file is not an error: defaults are used.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::{
    CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE, DEFAULT_CONTAINER_CLASS, DEFAULT_NAMESPACE,
    DEFAULT_ROUTE_PREFIX,
};

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_route_prefix() -> String {
    DEFAULT_ROUTE_PREFIX.to_string()
}

fn default_container_class() -> String {
    DEFAULT_CONTAINER_CLASS.to_string()
}

fn is_default_route_prefix(prefix: &String) -> bool {
    prefix == DEFAULT_ROUTE_PREFIX
}

fn is_default_container_class(class: &String) -> bool {
    class == DEFAULT_CONTAINER_CLASS
}

const fn is_zero(value: &u64) -> bool {
    *value == 0
}

/// Settings consumed by the widget factory and the follow-up endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetsConfig {
    /// Namespace for names without a custom override.
    #[serde(default = "default_namespace", alias = "defaultNamespace")]
    pub default_namespace: String,

    /// Widget key → namespace overrides. Keys match case-insensitively.
    #[serde(default, alias = "customNamespaces", skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_namespaces: BTreeMap<String, String>,

    /// Middleware names applied to the follow-up route.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub route_middleware: Vec<String>,

    /// Route group prefix of the follow-up endpoint.
    #[serde(default = "default_route_prefix", skip_serializing_if = "is_default_route_prefix")]
    pub route_prefix: String,

    /// Container CSS class used when a widget does not supply its own.
    #[serde(default = "default_container_class", skip_serializing_if = "is_default_container_class")]
    pub container_class: String,

    /// Delay before a deferred widget's follow-up request fires.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub async_delay_ms: u64,
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
            custom_namespaces: BTreeMap::new(),
            route_middleware: Vec::new(),
            route_prefix: default_route_prefix(),
            container_class: default_container_class(),
            async_delay_ms: 0,
        }
    }
}

impl WidgetsConfig {
    /// Load from the default location, falling back to defaults when no file exists.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` if given, else from the default location.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = path.unwrap_or_else(Self::default_path);
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No widget config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read widget config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse widget config from {}", path.display()))?;

        tracing::debug!(
            "Loaded widget config from {} ({} custom namespaces)",
            path.display(),
            config.custom_namespaces.len()
        );
        Ok(config)
    }

    /// Write this configuration to `path`, creating parent directories as needed.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize widget config")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write widget config to {}", path.display()))?;

        Ok(())
    }

    /// `WIDGETS_CONFIG_PATH` if set, otherwise `widgets.toml` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// A commented starting point for `widgets config init`.
    pub fn init_example() -> Self {
        let mut config = Self::default();
        config.custom_namespaces.insert("admin".to_string(), "App\\Admin\\Widgets".to_string());
        config.route_middleware.push("web".to_string());
        config
    }

    /// Full path of the follow-up endpoint, e.g. `/arrilot/load-widget`.
    pub fn load_widget_path(&self) -> String {
        let prefix = self.route_prefix.trim_matches('/');
        if prefix.is_empty() {
            format!("/{}", crate::constants::LOAD_WIDGET_PATH)
        } else {
            format!("/{prefix}/{}", crate::constants::LOAD_WIDGET_PATH)
        }
    }
}
