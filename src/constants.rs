//! Global constants used throughout the widget renderer.
//!
//! Markup fragments, route defaults and cache parameters that are shared
//! between the factory, the follow-up endpoint and the CLI live here so the
//! generated HTML stays consistent across all of them.

use std::time::Duration;

/// Namespace used for widget names that match no custom namespace.
pub const DEFAULT_NAMESPACE: &str = "App\\Widgets";

/// Separator placed between namespace segments of a resolved class identifier.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// CSS class applied to the container element unless the widget overrides it.
pub const DEFAULT_CONTAINER_CLASS: &str = "arrilot-widget-container";

/// Prefix of the container element id; the container id is appended.
pub const CONTAINER_ID_PREFIX: &str = "widget-container-";

/// First container id handed out by a fresh (or reset) counter.
pub const FIRST_CONTAINER_ID: u64 = 1;

/// Route group prefix of the follow-up endpoint.
pub const DEFAULT_ROUTE_PREFIX: &str = "arrilot";

/// Path of the follow-up endpoint below the route prefix.
pub const LOAD_WIDGET_PATH: &str = "load-widget";

/// Prefix of every render cache key.
pub const CACHE_KEY_PREFIX: &str = "arrilot.widgets.";

/// Position assigned to group entries added without an explicit position.
pub const DEFAULT_GROUP_POSITION: i32 = 100;

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "WIDGETS_CONFIG_PATH";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "widgets.toml";

/// Default time-to-live for widgets cached without an explicit TTL (1 hour).
pub fn default_cache_ttl() -> Duration {
    Duration::from_secs(60 * 60)
}
