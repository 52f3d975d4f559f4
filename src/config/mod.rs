//! Configuration management
//!
//! The widget renderer reads a single TOML file describing how widget names map to
//! classes and how the follow-up endpoint is exposed. See [`WidgetsConfig`] for the file
//! format and lookup order.
//!
//! # Example
//!
//! ```rust,no_run
//! use widget_render::config::WidgetsConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = WidgetsConfig::load().await?;
//! println!("Default namespace: {}", config.default_namespace);
//! println!("Follow-up endpoint: {}", config.load_widget_path());
//! # Ok(())
//! # }
//! ```

mod widgets;

pub use widgets::WidgetsConfig;
