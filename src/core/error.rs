//! Error handling for the widget renderer
//!
//! This module provides the error type returned by every fallible widget operation and the
//! user-friendly reporting used by the `widgets` binary. The design follows two rules:
//! 1. **Strongly-typed errors** so callers can react to a specific failure
//!    (an unknown widget is not the same as a missing dependency)
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Error Categories
//!
//! - **Resolution**: [`WidgetError::InvalidWidgetClass`]
//! - **Invocation**: [`WidgetError::UnresolvableDependency`], [`WidgetError::RenderFailed`],
//!   [`WidgetError::InvalidParameters`]
//! - **Follow-up requests**: [`WidgetError::TokenMismatch`], [`WidgetError::InvalidRequest`]
//! - **Collaborators**: [`WidgetError::CacheError`], [`WidgetError::ConfigError`]
//! - **Conversions**: [`std::io::Error`], [`toml::de::Error`] and [`serde_json::Error`]
//!
//! Resolution and invocation failures are never retried or swallowed: they propagate to
//! the caller before any container id is allocated, so no partial markup is produced.
//!
//! # Examples
//!
//! ```rust,no_run
//! use widget_render::core::{WidgetError, user_friendly_error};
//!
//! let error = WidgetError::InvalidWidgetClass {
//!     name: "testBadSlider".to_string(),
//!     class: "App\\Widgets\\TestBadSlider".to_string(),
//!     suggestions: vec!["App\\Widgets\\TestDefaultSlider".to_string()],
//! };
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for widget operations
///
/// # Error Categories
///
/// ## Resolution
/// - [`InvalidWidgetClass`] - The name is malformed or resolves to an unregistered class
///
/// ## Invocation
/// - [`UnresolvableDependency`] - An entry-point parameter has no runtime argument,
///   no default, and the dependency pool cannot produce it
/// - [`RenderFailed`] - The widget's own `run` returned an error
/// - [`InvalidParameters`] - Configuration parameters are not a JSON object
///
/// ## Follow-up Requests
/// - [`TokenMismatch`] - Anti-forgery token rejected
/// - [`InvalidRequest`] - Request payload could not be decoded
///
/// [`InvalidWidgetClass`]: WidgetError::InvalidWidgetClass
/// [`UnresolvableDependency`]: WidgetError::UnresolvableDependency
/// [`RenderFailed`]: WidgetError::RenderFailed
/// [`InvalidParameters`]: WidgetError::InvalidParameters
/// [`TokenMismatch`]: WidgetError::TokenMismatch
/// [`InvalidRequest`]: WidgetError::InvalidRequest
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Widget name could not be turned into a loadable widget class
    ///
    /// Raised when the name is empty or malformed, or when the fully-qualified identifier
    /// it resolves to has no registered factory.
    ///
    /// # Fields
    /// - `name`: The widget name as written at the call site
    /// - `class`: The identifier the name resolved to (empty when malformed)
    /// - `suggestions`: Registered identifiers close to `class`
    #[error("Widget class \"{class}\" for widget \"{name}\" is not a valid widget class")]
    InvalidWidgetClass {
        /// The widget name as written at the call site
        name: String,
        /// The identifier the name resolved to
        class: String,
        /// Registered identifiers close to `class`
        suggestions: Vec<String>,
    },

    /// A run parameter could not be supplied
    #[error("Unresolvable dependency '{parameter}' ({type_name}) for widget {widget}")]
    UnresolvableDependency {
        /// Class identifier of the widget being invoked
        widget: String,
        /// Name of the declared run parameter
        parameter: String,
        /// Type requested from the dependency pool, or `value` for plain parameters
        type_name: String,
    },

    /// Widget parameters were not a JSON object
    #[error("Invalid widget parameters: {reason}")]
    InvalidParameters {
        /// Description of what was wrong with the parameters
        reason: String,
    },

    /// The widget's rendering entry point failed
    #[error("Widget {class} failed to render")]
    RenderFailed {
        /// Class identifier of the failing widget
        class: String,
        /// Error returned by the widget
        #[source]
        source: anyhow::Error,
    },

    /// Anti-forgery token of a follow-up request was rejected
    #[error("Anti-forgery token mismatch for widget \"{name}\"")]
    TokenMismatch {
        /// Widget name carried by the rejected request
        name: String,
    },

    /// Follow-up request payload could not be decoded
    #[error("Invalid load-widget request: {reason}")]
    InvalidRequest {
        /// What was wrong with the payload
        reason: String,
    },

    /// Cache collaborator failed to read or store an entry
    #[error("Render cache error for key {key}: {message}")]
    CacheError {
        /// Cache key involved in the failed operation
        key: String,
        /// Backend error description
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Convenience alias for results of widget operations.
pub type Result<T, E = WidgetError> = std::result::Result<T, E>;

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from any displayable error
    #[must_use]
    pub fn new(error: impl fmt::Display) -> Self {
        Self {
            message: error.to_string(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`WidgetError`] variants, IO errors and TOML syntax errors; anything else
/// is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<WidgetError>() {
        Ok(widget_error) => return create_error_context(widget_error),
        Err(other) => other,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(io_error)
                    .with_suggestion("Check the ownership and permissions of the config file");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(io_error)
                    .with_suggestion("Check that the file exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(toml_error)
            .with_suggestion("Check the TOML syntax of your widgets.toml file")
            .with_details("Namespaces containing backslashes must be quoted as literal strings ('App\\Widgets') or escaped (\"App\\\\Widgets\")");
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(message)
}

fn create_error_context(error: WidgetError) -> ErrorContext {
    match &error {
        WidgetError::InvalidWidgetClass {
            suggestions,
            ..
        } => {
            let ctx = ErrorContext::new(&error).with_details(
                "Widget names are resolved against the default namespace unless their first segment matches a custom namespace",
            );
            if suggestions.is_empty() {
                ctx.with_suggestion("Register the widget class or check the configured namespaces with 'widgets config show'")
            } else {
                ctx.with_suggestion(format!("Did you mean: {}", suggestions.join(", ")))
            }
        }
        WidgetError::UnresolvableDependency {
            ..
        } => ErrorContext::new(&error).with_suggestion(
            "Pass the argument explicitly at the call site, give the parameter a default, or bind the type in the dependency pool",
        ),
        WidgetError::TokenMismatch {
            ..
        } => ErrorContext::new(&error)
            .with_details("Follow-up requests must carry the token embedded by the deferred render"),
        WidgetError::RenderFailed {
            source,
            ..
        } => ErrorContext::new(&error).with_details(source.to_string()),
        WidgetError::TomlError(_) => ErrorContext::new(&error)
            .with_suggestion("Check the TOML syntax of your widgets.toml file"),
        _ => ErrorContext::new(&error),
    }
}
