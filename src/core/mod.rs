//! Core types shared by every part of the widget renderer.
//!
//! Currently this is the error vocabulary: [`WidgetError`] for typed failures and
//! [`ErrorContext`]/[`user_friendly_error`] for presenting them on the command line.

pub mod error;

pub use error::{ErrorContext, Result, WidgetError, user_friendly_error};
