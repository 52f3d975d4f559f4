//! Integration test suite for widget-render
//!
//! End-to-end tests: a deferred render followed by its follow-up request, shared caches
//! and counters across threads, and the `widgets` binary.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: The `widgets` binary, driven with `assert_cmd`
//! - **concurrency**: Container ids and caches shared between threads
//! - **load_widget**: Deferred render → follow-up request → final markup

mod concurrency;
mod load_widget;
