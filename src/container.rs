//! Container element wrapping and container id allocation.
//!
//! Every rendered widget is wrapped in
//! `<div id="widget-container-<id>" style="display:inline" class="<class>">..</div>`,
//! where `<id>` comes from a [`ContainerIds`] counter.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::constants::{CONTAINER_ID_PREFIX, FIRST_CONTAINER_ID};

/// Monotonic container id counter.
///
/// Clones share the same underlying counter, so every factory clone serving one page
/// hands out distinct ids. Increments are atomic.
#[derive(Debug, Clone)]
pub struct ContainerIds {
    next: Arc<AtomicU64>,
}

impl ContainerIds {
    /// Counter whose first id is 1.
    pub fn new() -> Self {
        Self::starting_at(FIRST_CONTAINER_ID)
    }

    /// Counter whose first id is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(first)),
        }
    }

    /// Allocate the next id.
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// The id the next allocation will return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }

    /// Start over at 1.
    pub fn reset(&self) {
        self.reset_to(FIRST_CONTAINER_ID);
    }

    /// Make `first` the next id handed out.
    pub fn reset_to(&self, first: u64) {
        self.next.store(first, Ordering::SeqCst);
    }
}

impl Default for ContainerIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Element id of container `id`.
pub fn container_element_id(id: u64) -> String {
    format!("{CONTAINER_ID_PREFIX}{id}")
}

/// Wrap `body` in the container element for `id`.
pub fn wrap(id: u64, css_class: &str, body: &str) -> String {
    format!(
        "<div id=\"{}\" style=\"display:inline\" class=\"{}\">{}</div>",
        container_element_id(id),
        css_class,
        body
    )
}
