// Registry of bound elements
//
// Binding is idempotent per key: the registry's own set decides whether an
// element is already bound, so a re-scan after new content is inserted skips
// it. The marker written on the element is for the page (styling, debugging);
// a marker left behind on an unbound element does not block a fresh bind.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use crate::modal::traits::DomElement;

pub struct BindingRegistry {
    marker: &'static str,
    bound: Mutex<HashSet<String>>,
}

impl BindingRegistry {
    pub fn new(marker: &'static str) -> Self {
        Self {
            marker,
            bound: Mutex::new(HashSet::new()),
        }
    }

    pub fn marker(&self) -> &'static str {
        self.marker
    }

    fn bound(&self) -> MutexGuard<'_, HashSet<String>> {
        self.bound.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Mark the element as bound. Returns `false` if it already was.
    pub fn bind(&self, element: &dyn DomElement) -> bool {
        let key = element.key();
        if !self.bound().insert(key) {
            return false;
        }
        if element.has_marker(self.marker) {
            tracing::debug!(element = %element.key(), marker = self.marker, "rebinding element with a stale marker");
        } else {
            element.set_marker(self.marker);
        }
        true
    }

    /// Forget an element (removed from the page)
    pub fn unbind(&self, key: &str) -> bool {
        self.bound().remove(key)
    }

    pub fn is_bound(&self, key: &str) -> bool {
        self.bound().contains(key)
    }

    pub fn len(&self) -> usize {
        self.bound().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound().is_empty()
    }
}
