//! Copy-on-write tag → handler registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::tags::TagSet;

/// Immutable mapping from tag to handler.
///
/// [`extend`](Registry::extend) copies the map and returns a new registry;
/// the source registry is never touched, so builders holding it stay valid.
pub struct Registry<H> {
    handlers: Arc<HashMap<String, H>>,
}

impl<H> Registry<H> {
    pub fn empty() -> Self {
        Self {
            handlers: Arc::new(HashMap::new()),
        }
    }

    pub fn get(&self, tag: &str) -> Option<&H> {
        self.handlers.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    pub fn tags(&self) -> TagSet {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<H: Clone> Registry<H> {
    /// New registry with `tag` bound to `handler`. Last write wins.
    pub fn extend(&self, tag: impl Into<String>, handler: H) -> Self {
        let mut handlers = HashMap::clone(&self.handlers);
        handlers.insert(tag.into(), handler);
        Self {
            handlers: Arc::new(handlers),
        }
    }
}

impl<H> Clone for Registry<H> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<H> fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("tags", &self.tags())
            .finish()
    }
}
