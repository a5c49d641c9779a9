//! Named prototypes: configure once, stamp many independent copies.

use indexmap::IndexMap;

use crate::{Pool, Poolable};

/// Registry of pre-configured template instances keyed by name.
///
/// Templates are parsed from configuration once at load time.  Each
/// [`instantiate`](Self::instantiate) draws a pooled instance and deep-copies
/// the template into it, so spawning never re-reads configuration and the
/// copies never share state with the template or each other.
pub struct Prototypes<T: Poolable> {
    templates: IndexMap<String, T>,
}

impl<T: Poolable> Default for Prototypes<T> {
    fn default() -> Self {
        Self { templates: IndexMap::new() }
    }
}

impl<T: Poolable> Prototypes<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `template` under `name`, returning the template it replaced.
    pub fn register(&mut self, name: impl Into<String>, template: T) -> Option<T> {
        let name = name.into();
        let replaced = self.templates.insert(name.clone(), template);
        if replaced.is_some() {
            tracing::warn!(%name, "prototype replaced");
        }
        replaced
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.templates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Stamp a fresh copy of the template `name`.  `None` if unknown.
    pub fn instantiate(&self, name: &str, pool: &mut Pool<T>) -> Option<T> {
        self.templates.get(name).map(|template| pool.instantiate(template))
    }

    /// Template names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
