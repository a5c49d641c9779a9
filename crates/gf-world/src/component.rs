//! Type-erased, heterogeneous per-object component storage.
//!
//! # Design
//!
//! Each game object owns one `ComponentMap`: at most one value per component
//! type, stored as `Box<dyn Any>` keyed by `TypeId`.  Lookups are a single
//! FxHash lookup.
//!
//! An absent component is not an error.  Callers branch on `None` and skip
//! whatever effect depended on it.
//!
//! # Usage
//!
//! ```rust
//! use gf_world::ComponentMap;
//!
//! #[derive(Debug, PartialEq)]
//! struct Armor(f32);
//!
//! let mut map = ComponentMap::new();
//! map.insert(Armor(2.0));
//! assert_eq!(map.get::<Armor>(), Some(&Armor(2.0)));
//! assert!(map.get::<u32>().is_none());
//! ```

use std::any::{Any, TypeId};

use rustc_hash::FxHashMap;

/// Registry of application-defined components, one value per type.
#[derive(Default)]
pub struct ComponentMap {
    map: FxHashMap<TypeId, Box<dyn Any>>,
}

impl ComponentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value`, returning the previous component of the same type.
    pub fn insert<T: 'static>(&mut self, value: T) -> Option<T> {
        self.map
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Remove and return component `T`.
    pub fn remove<T: 'static>(&mut self) -> Option<T> {
        self.map
            .remove(&TypeId::of::<T>())
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    // ── Read access ───────────────────────────────────────────────────────

    /// Shared reference to component `T`, or `None` if the object has none.
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
    }

    /// Mutable reference to component `T`.
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.map
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut::<T>())
    }

    // ── Metadata ──────────────────────────────────────────────────────────

    /// Number of distinct component types currently stored.
    pub fn type_count(&self) -> usize {
        self.map.len()
    }

    /// `true` if component `T` is present.
    pub fn contains<T: 'static>(&self) -> bool {
        self.map.contains_key(&TypeId::of::<T>())
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl std::fmt::Debug for ComponentMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentMap")
            .field("types", &self.map.len())
            .finish()
    }
}
