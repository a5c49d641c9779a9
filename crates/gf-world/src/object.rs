//! A single game object: transform, components, metadata, and event signals.

use rustc_hash::FxHashMap;

use gf_core::{ObjectId, Signal, Vec2};

use crate::{ComponentMap, Transform};

// ── Events ────────────────────────────────────────────────────────────────────

/// Payload of [`ObjectEvents::damaged`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct DamageEvent {
    pub amount:    f32,
    pub remaining: f32,
}

/// Signals raised by the world on behalf of one object.
///
/// Behaviors subscribe during `initialize` and keep the returned
/// `Subscription`; dropping it (on `destroy`) revokes delivery.
#[derive(Debug, Default)]
pub struct ObjectEvents {
    /// Health was reduced.
    pub damaged:  Signal<DamageEvent>,
    /// Health reached zero.  Raised at most once per object.
    pub died:     Signal<()>,
    /// The physics collaborator reported contact with another object.
    pub collided: Signal<ObjectId>,
}

// ── GameObject ────────────────────────────────────────────────────────────────

/// One entity in the [`World`][crate::World].
#[derive(Debug, Default)]
pub struct GameObject {
    /// Display name (usually the prefab name).  Not required to be unique.
    pub name: String,

    pub transform: Transform,

    pub events: ObjectEvents,

    components: ComponentMap,
    metadata:   FxHashMap<String, String>,
    destroyed:  bool,
    died:       bool,
}

impl GameObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    // ── Components ────────────────────────────────────────────────────────

    pub fn get_component<T: 'static>(&self) -> Option<&T> {
        self.components.get::<T>()
    }

    pub fn get_component_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.components.get_mut::<T>()
    }

    pub fn insert_component<T: 'static>(&mut self, value: T) -> Option<T> {
        self.components.insert(value)
    }

    pub fn has_component<T: 'static>(&self) -> bool {
        self.components.contains::<T>()
    }

    pub fn components(&self) -> &ComponentMap {
        &self.components
    }

    // ── Metadata ──────────────────────────────────────────────────────────

    /// String metadata attached by configuration (team, loot table, …).
    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Mark the object destroyed.  Returns `true` only on the first call.
    pub fn destroy(&mut self) -> bool {
        !std::mem::replace(&mut self.destroyed, true)
    }

    /// Flip the one-shot `died` latch; `true` only on the first call.
    pub(crate) fn mark_died(&mut self) -> bool {
        !std::mem::replace(&mut self.died, true)
    }
}
