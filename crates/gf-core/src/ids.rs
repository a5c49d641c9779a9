//! Strongly typed identifiers.
//!
//! Two families live here:
//!
//! - **Generational handles** (`ObjectId`, `ActionHandle`) are `slotmap`
//!   keys.  Removing the value from its arena bumps the slot's generation, so
//!   a handle kept past its owner's lifetime resolves to `None` instead of
//!   silently aliasing whatever reuses the slot.
//! - **Dense indices** (`PrefabId`) wrap a primitive integer and index
//!   directly into an append-only `Vec`.

use std::fmt;

slotmap::new_key_type! {
    /// Handle of a game object in the `World` arena.
    pub struct ObjectId;
}

slotmap::new_key_type! {
    /// Handle of an action scheduled on the action manager.
    ///
    /// Becomes stale the moment the manager reclaims the action and returns
    /// it to the pool.
    pub struct ActionHandle;
}

/// Index of an object template in the prefab registry.
///
/// Registries only grow, so a `PrefabId` stays valid for the registry's
/// lifetime.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefabId(pub u32);

impl PrefabId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PrefabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prefab#{}", self.0)
    }
}
