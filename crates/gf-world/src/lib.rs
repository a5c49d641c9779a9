//! `gf-world` — the game-object container consumed by the action core.
//!
//! The action/behavior core treats the world as an opaque collaborator and
//! only needs a handful of operations from it: look up an object, read a
//! component or a metadata entry, mark an object destroyed, and hand effect
//! requests (spawns, particles) to the engines that own them.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`component`]   | `ComponentMap` — type-erased per-object components        |
//! | [`components`]  | Built-in components: `Transform`, `Health`                |
//! | [`object`]      | `GameObject`, `ObjectEvents`, `DamageEvent`               |
//! | [`world`]       | `World` arena, `SpawnRequest`, `ParticleRequest`          |
//! | [`builder`]     | `GameObjectBuilder` (fluent construction)                 |
//!
//! # Lifetime of an object
//!
//! `World::destroy` only *marks* an object.  It stays queryable (and its
//! handle valid) until the frame loop calls [`World::purge_destroyed`], at
//! which point the slot is freed and every outstanding `ObjectId` for it
//! resolves to `None`.

pub mod builder;
pub mod component;
pub mod components;
pub mod object;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::GameObjectBuilder;
pub use component::ComponentMap;
pub use components::{Health, Transform};
pub use object::{DamageEvent, GameObject, ObjectEvents};
pub use world::{ParticleRequest, SpawnRequest, World};
