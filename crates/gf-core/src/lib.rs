//! `gf-core` — foundational types for the `gf` game-object framework.
//!
//! This crate is a dependency of every other `gf-*` crate.  It intentionally
//! has no `gf-*` dependencies.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ObjectId`, `ActionHandle` (generational), `PrefabId` |
//! | [`geo`]         | `Vec2`                                                |
//! | [`time`]        | `SimTime`, `FrameClock`, `SceneConfig`                |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`signal`]      | `Signal<T>`, RAII `Subscription<T>`                   |
//! | [`decl`]        | `Decl` — default-on-missing reader for declarative data |
//! | [`error`]       | `GfError`, `GfResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |
//!           | Required to load `SceneConfig` from JSON.                  |

pub mod decl;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod signal;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use decl::Decl;
pub use error::{GfError, GfResult};
pub use geo::Vec2;
pub use ids::{ActionHandle, ObjectId, PrefabId};
pub use rng::SimRng;
pub use signal::{Signal, Subscription};
pub use time::{FrameClock, SceneConfig, SimTime};
