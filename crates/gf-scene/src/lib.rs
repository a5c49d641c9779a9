//! `gf-scene` — frame loop orchestrator for the gf framework.
//!
//! # Frame loop
//!
//! ```text
//! for frame in 1..=config.total_frames:
//!   ① Behaviors  — every live object's BehaviorComponent updates (spawn
//!                  order); behaviors fire actions through their context.
//!   ② Actions    — ActionManager::update: due delays promoted, running
//!                  actions driven, callbacks fired, finished actions
//!                  released to the pool.
//!   ③ Spawns     — SpawnRequests become prefab instances; new behaviors
//!                  initialize, then post-initialize.
//!   ④ Particles  — ParticleRequests go to SceneObserver::on_particles.
//!   ⑤ Purge      — destroyed objects are freed; their behaviors are
//!                  destroyed and released.
//!   ⑥ Activate   — actions registered after ② become runnable.
//! ```
//!
//! # Crate layout
//!
//! | Module         | Contents                                             |
//! |----------------|------------------------------------------------------|
//! | [`scene`]      | `Scene` and its frame loop                           |
//! | [`builder`]    | `SceneBuilder`                                       |
//! | [`prefab`]     | `ObjectTemplate`, `PrefabRegistry` (JSON)            |
//! | [`waves`]      | `WaveEntry`, CSV wave-script loader                  |
//! | [`config`]     | `SceneConfig` loading and validation                 |
//! | [`observer`]   | `SceneObserver`, `NoopObserver`, `FrameStats`        |
//! | [`error`]      | `SceneError`, `SceneResult<T>`                       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gf_scene::{NoopObserver, PrefabRegistry, SceneBuilder, load_config};
//!
//! let config = load_config(Path::new("scene.json"))?;
//! let mut scene = SceneBuilder::new(config)
//!     .prefabs(PrefabRegistry::load(Path::new("prefabs.json"))?)
//!     .build()?;
//! scene.spawn("turret", None)?;
//! scene.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod prefab;
pub mod scene;
pub mod waves;


pub use builder::SceneBuilder;
pub use config::{load_config, load_config_reader, validate_config};
pub use error::{SceneError, SceneResult};
pub use observer::{FrameStats, NoopObserver, SceneObserver};
pub use prefab::{ObjectTemplate, PrefabRegistry};
pub use scene::Scene;
pub use waves::{WaveEntry, load_waves_csv, load_waves_reader};
