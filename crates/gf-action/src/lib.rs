//! `gf-action` — schedulable units of game-logic work.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`state`]       | `ActionState` — the lifecycle flags shared by every kind    |
//! | [`action`]      | `Action`, `ActionKind`, `ActionTag`, pool integration       |
//! | [`leaf`]        | Leaf payloads: `Move`, `Damage`, `Spawn`, `EmitParticle`, … |
//! | [`composite`]   | `SequenceAction`, `ParallelAction`                          |
//! | [`context`]     | `ActionContext<'a>` — collaborators passed to `update`      |
//! | [`scheduler`]   | `ActionScheduler` trait, `ActionCallback`, `ActionReport`   |
//!
//! # Lifecycle
//!
//! ```text
//! construct / pool.get ──► initialize ──► update … update ──► finished
//!                                                   │              │
//!                              destroy (cancel) ────┴──► destroyed ┤
//!                                                                  ▼
//!                                            callback ──► pool.release (reallocate)
//! ```
//!
//! An `Action` is a plain value.  It moves from the issuing behavior into the
//! scheduler and from the scheduler into the pool, so it always has exactly
//! one owner.

pub mod action;
pub mod composite;
pub mod context;
pub mod leaf;
pub mod scheduler;
pub mod state;

#[cfg(test)]
mod tests;

pub use action::{Action, ActionKind, ActionPool, ActionTag, ActionVariant};
pub use composite::{ParallelAction, SequenceAction};
pub use context::ActionContext;
pub use leaf::{DamageAction, DestroyAction, EmitParticleAction, MoveAction, SpawnAction, WaitAction};
pub use scheduler::{ActionCallback, ActionReport, ActionScheduler};
pub use state::ActionState;
