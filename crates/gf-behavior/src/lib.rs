//! `gf-behavior` — per-object logic and its dispatch hub.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`behavior`]    | `Behavior`, `BehaviorKind`, `BehaviorTag`, `BehaviorState`    |
//! | [`kinds`]       | Payloads: `Drift`, `Lifetime`, `ContactDamage`, `DeathBurst`, `Emitter` |
//! | [`context`]     | `BehaviorContext<'a>` — collaborators plus the submission path |
//! | [`component`]   | `BehaviorComponent` — the named behaviors of one object        |
//! | [`error`]       | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! Behaviors never hold the scheduler.  They receive a [`BehaviorContext`]
//! whose scheduler handle is private; its only way in is
//! [`BehaviorContext::fire_action`], which stamps the owning object as the
//! action's parent exactly as [`BehaviorComponent::fire_action`] does.
//!
//! Event reactions use RAII subscriptions taken in `initialize`.  `destroy`
//! drops them, so a destroyed behavior cannot observe another event.

pub mod behavior;
pub mod component;
pub mod context;
pub mod error;
pub mod kinds;


pub use behavior::{Behavior, BehaviorKind, BehaviorPool, BehaviorState, BehaviorTag, BehaviorVariant};
pub use component::BehaviorComponent;
pub use context::BehaviorContext;
pub use error::{BehaviorError, BehaviorResult};
pub use kinds::{ContactDamage, DeathBurst, Drift, Emitter, Lifetime};
