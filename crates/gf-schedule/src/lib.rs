//! `gf-schedule` — the global per-frame action manager.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                 |
//! |-------------------|----------------------------------------------------------|
//! | [`delay_queue`]   | `DelayQueue` — due time → handles waiting on a delay     |
//! | [`manager`]       | `ActionManager` (implements `ActionScheduler`), stats    |
//!
//! # Frame contract
//!
//! `ActionManager::update` runs once per frame:
//!
//! 1. advance the manager clock by `dt`;
//! 2. promote delayed actions whose due time has been reached; from here on
//!    they are treated exactly like fresh registrations;
//! 3. drive every running action once, in the order it became runnable;
//! 4. reclaim finished actions: callback, then release to the pool;
//! 5. activate actions registered or promoted since the last activation, in
//!    registration order, so they are first driven on the *next* frame.
//!
//! A frame loop that registers actions after `update` (for example while
//! instantiating spawned objects) calls `activate_pending` at the end of the
//! frame so those actions also start on the next frame.

pub mod delay_queue;
pub mod manager;

#[cfg(test)]
mod tests;

pub use delay_queue::DelayQueue;
pub use manager::{ActionManager, ManagerStats};
