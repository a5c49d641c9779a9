//! The contract between action issuers and the per-frame scheduler.

use gf_core::{ActionHandle, ObjectId};
use gf_world::World;

use crate::{Action, ActionTag};

/// What a completion callback learns about the action that just ended.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ActionReport {
    pub handle:    ActionHandle,
    pub tag:       ActionTag,
    pub parent:    Option<ObjectId>,
    pub target:    Option<ObjectId>,
    /// `true` when the action was cancelled rather than completing normally.
    pub destroyed: bool,
}

/// Invoked exactly once when a scheduled action is reclaimed.
pub type ActionCallback = Box<dyn FnOnce(&mut World, &ActionReport)>;

/// A per-frame scheduler that owns in-flight actions.
///
/// # Contract
///
/// - `register_action`: the action is initialized and driven once per frame,
///   starting with the *next* frame, until it is finished.  Then the
///   callback (if any) runs exactly once and the action returns to its pool.
/// - `register_delayed_action`: the action is held, never updated, until
///   `delay_secs` of accumulated frame time have elapsed; from then on it
///   behaves as if registered with `register_action`.
/// - Actions that become runnable in the same frame are driven in
///   registration order.
pub trait ActionScheduler {
    fn register_action(&mut self, action: Action, callback: Option<ActionCallback>) -> ActionHandle;

    fn register_delayed_action(
        &mut self,
        action:     Action,
        delay_secs: f32,
        callback:   Option<ActionCallback>,
    ) -> ActionHandle;
}
