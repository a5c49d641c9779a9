//! `BehaviorComponent` — the named behaviors of one object and the only
//! path from them to the scheduler.

use indexmap::IndexMap;

use gf_action::{Action, ActionCallback, ActionScheduler};
use gf_core::{ActionHandle, ObjectId};

use crate::{Behavior, BehaviorContext, BehaviorError, BehaviorPool, BehaviorResult};

/// Owns the behaviors attached to `owner`, keyed by name.
///
/// Iteration (and therefore update) order is insertion order.  Removals
/// requested while behaviors are being updated are queued and applied once
/// the sweep is over.
#[derive(Debug)]
pub struct BehaviorComponent {
    owner:            ObjectId,
    behaviors:        IndexMap<String, Behavior>,
    pending_removals: Vec<String>,
}

impl BehaviorComponent {
    pub fn new(owner: ObjectId) -> Self {
        Self { owner, behaviors: IndexMap::new(), pending_removals: Vec::new() }
    }

    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    // ── Membership ────────────────────────────────────────────────────────

    pub fn get_behavior(&self, name: &str) -> Option<&Behavior> {
        self.behaviors.get(name)
    }

    pub fn get_behavior_mut(&mut self, name: &str) -> Option<&mut Behavior> {
        self.behaviors.get_mut(name)
    }

    /// Attach `behavior` under its name and stamp this component's owner.
    ///
    /// A name already present is rejected; the behavior comes back inside
    /// the error.
    pub fn add_behavior(&mut self, mut behavior: Behavior) -> BehaviorResult<()> {
        if self.behaviors.contains_key(behavior.name()) {
            let name = behavior.name().to_owned();
            tracing::warn!(owner = ?self.owner, %name, "duplicate behavior name rejected");
            return Err(BehaviorError::DuplicateName {
                name,
                owner: self.owner,
                rejected: Box::new(behavior),
            });
        }
        behavior.set_owner(self.owner);
        tracing::debug!(owner = ?self.owner, name = behavior.name(), kind = ?behavior.tag(), "behavior added");
        self.behaviors.insert(behavior.name().to_owned(), behavior);
        Ok(())
    }

    /// Queue `name` for removal after the next update sweep.
    ///
    /// Returns `false` if no such behavior exists or it is already queued.
    pub fn remove_behavior(&mut self, name: &str) -> bool {
        if !self.behaviors.contains_key(name) || self.pending_removals.iter().any(|n| n == name) {
            return false;
        }
        self.pending_removals.push(name.to_owned());
        true
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Behavior names in update order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.behaviors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Behavior> {
        self.behaviors.values()
    }

    pub fn pending_removals(&self) -> usize {
        self.pending_removals.len()
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    /// Submit `action` with this component's owner as parent.
    ///
    /// `delay_secs > 0` goes through delayed registration; anything else is
    /// registered immediately.
    pub fn fire_action(
        &self,
        scheduler:  &mut dyn ActionScheduler,
        action:     Action,
        target:     Option<ObjectId>,
        callback:   Option<ActionCallback>,
        delay_secs: f32,
    ) -> ActionHandle {
        dispatch(Some(self.owner), scheduler, action, target, callback, delay_secs)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// `initialize` every behavior, then `post_initialize` every behavior.
    pub fn initialize_all(&mut self, ctx: &mut BehaviorContext<'_>) {
        ctx.enter(self.owner);
        for behavior in self.behaviors.values_mut() {
            behavior.initialize(ctx);
        }
        for behavior in self.behaviors.values_mut() {
            behavior.post_initialize(ctx);
        }
        ctx.take_removals(&mut self.pending_removals);
    }

    /// Update every behavior once, then apply queued removals.  Each removed
    /// behavior is destroyed and released to `pool`.
    pub fn update(&mut self, ctx: &mut BehaviorContext<'_>, pool: &mut BehaviorPool) {
        ctx.enter(self.owner);
        for behavior in self.behaviors.values_mut() {
            behavior.update(ctx);
        }
        ctx.take_removals(&mut self.pending_removals);
        self.apply_removals(pool);
    }

    fn apply_removals(&mut self, pool: &mut BehaviorPool) {
        for name in self.pending_removals.drain(..) {
            if let Some(mut behavior) = self.behaviors.shift_remove(&name) {
                behavior.destroy();
                tracing::debug!(owner = ?self.owner, %name, "behavior removed");
                pool.release(behavior);
            }
        }
    }

    /// Destroy and release every behavior.  Called when the owner is purged.
    pub fn destroy_all(&mut self, pool: &mut BehaviorPool) {
        self.pending_removals.clear();
        for (_, mut behavior) in self.behaviors.drain(..) {
            behavior.destroy();
            pool.release(behavior);
        }
    }
}

/// Stamp `parent`/`target` and hand `action` to the scheduler.
pub(crate) fn dispatch(
    parent:     Option<ObjectId>,
    scheduler:  &mut dyn ActionScheduler,
    mut action: Action,
    target:     Option<ObjectId>,
    callback:   Option<ActionCallback>,
    delay_secs: f32,
) -> ActionHandle {
    action.set_parent(parent);
    action.set_target(target);
    if delay_secs > 0.0 {
        scheduler.register_delayed_action(action, delay_secs, callback)
    } else {
        scheduler.register_action(action, callback)
    }
}
