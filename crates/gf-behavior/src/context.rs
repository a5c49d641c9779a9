//! Collaborators passed to every behavior callback.

use gf_action::{Action, ActionCallback, ActionPool, ActionScheduler};
use gf_core::{ActionHandle, ObjectId, SimRng, SimTime};
use gf_world::World;

use crate::component::dispatch;

/// Everything a behavior may use during `initialize`, `post_initialize` and
/// `update`.
///
/// Built once per frame phase by the frame loop and reused for every
/// component; each component stamps itself as the current owner before
/// calling into its behaviors.
pub struct BehaviorContext<'a> {
    /// Objects, read and written.
    pub world:   &'a mut World,
    /// Where new actions are drawn from.
    pub actions: &'a mut ActionPool,
    /// Seeded randomness shared by all behaviors.
    pub rng:     &'a mut SimRng,
    /// Length of the current frame, in seconds.
    pub dt_secs: f32,
    /// Accumulated time at the start of the current frame.
    pub now:     SimTime,

    scheduler: &'a mut dyn ActionScheduler,
    owner:     Option<ObjectId>,
    removals:  Vec<String>,
}

impl<'a> BehaviorContext<'a> {
    pub fn new(
        world:     &'a mut World,
        actions:   &'a mut ActionPool,
        scheduler: &'a mut dyn ActionScheduler,
        rng:       &'a mut SimRng,
        dt_secs:   f32,
        now:       SimTime,
    ) -> Self {
        Self {
            world,
            actions,
            rng,
            dt_secs: dt_secs.max(0.0),
            now,
            scheduler,
            owner: None,
            removals: Vec::new(),
        }
    }

    /// The object whose component is currently being driven.
    pub fn owner(&self) -> Option<ObjectId> {
        self.owner
    }

    pub(crate) fn enter(&mut self, owner: ObjectId) {
        self.owner = Some(owner);
    }

    pub(crate) fn take_removals(&mut self, into: &mut Vec<String>) {
        into.append(&mut self.removals);
    }

    /// Submit `action` on behalf of the current owner.
    ///
    /// Stamps `parent` (the owner) and `target`, then registers the action
    /// immediately, or after `delay_secs` when that is positive.
    pub fn fire_action(
        &mut self,
        action:     Action,
        target:     Option<ObjectId>,
        callback:   Option<ActionCallback>,
        delay_secs: f32,
    ) -> ActionHandle {
        dispatch(self.owner, &mut *self.scheduler, action, target, callback, delay_secs)
    }

    /// Queue removal of the current owner's behavior `name`.  Applied after
    /// the current update sweep.
    pub fn remove_behavior(&mut self, name: &str) {
        self.removals.push(name.to_owned());
    }
}
