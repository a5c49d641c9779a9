//! Collaborators an action needs while it is being updated.

use gf_world::World;

use crate::ActionPool;

/// Everything `Action::update` may touch, passed explicitly.
///
/// Built once per scheduler update and reborrowed for every action, so no
/// action can reach a subsystem that is not listed here.
pub struct ActionContext<'a> {
    /// Objects the action reads and mutates.
    pub world: &'a mut World,

    /// Where composites return children they remove.
    pub pool: &'a mut ActionPool,

    /// Length of the current frame, in seconds.
    pub dt_secs: f32,
}

impl<'a> ActionContext<'a> {
    #[inline]
    pub fn new(world: &'a mut World, pool: &'a mut ActionPool, dt_secs: f32) -> Self {
        Self { world, pool, dt_secs: dt_secs.max(0.0) }
    }
}
