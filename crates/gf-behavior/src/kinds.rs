//! Concrete behavior payloads.
//!
//! | Kind              | Config (default)                                   | Reacts to      |
//! |-------------------|----------------------------------------------------|----------------|
//! | [`Drift`]         | `scale` 1                                          | every tick     |
//! | [`Lifetime`]      | `seconds` 5                                        | post-initialize|
//! | [`ContactDamage`] | `amount` 1, `destroy_self` true                    | `collided`     |
//! | [`DeathBurst`]    | `effect` "", `spawn` ""                            | `died`         |
//! | [`Emitter`]       | `prefab` "", `interval_secs` 1, `jitter_secs` 0, `velocity`, `count` 0 | every tick |

use gf_action::{
    Action, DamageAction, DestroyAction, EmitParticleAction, MoveAction, SequenceAction, SpawnAction,
};
use gf_core::{Decl, ObjectId, Subscription, Vec2};
use gf_world::World;

use crate::BehaviorContext;

// ── Drift ─────────────────────────────────────────────────────────────────────

/// Moves the owner by its own velocity every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Drift {
    /// Multiplier applied to the owner's velocity.
    pub scale: f32,
}

impl Default for Drift {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Drift {
    pub(crate) fn deserialize(&mut self, decl: Decl<'_>) {
        self.scale = decl.f32_or("scale", 1.0);
    }

    pub(crate) fn copy_config(&self, dst: &mut Self) {
        dst.scale = self.scale;
    }

    pub(crate) fn update(&mut self, owner: ObjectId, ctx: &mut BehaviorContext<'_>) {
        let Some(object) = ctx.world.get(owner) else { return };
        let delta = object.transform.velocity * (self.scale * ctx.dt_secs);
        if delta.is_zero() {
            return;
        }
        let step = Action::draw(ctx.actions, |m: &mut MoveAction| m.delta = delta);
        ctx.fire_action(step, Some(owner), None, 0.0);
    }
}

// ── Lifetime ──────────────────────────────────────────────────────────────────

/// Destroys the owner `seconds` after it was set up.
#[derive(Clone, Debug, PartialEq)]
pub struct Lifetime {
    pub seconds: f32,
}

impl Default for Lifetime {
    fn default() -> Self {
        Self { seconds: 5.0 }
    }
}

impl Lifetime {
    pub(crate) fn deserialize(&mut self, decl: Decl<'_>) {
        self.seconds = decl.f32_or("seconds", 5.0).max(0.0);
    }

    pub(crate) fn copy_config(&self, dst: &mut Self) {
        dst.seconds = self.seconds;
    }

    pub(crate) fn post_initialize(&mut self, owner: ObjectId, ctx: &mut BehaviorContext<'_>) {
        let expire = ctx.actions.get::<DestroyAction>();
        ctx.fire_action(expire, Some(owner), None, self.seconds);
    }
}

// ── ContactDamage ─────────────────────────────────────────────────────────────

/// Damages whatever the owner touches, optionally destroying the owner.
///
/// Objects sharing the owner's `"team"` metadata are ignored.
#[derive(Debug)]
pub struct ContactDamage {
    pub amount:       f32,
    pub destroy_self: bool,

    collided: Option<Subscription<ObjectId>>,
}

impl Default for ContactDamage {
    fn default() -> Self {
        Self { amount: 1.0, destroy_self: true, collided: None }
    }
}

impl PartialEq for ContactDamage {
    fn eq(&self, other: &Self) -> bool {
        self.amount == other.amount
            && self.destroy_self == other.destroy_self
            && self.collided.is_some() == other.collided.is_some()
    }
}

impl ContactDamage {
    pub(crate) fn deserialize(&mut self, decl: Decl<'_>) {
        self.amount = decl.f32_or("amount", 1.0);
        self.destroy_self = decl.bool_or("destroy_self", true);
    }

    pub(crate) fn copy_config(&self, dst: &mut Self) {
        dst.amount = self.amount;
        dst.destroy_self = self.destroy_self;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn initialize(&mut self, owner: ObjectId, ctx: &mut BehaviorContext<'_>) {
        self.collided = ctx.world.get_mut(owner).map(|o| o.events.collided.subscribe());
    }

    pub(crate) fn unsubscribe(&mut self) {
        self.collided = None;
    }

    pub(crate) fn update(&mut self, owner: ObjectId, ctx: &mut BehaviorContext<'_>) {
        let Some(collided) = &self.collided else { return };
        let amount = self.amount;

        while let Some(other) = collided.pop() {
            if !ctx.world.is_alive(owner) {
                collided.clear();
                return;
            }
            if !ctx.world.is_alive(other) || same_team(ctx.world, owner, other) {
                continue;
            }

            let mut hit = Action::draw(ctx.actions, |d: &mut DamageAction| d.amount = amount);
            if !self.destroy_self {
                ctx.fire_action(hit, Some(other), None, 0.0);
                continue;
            }

            // Each child carries its own target; the composite has none.
            hit.set_target(Some(other));
            let mut expire = ctx.actions.get::<DestroyAction>();
            expire.set_target(Some(owner));
            let both = Action::parallel(ctx.actions, [hit, expire]);
            ctx.fire_action(both, None, None, 0.0);
            collided.clear();
            return;
        }
    }
}

fn same_team(world: &World, a: ObjectId, b: ObjectId) -> bool {
    let team = |id| world.get(id).and_then(|o| o.get_metadata("team"));
    matches!((team(a), team(b)), (Some(x), Some(y)) if x == y)
}

// ── DeathBurst ────────────────────────────────────────────────────────────────

/// When the owner dies: play `effect`, spawn `spawn` (if set), destroy the
/// owner, strictly in that order.
#[derive(Debug, Default)]
pub struct DeathBurst {
    pub effect: String,
    /// Prefab spawned at the owner's position.  Empty for none.
    pub spawn:  String,

    died: Option<Subscription<()>>,
}

impl PartialEq for DeathBurst {
    fn eq(&self, other: &Self) -> bool {
        self.effect == other.effect
            && self.spawn == other.spawn
            && self.died.is_some() == other.died.is_some()
    }
}

impl DeathBurst {
    pub(crate) fn deserialize(&mut self, decl: Decl<'_>) {
        self.effect.clear();
        self.effect.push_str(decl.str_or("effect", ""));
        self.spawn.clear();
        self.spawn.push_str(decl.str_or("spawn", ""));
    }

    pub(crate) fn copy_config(&self, dst: &mut Self) {
        dst.effect.clone_from(&self.effect);
        dst.spawn.clone_from(&self.spawn);
    }

    pub(crate) fn reset(&mut self) {
        self.effect.clear();
        self.spawn.clear();
        self.died = None;
    }

    pub(crate) fn initialize(&mut self, owner: ObjectId, ctx: &mut BehaviorContext<'_>) {
        self.died = ctx.world.get_mut(owner).map(|o| o.events.died.subscribe());
    }

    pub(crate) fn unsubscribe(&mut self) {
        self.died = None;
    }

    pub(crate) fn update(&mut self, owner: ObjectId, ctx: &mut BehaviorContext<'_>) {
        let Some(died) = &self.died else { return };
        if died.pop().is_none() {
            return;
        }
        // Death is reported once per object.
        self.died = None;

        let mut burst = ctx.actions.get::<SequenceAction>();
        if !self.effect.is_empty() {
            let effect = &self.effect;
            burst.push_child(Action::draw(ctx.actions, |e: &mut EmitParticleAction| {
                e.effect.clone_from(effect)
            }));
        }
        if !self.spawn.is_empty() {
            let prefab = &self.spawn;
            burst.push_child(Action::draw(ctx.actions, |s: &mut SpawnAction| s.prefab.clone_from(prefab)));
        }
        burst.push_child(ctx.actions.get::<DestroyAction>());
        ctx.fire_action(burst, Some(owner), None, 0.0);
    }
}

// ── Emitter ───────────────────────────────────────────────────────────────────

/// Floor on a jittered interval so one frame cannot emit without bound.
const MIN_INTERVAL_SECS: f32 = 0.001;

/// Spawns `prefab` from the owner every `interval_secs` (± `jitter_secs`).
#[derive(Clone, Debug, PartialEq)]
pub struct Emitter {
    pub prefab:        String,
    pub interval_secs: f32,
    pub jitter_secs:   f32,
    pub velocity:      Vec2,
    /// Emissions before the emitter goes quiet.  `0` means unlimited.
    pub count:         u32,

    next_in_secs: f32,
    emitted:      u32,
}

impl Default for Emitter {
    fn default() -> Self {
        Self {
            prefab:        String::new(),
            interval_secs: 1.0,
            jitter_secs:   0.0,
            velocity:      Vec2::ZERO,
            count:         0,
            next_in_secs:  0.0,
            emitted:       0,
        }
    }
}

impl Emitter {
    pub(crate) fn deserialize(&mut self, decl: Decl<'_>) {
        self.prefab.clear();
        self.prefab.push_str(decl.str_or("prefab", ""));
        self.interval_secs = decl.f32_or("interval_secs", 1.0);
        self.jitter_secs = decl.f32_or("jitter_secs", 0.0).max(0.0);
        self.velocity = decl.vec2_or("velocity", Vec2::ZERO);
        self.count = decl.u32_or("count", 0);
    }

    pub(crate) fn copy_config(&self, dst: &mut Self) {
        dst.prefab.clone_from(&self.prefab);
        dst.interval_secs = self.interval_secs;
        dst.jitter_secs = self.jitter_secs;
        dst.velocity = self.velocity;
        dst.count = self.count;
    }

    pub(crate) fn reset(&mut self) {
        self.prefab.clear();
        let prefab = std::mem::take(&mut self.prefab);
        *self = Self { prefab, ..Self::default() };
    }

    /// Emissions so far.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }

    fn next_interval(&self, ctx: &mut BehaviorContext<'_>) -> f32 {
        (self.interval_secs + ctx.rng.jitter(self.jitter_secs)).max(0.0)
    }

    pub(crate) fn initialize(&mut self, ctx: &mut BehaviorContext<'_>) {
        self.emitted = 0;
        self.next_in_secs = self.next_interval(ctx);
        if self.interval_secs <= 0.0 || self.prefab.is_empty() {
            tracing::warn!(prefab = %self.prefab, interval = self.interval_secs, "emitter disabled");
        }
    }

    pub(crate) fn update(&mut self, owner: ObjectId, ctx: &mut BehaviorContext<'_>) {
        if self.interval_secs <= 0.0 || self.prefab.is_empty() {
            return;
        }
        self.next_in_secs -= ctx.dt_secs;
        while self.next_in_secs <= 0.0 {
            if self.count != 0 && self.emitted >= self.count {
                return;
            }
            let (prefab, velocity) = (&self.prefab, self.velocity);
            let shot = Action::draw(ctx.actions, |s: &mut SpawnAction| {
                s.prefab.clone_from(prefab);
                s.velocity = velocity;
            });
            ctx.fire_action(shot, Some(owner), None, 0.0);
            self.emitted += 1;
            self.next_in_secs += self.next_interval(ctx).max(MIN_INTERVAL_SECS);
        }
    }
}
