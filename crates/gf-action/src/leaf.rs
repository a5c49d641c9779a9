//! Leaf actions: one discrete effect each.
//!
//! | Kind                   | Config (default)                        | Effect                         |
//! |------------------------|-----------------------------------------|--------------------------------|
//! | [`MoveAction`]         | `delta` (0,0), `duration_secs` 0        | translate target, spread over the duration |
//! | [`DamageAction`]       | `amount` 1                              | `World::apply_damage`          |
//! | [`SpawnAction`]        | `prefab` "", `offset`, `velocity` (0,0) | queue a `SpawnRequest`         |
//! | [`EmitParticleAction`] | `effect` "", `offset` (0,0)             | queue a `ParticleRequest`      |
//! | [`DestroyAction`]      | —                                       | `World::destroy`               |
//! | [`WaitAction`]         | `duration_secs` 0                       | nothing; finishes after the duration |
//!
//! Every `run` returns `true` when the action is done.  A missing target or
//! collaborator skips the effect and finishes the action; it is never an
//! error.

use gf_core::{Decl, ObjectId, Vec2};
use gf_world::{ParticleRequest, SpawnRequest};

use crate::ActionContext;

// ── Move ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoveAction {
    /// Total displacement.
    pub delta: Vec2,
    /// `0` applies the whole delta in a single tick.
    pub duration_secs: f32,

    elapsed_secs: f32,
}

impl MoveAction {
    pub(crate) fn deserialize(&mut self, decl: Decl<'_>) {
        self.delta = decl.vec2_or("delta", Vec2::ZERO);
        self.duration_secs = decl.f32_or("duration_secs", 0.0).max(0.0);
    }

    pub(crate) fn copy_config(&self, dst: &mut Self) {
        dst.delta = self.delta;
        dst.duration_secs = self.duration_secs;
    }

    pub(crate) fn begin(&mut self) {
        self.elapsed_secs = 0.0;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn run(&mut self, target: Option<ObjectId>, ctx: &mut ActionContext<'_>) -> bool {
        let Some(id) = target else {
            tracing::debug!("move: no target; skipped");
            return true;
        };
        let (step, done) = if self.duration_secs <= 0.0 {
            (self.delta, true)
        } else {
            let slice = ctx.dt_secs.min(self.duration_secs - self.elapsed_secs).max(0.0);
            self.elapsed_secs += slice;
            (self.delta * (slice / self.duration_secs), self.elapsed_secs >= self.duration_secs)
        };
        if !ctx.world.translate(id, step) {
            tracing::debug!(?id, "move: target gone; skipped");
            return true;
        }
        done
    }
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct DamageAction {
    pub amount: f32,
}

impl Default for DamageAction {
    fn default() -> Self {
        Self { amount: 1.0 }
    }
}

impl DamageAction {
    pub(crate) fn deserialize(&mut self, decl: Decl<'_>) {
        self.amount = decl.f32_or("amount", 1.0);
    }

    pub(crate) fn copy_config(&self, dst: &mut Self) {
        dst.amount = self.amount;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn run(&mut self, target: Option<ObjectId>, ctx: &mut ActionContext<'_>) -> bool {
        match target.and_then(|id| ctx.world.apply_damage(id, self.amount)) {
            Some(remaining) => tracing::debug!(?target, amount = self.amount, remaining, "damage applied"),
            None => tracing::debug!(?target, "damage: no target or no health; skipped"),
        }
        true
    }
}

// ── Spawn ─────────────────────────────────────────────────────────────────────

/// Requests a prefab instance at the target's position plus `offset`, or at
/// `offset` itself when the action has no target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnAction {
    pub prefab:   String,
    pub offset:   Vec2,
    pub velocity: Vec2,
}

impl SpawnAction {
    pub(crate) fn deserialize(&mut self, decl: Decl<'_>) {
        self.prefab.clear();
        self.prefab.push_str(decl.str_or("prefab", ""));
        self.offset = decl.vec2_or("offset", Vec2::ZERO);
        self.velocity = decl.vec2_or("velocity", Vec2::ZERO);
    }

    pub(crate) fn copy_config(&self, dst: &mut Self) {
        dst.prefab.clone_from(&self.prefab);
        dst.offset = self.offset;
        dst.velocity = self.velocity;
    }

    pub(crate) fn reset(&mut self) {
        self.prefab.clear();
        self.offset = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
    }

    pub(crate) fn run(
        &mut self,
        parent: Option<ObjectId>,
        target: Option<ObjectId>,
        ctx:    &mut ActionContext<'_>,
    ) -> bool {
        if self.prefab.is_empty() {
            tracing::warn!("spawn action without a prefab; skipped");
            return true;
        }
        let Some(origin) = origin_of(target, ctx) else {
            tracing::debug!(?target, prefab = %self.prefab, "spawn: target gone; skipped");
            return true;
        };
        ctx.world.request_spawn(SpawnRequest {
            prefab:   self.prefab.clone(),
            position: origin + self.offset,
            velocity: self.velocity,
            source:   parent,
        });
        true
    }
}

// ── EmitParticle ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmitParticleAction {
    pub effect: String,
    pub offset: Vec2,
}

impl EmitParticleAction {
    pub(crate) fn deserialize(&mut self, decl: Decl<'_>) {
        self.effect.clear();
        self.effect.push_str(decl.str_or("effect", ""));
        self.offset = decl.vec2_or("offset", Vec2::ZERO);
    }

    pub(crate) fn copy_config(&self, dst: &mut Self) {
        dst.effect.clone_from(&self.effect);
        dst.offset = self.offset;
    }

    pub(crate) fn reset(&mut self) {
        self.effect.clear();
        self.offset = Vec2::ZERO;
    }

    pub(crate) fn run(&mut self, target: Option<ObjectId>, ctx: &mut ActionContext<'_>) -> bool {
        if self.effect.is_empty() {
            tracing::warn!("particle action without an effect; skipped");
            return true;
        }
        if let Some(origin) = origin_of(target, ctx) {
            ctx.world.emit_particle(ParticleRequest {
                effect:   self.effect.clone(),
                position: origin + self.offset,
            });
        }
        true
    }
}

// ── Destroy ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DestroyAction;

impl DestroyAction {
    pub(crate) fn run(&mut self, target: Option<ObjectId>, ctx: &mut ActionContext<'_>) -> bool {
        match target {
            Some(id) => {
                ctx.world.destroy(id);
            }
            None => tracing::debug!("destroy: no target; skipped"),
        }
        true
    }
}

// ── Wait ──────────────────────────────────────────────────────────────────────

/// Does nothing for `duration_secs`.  Mostly useful as a Sequence spacer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaitAction {
    pub duration_secs: f32,

    elapsed_secs: f32,
}

impl WaitAction {
    pub(crate) fn deserialize(&mut self, decl: Decl<'_>) {
        self.duration_secs = decl.f32_or("duration_secs", 0.0).max(0.0);
    }

    pub(crate) fn copy_config(&self, dst: &mut Self) {
        dst.duration_secs = self.duration_secs;
    }

    pub(crate) fn begin(&mut self) {
        self.elapsed_secs = 0.0;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn run(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        self.elapsed_secs += ctx.dt_secs;
        self.elapsed_secs >= self.duration_secs
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Where an effect happens: the target's position, the origin when there is
/// no target, `None` when the target no longer exists.
fn origin_of(target: Option<ObjectId>, ctx: &ActionContext<'_>) -> Option<Vec2> {
    match target {
        Some(id) => ctx.world.position(id),
        None => Some(Vec2::ZERO),
    }
}
