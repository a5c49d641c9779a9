//! The `World` arena and the effect outboxes it exposes to external engines.

use slotmap::SlotMap;

use gf_core::{ObjectId, Vec2};

use crate::{DamageEvent, GameObject, Health};

// ── Outbox records ────────────────────────────────────────────────────────────

/// A request to instantiate a prefab, raised by a `Spawn` action and
/// fulfilled by the frame loop after the action phase.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRequest {
    pub prefab:   String,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Object whose action raised the request, if any.
    pub source:   Option<ObjectId>,
}

/// A request for the particle engine to play `effect` at `position`.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleRequest {
    pub effect:   String,
    pub position: Vec2,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Generational arena of [`GameObject`]s plus per-frame outboxes.
///
/// Objects are iterated in spawn order (`ids()`), which is what makes the
/// behavior phase deterministic.
#[derive(Debug, Default)]
pub struct World {
    objects:   SlotMap<ObjectId, GameObject>,
    order:     Vec<ObjectId>,
    spawns:    Vec<SpawnRequest>,
    particles: Vec<ParticleRequest>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `object` and return its handle.
    pub fn spawn(&mut self, object: GameObject) -> ObjectId {
        let id = self.objects.insert(object);
        self.order.push(id);
        tracing::debug!(?id, "object spawned");
        id
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    /// `true` if `id` refers to an object that exists and is not destroyed.
    pub fn is_alive(&self, id: ObjectId) -> bool {
        self.objects.get(id).is_some_and(|o| !o.is_destroyed())
    }

    /// Handles of all objects (destroyed-but-not-purged included) in spawn
    /// order.
    pub fn ids(&self) -> &[ObjectId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Position of `id`, or `None` if it no longer exists.
    pub fn position(&self, id: ObjectId) -> Option<Vec2> {
        self.objects.get(id).map(GameObject::position)
    }

    // ── Mutation used by actions ──────────────────────────────────────────

    /// Mark `id` destroyed.  Returns `true` if this call destroyed it;
    /// destroying twice (or a missing object) is a no-op.
    pub fn destroy(&mut self, id: ObjectId) -> bool {
        let Some(object) = self.objects.get_mut(id) else {
            return false;
        };
        if !object.destroy() {
            return false;
        }
        tracing::debug!(?id, name = %object.name, "object destroyed");
        true
    }

    /// Move `id` by `delta`.  Returns `false` if the object is gone.
    pub fn translate(&mut self, id: ObjectId, delta: Vec2) -> bool {
        match self.objects.get_mut(id) {
            Some(object) => {
                object.transform.position += delta;
                true
            }
            None => false,
        }
    }

    /// Apply `amount` damage to `id`.
    ///
    /// Emits `damaged`, plus `died` the first time health reaches zero.
    /// Returns the remaining health, or `None` when the object is missing or
    /// has no [`Health`] component (the damage is simply skipped).
    pub fn apply_damage(&mut self, id: ObjectId, amount: f32) -> Option<f32> {
        let object = self.objects.get_mut(id)?;
        let remaining = object.get_component_mut::<Health>()?.take(amount);

        object.events.damaged.emit(DamageEvent { amount, remaining });
        if remaining <= 0.0 && object.mark_died() {
            tracing::debug!(?id, name = %object.name, "object died");
            object.events.died.emit(());
        }
        Some(remaining)
    }

    /// Feed a contact between `a` and `b` from the physics collaborator.
    /// Each side receives the other's handle on its `collided` signal.
    pub fn report_collision(&mut self, a: ObjectId, b: ObjectId) {
        if let Some(object) = self.objects.get_mut(a) {
            object.events.collided.emit(b);
        }
        if let Some(object) = self.objects.get_mut(b) {
            object.events.collided.emit(a);
        }
    }

    // ── Outboxes ──────────────────────────────────────────────────────────

    pub fn request_spawn(&mut self, request: SpawnRequest) {
        self.spawns.push(request);
    }

    /// Move all pending spawn requests into `out`.  Both vectors keep their
    /// capacity, so steady-state draining does not allocate.
    pub fn drain_spawn_requests(&mut self, out: &mut Vec<SpawnRequest>) {
        out.append(&mut self.spawns);
    }

    pub fn pending_spawns(&self) -> &[SpawnRequest] {
        &self.spawns
    }

    pub fn emit_particle(&mut self, request: ParticleRequest) {
        self.particles.push(request);
    }

    /// Move all pending particle requests into `out`.
    pub fn drain_particles(&mut self, out: &mut Vec<ParticleRequest>) {
        out.append(&mut self.particles);
    }

    pub fn pending_particles(&self) -> &[ParticleRequest] {
        &self.particles
    }

    // ── End-of-frame ──────────────────────────────────────────────────────

    /// Free every destroyed object and push its handle to `out`.
    ///
    /// After this call the handles are stale: `get` returns `None` for them
    /// even if the slot is reused.
    pub fn purge_destroyed(&mut self, out: &mut Vec<ObjectId>) {
        let objects = &mut self.objects;
        self.order.retain(|&id| {
            let destroyed = objects.get(id).is_none_or(GameObject::is_destroyed);
            if destroyed {
                objects.remove(id);
                out.push(id);
            }
            !destroyed
        });
    }
}
