//! The `Scene` struct and its frame loop.

use slotmap::SecondaryMap;

use gf_action::{Action, ActionCallback, ActionPool, ActionScheduler, SpawnAction};
use gf_behavior::{Behavior, BehaviorComponent, BehaviorContext, BehaviorError, BehaviorPool};
use gf_core::{ActionHandle, FrameClock, ObjectId, SceneConfig, SimRng, Vec2};
use gf_schedule::ActionManager;
use gf_world::{GameObject, ParticleRequest, SpawnRequest, World};

use crate::{FrameStats, PrefabRegistry, SceneError, SceneObserver, SceneResult, WaveEntry};

/// Metadata key copied from a spawn request's source onto the spawned
/// object when the prefab does not set one itself.
const TEAM_KEY: &str = "team";

// ── Scene ─────────────────────────────────────────────────────────────────────

/// Owns every collaborator of the action/behavior core and drives the frame
/// loop:
///
/// 1. **Behaviors**: every live object's component updates, objects in
///    spawn order, behaviors in insertion order.
/// 2. **Actions**: the manager promotes due delays, drives running actions,
///    fires completion callbacks, and releases finished actions to the pool.
/// 3. **Spawns**: spawn requests raised this frame become prefab instances;
///    their behaviors are initialized, then post-initialized.
/// 4. **Particles**: particle requests are handed to the observer.
/// 5. **Purge**: destroyed objects are freed and their behaviors destroyed
///    and released.
/// 6. **Activate**: actions registered after the manager's update become
///    runnable, so they are first driven next frame.
///
/// Create via [`SceneBuilder`][crate::SceneBuilder].
pub struct Scene {
    pub config: SceneConfig,

    /// Completed frames and accumulated time.
    pub clock: FrameClock,

    pub world: World,

    /// Behavior components keyed by owning object.
    pub components: SecondaryMap<ObjectId, BehaviorComponent>,

    pub manager: ActionManager,

    pub actions: ActionPool,

    pub behaviors: BehaviorPool,

    pub prefabs: PrefabRegistry,

    /// Seeded from `config.seed`; shared by all behaviors.
    pub rng: SimRng,

    // Per-frame scratch buffers, kept for their capacity.
    order:     Vec<ObjectId>,
    spawns:    Vec<SpawnRequest>,
    particles: Vec<ParticleRequest>,
    purged:    Vec<ObjectId>,
}

impl Scene {
    pub(crate) fn new(
        config:    SceneConfig,
        prefabs:   PrefabRegistry,
        actions:   ActionPool,
        behaviors: BehaviorPool,
    ) -> Self {
        Self {
            clock:      config.make_clock(),
            rng:        SimRng::new(config.seed),
            config,
            world:      World::new(),
            components: SecondaryMap::new(),
            manager:    ActionManager::new(),
            actions,
            behaviors,
            prefabs,
            order:      Vec::new(),
            spawns:     Vec::new(),
            particles:  Vec::new(),
            purged:     Vec::new(),
        }
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run fixed-delta frames until `config.end_frame()`.
    pub fn run<O: SceneObserver>(&mut self, observer: &mut O) {
        let dt = self.config.fixed_dt_secs;
        while self.clock.frame < self.config.end_frame() {
            self.step(dt, observer);
        }
        observer.on_scene_end(&self.clock);
    }

    /// Run exactly `n` fixed-delta frames, ignoring `end_frame`.
    pub fn run_frames<O: SceneObserver>(&mut self, n: u64, observer: &mut O) {
        let dt = self.config.fixed_dt_secs;
        for _ in 0..n {
            self.step(dt, observer);
        }
    }

    /// Run one frame of length `dt_secs`.  Negative or non-finite deltas
    /// count as zero.
    pub fn step<O: SceneObserver>(&mut self, dt_secs: f32, observer: &mut O) -> FrameStats {
        let dt = if dt_secs.is_finite() { dt_secs.max(0.0) } else { 0.0 };
        let frame = self.clock.frame + 1;
        observer.on_frame_start(frame);

        self.update_behaviors(dt);
        let actions_reaped = self.manager.update(dt, &mut self.world, &mut self.actions);
        let (spawned, dropped_spawns) = self.fulfil_spawns(dt);

        self.world.drain_particles(&mut self.particles);
        let particles = self.particles.len();
        if particles > 0 {
            observer.on_particles(frame, &self.particles);
            self.particles.clear();
        }

        let purged = self.purge();
        self.manager.activate_pending();
        let now = self.clock.advance(dt);

        let stats = FrameStats {
            frame,
            now,
            live_objects: self.world.len(),
            spawned,
            dropped_spawns,
            purged,
            actions_reaped,
            actions_live: self.manager.len(),
            particles,
        };
        tracing::trace!(?stats, "frame complete");
        observer.on_frame_end(&stats);
        stats
    }

    // ── Frame phases ──────────────────────────────────────────────────────

    fn update_behaviors(&mut self, dt: f32) {
        let Self { world, components, manager, actions, behaviors, rng, clock, order, .. } = self;
        order.clear();
        order.extend_from_slice(world.ids());

        let mut ctx = BehaviorContext::new(world, actions, manager, rng, dt, clock.now);
        for &id in order.iter() {
            if !ctx.world.is_alive(id) {
                continue;
            }
            if let Some(component) = components.get_mut(id) {
                component.update(&mut ctx, behaviors);
            }
        }
    }

    /// Returns `(spawned, dropped)`.
    fn fulfil_spawns(&mut self, dt: f32) -> (usize, usize) {
        self.world.drain_spawn_requests(&mut self.spawns);
        let mut requests = std::mem::take(&mut self.spawns);
        let (mut spawned, mut dropped) = (0, 0);
        for request in requests.drain(..) {
            if self.spawn_request(&request, dt).is_some() {
                spawned += 1;
            } else {
                dropped += 1;
            }
        }
        self.spawns = requests;
        (spawned, dropped)
    }

    fn spawn_request(&mut self, request: &SpawnRequest, dt: f32) -> Option<ObjectId> {
        if self.world.len() >= self.config.max_objects {
            tracing::warn!(prefab = %request.prefab, cap = self.config.max_objects, "object cap reached; spawn dropped");
            return None;
        }
        let Some(prefab) = self.prefabs.id(&request.prefab) else {
            tracing::warn!(prefab = %request.prefab, "unknown prefab; spawn dropped");
            return None;
        };
        let velocity = match self.prefabs.get(prefab) {
            Some(template) if request.velocity.is_zero() => template.velocity,
            _ => request.velocity,
        };
        let team = request
            .source
            .and_then(|source| self.world.get(source))
            .and_then(|source| source.get_metadata(TEAM_KEY))
            .map(str::to_owned);

        let (id, component) = self.prefabs.instantiate(
            prefab,
            request.position,
            velocity,
            &mut self.world,
            &mut self.behaviors,
        )?;
        if let (Some(team), Some(object)) = (team, self.world.get_mut(id)) {
            if object.get_metadata(TEAM_KEY).is_none() {
                object.set_metadata(TEAM_KEY, team);
            }
        }
        tracing::debug!(?id, prefab = %request.prefab, source = ?request.source, "prefab spawned");
        self.install(component, dt);
        Some(id)
    }

    fn purge(&mut self) -> usize {
        self.world.purge_destroyed(&mut self.purged);
        let count = self.purged.len();
        for id in self.purged.drain(..) {
            if let Some(mut component) = self.components.remove(id) {
                component.destroy_all(&mut self.behaviors);
            }
        }
        count
    }

    /// Initialize `component`'s behaviors and store it under its owner.
    fn install(&mut self, mut component: BehaviorComponent, dt: f32) {
        let Self { world, components, manager, actions, rng, clock, .. } = self;
        let mut ctx = BehaviorContext::new(world, actions, manager, rng, dt, clock.now);
        component.initialize_all(&mut ctx);
        components.insert(component.owner(), component);
    }

    // ── Spawning outside the frame ────────────────────────────────────────

    /// Instantiate prefab `name` at `position`, or at the prefab's own
    /// position when `None`.  Its behaviors are initialized immediately.
    pub fn spawn(&mut self, name: &str, position: Option<Vec2>) -> SceneResult<ObjectId> {
        let prefab = self.prefabs.id(name).ok_or_else(|| SceneError::UnknownPrefab(name.to_owned()))?;
        let (position, velocity) = match self.prefabs.get(prefab) {
            Some(template) => (position.unwrap_or(template.position), template.velocity),
            None => return Err(SceneError::UnknownPrefab(name.to_owned())),
        };
        let (id, component) = self
            .prefabs
            .instantiate(prefab, position, velocity, &mut self.world, &mut self.behaviors)
            .ok_or_else(|| SceneError::UnknownPrefab(name.to_owned()))?;
        self.install(component, self.config.fixed_dt_secs);
        self.manager.activate_pending();
        Ok(id)
    }

    /// Add a hand-built object with `behaviors` attached.
    ///
    /// On a duplicate behavior name the object is destroyed (purged at the
    /// end of the next frame) and every behavior handed over so far goes
    /// back to the pool.
    pub fn spawn_object(
        &mut self,
        object:    GameObject,
        behaviors: impl IntoIterator<Item = Behavior>,
    ) -> SceneResult<ObjectId> {
        let id = self.world.spawn(object);
        let mut component = BehaviorComponent::new(id);
        for behavior in behaviors {
            if let Err(BehaviorError::DuplicateName { name, owner, rejected }) =
                component.add_behavior(behavior)
            {
                self.behaviors.release(*rejected);
                component.destroy_all(&mut self.behaviors);
                self.world.destroy(id);
                return Err(SceneError::DuplicateBehavior { name, owner });
            }
        }
        self.install(component, self.config.fixed_dt_secs);
        self.manager.activate_pending();
        Ok(id)
    }

    // ── Scheduling outside the frame ──────────────────────────────────────

    /// Schedule `action` with no parent.  Runnable from the next frame (or
    /// once `delay_secs` has elapsed).
    pub fn fire_action(
        &mut self,
        mut action: Action,
        target:     Option<ObjectId>,
        callback:   Option<ActionCallback>,
        delay_secs: f32,
    ) -> ActionHandle {
        action.set_target(target);
        let handle = if delay_secs > 0.0 {
            self.manager.register_delayed_action(action, delay_secs, callback)
        } else {
            self.manager.register_action(action, callback)
        };
        self.manager.activate_pending();
        handle
    }

    /// Instantiate the action prototype `name` and schedule it.
    pub fn fire_prototype(
        &mut self,
        name:       &str,
        target:     Option<ObjectId>,
        delay_secs: f32,
    ) -> SceneResult<ActionHandle> {
        let action = self
            .prefabs
            .actions()
            .instantiate(name, &mut self.actions)
            .ok_or_else(|| SceneError::UnknownAction(name.to_owned()))?;
        Ok(self.fire_action(action, target, None, delay_secs))
    }

    /// Register one delayed `Spawn` action per wave entry, timed from now.
    ///
    /// Every prefab is checked before anything is scheduled.
    pub fn schedule_waves(&mut self, waves: &[WaveEntry]) -> SceneResult<usize> {
        if let Some(unknown) = waves.iter().find(|w| !self.prefabs.contains(&w.prefab)) {
            return Err(SceneError::UnknownPrefab(unknown.prefab.clone()));
        }
        for wave in waves {
            let spawn = Action::draw(&mut self.actions, |s: &mut SpawnAction| {
                s.prefab.clone_from(&wave.prefab);
                s.offset = wave.position;
            });
            self.manager.register_delayed_action(spawn, wave.at_secs, None);
        }
        self.manager.activate_pending();
        tracing::debug!(waves = waves.len(), "wave script scheduled");
        Ok(waves.len())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn component(&self, id: ObjectId) -> Option<&BehaviorComponent> {
        self.components.get(id)
    }

    pub fn component_mut(&mut self, id: ObjectId) -> Option<&mut BehaviorComponent> {
        self.components.get_mut(id)
    }

    /// Objects in the world, destroyed-but-not-yet-purged included.
    pub fn object_count(&self) -> usize {
        self.world.len()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("clock", &self.clock)
            .field("objects", &self.world.len())
            .field("manager", &self.manager)
            .field("prefabs", &self.prefabs)
            .finish()
    }
}
