//! skirmish — a turret holding off scripted waves.
//!
//! Loads `data/scene.json`, `data/prefabs.json` and `data/waves.csv`, runs
//! the scene with a naive proximity check standing in for a physics engine,
//! and prints a summary.  `RUST_LOG=debug` shows every action registration
//! and reclamation.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use tracing_subscriber::EnvFilter;

use gf_core::{ObjectId, Vec2};
use gf_scene::{
    FrameStats, PrefabRegistry, Scene, SceneBuilder, SceneObserver, load_config, load_waves_csv,
};
use gf_world::{Health, ParticleRequest};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Objects closer than this touch.
const CONTACT_RADIUS: f32 = 0.6;
const REPORT_EVERY:   u64 = 100;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tally {
    spawned:      usize,
    dropped:      usize,
    purged:       usize,
    reaped:       usize,
    peak_objects: usize,
    peak_actions: usize,
    effects:      FxHashMap<String, usize>,
}

impl SceneObserver for Tally {
    fn on_particles(&mut self, _frame: u64, particles: &[ParticleRequest]) {
        for particle in particles {
            *self.effects.entry(particle.effect.clone()).or_default() += 1;
        }
    }

    fn on_frame_end(&mut self, stats: &FrameStats) {
        self.spawned += stats.spawned;
        self.dropped += stats.dropped_spawns;
        self.purged += stats.purged;
        self.reaped += stats.actions_reaped;
        self.peak_objects = self.peak_objects.max(stats.live_objects);
        self.peak_actions = self.peak_actions.max(stats.actions_live);
        if stats.frame % REPORT_EVERY == 0 {
            tracing::info!(
                frame = stats.frame,
                t = %stats.now,
                objects = stats.live_objects,
                actions = stats.actions_live,
                "progress"
            );
        }
    }
}

// ── Contacts ──────────────────────────────────────────────────────────────────

/// Report every pair of live, damageable objects within `CONTACT_RADIUS`.
fn feed_contacts(scene: &mut Scene, scratch: &mut Vec<(ObjectId, Vec2)>) -> usize {
    scratch.clear();
    scratch.extend(scene.world.ids().iter().filter_map(|&id| {
        let object = scene.world.get(id)?;
        (!object.is_destroyed() && object.has_component::<Health>()).then(|| (id, object.position()))
    }));

    let mut contacts = 0;
    for (i, &(a, at)) in scratch.iter().enumerate() {
        for &(b, bt) in &scratch[i + 1..] {
            if at.distance(bt) <= CONTACT_RADIUS {
                scene.world.report_collision(a, b);
                contacts += 1;
            }
        }
    }
    contacts
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let config = load_config(&data.join("scene.json")).context("loading scene.json")?;
    let prefabs = PrefabRegistry::load(&data.join("prefabs.json")).context("loading prefabs.json")?;
    let waves = load_waves_csv(&data.join("waves.csv")).context("loading waves.csv")?;

    println!("=== skirmish ===");
    println!(
        "Frames: {}  |  dt: {}s  |  Seed: {}  |  Prefabs: {}  |  Wave rows: {}",
        config.total_frames,
        config.fixed_dt_secs,
        config.seed,
        prefabs.len(),
        waves.len()
    );

    let mut scene = SceneBuilder::new(config).prefabs(prefabs).waves(waves).build()?;
    let turret = scene.spawn("turret", Some(Vec2::ZERO))?;
    scene.fire_prototype("shield_pulse", Some(turret), 0.0)?;

    let mut tally = Tally::default();
    let mut scratch = Vec::new();
    let mut contacts = 0;
    let dt = scene.config.fixed_dt_secs;
    let started = Instant::now();

    while scene.clock.frame < scene.config.end_frame() {
        contacts += feed_contacts(&mut scene, &mut scratch);
        scene.step(dt, &mut tally);
    }
    let elapsed = started.elapsed();

    println!();
    println!("Finished {} in {:.2?}", scene.clock, elapsed);
    println!(
        "Turret: {}",
        match scene.world.get(turret).and_then(|t| t.get_component::<Health>()) {
            Some(health) => format!("standing ({:.0}/{:.0} hp)", health.current, health.max),
            None => "destroyed".to_owned(),
        }
    );
    println!(
        "Objects: spawned {}, dropped {}, purged {}, peak {}, live {}",
        tally.spawned,
        tally.dropped,
        tally.purged,
        tally.peak_objects,
        scene.world.len()
    );
    println!("Contacts reported: {contacts}");

    let manager = scene.manager.stats();
    println!(
        "Actions: registered {}, completed {}, cancelled {}, reaped {}, peak live {}",
        manager.registered, manager.completed, manager.cancelled, tally.reaped, tally.peak_actions
    );
    let pool = scene.actions.stats();
    println!(
        "Action pool: constructed {}, reused {}, released {}, free {}",
        pool.constructed,
        pool.reused,
        pool.released,
        scene.actions.total_free()
    );
    let pool = scene.behaviors.stats();
    println!(
        "Behavior pool: constructed {}, reused {}, released {}",
        pool.constructed, pool.reused, pool.released
    );

    let mut effects: Vec<_> = tally.effects.into_iter().collect();
    effects.sort();
    for (effect, count) in effects {
        println!("  {effect:<18} {count}");
    }
    Ok(())
}
