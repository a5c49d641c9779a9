//! Scene observer trait for progress reporting and effect consumption.

use gf_core::{FrameClock, SimTime};
use gf_world::ParticleRequest;

/// Counters for one completed frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// 1-based index of the frame.
    pub frame:          u64,
    /// Accumulated time at the end of the frame.
    pub now:            SimTime,
    /// Objects alive once destroyed ones were purged.
    pub live_objects:   usize,
    /// Prefab instances created from spawn requests.
    pub spawned:        usize,
    /// Spawn requests dropped (unknown prefab or object cap reached).
    pub dropped_spawns: usize,
    pub purged:         usize,
    /// Actions the manager reclaimed this frame.
    pub actions_reaped: usize,
    /// Actions still owned by the manager at the end of the frame.
    pub actions_live:   usize,
    pub particles:      usize,
}

/// Callbacks invoked by [`Scene`][crate::Scene] at key points in the frame
/// loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress { every: u64 }
///
/// impl SceneObserver for Progress {
///     fn on_frame_end(&mut self, stats: &FrameStats) {
///         if stats.frame % self.every == 0 {
///             println!("frame {}: {} objects", stats.frame, stats.live_objects);
///         }
///     }
/// }
/// ```
pub trait SceneObserver {
    /// Called at the very start of each frame, before any processing.
    /// `frame` is the 1-based index of the frame about to run.
    fn on_frame_start(&mut self, _frame: u64) {}

    /// Particle requests raised this frame.  The scene has no particle
    /// engine of its own; this is where one plugs in.
    fn on_particles(&mut self, _frame: u64, _particles: &[ParticleRequest]) {}

    /// Called at the end of each frame.
    fn on_frame_end(&mut self, _stats: &FrameStats) {}

    /// Called once after `Scene::run` completes its final frame.
    fn on_scene_end(&mut self, _clock: &FrameClock) {}
}

/// A [`SceneObserver`] that does nothing.
pub struct NoopObserver;

impl SceneObserver for NoopObserver {}
