//! Fluent builder for constructing a [`Scene`].

use gf_action::ActionPool;
use gf_behavior::BehaviorPool;
use gf_core::SceneConfig;

use crate::{PrefabRegistry, Scene, SceneResult, WaveEntry, validate_config};

/// Fluent builder for [`Scene`].
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                   |
/// |-----------------|---------------------------|
/// | `.prefabs(r)`   | Empty `PrefabRegistry`    |
/// | `.waves(v)`     | No scripted spawns        |
///
/// # Example
///
/// ```rust,ignore
/// let mut scene = SceneBuilder::new(config)
///     .prefabs(PrefabRegistry::load(Path::new("prefabs.json"))?)
///     .waves(load_waves_csv(Path::new("waves.csv"))?)
///     .build()?;
/// scene.run(&mut NoopObserver);
/// ```
pub struct SceneBuilder {
    config:  SceneConfig,
    prefabs: Option<PrefabRegistry>,
    waves:   Vec<WaveEntry>,
}

impl SceneBuilder {
    pub fn new(config: SceneConfig) -> Self {
        Self { config, prefabs: None, waves: Vec::new() }
    }

    pub fn prefabs(mut self, prefabs: PrefabRegistry) -> Self {
        self.prefabs = Some(prefabs);
        self
    }

    /// Scripted spawns, timed from the start of the scene.  Every prefab
    /// they name must be registered.
    pub fn waves(mut self, waves: Vec<WaveEntry>) -> Self {
        self.waves = waves;
        self
    }

    /// Validate inputs, prewarm the pools, schedule the waves, and return a
    /// ready-to-run [`Scene`].
    pub fn build(self) -> SceneResult<Scene> {
        validate_config(&self.config)?;

        let mut actions = ActionPool::new();
        let mut behaviors = BehaviorPool::new();
        if self.config.pool_prewarm > 0 {
            actions.prewarm(self.config.pool_prewarm);
            behaviors.prewarm(self.config.pool_prewarm);
        }

        let prefabs = self.prefabs.unwrap_or_default();
        let mut scene = Scene::new(self.config, prefabs, actions, behaviors);
        if !self.waves.is_empty() {
            scene.schedule_waves(&self.waves)?;
        }
        tracing::debug!(
            seed = scene.config.seed,
            dt = scene.config.fixed_dt_secs,
            frames = scene.config.total_frames,
            prefabs = scene.prefabs.len(),
            "scene built"
        );
        Ok(scene)
    }
}
