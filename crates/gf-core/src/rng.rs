//! Deterministic scene-level RNG.
//!
//! One `SimRng` is seeded from `SceneConfig::seed` and threaded explicitly
//! through behavior updates.  Behaviors are updated in spawn order, so the
//! sequence of draws (and therefore the whole run) is reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Scene-level RNG for gameplay randomness (spawn jitter, spread).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Uniform sample in `[-spread, spread]`; `0.0` when `spread <= 0`.
    #[inline]
    pub fn jitter(&mut self, spread: f32) -> f32 {
        if spread > 0.0 && spread.is_finite() {
            self.0.gen_range(-spread..=spread)
        } else {
            0.0
        }
    }
}

impl std::fmt::Debug for SimRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SimRng(..)")
    }
}
