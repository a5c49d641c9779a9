//! Frame time model.
//!
//! # Design
//!
//! Frame deltas arrive as `f32` seconds, but accumulated time is kept as an
//! integer count of microseconds (`SimTime`).  Registration delays are
//! compared against this counter, so a 2.0 s delay crossed by deltas of
//! 1.9 s + 0.2 s behaves identically on every platform and long sessions
//! accumulate no floating-point drift.

use std::fmt;

use crate::{GfError, GfResult};

const MICROS_PER_SEC: f64 = 1_000_000.0;

// ── SimTime ──────────────────────────────────────────────────────────────────

/// Absolute or relative simulation time in whole microseconds.
///
/// A `u64` of microseconds lasts ~585,000 years of simulated time.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// Convert seconds to `SimTime`, rounding to the nearest microsecond.
    ///
    /// Negative, NaN, and infinite inputs clamp to `ZERO`; a delay can
    /// never point into the past.
    #[inline]
    pub fn from_secs(secs: f32) -> SimTime {
        if !secs.is_finite() || secs <= 0.0 {
            return SimTime::ZERO;
        }
        SimTime((secs as f64 * MICROS_PER_SEC).round() as u64)
    }

    /// Seconds as `f64`.
    #[inline]
    pub fn as_secs(self) -> f64 {
        self.0 as f64 / MICROS_PER_SEC
    }

    /// Time elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: SimTime) -> SimTime {
        SimTime(self.0.saturating_sub(earlier.0))
    }
}

impl std::ops::Add for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::AddAssign for SimTime {
    #[inline]
    fn add_assign(&mut self, rhs: SimTime) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.as_secs())
    }
}

// ── FrameClock ───────────────────────────────────────────────────────────────

/// Frame counter plus accumulated simulation time.
///
/// `FrameClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameClock {
    /// Number of completed frames.
    pub frame: u64,
    /// Accumulated time at the end of the last completed frame.
    pub now: SimTime,
    /// Delta of the last completed frame, in seconds.
    pub last_dt_secs: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close a frame of length `dt_secs` and return the new `now`.
    #[inline]
    pub fn advance(&mut self, dt_secs: f32) -> SimTime {
        self.frame += 1;
        self.now += SimTime::from_secs(dt_secs);
        self.last_dt_secs = dt_secs.max(0.0);
        self.now
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame {} @ {}", self.frame, self.now)
    }
}

// ── SceneConfig ──────────────────────────────────────────────────────────────

/// Top-level scene configuration.
///
/// Typically loaded from a JSON file by the application and passed to the
/// scene builder, which validates it.  Every field has a default so a
/// partial file is accepted.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneConfig {
    /// Delta used by `Scene::run` for every frame.  Default: 1/60 s.
    pub fixed_dt_secs: f32,

    /// Frames `Scene::run` executes before returning.  Default: 600.
    pub total_frames: u64,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Upper bound on live game objects; spawns beyond it are dropped with a
    /// warning.  Default: 4096.
    pub max_objects: usize,

    /// Instances of every action kind constructed up front so the first
    /// frames already run allocation-free.  Default: 0.
    pub pool_prewarm: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fixed_dt_secs: 1.0 / 60.0,
            total_frames:  600,
            seed:          0,
            max_objects:   4096,
            pool_prewarm:  0,
        }
    }
}

impl SceneConfig {
    /// The frame at which `Scene::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_frame(&self) -> u64 {
        self.total_frames
    }

    /// Reject configurations the frame loop cannot run.
    pub fn validate(&self) -> GfResult<()> {
        if !self.fixed_dt_secs.is_finite() || self.fixed_dt_secs <= 0.0 {
            return Err(GfError::Config(format!(
                "fixed_dt_secs must be a positive number, got {}",
                self.fixed_dt_secs
            )));
        }
        if self.max_objects == 0 {
            return Err(GfError::Config("max_objects must be at least 1".into()));
        }
        Ok(())
    }

    /// Construct a `FrameClock` pre-configured for this run.
    pub fn make_clock(&self) -> FrameClock {
        FrameClock::new()
    }
}
