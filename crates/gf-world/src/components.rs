//! Built-in components that the stock actions and behaviors understand.

use gf_core::Vec2;

/// Position and velocity of a game object.
///
/// Every object has one; it is a field of `GameObject`, not an optional
/// component.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec2,
    /// World units per second.  Consumed by the `Drift` behavior.
    pub velocity: Vec2,
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self { position, velocity: Vec2::ZERO }
    }
}

/// Hit points.  Objects without a `Health` component ignore damage.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    pub current: f32,
    pub max:     f32,
}

impl Health {
    /// Full health with the given maximum.
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Subtract `amount` (negative values are ignored), clamping at zero.
    /// Returns the remaining hit points.
    pub fn take(&mut self, amount: f32) -> f32 {
        if amount > 0.0 {
            self.current = (self.current - amount).max(0.0);
        }
        self.current
    }
}
