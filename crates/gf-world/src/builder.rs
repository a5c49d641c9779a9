//! Fluent builder for constructing a [`GameObject`] in one expression.
//!
//! # Usage
//!
//! ```rust
//! use gf_core::Vec2;
//! use gf_world::{GameObjectBuilder, Health, World};
//!
//! let mut world = World::new();
//! let enemy = world.spawn(
//!     GameObjectBuilder::new("enemy")
//!         .position(Vec2::new(4.0, 0.0))
//!         .health(30.0)
//!         .metadata("team", "red")
//!         .build(),
//! );
//!
//! let object = world.get(enemy).unwrap();
//! assert_eq!(object.get_component::<Health>().unwrap().current, 30.0);
//! assert_eq!(object.get_metadata("team"), Some("red"));
//! ```

use gf_core::Vec2;

use crate::{GameObject, Health};

/// Fluent builder for [`GameObject`].
pub struct GameObjectBuilder {
    object: GameObject,
}

impl GameObjectBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { object: GameObject::new(name) }
    }

    pub fn position(mut self, position: Vec2) -> Self {
        self.object.transform.position = position;
        self
    }

    pub fn velocity(mut self, velocity: Vec2) -> Self {
        self.object.transform.velocity = velocity;
        self
    }

    /// Attach a full [`Health`] component with `max` hit points.
    pub fn health(self, max: f32) -> Self {
        self.component(Health::new(max))
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.object.set_metadata(key, value);
        self
    }

    /// Attach an application-defined component.
    ///
    /// Calling this twice for the same `T` keeps the second value.
    pub fn component<T: 'static>(mut self, value: T) -> Self {
        self.object.insert_component(value);
        self
    }

    pub fn build(self) -> GameObject {
        self.object
    }
}
