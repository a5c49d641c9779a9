//! Unit tests for gf-world.

use gf_core::Vec2;

use crate::{ComponentMap, GameObjectBuilder, Health, ParticleRequest, SpawnRequest, World};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn world_with_enemy(health: f32) -> (World, gf_core::ObjectId) {
    let mut world = World::new();
    let id = world.spawn(GameObjectBuilder::new("enemy").health(health).build());
    (world, id)
}

// ── ComponentMap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod component_tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Armor(u32);

    #[test]
    fn insert_get_remove() {
        let mut map = ComponentMap::new();
        assert!(map.insert(Armor(1)).is_none());
        assert_eq!(map.insert(Armor(2)), Some(Armor(1)));
        assert_eq!(map.get::<Armor>(), Some(&Armor(2)));
        map.get_mut::<Armor>().unwrap().0 = 5;
        assert_eq!(map.remove::<Armor>(), Some(Armor(5)));
        assert!(!map.contains::<Armor>());
    }

    #[test]
    fn missing_type_is_none() {
        let map = ComponentMap::new();
        assert!(map.get::<Armor>().is_none());
        assert_eq!(map.type_count(), 0);
    }

    #[test]
    fn distinct_types_coexist() {
        let mut map = ComponentMap::new();
        map.insert(Armor(1));
        map.insert(Health::new(10.0));
        assert_eq!(map.type_count(), 2);
        map.clear();
        assert_eq!(map.type_count(), 0);
    }
}

// ── GameObject / builder ──────────────────────────────────────────────────────

#[cfg(test)]
mod object_tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let object = GameObjectBuilder::new("bolt")
            .position(Vec2::new(1.0, 2.0))
            .velocity(Vec2::new(0.0, 5.0))
            .metadata("team", "blue")
            .build();
        assert_eq!(object.name, "bolt");
        assert_eq!(object.position(), Vec2::new(1.0, 2.0));
        assert_eq!(object.transform.velocity, Vec2::new(0.0, 5.0));
        assert_eq!(object.get_metadata("team"), Some("blue"));
        assert_eq!(object.get_metadata("missing"), None);
        assert!(!object.has_component::<Health>());
    }

    #[test]
    fn destroy_reports_first_call_only() {
        let mut object = GameObjectBuilder::new("x").build();
        assert!(object.destroy());
        assert!(!object.destroy());
        assert!(object.is_destroyed());
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod world_tests {
    use super::*;

    #[test]
    fn spawn_order_is_preserved() {
        let mut world = World::new();
        let a = world.spawn(GameObjectBuilder::new("a").build());
        let b = world.spawn(GameObjectBuilder::new("b").build());
        let c = world.spawn(GameObjectBuilder::new("c").build());
        assert_eq!(world.ids(), &[a, b, c]);
        assert_eq!(world.len(), 3);
    }

    #[test]
    fn apply_damage_reduces_health_and_emits() {
        let (mut world, id) = world_with_enemy(30.0);
        let damaged = world.get_mut(id).unwrap().events.damaged.subscribe();

        assert_eq!(world.apply_damage(id, 10.0), Some(20.0));
        let event = damaged.pop().unwrap();
        assert_eq!(event.amount, 10.0);
        assert_eq!(event.remaining, 20.0);
    }

    #[test]
    fn died_fires_once() {
        let (mut world, id) = world_with_enemy(10.0);
        let died = world.get_mut(id).unwrap().events.died.subscribe();

        world.apply_damage(id, 15.0);
        world.apply_damage(id, 5.0);
        assert_eq!(died.len(), 1);
        assert_eq!(world.get(id).unwrap().get_component::<Health>().unwrap().current, 0.0);
    }

    #[test]
    fn damage_without_health_is_skipped() {
        let mut world = World::new();
        let rock = world.spawn(GameObjectBuilder::new("rock").build());
        assert_eq!(world.apply_damage(rock, 5.0), None);
    }

    #[test]
    fn destroy_is_idempotent() {
        let (mut world, id) = world_with_enemy(1.0);
        assert!(world.destroy(id));
        assert!(!world.destroy(id));
        assert!(!world.is_alive(id));
        // Still queryable until purged.
        assert!(world.get(id).is_some());

        world.purge_destroyed(&mut Vec::new());
        assert!(!world.destroy(id));
    }

    #[test]
    fn purge_invalidates_handles() {
        let (mut world, id) = world_with_enemy(1.0);
        let keep = world.spawn(GameObjectBuilder::new("keep").build());
        world.destroy(id);

        let mut purged = Vec::new();
        world.purge_destroyed(&mut purged);
        assert_eq!(purged, vec![id]);
        assert!(world.get(id).is_none());
        assert_eq!(world.ids(), &[keep]);

        // A new object may reuse the slot but never the handle.
        let fresh = world.spawn(GameObjectBuilder::new("fresh").build());
        assert_ne!(fresh, id);
        assert!(world.get(id).is_none());
    }

    #[test]
    fn translate_moves_object() {
        let mut world = World::new();
        let id = world.spawn(GameObjectBuilder::new("m").build());
        assert!(world.translate(id, Vec2::new(1.0, -1.0)));
        assert_eq!(world.position(id), Some(Vec2::new(1.0, -1.0)));
    }

    #[test]
    fn collisions_notify_both_sides() {
        let mut world = World::new();
        let a = world.spawn(GameObjectBuilder::new("a").build());
        let b = world.spawn(GameObjectBuilder::new("b").build());
        let sub_a = world.get_mut(a).unwrap().events.collided.subscribe();
        let sub_b = world.get_mut(b).unwrap().events.collided.subscribe();

        world.report_collision(a, b);
        assert_eq!(sub_a.pop(), Some(b));
        assert_eq!(sub_b.pop(), Some(a));
    }

    #[test]
    fn outboxes_drain() {
        let mut world = World::new();
        world.request_spawn(SpawnRequest {
            prefab:   "bolt".into(),
            position: Vec2::ZERO,
            velocity: Vec2::new(1.0, 0.0),
            source:   None,
        });
        world.emit_particle(ParticleRequest { effect: "spark".into(), position: Vec2::ZERO });
        assert_eq!(world.pending_spawns().len(), 1);

        let mut spawns = Vec::new();
        let mut particles = Vec::new();
        world.drain_spawn_requests(&mut spawns);
        world.drain_particles(&mut particles);
        assert_eq!(spawns[0].prefab, "bolt");
        assert_eq!(particles[0].effect, "spark");
        assert!(world.pending_spawns().is_empty());
        assert!(world.pending_particles().is_empty());
    }
}
