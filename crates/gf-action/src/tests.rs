//! Unit tests for gf-action.

use gf_core::{Decl, ObjectId, Vec2};
use gf_pool::PoolTag;
use gf_world::{GameObjectBuilder, Health, World};
use serde_json::json;

use crate::{
    Action, ActionContext, ActionPool, ActionTag, DamageAction, DestroyAction, EmitParticleAction,
    MoveAction, SpawnAction, WaitAction,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DT: f32 = 0.25;

fn world_with_enemy(health: f32) -> (World, ObjectId) {
    let mut world = World::new();
    let id = world.spawn(GameObjectBuilder::new("enemy").health(health).build());
    (world, id)
}

fn tick(action: &mut Action, world: &mut World, pool: &mut ActionPool) {
    let mut ctx = ActionContext::new(world, pool, DT);
    action.update(&mut ctx);
}

fn health(world: &World, id: ObjectId) -> f32 {
    world.get(id).unwrap().get_component::<Health>().unwrap().current
}

fn damage(pool: &mut ActionPool, amount: f32) -> Action {
    Action::draw(pool, |d: &mut DamageAction| d.amount = amount)
}

fn wait(pool: &mut ActionPool, secs: f32) -> Action {
    Action::draw(pool, |w: &mut WaitAction| w.duration_secs = secs)
}

// ── Lifecycle state ───────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn fresh_action_is_not_running() {
        let action = Action::new(ActionTag::Damage);
        assert!(action.is_finished());
        assert!(!action.is_destroyed());
        assert_eq!(action.target(), None);
        assert_eq!(action.parent(), None);
    }

    #[test]
    fn destroyed_implies_finished_for_every_kind() {
        for &tag in ActionTag::ALL {
            let mut action = Action::new(tag);
            action.initialize();
            assert!(!action.is_finished(), "{tag:?}");
            assert!(action.destroy(), "{tag:?}");
            assert!(action.is_destroyed() && action.is_finished(), "{tag:?}");
        }
    }

    #[test]
    fn destruction_event_fires_once_per_run() {
        let mut action = Action::new(ActionTag::Wait);
        action.initialize();
        assert!(action.destroy());
        assert!(!action.destroy());

        action.initialize();
        assert!(!action.is_destroyed());
        assert!(action.destroy());
    }

    #[test]
    fn completion_event_fires_once() {
        let mut action = Action::new(ActionTag::Wait);
        action.initialize();
        let mut state = action.state().clone();
        assert!(state.set_finished());
        assert!(!state.set_finished());
    }

    #[test]
    fn update_after_finish_escalates_to_destroyed() {
        let (mut world, enemy) = world_with_enemy(10.0);
        let mut pool = ActionPool::new();
        let mut action = damage(&mut pool, 2.0);
        action.set_target(Some(enemy));
        action.initialize();

        tick(&mut action, &mut world, &mut pool);
        assert!(action.is_finished());
        assert!(!action.is_destroyed());

        tick(&mut action, &mut world, &mut pool);
        assert!(action.is_destroyed());
        // The second update did no work.
        assert_eq!(health(&world, enemy), 8.0);
    }

    #[test]
    fn paused_leaf_does_nothing_until_resumed() {
        let (mut world, enemy) = world_with_enemy(10.0);
        let mut pool = ActionPool::new();
        let mut action = damage(&mut pool, 3.0);
        action.set_target(Some(enemy));
        action.initialize();
        action.pause();

        tick(&mut action, &mut world, &mut pool);
        assert_eq!(health(&world, enemy), 10.0);
        assert!(!action.is_finished());

        action.resume();
        tick(&mut action, &mut world, &mut pool);
        assert_eq!(health(&world, enemy), 7.0);
        assert!(action.is_finished());
    }
}

// ── Leaf effects ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod leaf_tests {
    use super::*;

    #[test]
    fn destroy_marks_target() {
        let (mut world, enemy) = world_with_enemy(1.0);
        let mut pool = ActionPool::new();
        let mut action = pool.get::<DestroyAction>();
        action.set_target(Some(enemy));
        action.initialize();
        tick(&mut action, &mut world, &mut pool);
        assert!(world.get(enemy).unwrap().is_destroyed());
        assert!(action.is_finished());
    }

    #[test]
    fn move_spreads_delta_over_duration() {
        let mut world = World::new();
        let id = world.spawn(GameObjectBuilder::new("m").build());
        let mut pool = ActionPool::new();
        let mut action = Action::draw(&mut pool, |m: &mut MoveAction| {
            m.delta = Vec2::new(10.0, 0.0);
            m.duration_secs = 1.0;
        });
        action.set_target(Some(id));
        action.initialize();

        tick(&mut action, &mut world, &mut pool);
        tick(&mut action, &mut world, &mut pool);
        assert_eq!(world.position(id), Some(Vec2::new(5.0, 0.0)));
        assert!(!action.is_finished());

        tick(&mut action, &mut world, &mut pool);
        tick(&mut action, &mut world, &mut pool);
        assert_eq!(world.position(id), Some(Vec2::new(10.0, 0.0)));
        assert!(action.is_finished());
    }

    #[test]
    fn instant_move_finishes_in_one_tick() {
        let mut world = World::new();
        let id = world.spawn(GameObjectBuilder::new("m").build());
        let mut pool = ActionPool::new();
        let mut action = Action::draw(&mut pool, |m: &mut MoveAction| m.delta = Vec2::new(0.0, 2.0));
        action.set_target(Some(id));
        action.initialize();
        tick(&mut action, &mut world, &mut pool);
        assert_eq!(world.position(id), Some(Vec2::new(0.0, 2.0)));
        assert!(action.is_finished());
    }

    #[test]
    fn spawn_requests_at_target_plus_offset() {
        let mut world = World::new();
        let ship = world.spawn(GameObjectBuilder::new("ship").position(Vec2::new(1.0, 1.0)).build());
        let mut pool = ActionPool::new();
        let mut action = Action::draw(&mut pool, |s: &mut SpawnAction| {
            s.prefab = "bolt".into();
            s.offset = Vec2::new(0.0, 2.0);
            s.velocity = Vec2::new(0.0, 8.0);
        });
        action.set_parent(Some(ship));
        action.set_target(Some(ship));
        action.initialize();
        tick(&mut action, &mut world, &mut pool);

        let request = &world.pending_spawns()[0];
        assert_eq!(request.prefab, "bolt");
        assert_eq!(request.position, Vec2::new(1.0, 3.0));
        assert_eq!(request.velocity, Vec2::new(0.0, 8.0));
        assert_eq!(request.source, Some(ship));
    }

    #[test]
    fn spawn_without_prefab_is_skipped() {
        let mut world = World::new();
        let mut pool = ActionPool::new();
        let mut action = pool.get::<SpawnAction>();
        action.initialize();
        tick(&mut action, &mut world, &mut pool);
        assert!(action.is_finished());
        assert!(world.pending_spawns().is_empty());
    }

    #[test]
    fn particle_without_target_uses_offset() {
        let mut world = World::new();
        let mut pool = ActionPool::new();
        let mut action = Action::draw(&mut pool, |e: &mut EmitParticleAction| {
            e.effect = "spark".into();
            e.offset = Vec2::new(3.0, 4.0);
        });
        action.initialize();
        tick(&mut action, &mut world, &mut pool);
        assert_eq!(world.pending_particles()[0].position, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn damage_on_missing_collaborators_is_skipped() {
        let mut world = World::new();
        let rock = world.spawn(GameObjectBuilder::new("rock").build());
        let mut pool = ActionPool::new();

        let mut untargeted = damage(&mut pool, 5.0);
        untargeted.initialize();
        tick(&mut untargeted, &mut world, &mut pool);
        assert!(untargeted.is_finished());

        let mut no_health = damage(&mut pool, 5.0);
        no_health.set_target(Some(rock));
        no_health.initialize();
        tick(&mut no_health, &mut world, &mut pool);
        assert!(no_health.is_finished());
        assert!(!world.get(rock).unwrap().has_component::<Health>());
    }

    #[test]
    fn wait_finishes_after_duration() {
        let mut world = World::new();
        let mut pool = ActionPool::new();
        let mut action = wait(&mut pool, 0.5);
        action.initialize();
        tick(&mut action, &mut world, &mut pool);
        assert!(!action.is_finished());
        tick(&mut action, &mut world, &mut pool);
        assert!(action.is_finished());
    }
}

// ── Sequence ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sequence_tests {
    use super::*;

    #[test]
    fn damage_then_destroy() {
        let (mut world, enemy) = world_with_enemy(30.0);
        let mut pool = ActionPool::new();
        let hit = damage(&mut pool, 10.0);
        let kill = pool.get::<DestroyAction>();
        let mut seq = Action::sequence(&mut pool, [hit, kill]);
        seq.set_target(Some(enemy));
        seq.initialize();

        tick(&mut seq, &mut world, &mut pool);
        assert_eq!(health(&world, enemy), 20.0);
        assert_eq!(seq.children().len(), 1);
        assert!(!seq.is_finished());

        tick(&mut seq, &mut world, &mut pool);
        assert!(world.get(enemy).unwrap().is_destroyed());
        assert!(seq.is_finished());
        assert!(seq.children().is_empty());
    }

    #[test]
    fn one_child_per_tick() {
        let (mut world, enemy) = world_with_enemy(10.0);
        let mut pool = ActionPool::new();
        let children: Vec<Action> = (0..3).map(|_| damage(&mut pool, 1.0)).collect();
        let mut seq = Action::sequence(&mut pool, children);
        seq.set_target(Some(enemy));
        seq.initialize();

        for n in 1..=3 {
            assert!(!seq.is_finished());
            tick(&mut seq, &mut world, &mut pool);
            assert_eq!(health(&world, enemy), 10.0 - n as f32);
            assert_eq!(seq.children().len(), 3 - n);
        }
        assert!(seq.is_finished());
        assert_eq!(pool.free_count(ActionTag::Damage), 3);
    }

    #[test]
    fn paused_sequence_does_not_drive_head() {
        let (mut world, enemy) = world_with_enemy(10.0);
        let mut pool = ActionPool::new();
        let hit = damage(&mut pool, 4.0);
        let mut seq = Action::sequence(&mut pool, [hit]);
        seq.set_target(Some(enemy));
        seq.initialize();
        seq.pause();

        tick(&mut seq, &mut world, &mut pool);
        assert_eq!(health(&world, enemy), 10.0);
        assert_eq!(seq.children()[0].updates(), 0);

        seq.resume();
        tick(&mut seq, &mut world, &mut pool);
        assert_eq!(health(&world, enemy), 6.0);
        assert!(seq.is_finished());
    }

    #[test]
    fn cancelled_head_is_dropped_without_effect() {
        let (mut world, enemy) = world_with_enemy(10.0);
        let mut pool = ActionPool::new();
        let hit = damage(&mut pool, 4.0);
        let pause = wait(&mut pool, 5.0);
        let mut seq = Action::sequence(&mut pool, [hit, pause]);
        seq.set_target(Some(enemy));
        seq.initialize();
        seq.children_mut()[0].destroy();

        tick(&mut seq, &mut world, &mut pool);
        assert_eq!(health(&world, enemy), 10.0);
        assert_eq!(seq.children().len(), 1);
        assert_eq!(seq.children()[0].tag(), ActionTag::Wait);
    }

    #[test]
    fn empty_sequence_finishes_immediately() {
        let mut world = World::new();
        let mut pool = ActionPool::new();
        let mut seq = Action::sequence(&mut pool, []);
        seq.initialize();
        tick(&mut seq, &mut world, &mut pool);
        assert!(seq.is_finished());
    }
}

// ── Parallel ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod parallel_tests {
    use super::*;

    #[test]
    fn destroyed_child_is_skipped_and_finished_child_removed() {
        let (mut world, enemy) = world_with_enemy(30.0);
        let mut pool = ActionPool::new();
        let mut a = damage(&mut pool, 5.0);
        a.set_target(Some(enemy));
        let mut b = damage(&mut pool, 3.0);
        b.set_target(Some(enemy));
        let c = wait(&mut pool, 10.0);
        let mut par = Action::parallel(&mut pool, [a, b, c]);
        par.initialize();
        par.children_mut()[0].destroy();

        tick(&mut par, &mut world, &mut pool);

        // Only B dealt damage.
        assert_eq!(health(&world, enemy), 27.0);
        assert_eq!(par.children().len(), 1);
        assert_eq!(par.children()[0].tag(), ActionTag::Wait);
        assert_eq!(par.children()[0].updates(), 1);
        assert_eq!(pool.free_count(ActionTag::Damage), 2);
        assert!(!par.is_finished());
    }

    #[test]
    fn paused_parallel_updates_nothing() {
        let (mut world, enemy) = world_with_enemy(30.0);
        let mut pool = ActionPool::new();
        let hit = damage(&mut pool, 5.0);
        let slow = wait(&mut pool, 1.0);
        let kill = pool.get::<DestroyAction>();
        let mut par = Action::parallel(&mut pool, [hit, slow, kill]);
        par.set_target(Some(enemy));
        par.initialize();
        par.pause();

        tick(&mut par, &mut world, &mut pool);
        assert_eq!(par.children().len(), 3);
        assert!(par.children().iter().all(|c| c.updates() == 0));
        assert_eq!(health(&world, enemy), 30.0);
        assert!(world.is_alive(enemy));
    }

    #[test]
    fn finishes_when_all_children_done() {
        let (mut world, enemy) = world_with_enemy(30.0);
        let mut pool = ActionPool::new();
        let hit = damage(&mut pool, 5.0);
        let kill = pool.get::<DestroyAction>();
        let mut par = Action::parallel(&mut pool, [hit, kill]);
        par.set_target(Some(enemy));
        par.initialize();

        tick(&mut par, &mut world, &mut pool);
        assert_eq!(health(&world, enemy), 25.0);
        assert!(world.get(enemy).unwrap().is_destroyed());
        assert!(par.is_finished());
    }
}

// ── Parent / target propagation ───────────────────────────────────────────────

#[cfg(test)]
mod propagation_tests {
    use super::*;

    #[test]
    fn changes_reach_every_child() {
        let mut world = World::new();
        let owner = world.spawn(GameObjectBuilder::new("owner").build());
        let mut pool = ActionPool::new();
        let hit = damage(&mut pool, 1.0);
        let inner = Action::sequence(&mut pool, [hit]);
        let mut par = Action::parallel(&mut pool, [inner]);

        par.set_parent(Some(owner));
        par.set_target(Some(owner));
        let nested = &par.children()[0].children()[0];
        assert_eq!(nested.parent(), Some(owner));
        assert_eq!(nested.target(), Some(owner));
    }

    #[test]
    fn repeating_current_value_does_not_overwrite_children() {
        let mut world = World::new();
        let other = world.spawn(GameObjectBuilder::new("other").build());
        let mut pool = ActionPool::new();
        let mut hit = damage(&mut pool, 1.0);
        hit.set_target(Some(other));
        let kill = pool.get::<DestroyAction>();
        let mut par = Action::parallel(&mut pool, [hit, kill]);

        par.set_target(None);
        assert_eq!(par.children()[0].target(), Some(other));
        assert_eq!(par.children()[1].target(), None);
    }

    #[test]
    fn child_pushed_into_running_composite_is_initialized() {
        let (mut world, enemy) = world_with_enemy(10.0);
        let mut pool = ActionPool::new();
        let mut seq = Action::sequence(&mut pool, []);
        seq.initialize();
        let mut hit = damage(&mut pool, 2.0);
        hit.set_target(Some(enemy));
        seq.push_child(hit);

        tick(&mut seq, &mut world, &mut pool);
        assert_eq!(health(&world, enemy), 8.0);
    }

    #[test]
    fn pushed_child_takes_composite_parent_and_target() {
        let mut world = World::new();
        let owner = world.spawn(GameObjectBuilder::new("owner").build());
        let enemy = world.spawn(GameObjectBuilder::new("enemy").build());
        let mut pool = ActionPool::new();
        let mut seq = Action::sequence(&mut pool, []);
        seq.set_parent(Some(owner));
        seq.set_target(Some(enemy));

        seq.push_child(damage(&mut pool, 1.0));
        assert_eq!(seq.children()[0].parent(), Some(owner));
        assert_eq!(seq.children()[0].target(), Some(enemy));
    }

    #[test]
    fn pushed_child_keeps_own_target_when_composite_has_none() {
        let mut world = World::new();
        let enemy = world.spawn(GameObjectBuilder::new("enemy").build());
        let mut pool = ActionPool::new();
        let mut seq = Action::sequence(&mut pool, []);
        let mut hit = damage(&mut pool, 1.0);
        hit.set_target(Some(enemy));

        seq.push_child(hit);
        assert_eq!(seq.children()[0].target(), Some(enemy));
        assert_eq!(seq.children()[0].parent(), None);
    }

    #[test]
    #[should_panic(expected = "not a composite")]
    fn push_child_on_leaf_panics() {
        let mut pool = ActionPool::new();
        let mut leaf = damage(&mut pool, 1.0);
        let child = wait(&mut pool, 1.0);
        leaf.push_child(child);
    }
}

// ── Pooling and deep copy ─────────────────────────────────────────────────────

#[cfg(test)]
mod pool_tests {
    use super::*;

    #[test]
    fn recycled_instance_equals_fresh_for_every_kind() {
        let node = json!({
            "delta": [1, 2],
            "duration_secs": 1.0,
            "amount": 7,
            "prefab": "bolt",
            "offset": [1, 1],
            "velocity": [0, 3],
            "effect": "spark",
            "children": [ { "kind": "wait", "duration_secs": 2 } ]
        });
        let (mut world, enemy) = world_with_enemy(100.0);
        let mut pool = ActionPool::new();

        for &tag in ActionTag::ALL {
            let mut action = pool.get_kind(tag);
            action.deserialize(Decl::new(&node), &mut pool);
            action.set_parent(Some(enemy));
            action.set_target(Some(enemy));
            action.initialize();
            tick(&mut action, &mut world, &mut pool);
            action.pause();
            pool.release(action);

            let redrawn = pool.get_kind(tag);
            assert_eq!(redrawn, Action::new(tag), "{tag:?}");
        }
    }

    #[test]
    fn instantiate_is_deep_and_independent() {
        let mut pool = ActionPool::new();
        let step = Action::draw(&mut pool, |m: &mut MoveAction| m.delta = Vec2::new(1.0, 0.0));
        let template = Action::sequence(&mut pool, [step]);

        let mut copy = pool.instantiate(&template);
        assert_eq!(copy, template);

        copy.children_mut()[0].payload_mut::<MoveAction>().unwrap().delta = Vec2::new(9.0, 9.0);
        let original = template.children()[0].payload::<MoveAction>().unwrap();
        assert_eq!(original.delta, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn editing_template_leaves_copy_unchanged() {
        let mut pool = ActionPool::new();
        let step = Action::draw(&mut pool, |m: &mut MoveAction| m.delta = Vec2::new(1.0, 0.0));
        let mut template = Action::sequence(&mut pool, [step]);
        let copy = pool.instantiate(&template);

        template.children_mut()[0].payload_mut::<MoveAction>().unwrap().delta = Vec2::new(-3.0, 0.0);
        template.push_child(wait(&mut pool, 1.0));

        assert_eq!(copy.children().len(), 1);
        assert_eq!(copy.children()[0].payload::<MoveAction>().unwrap().delta, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn copy_carries_configuration_not_run_state() {
        let mut world = World::new();
        let id = world.spawn(GameObjectBuilder::new("x").build());
        let mut pool = ActionPool::new();
        let mut template = damage(&mut pool, 12.0);
        template.set_target(Some(id));
        template.initialize();

        let copy = pool.instantiate(&template);
        assert_eq!(copy.payload::<DamageAction>().unwrap().amount, 12.0);
        assert_eq!(copy.target(), None);
        assert!(copy.is_finished());
    }

    #[test]
    #[should_panic(expected = "variant mismatch")]
    fn copy_between_kinds_panics() {
        let mut pool = ActionPool::new();
        let src = Action::new(ActionTag::Move);
        let mut dst = Action::new(ActionTag::Damage);
        pool.copy_into(&src, &mut dst);
    }

    #[test]
    fn releasing_composite_recycles_children() {
        let mut pool = ActionPool::new();
        let a = damage(&mut pool, 1.0);
        let b = wait(&mut pool, 1.0);
        let par = Action::parallel(&mut pool, [a, b]);
        pool.release(par);
        assert_eq!(pool.free_count(ActionTag::Parallel), 1);
        assert_eq!(pool.free_count(ActionTag::Damage), 1);
        assert_eq!(pool.free_count(ActionTag::Wait), 1);
    }
}

// ── Declarative data ──────────────────────────────────────────────────────────

#[cfg(test)]
mod decl_tests {
    use super::*;

    #[test]
    fn composite_from_decl_skips_unknown_children() {
        let node = json!({
            "kind": "sequence",
            "children": [
                { "kind": "damage", "amount": 4 },
                { "kind": "teleport" },
                { "kind": "destroy" }
            ]
        });
        let mut pool = ActionPool::new();
        let action = Action::from_decl(Decl::new(&node), &mut pool).unwrap();
        assert_eq!(action.tag(), ActionTag::Sequence);
        assert_eq!(action.children().len(), 2);
        assert_eq!(action.children()[0].payload::<DamageAction>().unwrap().amount, 4.0);
        assert_eq!(action.children()[1].tag(), ActionTag::Destroy);
    }

    #[test]
    fn unknown_or_missing_kind_is_none() {
        let mut pool = ActionPool::new();
        let unknown = json!({ "kind": "teleport" });
        let missing = json!({ "amount": 3 });
        assert!(Action::from_decl(Decl::new(&unknown), &mut pool).is_none());
        assert!(Action::from_decl(Decl::new(&missing), &mut pool).is_none());
    }

    #[test]
    fn malformed_fields_fall_back_to_defaults() {
        let node = json!({ "kind": "move", "delta": "north", "duration_secs": -3 });
        let mut pool = ActionPool::new();
        let action = Action::from_decl(Decl::new(&node), &mut pool).unwrap();
        let payload = action.payload::<MoveAction>().unwrap();
        assert_eq!(payload.delta, Vec2::ZERO);
        assert_eq!(payload.duration_secs, 0.0);
    }

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!("emit_particle".parse::<ActionTag>().unwrap(), ActionTag::EmitParticle);
        assert_eq!(ActionTag::Parallel.name(), "parallel");
        assert!(ActionTag::Sequence.is_composite());
        assert!(!ActionTag::Wait.is_composite());
    }
}
