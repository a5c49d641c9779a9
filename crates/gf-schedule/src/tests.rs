//! Unit tests for gf-schedule.

use std::cell::RefCell;
use std::rc::Rc;

use gf_action::{
    Action, ActionPool, ActionReport, ActionScheduler, ActionTag, DamageAction, DestroyAction,
    WaitAction,
};
use gf_core::{ActionHandle, ObjectId, SimTime};
use gf_world::{GameObjectBuilder, Health, World};

use crate::{ActionManager, DelayQueue};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DT: f32 = 0.25;

struct Rig {
    world:   World,
    pool:    ActionPool,
    manager: ActionManager,
    enemy:   ObjectId,
}

impl Rig {
    fn new(health: f32) -> Self {
        let mut world = World::new();
        let enemy = world.spawn(GameObjectBuilder::new("enemy").health(health).build());
        Self { world, pool: ActionPool::new(), manager: ActionManager::new(), enemy }
    }

    fn step(&mut self, dt: f32) -> usize {
        self.manager.update(dt, &mut self.world, &mut self.pool)
    }

    fn damage(&mut self, amount: f32) -> Action {
        let mut action = Action::draw(&mut self.pool, |d: &mut DamageAction| d.amount = amount);
        action.set_target(Some(self.enemy));
        action
    }

    fn health(&self) -> f32 {
        self.world.get(self.enemy).unwrap().get_component::<Health>().unwrap().current
    }
}

type Log = Rc<RefCell<Vec<ActionReport>>>;

fn recorder(log: &Log) -> Option<gf_action::ActionCallback> {
    let log = Rc::clone(log);
    Some(Box::new(move |_world: &mut World, report: &ActionReport| log.borrow_mut().push(*report)))
}

// ── Registration and driving ──────────────────────────────────────────────────

#[cfg(test)]
mod manager_tests {
    use super::*;

    #[test]
    fn registered_action_starts_next_frame() {
        let mut rig = Rig::new(30.0);
        let action = rig.damage(10.0);
        let handle = rig.manager.register_action(action, None);

        assert_eq!(rig.step(DT), 0);
        assert_eq!(rig.health(), 30.0);
        assert_eq!(rig.manager.action(handle).unwrap().updates(), 0);

        assert_eq!(rig.step(DT), 1);
        assert_eq!(rig.health(), 20.0);
        assert!(rig.manager.action(handle).is_none());
        assert!(rig.manager.is_empty());
    }

    #[test]
    fn delayed_action_waits_for_cumulative_threshold() {
        let mut rig = Rig::new(30.0);
        let action = rig.damage(5.0);
        let handle = rig.manager.register_delayed_action(action, 2.0, None);
        assert_eq!(rig.manager.pending_delayed(), 1);

        rig.step(1.9);
        assert_eq!(rig.manager.action(handle).unwrap().updates(), 0);
        assert_eq!(rig.health(), 30.0);

        // Promoted here; first driven on the following frame.
        rig.step(0.2);
        assert_eq!(rig.manager.pending_delayed(), 0);
        assert_eq!(rig.health(), 30.0);
        assert_eq!(rig.manager.running_len(), 1);

        rig.step(DT);
        assert_eq!(rig.health(), 25.0);
        assert!(!rig.manager.is_scheduled(handle));
    }

    #[test]
    fn short_delay_never_overtakes_immediate_registration() {
        let mut rig = Rig::new(30.0);
        let log: Log = Rc::default();
        let now = rig.damage(1.0);
        let soon = rig.damage(10.0);
        let first = rig.manager.register_action(now, recorder(&log));
        let second = rig.manager.register_delayed_action(soon, 0.001, recorder(&log));

        rig.step(DT);
        assert!(rig.manager.is_scheduled(first));
        assert!(rig.manager.is_scheduled(second));
        assert_eq!(rig.health(), 30.0);

        rig.step(DT);
        assert_eq!(rig.health(), 19.0);
        let handles: Vec<ActionHandle> = log.borrow().iter().map(|r| r.handle).collect();
        assert_eq!(handles, vec![first, second]);
    }

    #[test]
    fn promoted_action_activates_in_registration_order() {
        let mut rig = Rig::new(30.0);
        let log: Log = Rc::default();
        let soon = rig.damage(2.0);
        let now = rig.damage(3.0);
        let first = rig.manager.register_delayed_action(soon, 0.1, recorder(&log));
        let second = rig.manager.register_action(now, recorder(&log));

        rig.step(DT);
        assert_eq!(rig.manager.running_len(), 2);
        rig.step(DT);
        assert_eq!(rig.health(), 25.0);
        let handles: Vec<ActionHandle> = log.borrow().iter().map(|r| r.handle).collect();
        assert_eq!(handles, vec![first, second]);
    }

    #[test]
    fn zero_delay_is_immediate_registration() {
        let mut rig = Rig::new(30.0);
        let action = rig.damage(1.0);
        rig.manager.register_delayed_action(action, 0.0, None);
        assert_eq!(rig.manager.pending_delayed(), 0);
        rig.step(DT);
        rig.step(DT);
        assert_eq!(rig.health(), 29.0);
    }

    #[test]
    fn callback_fires_once_with_report() {
        let mut rig = Rig::new(30.0);
        let log: Log = Rc::default();
        let action = rig.damage(1.0);
        let handle = rig.manager.register_action(action, recorder(&log));

        for _ in 0..4 {
            rig.step(DT);
        }
        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].handle, handle);
        assert_eq!(log[0].tag, ActionTag::Damage);
        assert_eq!(log[0].target, Some(rig.enemy));
        assert!(!log[0].destroyed);
        assert_eq!(rig.manager.stats().callbacks, 1);
    }

    #[test]
    fn callback_can_mutate_world() {
        let mut rig = Rig::new(30.0);
        let enemy = rig.enemy;
        let action = rig.damage(1.0);
        rig.manager.register_action(
            action,
            Some(Box::new(move |world: &mut World, _: &ActionReport| {
                world.destroy(enemy);
            })),
        );
        rig.step(DT);
        rig.step(DT);
        assert!(!rig.world.is_alive(enemy));
    }

    #[test]
    fn same_frame_registrations_run_in_order() {
        let mut rig = Rig::new(30.0);
        let log: Log = Rc::default();
        let hit = rig.damage(10.0);
        let mut kill = rig.pool.get::<DestroyAction>();
        kill.set_target(Some(rig.enemy));
        rig.manager.register_action(hit, recorder(&log));
        rig.manager.register_action(kill, recorder(&log));

        rig.step(DT);
        rig.step(DT);
        let tags: Vec<ActionTag> = log.borrow().iter().map(|r| r.tag).collect();
        assert_eq!(tags, vec![ActionTag::Damage, ActionTag::Destroy]);
        assert_eq!(rig.health(), 20.0);
    }

    #[test]
    fn long_running_action_stays_scheduled() {
        let mut rig = Rig::new(1.0);
        let action = Action::draw(&mut rig.pool, |w: &mut WaitAction| w.duration_secs = 0.5);
        let handle = rig.manager.register_action(action, None);

        rig.step(DT);
        rig.step(DT);
        assert!(rig.manager.is_scheduled(handle));
        assert_eq!(rig.manager.running_len(), 1);
        rig.step(DT);
        assert!(!rig.manager.is_scheduled(handle));
    }

    #[test]
    fn reclaimed_actions_return_to_pool() {
        let mut rig = Rig::new(1000.0);
        let action = rig.damage(1.0);
        rig.manager.register_action(action, None);
        rig.step(DT);
        rig.step(DT);
        assert_eq!(rig.pool.free_count(ActionTag::Damage), 1);

        let constructed = rig.pool.stats().constructed;
        for _ in 0..20 {
            let action = rig.damage(1.0);
            rig.manager.register_action(action, None);
            rig.step(DT);
            rig.step(DT);
        }
        assert_eq!(rig.pool.stats().constructed, constructed);
    }

    #[test]
    fn pending_registered_after_update_activates_on_request() {
        let mut rig = Rig::new(30.0);
        rig.step(DT);
        let action = rig.damage(2.0);
        rig.manager.register_action(action, None);
        rig.manager.activate_pending();
        assert_eq!(rig.manager.running_len(), 1);
        rig.step(DT);
        assert_eq!(rig.health(), 28.0);
    }

    #[test]
    fn clock_accumulates_integer_time() {
        let mut rig = Rig::new(1.0);
        rig.step(1.9);
        rig.step(0.2);
        assert_eq!(rig.manager.now(), SimTime(2_100_000));
        assert_eq!(rig.manager.frame(), 2);
    }
}

// ── Cancellation ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod cancel_tests {
    use super::*;

    #[test]
    fn cancelled_delayed_action_is_reclaimed_without_running() {
        let mut rig = Rig::new(30.0);
        let log: Log = Rc::default();
        let action = rig.damage(10.0);
        let handle = rig.manager.register_delayed_action(action, 5.0, recorder(&log));

        assert!(rig.manager.cancel(handle));
        assert_eq!(rig.manager.pending_delayed(), 0);
        rig.step(DT);

        assert_eq!(rig.health(), 30.0);
        assert!(!rig.manager.is_scheduled(handle));
        assert!(log.borrow()[0].destroyed);
        assert_eq!(rig.manager.stats().cancelled, 1);
    }

    #[test]
    fn cancel_running_action() {
        let mut rig = Rig::new(30.0);
        let action = Action::draw(&mut rig.pool, |w: &mut WaitAction| w.duration_secs = 100.0);
        let handle = rig.manager.register_action(action, None);
        rig.step(DT);
        rig.step(DT);
        assert!(rig.manager.is_scheduled(handle));

        assert!(rig.manager.cancel(handle));
        assert!(!rig.manager.cancel(handle));
        rig.step(DT);
        assert!(!rig.manager.is_scheduled(handle));
    }

    #[test]
    fn stale_handle_is_rejected() {
        let mut rig = Rig::new(30.0);
        let action = rig.damage(1.0);
        let handle = rig.manager.register_action(action, None);
        rig.step(DT);
        rig.step(DT);
        assert!(!rig.manager.cancel(handle));
        assert!(!rig.manager.cancel(ActionHandle::default()));
    }
}

// ── DelayQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod delay_queue_tests {
    use super::*;
    use slotmap::SlotMap;

    fn handles(n: usize) -> Vec<ActionHandle> {
        let mut map: SlotMap<ActionHandle, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn drains_due_entries_in_time_then_insertion_order() {
        let h = handles(4);
        let mut queue = DelayQueue::new();
        queue.push(SimTime(300), h[0]);
        queue.push(SimTime(100), h[1]);
        queue.push(SimTime(100), h[2]);
        queue.push(SimTime(500), h[3]);
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.next_due(), Some(SimTime(100)));

        let mut out = Vec::new();
        assert_eq!(queue.drain_due(SimTime(300), &mut out), 3);
        assert_eq!(out, vec![h[1], h[2], h[0]]);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn nothing_due_drains_nothing() {
        let h = handles(1);
        let mut queue = DelayQueue::new();
        queue.push(SimTime(10), h[0]);
        let mut out = Vec::new();
        assert_eq!(queue.drain_due(SimTime(9), &mut out), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn remove_specific_handle() {
        let h = handles(2);
        let mut queue = DelayQueue::new();
        queue.push(SimTime(10), h[0]);
        queue.push(SimTime(10), h[1]);
        assert!(queue.remove(SimTime(10), h[0]));
        assert!(!queue.remove(SimTime(10), h[0]));
        assert!(!queue.remove(SimTime(99), h[1]));
        assert_eq!(queue.len(), 1);
        assert!(queue.remove(SimTime(10), h[1]));
        assert!(queue.is_empty());
        assert_eq!(queue.next_due(), None);
    }
}
