//! `ActionManager` — owns every in-flight action between registration and
//! release.

use slotmap::SlotMap;

use gf_action::{Action, ActionCallback, ActionContext, ActionPool, ActionReport, ActionScheduler};
use gf_core::{ActionHandle, SimTime};
use gf_pool::PoolTag;
use gf_world::World;

use crate::DelayQueue;

/// Where a scheduled action currently waits.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Slot {
    /// Held by the delay queue until `due`.
    Delayed { due: SimTime },
    /// Registered, or promoted from a delay; becomes running at the next
    /// activation.
    Pending,
    /// Driven every frame.
    Running,
}

struct Scheduled {
    action:   Action,
    callback: Option<ActionCallback>,
    slot:     Slot,
    /// Registration order; activation follows it.
    seq:      u64,
}

/// Counters since construction.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct ManagerStats {
    pub registered: u64,
    /// Actions reclaimed after finishing normally.
    pub completed:  u64,
    /// Actions reclaimed after being destroyed.
    pub cancelled:  u64,
    pub callbacks:  u64,
}

/// The global scheduler.
///
/// Actions are stored in a generational arena; the [`ActionHandle`] handed
/// out at registration goes stale as soon as the action is reclaimed, so a
/// late `cancel` or `action` lookup can never reach a recycled instance.
pub struct ActionManager {
    actions:  SlotMap<ActionHandle, Scheduled>,
    /// Runnable handles in the order they became runnable.
    running:  Vec<ActionHandle>,
    /// Registered or promoted since the last activation.
    incoming: Vec<ActionHandle>,
    delayed:  DelayQueue,
    next_seq: u64,
    now:      SimTime,
    frame:    u64,
    stats:    ManagerStats,
    /// Scratch for the reap pass; kept to avoid per-frame allocation.
    finished: Vec<ActionHandle>,
}

impl Default for ActionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionManager {
    pub fn new() -> Self {
        Self {
            actions:  SlotMap::with_key(),
            running:  Vec::new(),
            incoming: Vec::new(),
            delayed:  DelayQueue::new(),
            next_seq: 0,
            now:      SimTime::ZERO,
            frame:    0,
            stats:    ManagerStats::default(),
            finished: Vec::new(),
        }
    }

    // ── Frame update ──────────────────────────────────────────────────────

    /// Run one frame of length `dt_secs`.  See the crate docs for the phase
    /// order.  Returns the number of actions reclaimed.
    pub fn update(&mut self, dt_secs: f32, world: &mut World, pool: &mut ActionPool) -> usize {
        self.frame += 1;
        self.now += SimTime::from_secs(dt_secs);

        // 1. Delays.  Due actions join the registrations waiting for the
        // next activation.
        let first_promoted = self.incoming.len();
        let promoted = self.delayed.drain_due(self.now, &mut self.incoming);
        for &handle in &self.incoming[first_promoted..] {
            if let Some(entry) = self.actions.get_mut(handle) {
                entry.slot = Slot::Pending;
            }
        }
        if promoted > 0 {
            tracing::debug!(frame = self.frame, promoted, "delayed actions due");
        }

        // 2. Drive.
        {
            let mut ctx = ActionContext::new(world, pool, dt_secs);
            for &handle in &self.running {
                let Some(entry) = self.actions.get_mut(handle) else { continue };
                if !entry.action.is_finished() {
                    entry.action.update(&mut ctx);
                }
            }
        }

        // 3. Reap.
        let reaped = self.reap(world, pool);

        // 4. Activate.
        self.activate_pending();
        reaped
    }

    /// Make every action registered or promoted since the last activation
    /// runnable, in registration order.
    ///
    /// Called by `update`; frame loops that register after `update` call it
    /// again at the end of the frame.
    pub fn activate_pending(&mut self) {
        let actions = &self.actions;
        self.incoming.sort_by_key(|&handle| actions.get(handle).map_or(u64::MAX, |e| e.seq));
        for handle in self.incoming.drain(..) {
            if let Some(entry) = self.actions.get_mut(handle) {
                entry.slot = Slot::Running;
                self.running.push(handle);
            }
        }
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn reap(&mut self, world: &mut World, pool: &mut ActionPool) -> usize {
        let actions = &self.actions;
        let finished = &mut self.finished;
        self.running.retain(|&handle| {
            let done = actions.get(handle).is_none_or(|e| e.action.is_finished());
            if done {
                finished.push(handle);
            }
            !done
        });

        let count = self.finished.len();
        for handle in self.finished.drain(..) {
            let Some(entry) = self.actions.remove(handle) else { continue };
            let Scheduled { action, callback, .. } = entry;
            let report = ActionReport {
                handle,
                tag:       action.tag(),
                parent:    action.parent(),
                target:    action.target(),
                destroyed: action.is_destroyed(),
            };
            if report.destroyed {
                self.stats.cancelled += 1;
            } else {
                self.stats.completed += 1;
            }
            tracing::debug!(
                ?handle,
                kind = report.tag.name(),
                destroyed = report.destroyed,
                "action reclaimed"
            );
            if let Some(callback) = callback {
                self.stats.callbacks += 1;
                callback(world, &report);
            }
            pool.release(action);
        }
        count
    }

    // ── Control ───────────────────────────────────────────────────────────

    /// Destroy a scheduled action.  It is reclaimed, callback included, at
    /// the end of the next `update` without being driven again.  Returns
    /// `false` for a stale handle or an action already destroyed.
    pub fn cancel(&mut self, handle: ActionHandle) -> bool {
        let Some(entry) = self.actions.get_mut(handle) else {
            return false;
        };
        if !entry.action.destroy() {
            return false;
        }
        match entry.slot {
            Slot::Delayed { due } => {
                self.delayed.remove(due, handle);
                entry.slot = Slot::Running;
                self.running.push(handle);
            }
            Slot::Pending => {
                self.incoming.retain(|&h| h != handle);
                entry.slot = Slot::Running;
                self.running.push(handle);
            }
            Slot::Running => {}
        }
        tracing::debug!(?handle, "action cancelled");
        true
    }

    // ── Introspection ─────────────────────────────────────────────────────

    /// The scheduled action behind `handle`; `None` once it was reclaimed.
    pub fn action(&self, handle: ActionHandle) -> Option<&Action> {
        self.actions.get(handle).map(|e| &e.action)
    }

    pub fn action_mut(&mut self, handle: ActionHandle) -> Option<&mut Action> {
        self.actions.get_mut(handle).map(|e| &mut e.action)
    }

    pub fn is_scheduled(&self, handle: ActionHandle) -> bool {
        self.actions.contains_key(handle)
    }

    /// Total actions owned: delayed, pending, and running.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn running_len(&self) -> usize {
        self.running.len()
    }

    pub fn pending_delayed(&self) -> usize {
        self.delayed.len()
    }

    /// Accumulated frame time.
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> ManagerStats {
        self.stats
    }
}

impl ActionScheduler for ActionManager {
    fn register_action(&mut self, mut action: Action, callback: Option<ActionCallback>) -> ActionHandle {
        action.initialize();
        let tag = action.tag();
        let seq = self.take_seq();
        let handle = self.actions.insert(Scheduled { action, callback, slot: Slot::Pending, seq });
        self.incoming.push(handle);
        self.stats.registered += 1;
        tracing::debug!(?handle, kind = tag.name(), "action registered");
        handle
    }

    fn register_delayed_action(
        &mut self,
        mut action: Action,
        delay_secs: f32,
        callback:   Option<ActionCallback>,
    ) -> ActionHandle {
        let delay = SimTime::from_secs(delay_secs);
        if delay == SimTime::ZERO {
            return self.register_action(action, callback);
        }
        action.initialize();
        let tag = action.tag();
        let due = self.now + delay;
        let seq = self.take_seq();
        let handle =
            self.actions.insert(Scheduled { action, callback, slot: Slot::Delayed { due }, seq });
        self.delayed.push(due, handle);
        self.stats.registered += 1;
        tracing::debug!(?handle, kind = tag.name(), %due, "delayed action registered");
        handle
    }
}

impl std::fmt::Debug for ActionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionManager")
            .field("frame", &self.frame)
            .field("now", &self.now)
            .field("running", &self.running.len())
            .field("incoming", &self.incoming.len())
            .field("delayed", &self.delayed.len())
            .field("stats", &self.stats)
            .finish()
    }
}
