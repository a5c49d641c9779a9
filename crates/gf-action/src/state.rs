//! Lifecycle flags common to leaf and composite actions.

use gf_core::ObjectId;

/// The part of an action every kind shares.
///
/// | Field       | Meaning                                                    |
/// |-------------|------------------------------------------------------------|
/// | `finished`  | No more work; the scheduler will reclaim it                |
/// | `destroyed` | Cancelled or escalated; always implies `finished`          |
/// | `paused`    | `update` is a no-op while set                              |
/// | `parent`    | Owner of the behavior component that fired it              |
/// | `target`    | Object acted upon, if any                                  |
///
/// A freshly constructed state is *not running*: `finished` is `true` until
/// `initialize` clears it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionState {
    finished:  bool,
    destroyed: bool,
    paused:    bool,
    parent:    Option<ObjectId>,
    target:    Option<ObjectId>,

    /// `update` calls since the last `initialize`.
    updates: u32,

    completion_fired: bool,
    destroy_fired:    bool,
}

impl Default for ActionState {
    fn default() -> Self {
        Self {
            finished:         true,
            destroyed:        false,
            paused:           false,
            parent:           None,
            target:           None,
            updates:          0,
            completion_fired: false,
            destroy_fired:    false,
        }
    }
}

impl ActionState {
    /// Start a new run.  Clears completion, destruction, and their event
    /// latches; keeps `paused`, `parent`, and `target`.
    pub(crate) fn begin(&mut self) {
        self.finished = false;
        self.destroyed = false;
        self.updates = 0;
        self.completion_fired = false;
        self.destroy_fired = false;
    }

    /// Back to the freshly-constructed state.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn count_update(&mut self) {
        self.updates = self.updates.saturating_add(1);
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Mark the run complete.  Returns `true` if this call fired the
    /// completion event (once per run).
    pub fn set_finished(&mut self) -> bool {
        self.finished = true;
        if self.completion_fired {
            return false;
        }
        self.completion_fired = true;
        true
    }

    /// Mark destroyed, forcing `finished`.  Returns `true` if this call fired
    /// the destruction event; later assignments are ignored until the next
    /// `initialize`.
    pub fn set_destroyed(&mut self) -> bool {
        self.finished = true;
        self.destroyed = true;
        if self.destroy_fired {
            return false;
        }
        self.destroy_fired = true;
        true
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    #[inline]
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    #[inline]
    pub fn target(&self) -> Option<ObjectId> {
        self.target
    }

    /// Store `parent`.  Returns `false` when it equals the current value.
    pub(crate) fn replace_parent(&mut self, parent: Option<ObjectId>) -> bool {
        if self.parent == parent {
            return false;
        }
        self.parent = parent;
        true
    }

    /// Store `target`.  Returns `false` when it equals the current value.
    pub(crate) fn replace_target(&mut self, target: Option<ObjectId>) -> bool {
        if self.target == target {
            return false;
        }
        self.target = target;
        true
    }

    /// Number of `update` calls since the last `initialize`.
    #[inline]
    pub fn updates(&self) -> u32 {
        self.updates
    }
}
