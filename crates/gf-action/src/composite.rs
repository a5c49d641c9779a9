//! Composite actions: Sequence (one child at a time) and Parallel (all
//! children every tick).
//!
//! Both own their children by value.  A child removed from a composite goes
//! straight back to the pool through the context; nothing else holds it.

use gf_core::Decl;

use crate::{Action, ActionContext, ActionPool};

// ── Sequence ──────────────────────────────────────────────────────────────────

/// Runs children in order: only the head is updated each tick, and the head
/// is dropped as soon as it is finished.  Finished when no children remain.
#[derive(Debug, Default, PartialEq)]
pub struct SequenceAction {
    pub(crate) children: Vec<Action>,
}

impl SequenceAction {
    pub fn children(&self) -> &[Action] {
        &self.children
    }

    pub(crate) fn run(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        if let Some(head) = self.children.first_mut() {
            head.update(ctx);
            if head.is_finished() {
                let done = self.children.remove(0);
                ctx.pool.release(done);
            }
        }
        self.children.is_empty()
    }
}

// ── Parallel ──────────────────────────────────────────────────────────────────

/// Updates every live child once per tick in list order.
///
/// Children that were already destroyed are skipped and dropped; children
/// that finish during the sweep are dropped after it.  Finished when no
/// children remain.
#[derive(Debug, Default, PartialEq)]
pub struct ParallelAction {
    pub(crate) children: Vec<Action>,

    /// Indices collected during a sweep.  Always empty between updates.
    removals: Vec<usize>,
}

impl ParallelAction {
    pub fn children(&self) -> &[Action] {
        &self.children
    }

    pub(crate) fn run(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        let Self { children, removals } = self;

        for (i, child) in children.iter_mut().enumerate() {
            if child.is_destroyed() {
                removals.push(i);
                continue;
            }
            child.update(ctx);
            if child.is_finished() {
                removals.push(i);
            }
        }

        for &i in removals.iter().rev() {
            let done = children.remove(i);
            ctx.pool.release(done);
        }
        removals.clear();
        children.is_empty()
    }
}

// ── Shared child-list plumbing ────────────────────────────────────────────────

pub(crate) fn release_children(children: &mut Vec<Action>, pool: &mut ActionPool) {
    for child in children.drain(..) {
        pool.release(child);
    }
}

/// Replace `dst` with deep copies of `src`, drawn from `pool`.
pub(crate) fn copy_children(src: &[Action], dst: &mut Vec<Action>, pool: &mut ActionPool) {
    release_children(dst, pool);
    dst.extend(src.iter().map(|child| pool.instantiate(child)));
}

/// Append every parseable `"children"` entry of `decl`.  Unknown kinds are
/// logged and skipped.
pub(crate) fn deserialize_children(decl: Decl<'_>, dst: &mut Vec<Action>, pool: &mut ActionPool) {
    release_children(dst, pool);
    for node in decl.children("children") {
        if let Some(child) = Action::from_decl(node, pool) {
            dst.push(child);
        }
    }
}
