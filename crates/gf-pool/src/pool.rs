//! `Pool<T>` — per-kind free lists of reset instances.
//!
//! # Why this exists
//!
//! Actions are short-lived: most finish on the tick after they are fired.
//! Allocating one per effect would churn the heap every frame.  The pool
//! keeps released instances (already reset) and hands them back on the next
//! `get` of the same kind, so once every kind has been warmed up the steady
//! state performs no allocation at all.  [`PoolStats`] makes that property
//! observable.

use crate::{PoolTag, PoolVariant, Poolable};

/// Allocation counters for a [`Pool`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct PoolStats {
    /// Instances built with `Poolable::construct`.
    pub constructed: u64,
    /// `get` calls satisfied from a free list.
    pub reused:      u64,
    /// Instances returned with `release`.
    pub released:    u64,
}

/// Type-indexed cache of recycled instances.
pub struct Pool<T: Poolable> {
    free:  Vec<Vec<T>>,
    stats: PoolStats,
}

impl<T: Poolable> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Poolable> Pool<T> {
    pub fn new() -> Self {
        Self {
            free:  T::Tag::ALL.iter().map(|_| Vec::new()).collect(),
            stats: PoolStats::default(),
        }
    }

    /// Construct `per_kind` instances of every kind up front.
    pub fn prewarm(&mut self, per_kind: usize) {
        for &tag in T::Tag::ALL {
            let list = &mut self.free[tag.index()];
            list.reserve(per_kind);
            for _ in 0..per_kind {
                list.push(T::construct(tag));
            }
            self.stats.constructed += per_kind as u64;
        }
        tracing::debug!(per_kind, kinds = T::Tag::ALL.len(), "pool prewarmed");
    }

    // ── Core operations ───────────────────────────────────────────────────

    /// Draw an instance of the variant `V`.
    pub fn get<V: PoolVariant<T>>(&mut self) -> T {
        self.get_kind(V::TAG)
    }

    /// Draw an instance of kind `tag`: recycled if one is free, otherwise
    /// freshly constructed.  The caller cannot tell which.
    pub fn get_kind(&mut self, tag: T::Tag) -> T {
        match self.free[tag.index()].pop() {
            Some(item) => {
                self.stats.reused += 1;
                item
            }
            None => {
                self.stats.constructed += 1;
                tracing::trace!(kind = tag.name(), "pool miss; constructing");
                T::construct(tag)
            }
        }
    }

    /// Reset `item` and return it to its kind's free list.
    pub fn release(&mut self, mut item: T) {
        item.reallocate(self);
        let tag = item.tag();
        self.free[tag.index()].push(item);
        self.stats.released += 1;
    }

    /// Deep-copy the configuration of `src` into `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `src` and `dst` are different variants.  That is a
    /// programmer error; a partial copy would silently corrupt `dst`.
    pub fn copy_into(&mut self, src: &T, dst: &mut T) {
        assert!(
            src.tag() == dst.tag(),
            "copy_into: variant mismatch (source {}, destination {})",
            src.tag().name(),
            dst.tag().name(),
        );
        src.copy_config(dst, self);
    }

    /// Draw an instance of `template`'s kind and copy `template` into it.
    pub fn instantiate(&mut self, template: &T) -> T {
        let mut item = self.get_kind(template.tag());
        self.copy_into(template, &mut item);
        item
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Number of free instances of kind `tag`.
    pub fn free_count(&self, tag: T::Tag) -> usize {
        self.free[tag.index()].len()
    }

    /// Number of free instances across all kinds.
    pub fn total_free(&self) -> usize {
        self.free.iter().map(Vec::len).sum()
    }
}

impl<T: Poolable> std::fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("free", &self.total_free())
            .field("stats", &self.stats)
            .finish()
    }
}
