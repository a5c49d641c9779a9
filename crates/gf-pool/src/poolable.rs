//! Traits a type implements to be stored in a [`Pool`][crate::Pool].

use std::fmt::Debug;

use crate::Pool;

/// Runtime discriminator of a pooled type's variants.
///
/// The pool keeps one free list per tag, indexed by [`index`](Self::index).
pub trait PoolTag: Copy + Eq + Debug + 'static {
    /// Every tag, in index order.
    const ALL: &'static [Self];

    /// Dense index in `0..ALL.len()`.
    fn index(self) -> usize;

    /// Human-readable name, used in logs and assertion messages.
    fn name(self) -> &'static str;
}

/// A type whose instances are recycled by a [`Pool`].
///
/// # Contract
///
/// - `construct(tag)` and `reallocate` must agree: after `reallocate`, every
///   externally observable field equals that of `construct(self.tag())`.
/// - `copy_config` copies configuration fields only, never transient run
///   state; the source and destination must be fully independent afterwards.
/// - Instances owning other instances (composites) return them to `pool` in
///   `reallocate` and draw from `pool` in `copy_config`.
pub trait Poolable: Sized {
    type Tag: PoolTag;

    /// Build a brand-new instance of kind `tag`.
    fn construct(tag: Self::Tag) -> Self;

    /// The variant this instance belongs to.  Never changes over its lifetime.
    fn tag(&self) -> Self::Tag;

    /// Reset to the freshly-constructed state.
    fn reallocate(&mut self, pool: &mut Pool<Self>);

    /// Deep-copy configuration into `dst`.
    ///
    /// Only called by [`Pool::copy_into`], which has already checked that
    /// `dst.tag() == self.tag()`; implementations may treat a mismatch as
    /// unreachable.
    fn copy_config(&self, dst: &mut Self, pool: &mut Pool<Self>);
}

/// Associates a concrete variant payload type with its tag so callers can
/// write `pool.get::<DamageAction>()`.
pub trait PoolVariant<T: Poolable> {
    const TAG: T::Tag;
}
