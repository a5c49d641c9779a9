//! `gf-pool` — reset-and-recycle pooling plus prototype instantiation.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`poolable`]    | `Poolable`, `PoolTag`, `PoolVariant` traits               |
//! | [`pool`]        | `Pool<T>` (per-kind free lists), `PoolStats`              |
//! | [`prototype`]   | `Prototypes<T>` — named, pre-configured templates         |
//!
//! # Design notes
//!
//! Pooled types are *closed* enums: one variant per concrete kind, each
//! with a single exhaustive `reallocate` and `copy_config`.  Adding a field
//! to a variant without handling it there is a compile error in the
//! destructuring `match`, not a forgotten call to a base implementation.
//!
//! Instances move by value: `get` hands ownership to the caller and
//! `release` takes it back.  An instance can therefore never be in the free
//! list and in use at the same time.

pub mod pool;
pub mod poolable;
pub mod prototype;


pub use pool::{Pool, PoolStats};
pub use poolable::{PoolTag, PoolVariant, Poolable};
pub use prototype::Prototypes;
