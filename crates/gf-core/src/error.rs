//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `GfError` as one
//! variant.  Nothing in the per-frame action path returns an error: failures
//! there are either handled locally (default substitution, skipped effect) or
//! are programmer errors that panic.

use thiserror::Error;

/// The top-level error type for `gf-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum GfError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `gf-*` crates.
pub type GfResult<T> = Result<T, GfError>;
