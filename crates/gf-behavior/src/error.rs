use gf_core::ObjectId;
use thiserror::Error;

use crate::Behavior;

#[derive(Debug, Error)]
pub enum BehaviorError {
    /// Names are unique within one component.  The rejected behavior is
    /// handed back so the caller can rename or release it.
    #[error("object {owner:?} already has a behavior named {name:?}")]
    DuplicateName {
        name:     String,
        owner:    ObjectId,
        rejected: Box<Behavior>,
    },
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
