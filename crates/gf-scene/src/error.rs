use gf_core::{GfError, ObjectId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene {0}")]
    Config(#[from] GfError),

    #[error("unknown prefab {0:?}")]
    UnknownPrefab(String),

    #[error("unknown action prototype {0:?}")]
    UnknownAction(String),

    #[error("prefab error: {0}")]
    Prefab(String),

    #[error("wave script error: {0}")]
    Wave(String),

    #[error("object {owner:?} already has a behavior named {name:?}")]
    DuplicateBehavior { name: String, owner: ObjectId },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SceneResult<T> = Result<T, SceneError>;
