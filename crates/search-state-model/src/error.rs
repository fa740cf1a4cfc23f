use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    /// Neither a multi-index target nor a main index could be resolved.
    #[error("invalid context: no targeted index and no main index")]
    InvalidContext,
    #[error("invalid index id: {0:?}")]
    InvalidIndexId(String),
    #[error("invalid search state: {0}")]
    InvalidState(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StateError>;
