use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Reading {index} rejected: {reason}")]
    Constraint { index: usize, reason: String },
}
