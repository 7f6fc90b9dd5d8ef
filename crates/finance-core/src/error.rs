#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of records, got {0}")]
    NotAnArray(&'static str),
}

pub type Result<T> = std::result::Result<T, DataError>;
