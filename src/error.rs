use thiserror::Error;

#[derive(Debug, Error)]
pub enum GardenError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

pub type GardenResult<T> = Result<T, GardenError>;
