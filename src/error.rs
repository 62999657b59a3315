//! Error types for EDU-AI

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid frequency: {frequency} (must be non-zero and finite)")]
    InvalidFrequency { frequency: f64 },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("pattern store full: capacity {capacity} reached")]
    StoreCapacityExceeded { capacity: usize },

    #[error("record not found: {0}")]
    RecordNotFound(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput(reason.into())
    }

    /// True for errors raised before the pipeline touched any shared state
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidFrequency { .. } | Self::MalformedInput(_))
    }
}
