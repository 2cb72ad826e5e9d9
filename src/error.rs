//! Error types for input loading, validation and report export
//!
//! The projection core itself never fails: an unreachable retirement goal is a
//! normal outcome expressed through `None` fields on the result. These errors
//! only surface at the edges where files are read or written.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown region: {0}")]
    UnknownRegion(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
