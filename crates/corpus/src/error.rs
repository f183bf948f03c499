use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("File not found at {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected at least two columns, found {0}")]
    TooFewColumns(usize),

    #[error("Train fraction must be within [0, 1], got {0}")]
    InvalidFraction(f64),
}

pub type Result<T> = std::result::Result<T, CorpusError>;
