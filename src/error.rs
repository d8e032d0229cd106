//! Error types for the froc-eval library.

use thiserror::Error;

/// Result type for froc-eval operations.
pub type Result<T> = std::result::Result<T, FrocEvalError>;

/// Error types that can occur during FROC evaluation.
#[derive(Error, Debug)]
pub enum FrocEvalError {
    /// Error during JSON parsing or serialization.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Caller supplied inconsistent or malformed input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid bounding box coordinates.
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// IoU threshold outside [0, 1].
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Input that makes the metric undefined, e.g. a corpus without annotations.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// The curve does not carry enough points to answer the query.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}
