//! Error types for gridseg-segment

use thiserror::Error;

/// Errors that can occur during segmentation operations
#[derive(Debug, Error)]
pub enum SegmentError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] gridseg_core::Error),

    /// Invalid construction parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Label grid and value grid shapes disagree
    #[error(
        "shape mismatch: label grid is {label_rows}x{label_cols}, value grid is {value_rows}x{value_cols}"
    )]
    ShapeMismatch {
        label_rows: usize,
        label_cols: usize,
        value_rows: usize,
        value_cols: usize,
    },
}

/// Result type for segmentation operations
pub type SegmentResult<T> = Result<T, SegmentError>;
