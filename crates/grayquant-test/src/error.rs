//! Error types for the test harness

use thiserror::Error;

/// Errors that can occur while preparing or checking test data
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to build a synthetic image
    #[error("failed to build image: {0}")]
    ImageBuild(#[from] grayquant_core::Error),

    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Pix comparison failed
    #[error("pix comparison failed at index {index}: {reason}")]
    PixMismatch { index: usize, reason: String },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
