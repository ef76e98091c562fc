//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur during LUT operations.
#[derive(Debug, Error)]
pub enum LutError {
    /// Invalid parameter (quantization level, RBF width).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Cube data does not match its declared level.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// Interpolation produced an inconsistent cube.
    #[error("cube generation failed: {0}")]
    Generation(String),
}
