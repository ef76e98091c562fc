//! Engine error types.
//!
//! [`RecolorError`] is the single error surfaced by the recolor entry points.
//! Errors from the core, LUT and I/O crates convert into it so engine code
//! propagates with `?`.

use std::io;
use std::path::PathBuf;

use retint_io::IoError;
use retint_lut::LutError;
use thiserror::Error;

/// Result type for engine operations.
pub type RecolorResult<T> = Result<T, RecolorError>;

/// Errors surfaced to recolor callers. None are retried automatically.
#[derive(Debug, Error)]
pub enum RecolorError {
    /// Theme identifier could not be resolved to a palette.
    #[error("unknown theme: {0}")]
    ThemeNotFound(String),

    /// Empty palette or malformed color.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// Non-positive quantization level or other bad parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Filesystem failure while creating, writing or reading cache entries.
    #[error("{context} ({}): {source}", .path.display())]
    Io {
        /// What was being attempted.
        context: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// Image or cube file could not be decoded or encoded.
    #[error("file error: {0}")]
    File(#[from] IoError),

    /// Interpolation produced an inconsistent cube.
    #[error("cube generation failed: {0}")]
    Generation(String),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl RecolorError {
    /// Creates an [`RecolorError::Io`] error.
    #[inline]
    pub fn io(context: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            context,
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for filesystem and file codec failures.
    #[inline]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::File(_))
    }
}

impl From<retint_core::Error> for RecolorError {
    fn from(e: retint_core::Error) -> Self {
        use retint_core::Error;
        match e {
            Error::InvalidPalette(_) | Error::InvalidColor { .. } => {
                Self::InvalidPalette(e.to_string())
            }
            Error::InvalidDimensions { .. } => Self::InvalidParameter(e.to_string()),
        }
    }
}

impl From<LutError> for RecolorError {
    fn from(e: LutError) -> Self {
        match e {
            LutError::InvalidParameter(msg) => Self::InvalidParameter(msg),
            LutError::InvalidSize(msg) | LutError::Generation(msg) => Self::Generation(msg),
        }
    }
}
