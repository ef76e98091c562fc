//! Error types for retint-core operations.
//!
//! # Usage
//!
//! ```rust
//! use retint_core::{Error, Palette, Result};
//!
//! fn build() -> Result<Palette> {
//!     Palette::from_hex(&["#282828", "#ebdbb2"])
//! }
//! assert!(build().is_ok());
//! ```
//!
//! # Used By
//!
//! - [`crate::palette::Palette`] - palette validation
//! - [`crate::pixel::Color`] - hex parsing
//! - [`crate::image::RgbaImage`] - buffer construction

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the core value types.
#[derive(Debug, Error)]
pub enum Error {
    /// Palette is empty or one of its colors is malformed.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A color string could not be parsed.
    ///
    /// Palette construction reports this as [`Error::InvalidPalette`]; the
    /// variant is kept separate so single-color parsing stays precise.
    #[error("invalid color {input:?}: {reason}")]
    InvalidColor {
        /// Offending input
        input: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Invalid image dimensions or buffer size.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidPalette`] error.
    #[inline]
    pub fn invalid_palette(msg: impl Into<String>) -> Self {
        Self::InvalidPalette(msg.into())
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error means the palette cannot be used.
    #[inline]
    pub fn is_palette_error(&self) -> bool {
        matches!(self, Self::InvalidPalette(_) | Self::InvalidColor { .. })
    }
}
