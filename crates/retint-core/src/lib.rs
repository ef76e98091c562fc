//! # retint-core
//!
//! Core types for recoloring images against a fixed palette.
//!
//! This crate provides the foundational types used throughout the retint workspace:
//!
//! - [`Color`] - Statically typed 8-bit RGB value
//! - [`Palette`] - Ordered, non-empty sequence of colors resolved from a theme
//! - [`RgbaImage`] - Interleaved RGBA8 pixel buffer
//! - [`distance`] - Luma-weighted color distance shared by all mappers
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. All other retint crates depend on it:
//!
//! ```text
//! retint-core (this crate)
//!    ^
//!    |
//!    +-- retint-lut (lookup cube, RBF mapper, nearest neighbor)
//!    +-- retint-io (PNG images and persisted cubes)
//!    +-- retint-engine (cache store, recolor entry points)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod distance;
pub mod error;
pub mod image;
pub mod palette;
pub mod pixel;

pub use distance::{distance, LUMA_WEIGHTS};
pub use error::{Error, Result};
pub use image::RgbaImage;
pub use palette::Palette;
pub use pixel::Color;

/// Prelude module for convenient imports.
///
/// ```
/// use retint_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::distance::{distance, LUMA_WEIGHTS};
    pub use crate::error::{Error, Result};
    pub use crate::image::RgbaImage;
    pub use crate::palette::Palette;
    pub use crate::pixel::Color;
}
