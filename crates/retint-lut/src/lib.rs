//! # retint-lut
//!
//! Palette-driven color lookup cubes.
//!
//! A [`LookupCube`] stores `L x L x L` output colors for a quantized RGB
//! input space. The pipeline is:
//!
//! 1. [`LookupCube::identity`] - every grid point maps to itself
//! 2. [`interpolate`] - warp grid points toward a palette with a [`ColorMapper`]
//!    (normally [`RbfMapper`])
//! 3. [`LookupCube::apply_image`] - trilinear lookup for every pixel
//!
//! [`nearest_neighbor_transform`] is the cube-free fallback that snaps each
//! pixel to its closest palette color.
//!
//! # Usage
//!
//! ```rust
//! use retint_core::{Color, Palette, RgbaImage};
//! use retint_lut::{interpolate, LookupCube, RbfMapper};
//!
//! let palette = Palette::new(vec![Color::new(255, 0, 0)]).unwrap();
//! let identity = LookupCube::identity(8).unwrap();
//! let cube = interpolate(&identity, &palette, &RbfMapper::default()).unwrap();
//!
//! let img = RgbaImage::filled(4, 4, Color::new(30, 90, 200), 255).unwrap();
//! let out = cube.apply_image(&img);
//! assert!(out.pixels().all(|(c, _)| c == Color::new(255, 0, 0)));
//! ```
//!
//! # Dependencies
//!
//! - [`retint-core`] - Color, Palette, RgbaImage, distance metric
//! - [`rayon`] - Parallel cube interpolation
//! - [`thiserror`] - Error handling
//! - [`tracing`] - Diagnostics
//!
//! # Used By
//!
//! - `retint-io` - Cube persistence
//! - `retint-engine` - Cache store and recolor entry points

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cube;
mod error;
pub mod layout;
mod mapper;
mod nearest;

pub use cube::{check_level, grid_value, LookupCube, DEFAULT_LEVEL, MAX_LEVEL};
pub use error::{LutError, LutResult};
pub use mapper::{interpolate, ColorMapper, RbfMapper};
pub use nearest::{nearest_color, nearest_neighbor_transform};
