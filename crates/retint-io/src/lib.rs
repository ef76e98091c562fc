//! # retint-io
//!
//! PNG I/O for images and persisted lookup cubes.
//!
//! - [`read_image`] / [`write_image`] - RGBA8 images from and to PNG files
//! - [`save_cube`] / [`load_cube`] - lossless cube persistence
//! - [`encode_cube`] / [`decode_cube`] - the same over arbitrary streams, for
//!   callers that publish through a temporary file
//!
//! # Dependencies
//!
//! - [`png`] - PNG codec
//! - [`retint-lut`] - Cube type and 2-D layout

#![warn(missing_docs)]

pub mod cube;
mod error;
pub mod png;

pub use crate::cube::{decode_cube, encode_cube, load_cube, save_cube};
pub use crate::error::{IoError, IoResult};
pub use crate::png::{read as read_image, write as write_image};
