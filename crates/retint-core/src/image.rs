//! Interleaved RGBA8 image buffer.
//!
//! Every transform in the workspace reads and writes [`RgbaImage`]. Decoders
//! expand RGB and gray sources to RGBA with opaque alpha, so transforms never
//! branch on channel layout.
//!
//! # Parallel mapping
//!
//! [`RgbaImage::map_colors`] applies a per-pixel color function across rows
//! with [`rayon`]. Alpha bytes are copied through untouched.
//!
//! # Dependencies
//!
//! - [`rayon`] - Parallel row iteration

use rayon::prelude::*;

use crate::{Color, Error, Result};

/// Bytes per pixel.
pub const CHANNELS: usize = 4;

/// An RGBA image with 8 bits per channel, rows stored top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Creates an image filled with one color and alpha.
    pub fn filled(width: u32, height: u32, color: Color, alpha: u8) -> Result<Self> {
        let len = buffer_len(width, height)?;
        let data = [color.r, color.g, color.b, alpha]
            .into_iter()
            .cycle()
            .take(len)
            .collect();
        Ok(Self { width, height, data })
    }

    /// Wraps an existing RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// Zero width or height, or a buffer whose length is not `width*height*4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let len = buffer_len(width, height)?;
        if data.len() != len {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {len} bytes, got {}", data.len()),
            ));
        }
        Ok(Self { width, height, data })
    }

    /// Builds an opaque image from an RGB8 buffer.
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Result<Self> {
        let len = buffer_len(width, height)?;
        if rgb.len() != len / CHANNELS * 3 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} RGB bytes, got {}", len / CHANNELS * 3, rgb.len()),
            ));
        }
        let data = rgb
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
            .collect();
        Ok(Self { width, height, data })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image, returning its RGBA8 bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Color and alpha at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<(Color, u8)> {
        let i = self.offset(x, y)?;
        let p = &self.data[i..i + CHANNELS];
        Some((Color::new(p[0], p[1], p[2]), p[3]))
    }

    /// Writes color and alpha at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Coordinates outside the image.
    pub fn set(&mut self, x: u32, y: u32, color: Color, alpha: u8) -> Result<()> {
        let i = self.offset(x, y).ok_or_else(|| {
            Error::invalid_dimensions(
                self.width,
                self.height,
                format!("pixel ({x}, {y}) out of bounds"),
            )
        })?;
        self.data[i..i + CHANNELS].copy_from_slice(&[color.r, color.g, color.b, alpha]);
        Ok(())
    }

    /// Iterates `(color, alpha)` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (Color, u8)> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|p| (Color::new(p[0], p[1], p[2]), p[3]))
    }

    /// Returns a new image with `f` applied to every pixel color.
    ///
    /// Rows are processed in parallel; no pixel depends on another.
    pub fn map_colors<F>(&self, f: F) -> Self
    where
        F: Fn(Color) -> Color + Sync,
    {
        let row_len = self.width as usize * CHANNELS;
        let mut data = self.data.clone();

        data.par_chunks_mut(row_len).for_each(|row| {
            for p in row.chunks_exact_mut(CHANNELS) {
                let out = f(Color::new(p[0], p[1], p[2]));
                p[0] = out.r;
                p[1] = out.g;
                p[2] = out.b;
            }
        });

        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

fn buffer_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "zero-sized image"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))
}
