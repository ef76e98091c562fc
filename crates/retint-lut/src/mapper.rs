//! Palette mappers and cube interpolation.
//!
//! A [`ColorMapper`] decides where a single input color should land given a
//! palette. [`interpolate`] runs a mapper over every grid point of a cube.
//!
//! # RBF mapping
//!
//! [`RbfMapper`] blends all palette colors with Gaussian radial basis weights
//! of the luma-weighted distance:
//!
//! ```text
//! w_i = exp(-(d_i^2 - d_min^2) / (2 * sigma^2))
//! out = sum(w_i * p_i) / sum(w_i)
//! ```
//!
//! Subtracting `d_min^2` rescales every weight by the same factor, so the
//! normalized blend is unchanged while the nearest palette color always has
//! weight 1 and the sum never underflows to zero. One weight vector drives
//! R, G and B together.
//!
//! Sigma is bounded below by [`RbfMapper::MIN_SIGMA`]: at the largest
//! possible distance (255) the exponent stays far above the point where
//! `f64::exp` flushes to zero, so every palette color keeps a positive weight.

use rayon::prelude::*;
use retint_core::distance::distance_squared_f32;
use retint_core::{Color, Palette};
use tracing::debug;

use crate::{LookupCube, LutError, LutResult};

/// Maps one color toward a palette.
pub trait ColorMapper: Send + Sync {
    /// Returns the palette-adjusted color for `color`.
    fn map(&self, color: Color, palette: &Palette) -> Color;
}

/// Gaussian radial basis function mapper.
///
/// Palette colors close to the input dominate; distant inputs receive a
/// smooth mix of several palette colors instead of a hard boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RbfMapper {
    sigma: f32,
}

impl RbfMapper {
    /// Default kernel width in distance units (8-bit channel scale).
    pub const DEFAULT_SIGMA: f32 = 50.0;

    /// Narrowest accepted kernel width.
    ///
    /// `255^2 / (2 * 8^2)` is about 508, well below the ~745 where the
    /// weight would underflow.
    pub const MIN_SIGMA: f32 = 8.0;

    /// Creates a mapper with kernel width `sigma`.
    ///
    /// # Errors
    ///
    /// `sigma` not finite or below [`Self::MIN_SIGMA`].
    pub fn new(sigma: f32) -> LutResult<Self> {
        if !sigma.is_finite() || sigma < Self::MIN_SIGMA {
            return Err(LutError::InvalidParameter(format!(
                "RBF sigma must be finite and at least {}, got {sigma}",
                Self::MIN_SIGMA
            )));
        }
        Ok(Self { sigma })
    }

    /// Kernel width.
    #[inline]
    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    /// Kernel weight for squared distance `d2` given the nearest `d_min2`.
    #[inline]
    fn weight(&self, d2: f32, d_min2: f32) -> f64 {
        let two_sigma2 = 2.0 * f64::from(self.sigma) * f64::from(self.sigma);
        (-f64::from(d2 - d_min2) / two_sigma2).exp()
    }
}

impl Default for RbfMapper {
    fn default() -> Self {
        Self {
            sigma: Self::DEFAULT_SIGMA,
        }
    }
}

impl ColorMapper for RbfMapper {
    fn map(&self, color: Color, palette: &Palette) -> Color {
        let src = color.to_f32();

        let d_min = palette
            .iter()
            .map(|p| distance_squared_f32(src, p.to_f32()))
            .fold(f32::INFINITY, f32::min);

        let mut total = 0.0f64;
        let mut acc = [0.0f64; 3];
        for p in palette {
            let d2 = distance_squared_f32(src, p.to_f32());
            let w = self.weight(d2, d_min);
            total += w;
            acc[0] += w * f64::from(p.r);
            acc[1] += w * f64::from(p.g);
            acc[2] += w * f64::from(p.b);
        }

        Color::from_f32_clamped(acc.map(|v| (v / total) as f32))
    }
}

/// Warps every grid point of `cube` toward `palette`.
///
/// Each grid point's stored color is fed through `mapper`; the output cube
/// has the same level. Pure and deterministic for a deterministic mapper.
///
/// # Errors
///
/// [`LutError::Generation`] if the mapped data does not form a valid cube.
pub fn interpolate(
    cube: &LookupCube,
    palette: &Palette,
    mapper: &dyn ColorMapper,
) -> LutResult<LookupCube> {
    debug!(
        level = cube.level(),
        colors = palette.len(),
        "interpolating lookup cube"
    );

    let data: Vec<Color> = cube
        .data()
        .par_iter()
        .map(|&c| mapper.map(c, palette))
        .collect();

    LookupCube::from_data(cube.level(), data)
        .map_err(|e| LutError::Generation(e.to_string()))
}
