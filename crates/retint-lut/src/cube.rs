//! 3-dimensional color lookup cube.
//!
//! The cube holds `level^3` output colors. Grid index `i` on any axis stands
//! for the input channel value [`grid_value(i, level)`](grid_value): the grid
//! spans `[0, 255]` edge to edge, so index 0 is 0 and index `level - 1` is 255.

use retint_core::{Color, RgbaImage};

use crate::{LutError, LutResult};

/// Default quantization level (steps per channel).
pub const DEFAULT_LEVEL: usize = 8;

/// Largest supported quantization level.
///
/// One step per 8-bit input value. The persisted `level^2 x level` tile
/// image stays well inside PNG dimension limits.
pub const MAX_LEVEL: usize = 256;

/// Rejects levels outside `1..=MAX_LEVEL`.
pub fn check_level(level: usize) -> LutResult<()> {
    if level == 0 {
        return Err(LutError::InvalidParameter(
            "quantization level must be positive".into(),
        ));
    }
    if level > MAX_LEVEL {
        return Err(LutError::InvalidParameter(format!(
            "quantization level {level} exceeds maximum {MAX_LEVEL}"
        )));
    }
    Ok(())
}

/// Input channel value represented by grid index `i`.
///
/// A one-step cube has a single grid point at mid-gray.
#[inline]
pub fn grid_value(i: usize, level: usize) -> u8 {
    if level <= 1 {
        return 128;
    }
    let v = (i * 255) as f32 / (level - 1) as f32;
    v.round().min(255.0) as u8
}

/// A color lookup cube with `level` steps per channel.
///
/// # Structure
///
/// - `level^3` entries, each the output color for one grid point
/// - Stored R-major: R varies fastest, then G, then B
/// - Trilinear interpolation between the 8 surrounding grid points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupCube {
    level: usize,
    data: Vec<Color>,
}

impl LookupCube {
    /// Creates the identity cube: grid point `(r, g, b)` stores its own
    /// representative input color.
    ///
    /// # Errors
    ///
    /// [`LutError::InvalidParameter`] when `level` is 0 or above [`MAX_LEVEL`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use retint_core::Color;
    /// use retint_lut::LookupCube;
    ///
    /// let cube = LookupCube::identity(8).unwrap();
    /// assert_eq!(cube.get(0, 0, 0), Color::BLACK);
    /// assert_eq!(cube.get(7, 7, 7), Color::WHITE);
    /// ```
    pub fn identity(level: usize) -> LutResult<Self> {
        check_level(level)?;
        let count = level
            .checked_pow(3)
            .ok_or_else(|| LutError::InvalidParameter(format!("level {level} overflows")))?;
        let steps: Vec<u8> = (0..level).map(|i| grid_value(i, level)).collect();

        let mut data = Vec::with_capacity(count);
        for &b in &steps {
            for &g in &steps {
                for &r in &steps {
                    data.push(Color::new(r, g, b));
                }
            }
        }

        Ok(Self { level, data })
    }

    /// Creates a cube from raw data in R-major order.
    ///
    /// # Errors
    ///
    /// Zero level, or data that is not exactly `level^3` entries.
    pub fn from_data(level: usize, data: Vec<Color>) -> LutResult<Self> {
        if level == 0 {
            return Err(LutError::InvalidParameter(
                "quantization level must be positive".into(),
            ));
        }
        let expected = level
            .checked_pow(3)
            .ok_or_else(|| LutError::InvalidSize(format!("level {level} overflows")))?;
        if data.len() != expected {
            return Err(LutError::InvalidSize(format!(
                "expected {} entries for level {}, got {}",
                expected,
                level,
                data.len()
            )));
        }
        Ok(Self { level, data })
    }

    /// Steps per channel.
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Entries in R-major order.
    #[inline]
    pub fn data(&self) -> &[Color] {
        &self.data
    }

    /// Total number of grid points.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn index(&self, r: usize, g: usize, b: usize) -> usize {
        (b * self.level + g) * self.level + r
    }

    /// Output color at grid position `(r, g, b)`.
    ///
    /// # Panics
    ///
    /// Any index `>= level`.
    #[inline]
    pub fn get(&self, r: usize, g: usize, b: usize) -> Color {
        self.data[self.index(r, g, b)]
    }

    /// Looks up one color with trilinear interpolation.
    ///
    /// The input is mapped to continuous grid coordinates and blended across
    /// the 8 surrounding grid points, so gradients stay smooth.
    pub fn apply(&self, color: Color) -> Color {
        if self.level == 1 {
            return self.data[0];
        }
        let n = (self.level - 1) as f32;
        let max = self.level - 2;

        let pos = color.to_f32().map(|v| v * n / 255.0);
        let ri = (pos[0].floor() as usize).min(max);
        let gi = (pos[1].floor() as usize).min(max);
        let bi = (pos[2].floor() as usize).min(max);

        let rf = pos[0] - ri as f32;
        let gf = pos[1] - gi as f32;
        let bf = pos[2] - bi as f32;

        let c000 = self.get(ri, gi, bi).to_f32();
        let c100 = self.get(ri + 1, gi, bi).to_f32();
        let c010 = self.get(ri, gi + 1, bi).to_f32();
        let c110 = self.get(ri + 1, gi + 1, bi).to_f32();
        let c001 = self.get(ri, gi, bi + 1).to_f32();
        let c101 = self.get(ri + 1, gi, bi + 1).to_f32();
        let c011 = self.get(ri, gi + 1, bi + 1).to_f32();
        let c111 = self.get(ri + 1, gi + 1, bi + 1).to_f32();

        let mut result = [0.0f32; 3];
        for i in 0..3 {
            let c00 = c000[i] * (1.0 - rf) + c100[i] * rf;
            let c01 = c001[i] * (1.0 - rf) + c101[i] * rf;
            let c10 = c010[i] * (1.0 - rf) + c110[i] * rf;
            let c11 = c011[i] * (1.0 - rf) + c111[i] * rf;

            let c0 = c00 * (1.0 - gf) + c10 * gf;
            let c1 = c01 * (1.0 - gf) + c11 * gf;

            result[i] = c0 * (1.0 - bf) + c1 * bf;
        }

        Color::from_f32_clamped(result)
    }

    /// Applies the cube to every pixel of an image.
    ///
    /// Alpha passes through unchanged. Rows run in parallel.
    pub fn apply_image(&self, image: &RgbaImage) -> RgbaImage {
        image.map_colors(|c| self.apply(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_value_spans_range() {
        assert_eq!(grid_value(0, 8), 0);
        assert_eq!(grid_value(7, 8), 255);
        assert_eq!(grid_value(1, 8), 36);
        assert_eq!(grid_value(0, 2), 0);
        assert_eq!(grid_value(1, 2), 255);
        assert_eq!(grid_value(0, 1), 128);
    }

    #[test]
    fn test_identity_dimensions() {
        for level in [1, 2, 8, 17] {
            let cube = LookupCube::identity(level).unwrap();
            assert_eq!(cube.level(), level);
            assert_eq!(cube.entry_count(), level * level * level);
        }
    }

    #[test]
    fn test_identity_rejects_zero() {
        assert!(matches!(
            LookupCube::identity(0),
            Err(LutError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_identity_rejects_oversized_level() {
        assert!(LookupCube::identity(MAX_LEVEL + 1).is_err());
        assert!(matches!(
            LookupCube::identity(1 << 22),
            Err(LutError::InvalidParameter(_))
        ));
        assert!(matches!(
            LookupCube::identity(usize::MAX),
            Err(LutError::InvalidParameter(_))
        ));
        assert!(check_level(MAX_LEVEL).is_ok());
    }

    #[test]
    fn test_identity_cells() {
        let cube = LookupCube::identity(8).unwrap();
        assert_eq!(cube.get(3, 0, 7), Color::new(grid_value(3, 8), 0, 255));
        assert_eq!(cube.get(0, 5, 1), Color::new(0, grid_value(5, 8), grid_value(1, 8)));
    }

    #[test]
    fn test_identity_is_deterministic() {
        assert_eq!(LookupCube::identity(9).unwrap(), LookupCube::identity(9).unwrap());
    }

    #[test]
    fn test_identity_apply_within_quantization_error() {
        for level in [2, 5, 8, 16] {
            let cube = LookupCube::identity(level).unwrap();
            let bound = 256 / level as i32;
            for v in (0..=255u8).step_by(3) {
                for c in [
                    Color::new(v, 0, 0),
                    Color::new(v, v, v),
                    Color::new(255 - v, v / 2, v),
                ] {
                    let out = cube.apply(c);
                    for (a, b) in out.to_array().iter().zip(c.to_array()) {
                        assert!((*a as i32 - b as i32).abs() <= bound);
                    }
                }
            }
        }
    }

    #[test]
    fn test_grid_points_exact() {
        let cube = LookupCube::identity(8).unwrap();
        let c = Color::new(grid_value(2, 8), grid_value(5, 8), 255);
        assert_eq!(cube.apply(c), c);
        assert_eq!(cube.apply(Color::BLACK), Color::BLACK);
        assert_eq!(cube.apply(Color::WHITE), Color::WHITE);
    }

    #[test]
    fn test_trilinear_midpoint() {
        // Level 2: corners only. Mid-gray blends black and white evenly.
        let mut data = vec![Color::BLACK; 8];
        data[7] = Color::WHITE;
        let cube = LookupCube::from_data(2, data).unwrap();
        // Only the (1,1,1) corner is white; at the center it weighs 1/8.
        let out = cube.apply(Color::new(255, 255, 255));
        assert_eq!(out, Color::WHITE);
        let center = cube.apply(Color::new(128, 128, 128));
        assert!((center.r as i32 - 32).abs() <= 1);
    }

    #[test]
    fn test_level_one_is_constant() {
        let cube = LookupCube::from_data(1, vec![Color::new(9, 8, 7)]).unwrap();
        assert_eq!(cube.apply(Color::WHITE), Color::new(9, 8, 7));
        assert_eq!(cube.apply(Color::BLACK), Color::new(9, 8, 7));
    }

    #[test]
    fn test_from_data_size_checked() {
        assert!(matches!(
            LookupCube::from_data(3, vec![Color::BLACK; 26]),
            Err(LutError::InvalidSize(_))
        ));
        assert!(LookupCube::from_data(3, vec![Color::BLACK; 27]).is_ok());
        assert!(LookupCube::from_data(0, Vec::new()).is_err());
    }

    #[test]
    fn test_apply_image_keeps_alpha() {
        let cube = LookupCube::from_data(2, vec![Color::new(0, 255, 0); 8]).unwrap();
        let img = RgbaImage::from_raw(2, 1, vec![1, 2, 3, 0, 200, 100, 50, 128]).unwrap();
        let out = cube.apply_image(&img);
        assert_eq!(out.as_raw(), &[0, 255, 0, 0, 0, 255, 0, 128]);
    }
}
