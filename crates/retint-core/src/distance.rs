//! Luma-weighted color distance.
//!
//! `sqrt(0.299*dr^2 + 0.587*dg^2 + 0.114*db^2)` over 8-bit channel values.
//! The weights are the Rec.601 luma coefficients used as a cheap perceptual
//! proxy. This is not a perceptual color space such as CIELAB; it only has
//! to be symmetric and zero exactly at equality.

use crate::Color;

/// Rec.601 luma coefficient for red.
pub const LUMA_R: f32 = 0.299;

/// Rec.601 luma coefficient for green.
pub const LUMA_G: f32 = 0.587;

/// Rec.601 luma coefficient for blue.
pub const LUMA_B: f32 = 0.114;

/// Channel weights as `[R, G, B]`.
pub const LUMA_WEIGHTS: [f32; 3] = [LUMA_R, LUMA_G, LUMA_B];

/// Squared weighted distance between two colors.
///
/// Mappers that only compare distances use this to skip the square root.
#[inline]
pub fn distance_squared(a: Color, b: Color) -> f32 {
    distance_squared_f32(a.to_f32(), b.to_f32())
}

/// Squared weighted distance over floating point channels in `[0, 255]`.
#[inline]
pub fn distance_squared_f32(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    LUMA_R * dr * dr + LUMA_G * dg * dg + LUMA_B * db * db
}

/// Weighted distance between two colors.
///
/// # Example
///
/// ```rust
/// use retint_core::{distance, Color};
///
/// let a = Color::new(10, 20, 30);
/// let b = Color::new(40, 20, 30);
/// assert_eq!(distance(a, b), distance(b, a));
/// assert_eq!(distance(a, a), 0.0);
/// ```
#[inline]
pub fn distance(a: Color, b: Color) -> f32 {
    distance_squared(a, b).sqrt()
}
