//! Nearest-neighbor palette snapping.
//!
//! The cube-free backend: every pixel becomes the palette color at the
//! smallest [`distance`](retint_core::distance). Faster to set up than a cube
//! but produces hard boundaries between palette regions.

use retint_core::{distance, Color, Palette, RgbaImage};

/// Closest palette color to `color`.
///
/// Linear scan that only replaces the best match on a strictly smaller
/// distance, so ties go to the earliest palette entry.
///
/// # Example
///
/// ```rust
/// use retint_core::{Color, Palette};
/// use retint_lut::nearest_color;
///
/// let palette = Palette::new(vec![Color::BLACK, Color::WHITE]).unwrap();
/// assert_eq!(nearest_color(Color::new(120, 120, 120), &palette), Color::BLACK);
/// ```
pub fn nearest_color(color: Color, palette: &Palette) -> Color {
    let colors = palette.colors();
    let mut best = colors[0];
    let mut best_dist = distance(color, best);

    for &candidate in &colors[1..] {
        let d = distance(color, candidate);
        if d < best_dist {
            best_dist = d;
            best = candidate;
        }
    }

    best
}

/// Replaces every pixel with its nearest palette color.
///
/// Alpha passes through unchanged. Rows run in parallel.
pub fn nearest_neighbor_transform(image: &RgbaImage, palette: &Palette) -> RgbaImage {
    image.map_colors(|c| nearest_color(c, palette))
}
