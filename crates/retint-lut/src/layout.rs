//! 2-D flattening of a lookup cube.
//!
//! Persisted cubes are stored as an RGB image of `level*level` x `level`
//! pixels. Each blue step is an `level x level` tile, tiles run left to right;
//! inside a tile red runs along x and green along y:
//!
//! ```text
//! x = b * level + r
//! y = g
//! ```
//!
//! This layout is private to retint. It is not a Hald CLUT and is not meant
//! to be read by other LUT tools.

use retint_core::Color;

use crate::{LookupCube, LutError, LutResult};

/// Image dimensions `(width, height)` for a cube of `level` steps.
#[inline]
pub fn image_size(level: usize) -> (usize, usize) {
    (level * level, level)
}

/// Flattens a cube into row-major RGB8 bytes.
///
/// Returns `(width, height, bytes)`.
pub fn flatten(cube: &LookupCube) -> (usize, usize, Vec<u8>) {
    let level = cube.level();
    let (width, height) = image_size(level);
    let mut bytes = vec![0u8; width * height * 3];

    for b in 0..level {
        for g in 0..level {
            for r in 0..level {
                let x = b * level + r;
                let i = (g * width + x) * 3;
                bytes[i..i + 3].copy_from_slice(&cube.get(r, g, b).to_array());
            }
        }
    }

    (width, height, bytes)
}

/// Rebuilds a cube from row-major RGB8 bytes produced by [`flatten`].
///
/// # Errors
///
/// [`LutError::InvalidSize`] when `width != height^2` or the byte count does
/// not match.
pub fn unflatten(width: usize, height: usize, bytes: &[u8]) -> LutResult<LookupCube> {
    let level = height;
    if level == 0 || level.checked_mul(level) != Some(width) {
        return Err(LutError::InvalidSize(format!(
            "{width}x{height} is not a cube layout (width must be height squared)"
        )));
    }
    if bytes.len() != width * height * 3 {
        return Err(LutError::InvalidSize(format!(
            "expected {} bytes for {}x{}, got {}",
            width * height * 3,
            width,
            height,
            bytes.len()
        )));
    }

    let mut data = Vec::with_capacity(level * level * level);
    for b in 0..level {
        for g in 0..level {
            for r in 0..level {
                let x = b * level + r;
                let i = (g * width + x) * 3;
                data.push(Color::new(bytes[i], bytes[i + 1], bytes[i + 2]));
            }
        }
    }

    LookupCube::from_data(level, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size() {
        assert_eq!(image_size(8), (64, 8));
        assert_eq!(image_size(1), (1, 1));
    }

    #[test]
    fn test_tile_placement() {
        let cube = LookupCube::identity(4).unwrap();
        let (w, h, bytes) = flatten(&cube);
        assert_eq!((w, h), (16, 4));

        // Pixel (x = 2*4 + 3, y = 1) holds cell r=3, g=1, b=2.
        let i = (4 * 16 + 11) * 3;
        assert_eq!(&bytes[i..i + 3], &cube.get(3, 1, 2).to_array());
    }

    #[test]
    fn test_unflatten_inverts_flatten() {
        let data: Vec<Color> = (0..125u32)
            .map(|i| Color::new(i as u8, (i * 2) as u8, 255 - i as u8))
            .collect();
        let cube = LookupCube::from_data(5, data).unwrap();
        let (w, h, bytes) = flatten(&cube);
        assert_eq!(unflatten(w, h, &bytes).unwrap(), cube);
    }

    #[test]
    fn test_unflatten_rejects_bad_shape() {
        assert!(unflatten(10, 3, &[0; 90]).is_err());
        assert!(unflatten(9, 3, &[0; 80]).is_err());
        assert!(unflatten(0, 0, &[]).is_err());
    }
}
