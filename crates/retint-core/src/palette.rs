//! Ordered, non-empty color palette.

use serde::{Deserialize, Serialize};

use crate::{Color, Error, Result};

/// An ordered, non-empty sequence of colors resolved from a theme.
///
/// Order matters for content hashing and for nearest-neighbor tie-breaks,
/// never for the blend itself.
///
/// # Example
///
/// ```rust
/// use retint_core::{Color, Palette};
///
/// let palette = Palette::new(vec![Color::BLACK, Color::WHITE]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert!(Palette::new(Vec::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Creates a palette, rejecting an empty color list.
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::invalid_palette("palette has no colors"));
        }
        Ok(Self { colors })
    }

    /// Parses a palette from hex strings such as `#rrggbb`.
    ///
    /// The first malformed entry fails the whole palette with its index.
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self> {
        let colors = hex
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Color::from_hex(s.as_ref())
                    .map_err(|e| Error::invalid_palette(format!("color at index {i}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    /// Palette colors in order.
    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of colors, always at least one.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; provided for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterates colors in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.colors.iter()
    }

    /// Canonical hex strings in palette order.
    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = Error;

    fn try_from(colors: Vec<Color>) -> Result<Self> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(p: Palette) -> Self {
        p.colors
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rejected() {
        let err = Palette::new(Vec::new()).unwrap_err();
        assert!(err.is_palette_error());
        let none: [&str; 0] = [];
        assert!(Palette::from_hex(&none).is_err());
    }

    #[test]
    fn test_from_hex_keeps_order() {
        let p = Palette::from_hex(&["#ffffff", "#000000", "#ff0000"]).unwrap();
        assert_eq!(
            p.colors(),
            &[Color::WHITE, Color::BLACK, Color::new(255, 0, 0)]
        );
        assert_eq!(p.to_hex(), vec!["#ffffff", "#000000", "#ff0000"]);
    }

    #[test]
    fn test_from_hex_reports_index() {
        let err = Palette::from_hex(&["#ffffff", "nope"]).unwrap_err();
        assert!(matches!(err, Error::InvalidPalette(_)));
        assert!(err.to_string().contains("index 1"));
    }
}
