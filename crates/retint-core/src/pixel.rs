//! 8-bit RGB color value.
//!
//! [`Color`] is the only color representation in the workspace. Alpha never
//! takes part in color math; images carry it next to the color and pass it
//! through unchanged.
//!
//! # Example
//!
//! ```rust
//! use retint_core::Color;
//!
//! let c = Color::from_hex("#ff8000").unwrap();
//! assert_eq!(c, Color::new(255, 128, 0));
//! assert_eq!(c.to_hex(), "#ff8000");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An opaque RGB color with 8 bits per channel.
///
/// Channel values are `u8`, so the `[0, 255]` range holds by construction.
/// Serializes as a canonical `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Black `(0, 0, 0)`.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White `(255, 255, 255)`.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns channels as `[r, g, b]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns channels as `f32` in `[0, 255]`.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Rounds and clamps floating point channels into a color.
    ///
    /// NaN channels become 0.
    #[inline]
    pub fn from_f32_clamped(rgb: [f32; 3]) -> Self {
        Self::new(clamp_channel(rgb[0]), clamp_channel(rgb[1]), clamp_channel(rgb[2]))
    }

    /// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb` (case-insensitive).
    pub fn from_hex(input: &str) -> Result<Self> {
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        let invalid = |reason| Error::InvalidColor {
            input: input.to_string(),
            reason,
        };

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("non-hex digit"));
        }

        match digits.len() {
            6 => {
                let channel = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid("non-hex digit"))
                };
                Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                let channel = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid("non-hex digit"))
                };
                Ok(Self::new(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => Err(invalid("expected 3 or 6 hex digits")),
        }
    }

    /// Canonical lowercase `#rrggbb` representation.
    ///
    /// This is the form fed to the palette content hash.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[inline]
fn clamp_channel(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl From<[u8; 3]> for Color {
    #[inline]
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<Color> for [u8; 3] {
    #[inline]
    fn from(c: Color) -> Self {
        c.to_array()
    }
}
