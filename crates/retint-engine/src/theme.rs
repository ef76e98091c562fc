//! Theme resolution seam.
//!
//! Discovering and parsing theme files happens outside the engine. The
//! engine only asks a [`ThemeResolver`] for the palette behind an identifier.

use std::collections::BTreeMap;

use retint_core::Palette;

use crate::{RecolorError, RecolorResult};

/// Resolves theme identifiers into palettes.
pub trait ThemeResolver: Send + Sync {
    /// Palette for `identifier`, or [`RecolorError::ThemeNotFound`].
    fn resolve(&self, identifier: &str) -> RecolorResult<Palette>;
}

/// In-memory themes keyed by case-insensitive name.
///
/// # Example
///
/// ```rust
/// use retint_core::Palette;
/// use retint_engine::{StaticThemes, ThemeResolver};
///
/// let mut themes = StaticThemes::new();
/// themes.insert("Nord", Palette::from_hex(&["#2e3440", "#eceff4"]).unwrap());
/// assert!(themes.resolve("nord").is_ok());
/// assert!(themes.resolve("dracula").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticThemes {
    themes: BTreeMap<String, Palette>,
}

impl StaticThemes {
    /// Creates an empty theme set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a theme.
    pub fn insert(&mut self, name: &str, palette: Palette) -> Option<Palette> {
        self.themes.insert(name.to_lowercase(), palette)
    }

    /// Adds a theme from hex color strings.
    pub fn insert_hex<S: AsRef<str>>(&mut self, name: &str, hex: &[S]) -> RecolorResult<()> {
        self.insert(name, Palette::from_hex(hex)?);
        Ok(())
    }

    /// Returns `true` if a theme with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(&name.to_lowercase())
    }

    /// Theme names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}

impl ThemeResolver for StaticThemes {
    fn resolve(&self, identifier: &str) -> RecolorResult<Palette> {
        self.themes
            .get(&identifier.to_lowercase())
            .cloned()
            .ok_or_else(|| RecolorError::ThemeNotFound(identifier.to_string()))
    }
}
