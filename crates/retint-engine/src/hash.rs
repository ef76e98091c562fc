//! Palette content hashing and cache file naming.

use retint_core::Palette;
use sha2::{Digest, Sha256};

/// Length of a cache key in hex characters.
pub const KEY_LEN: usize = 16;

/// Order-sensitive content hash of a palette.
///
/// SHA-256 over the concatenated canonical `#rrggbb` strings, truncated to
/// [`KEY_LEN`] lowercase hex characters.
///
/// # Example
///
/// ```rust
/// use retint_core::Palette;
/// use retint_engine::palette_hash;
///
/// let a = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
/// let b = Palette::from_hex(&["#ffffff", "#000000"]).unwrap();
/// assert_eq!(palette_hash(&a).len(), 16);
/// assert_ne!(palette_hash(&a), palette_hash(&b));
/// ```
pub fn palette_hash(palette: &Palette) -> String {
    let mut hasher = Sha256::new();
    for color in palette {
        hasher.update(color.to_hex().as_bytes());
    }
    let digest = hasher.finalize();

    digest
        .iter()
        .take(KEY_LEN / 2)
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Returns `true` if a theme identifier looks like a filesystem path.
pub fn is_likely_path(theme: &str) -> bool {
    std::path::Path::new(theme).is_absolute()
        || theme.starts_with('~')
        || theme.contains(['/', '\\'])
}

/// Collapses a theme identifier into a safe file name stem.
///
/// Path-like identifiers keep only their base name without extension, so
/// `~/.config/themes/nord.json` becomes `nord`. Names that would be empty or
/// navigate directories fall back to `theme`.
pub fn sanitize_theme_name(theme: &str) -> String {
    let name = if is_likely_path(theme) {
        let base = theme.rsplit(['/', '\\']).next().unwrap_or(theme);
        match base.rfind('.') {
            Some(dot) if dot > 0 => &base[..dot],
            _ => base,
        }
    } else {
        theme
    };

    match name {
        "" | "." | ".." | "~" => "theme".to_string(),
        _ => name.to_string(),
    }
}

/// Cache file name `<sanitized theme>_<key>.png`.
pub fn cache_file_name(theme: &str, key: &str) -> String {
    format!("{}_{}.png", sanitize_theme_name(theme), key)
}
