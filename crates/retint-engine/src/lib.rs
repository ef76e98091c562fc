//! # retint-engine
//!
//! Recolor images to match a theme palette.
//!
//! ```text
//! image + theme
//!   -> ThemeResolver::resolve           palette
//!   -> backend = nn   ? nearest_neighbor_transform
//!      backend = clut ? CubeCache::ensure_cube -> load -> LookupCube::apply_image
//!   -> recolored image
//! ```
//!
//! - [`Recolorer`] - the `recolor(image, theme)` entry point
//! - [`CubeCache`] - content-addressed, single-writer cube persistence
//! - [`palette_hash`] - order-sensitive palette cache key
//! - [`RecolorConfig`] - backend, cache root, level and kernel width
//! - [`ThemeResolver`] / [`StaticThemes`] - palette lookup seam
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use retint_core::{Color, RgbaImage};
//! use retint_engine::{RecolorConfig, Recolorer, StaticThemes};
//!
//! let mut themes = StaticThemes::new();
//! themes.insert_hex("nord", &["#2e3440", "#88c0d0", "#eceff4"]).unwrap();
//!
//! let recolorer = Recolorer::new(
//!     RecolorConfig::with_cache_root("/tmp/retint"),
//!     Arc::new(themes),
//! ).unwrap();
//!
//! let img = RgbaImage::filled(64, 64, Color::new(200, 120, 40), 255).unwrap();
//! let out = recolorer.recolor(&img, "nord").unwrap();
//! ```
//!
//! # Dependencies
//!
//! - [`sha2`] - Palette content hash
//! - [`tempfile`] - Atomic publication of cube files
//! - [`serde`] / [`serde_yaml`] - Configuration
//! - [`tracing`] - Diagnostics

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cache;
pub mod config;
mod error;
pub mod hash;
mod recolor;
pub mod theme;

pub use cache::{CacheEntry, CubeCache, CLUT_DIR};
pub use config::{ColorCorrectionBackend, RecolorConfig};
pub use error::{RecolorError, RecolorResult};
pub use hash::{cache_file_name, palette_hash, sanitize_theme_name, KEY_LEN};
pub use recolor::Recolorer;
pub use theme::{StaticThemes, ThemeResolver};
