//! Recolor entry points.
//!
//! [`Recolorer`] ties the pieces together: resolve the theme, then either
//! snap pixels to the palette (`nn` backend) or fetch/generate the cached
//! cube and apply it (`clut` backend).

use std::sync::Arc;

use retint_core::{Palette, RgbaImage};
use retint_lut::{nearest_neighbor_transform, RbfMapper};
use tracing::debug;

use crate::{
    ColorCorrectionBackend, CubeCache, RecolorConfig, RecolorResult, ThemeResolver,
};

/// Recolors images against theme palettes.
///
/// Cheap to clone; clones share the theme resolver. Cube creation is
/// serialized process-wide unless [`with_cache`](Self::with_cache) installs a
/// cache with its own lock.
#[derive(Clone)]
pub struct Recolorer {
    config: RecolorConfig,
    mapper: RbfMapper,
    cache: CubeCache,
    themes: Arc<dyn ThemeResolver>,
}

impl std::fmt::Debug for Recolorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recolorer")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl Recolorer {
    /// Creates a recolorer from validated settings.
    ///
    /// # Errors
    ///
    /// [`RecolorError::InvalidParameter`](crate::RecolorError::InvalidParameter)
    /// for a zero level or bad kernel width.
    pub fn new(config: RecolorConfig, themes: Arc<dyn ThemeResolver>) -> RecolorResult<Self> {
        config.validate()?;
        let mapper = config.mapper()?;
        let cache = CubeCache::new(config.cache_root.clone());
        Ok(Self {
            config,
            mapper,
            cache,
            themes,
        })
    }

    /// Replaces the cube cache, e.g. one built with [`CubeCache::with_lock`].
    pub fn with_cache(mut self, cache: CubeCache) -> Self {
        self.cache = cache;
        self
    }

    /// Active settings.
    pub fn config(&self) -> &RecolorConfig {
        &self.config
    }

    /// Cube cache used by the `clut` backend.
    pub fn cache(&self) -> &CubeCache {
        &self.cache
    }

    /// Recolors `image` with the palette of `theme`, using the configured backend.
    pub fn recolor(&self, image: &RgbaImage, theme: &str) -> RecolorResult<RgbaImage> {
        let palette = self.themes.resolve(theme)?;
        self.recolor_with_palette(image, theme, &palette, self.config.backend)
    }

    /// Recolors with an already resolved palette and an explicit backend.
    ///
    /// `theme` only labels the cache file. The label is lowercased, matching
    /// the case-insensitive theme lookup.
    pub fn recolor_with_palette(
        &self,
        image: &RgbaImage,
        theme: &str,
        palette: &Palette,
        backend: ColorCorrectionBackend,
    ) -> RecolorResult<RgbaImage> {
        debug!(
            theme,
            ?backend,
            width = image.width(),
            height = image.height(),
            colors = palette.len(),
            "recoloring image"
        );

        match backend {
            ColorCorrectionBackend::Nn => Ok(nearest_neighbor_transform(image, palette)),
            ColorCorrectionBackend::Clut => {
                let label = theme.to_lowercase();
                let entry =
                    self.cache
                        .ensure_cube(&label, palette, self.config.level, &self.mapper)?;
                let cube = self.cache.load(&entry)?;
                Ok(cube.apply_image(image))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecolorError, StaticThemes};
    use retint_core::Color;

    fn themes() -> Arc<dyn ThemeResolver> {
        let mut t = StaticThemes::new();
        t.insert_hex("mono", &["#000000", "#ffffff"]).unwrap();
        t.insert_hex("red", &["#ff0000"]).unwrap();
        Arc::new(t)
    }

    fn gradient() -> RgbaImage {
        let mut raw = Vec::new();
        for y in 0..8u32 {
            for x in 0..8u32 {
                raw.extend_from_slice(&[(x * 32) as u8, (y * 32) as u8, 128, (x * y) as u8]);
            }
        }
        RgbaImage::from_raw(8, 8, raw).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = RecolorConfig::default();
        config.level = 0;
        assert!(matches!(
            Recolorer::new(config, themes()),
            Err(RecolorError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_unknown_theme() {
        let dir = tempfile::tempdir().unwrap();
        let r = Recolorer::new(RecolorConfig::with_cache_root(dir.path()), themes()).unwrap();
        assert!(matches!(
            r.recolor(&gradient(), "solarized"),
            Err(RecolorError::ThemeNotFound(_))
        ));
    }

    #[test]
    fn test_nn_backend_skips_cache() {
        let dir = tempfile::tempdir().unwrap();
        let config = RecolorConfig::with_cache_root(dir.path()).backend(ColorCorrectionBackend::Nn);
        let r = Recolorer::new(config, themes()).unwrap();

        let out = r.recolor(&gradient(), "mono").unwrap();
        assert!(out
            .pixels()
            .all(|(c, _)| c == Color::BLACK || c == Color::WHITE));
        assert!(!r.cache().clut_dir().exists());
    }

    #[test]
    fn test_clut_backend_single_color() {
        let dir = tempfile::tempdir().unwrap();
        let r = Recolorer::new(RecolorConfig::with_cache_root(dir.path()), themes()).unwrap();

        let img = gradient();
        let out = r.recolor(&img, "RED").unwrap();
        for ((c, a), (_, orig_a)) in out.pixels().zip(img.pixels()) {
            assert_eq!(c, Color::new(255, 0, 0));
            assert_eq!(a, orig_a);
        }
        assert_eq!(std::fs::read_dir(r.cache().clut_dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_theme_case_shares_cache_entry() {
        let dir = tempfile::tempdir().unwrap();
        let r = Recolorer::new(RecolorConfig::with_cache_root(dir.path()), themes()).unwrap();

        let upper = r.recolor(&gradient(), "MONO").unwrap();
        let lower = r.recolor(&gradient(), "mono").unwrap();
        assert_eq!(upper, lower);

        let names: Vec<_> = std::fs::read_dir(r.cache().clut_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with("mono_"));
    }
}
