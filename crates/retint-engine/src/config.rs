//! Engine configuration.
//!
//! Where the configuration file lives and how it is found is up to the
//! caller; this module only defines the settings and parses YAML text.
//!
//! ```yaml
//! backend: nn            # or "clut" (default)
//! cache_root: /home/me/.cache/retint
//! level: 8
//! rbf_sigma: 50.0
//! ```

use std::path::PathBuf;

use retint_lut::{check_level, RbfMapper, DEFAULT_LEVEL};
use serde::{Deserialize, Serialize};

use crate::{RecolorError, RecolorResult};

/// Which transform recolors images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCorrectionBackend {
    /// RBF-warped lookup cube with trilinear lookup, cached on disk.
    #[default]
    Clut,
    /// Snap every pixel to the nearest palette color. No cache.
    #[serde(alias = "nearest")]
    Nn,
}

/// Recolor engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecolorConfig {
    /// Transform backend.
    pub backend: ColorCorrectionBackend,
    /// Directory that holds the `cluts/` cache folder.
    pub cache_root: PathBuf,
    /// Cube quantization level (steps per channel), `1..=256`.
    pub level: usize,
    /// Gaussian RBF kernel width, at least [`RbfMapper::MIN_SIGMA`].
    pub rbf_sigma: f32,
}

impl Default for RecolorConfig {
    fn default() -> Self {
        Self {
            backend: ColorCorrectionBackend::default(),
            cache_root: std::env::temp_dir().join("retint"),
            level: DEFAULT_LEVEL,
            rbf_sigma: RbfMapper::DEFAULT_SIGMA,
        }
    }
}

impl RecolorConfig {
    /// Default settings with a specific cache root.
    pub fn with_cache_root(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
            ..Self::default()
        }
    }

    /// Sets the backend.
    pub fn backend(mut self, backend: ColorCorrectionBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Parses and validates YAML settings; missing keys take defaults.
    pub fn from_yaml_str(yaml: &str) -> RecolorResult<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| RecolorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks level and kernel width.
    pub fn validate(&self) -> RecolorResult<()> {
        check_level(self.level)?;
        RbfMapper::new(self.rbf_sigma)?;
        Ok(())
    }

    /// RBF mapper for these settings.
    pub fn mapper(&self) -> RecolorResult<RbfMapper> {
        Ok(RbfMapper::new(self.rbf_sigma)?)
    }
}
