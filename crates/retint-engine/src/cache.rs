//! Content-addressed lookup cube cache.
//!
//! Cubes live at `<root>/cluts/<theme>_<hash>.png`, where `hash` is
//! [`palette_hash`] of the palette. Entries are created once, never rewritten
//! and never evicted.
//!
//! # Concurrency
//!
//! All cube creations go through one process-wide critical section: every
//! [`CubeCache::new`] hands out the same lock, and [`CubeCache::with_lock`]
//! overrides it explicitly. Inside it the existence check is repeated, so
//! parallel first requests for the same palette generate exactly once. Files
//! are written to a temporary name in the same directory and moved into place
//! without replacing an existing entry, so a path that exists always holds a
//! complete cube and readers need no lock.
//!
//! # Example
//!
//! ```rust,no_run
//! use retint_core::Palette;
//! use retint_engine::CubeCache;
//! use retint_lut::RbfMapper;
//!
//! let cache = CubeCache::new("/tmp/retint");
//! let palette = Palette::from_hex(&["#2e3440", "#eceff4"]).unwrap();
//! let entry = cache.ensure_cube("nord", &palette, 8, &RbfMapper::default()).unwrap();
//! let cube = cache.load(&entry).unwrap();
//! ```

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use retint_core::Palette;
use retint_lut::{check_level, interpolate, ColorMapper, LookupCube};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::hash::{cache_file_name, palette_hash};
use crate::{RecolorError, RecolorResult};

/// Sub-directory of the cache root that holds cube files.
pub const CLUT_DIR: &str = "cluts";

/// A resolved cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Palette content hash.
    pub key: String,
    /// Cube file location.
    pub path: PathBuf,
    /// `true` if this call generated the cube, `false` if it already existed.
    pub generated: bool,
}

/// Lock serializing cube creation for every cache built with [`CubeCache::new`].
fn global_creation_lock() -> Arc<Mutex<()>> {
    static CREATION_LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();
    Arc::clone(CREATION_LOCK.get_or_init(|| Arc::new(Mutex::new(()))))
}

/// Cube cache rooted at a directory.
#[derive(Debug, Clone)]
pub struct CubeCache {
    root: PathBuf,
    creation_lock: Arc<Mutex<()>>,
}

impl CubeCache {
    /// Creates a cache that uses the process-wide creation lock.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_lock(root, global_creation_lock())
    }

    /// Creates a cache that serializes creations with `lock` instead of the
    /// process-wide one.
    pub fn with_lock(root: impl Into<PathBuf>, lock: Arc<Mutex<()>>) -> Self {
        Self {
            root: root.into(),
            creation_lock: lock,
        }
    }

    /// Cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding cube files.
    pub fn clut_dir(&self) -> PathBuf {
        self.root.join(CLUT_DIR)
    }

    /// File path for a theme label and palette key.
    pub fn entry_path(&self, theme: &str, key: &str) -> PathBuf {
        self.clut_dir().join(cache_file_name(theme, key))
    }

    /// Returns the cache entry for `palette`, generating it if missing.
    ///
    /// An existing entry is returned as-is, whatever level or mapper produced
    /// it. Otherwise the identity cube of `level` is warped by `mapper` and
    /// published atomically.
    ///
    /// # Errors
    ///
    /// - [`RecolorError::InvalidParameter`] for a level outside `1..=256`
    /// - [`RecolorError::Io`] when the directory or file cannot be created
    /// - [`RecolorError::Generation`] when interpolation yields a bad cube
    pub fn ensure_cube(
        &self,
        theme: &str,
        palette: &Palette,
        level: usize,
        mapper: &dyn ColorMapper,
    ) -> RecolorResult<CacheEntry> {
        check_level(level)?;

        let key = palette_hash(palette);
        let path = self.entry_path(theme, &key);

        if exists(&path)? {
            debug!(path = %path.display(), "cube cache hit");
            return Ok(CacheEntry {
                key,
                path,
                generated: false,
            });
        }

        let _guard = self
            .creation_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if exists(&path)? {
            debug!(path = %path.display(), "cube created by another caller");
            return Ok(CacheEntry {
                key,
                path,
                generated: false,
            });
        }

        let dir = self.clut_dir();
        fs::create_dir_all(&dir)
            .map_err(|e| RecolorError::io("creating cube directory", &dir, e))?;

        let cube = generate(palette, level, mapper)?;
        if !publish(&dir, &path, &cube)? {
            debug!(path = %path.display(), "cube published concurrently, keeping existing");
            return Ok(CacheEntry {
                key,
                path,
                generated: false,
            });
        }

        info!(
            theme,
            key = %key,
            level,
            path = %path.display(),
            "generated lookup cube"
        );

        Ok(CacheEntry {
            key,
            path,
            generated: true,
        })
    }

    /// Loads the cube behind a cache entry.
    pub fn load(&self, entry: &CacheEntry) -> RecolorResult<LookupCube> {
        Ok(retint_io::load_cube(&entry.path)?)
    }
}

/// `true` only for a regular file; anything else at the path is not an entry.
fn exists(path: &Path) -> RecolorResult<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(RecolorError::io("checking cube file", path, e)),
    }
}

/// Identity cube warped toward `palette`, checked for consistency.
fn generate(palette: &Palette, level: usize, mapper: &dyn ColorMapper) -> RecolorResult<LookupCube> {
    let identity = LookupCube::identity(level)?;
    let cube = interpolate(&identity, palette, mapper)?;

    if cube.level() != level || cube.entry_count() != level * level * level {
        return Err(RecolorError::Generation(format!(
            "expected level {} with {} entries, got level {} with {}",
            level,
            level * level * level,
            cube.level(),
            cube.entry_count()
        )));
    }
    Ok(cube)
}

/// Writes `cube` to a temporary file in `dir` and moves it to `path`.
///
/// Never replaces an existing file: returns `false` if a complete entry is
/// already there. The temporary file is removed on any failure.
fn publish(dir: &Path, path: &Path, cube: &LookupCube) -> RecolorResult<bool> {
    let mut tmp = tempfile::Builder::new()
        .prefix(".clut-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| RecolorError::io("creating temporary cube file", dir, e))?;

    write_durable(&mut tmp, cube)?;

    match tmp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists && path.is_file() => Ok(false),
        Err(e) => Err(RecolorError::io("publishing cube file", path, e.error)),
    }
}

fn write_durable(tmp: &mut NamedTempFile, cube: &LookupCube) -> RecolorResult<()> {
    let tmp_path = tmp.path().to_path_buf();
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        retint_io::encode_cube(&mut writer, cube)?;
        writer
            .flush()
            .map_err(|e| RecolorError::io("writing cube file", &tmp_path, e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| RecolorError::io("syncing cube file", &tmp_path, e))
}
