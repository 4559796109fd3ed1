//! Cache root resolution, preparation and removal.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::CacheError;

/// Name of the empty file marking a directory as a texeq cache.
pub const MARKER_FILE: &str = ".texeq";

/// Cache directory used when neither an explicit nor a configured path is given.
pub const DEFAULT_CACHE_DIR: &str = ".texeq-cache";

/// Environment variable read by the CLI to supply the configured cache directory.
pub const CACHE_DIR_ENV: &str = "TEXEQ_CACHE_DIR";

/// Picks the cache directory: explicit path, then configured default, then [`DEFAULT_CACHE_DIR`].
pub fn resolve_root(explicit: Option<&Path>, configured: Option<&Path>) -> PathBuf {
    explicit
        .or(configured)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR))
}

/// Result of a successful [`clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The cache directory tree was removed.
    Removed,
    /// There was no cache directory to remove.
    NotPresent,
}

/// A directory that has been prepared as a cache root.
///
/// Holding a `CacheRoot` means the directory and its marker were present
/// when [`CacheRoot::ensure`] returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRoot {
    path: PathBuf,
}

impl CacheRoot {
    /// Creates the directory and marker file if needed.
    ///
    /// An existing directory without a marker is adopted: the marker is written into it.
    pub fn ensure(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();

        if !path.is_dir() {
            fs::create_dir_all(&path).map_err(|e| CacheError::unwritable(&path, e))?;
            debug!("Created cache directory {}", path.display());
        }

        let marker = path.join(MARKER_FILE);
        if !marker.is_file() {
            fs::File::create(&marker).map_err(|e| CacheError::unwritable(&path, e))?;
        }

        // Confirm with a fresh query.
        if !marker.is_file() {
            return Err(CacheError::unwritable(
                &path,
                "marker file missing after creation",
            ));
        }

        Ok(Self { path })
    }

    /// Returns true if `path` is a directory carrying the marker file.
    pub fn is_cache(path: &Path) -> bool {
        path.is_dir() && path.join(MARKER_FILE).is_file()
    }

    /// Returns the root directory.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Removes the whole cache directory tree at `path`.
///
/// A missing directory counts as already cleared. A directory without the
/// marker is left untouched and reported as [`CacheError::NotACache`].
pub fn clear(path: &Path) -> Result<ClearOutcome, CacheError> {
    if !path.is_dir() {
        debug!("No cache directory at {}", path.display());
        return Ok(ClearOutcome::NotPresent);
    }

    if !CacheRoot::is_cache(path) {
        return Err(CacheError::not_a_cache(path));
    }

    fs::remove_dir_all(path)?;
    info!("Cleared cache directory {}", path.display());
    Ok(ClearOutcome::Removed)
}
