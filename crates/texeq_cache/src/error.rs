//! Cache error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while preparing or clearing a cache root.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache root could not be created, or its marker could not be confirmed.
    #[error("Cannot create files in cache dir {}: {reason}", path.display())]
    Unwritable { path: PathBuf, reason: String },

    /// The directory exists but was not created by texeq.
    #[error("{} is not a texeq cache directory (marker file missing)", path.display())]
    NotACache { path: PathBuf },

    /// I/O error while removing a cache root.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CacheError {
    /// Creates an unwritable-root error.
    pub fn unwritable(path: &Path, reason: impl ToString) -> Self {
        Self::Unwritable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Creates a foreign-directory error.
    pub fn not_a_cache(path: &Path) -> Self {
        Self::NotACache {
            path: path.to_path_buf(),
        }
    }
}
