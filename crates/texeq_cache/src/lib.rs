//! # texeq_cache
//!
//! Cache directory management for texeq.
//!
//! A cache root is a directory carrying an empty marker file. Only marked
//! directories are ever cleared, so pointing texeq at an unrelated directory
//! can never delete it.

mod error;
mod root;

pub use error::CacheError;
pub use root::{
    CACHE_DIR_ENV, CacheRoot, ClearOutcome, DEFAULT_CACHE_DIR, MARKER_FILE, clear, resolve_root,
};
