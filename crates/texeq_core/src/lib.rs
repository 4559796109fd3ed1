//! # texeq_core
//!
//! Cached LaTeX equation rendering.
//!
//! This crate provides:
//! - Cache key derivation from equation text
//! - The document → PDF → SVG/PNG pipeline with staleness checks
//! - The `ToolRunner` seam for invoking external programs
//! - Configuration loading
//!
//! ## Example
//!
//! ```rust,ignore
//! use texeq_core::{RenderConfig, RenderOptions, Renderer};
//!
//! let renderer = Renderer::new(RenderConfig::new().with_cache_dir("equations"));
//! let png = renderer.render(r"e^{i\pi} + 1 = 0", "png", &RenderOptions::new())?;
//! println!("{}", png.display());
//! ```

mod artifact;
mod config;
mod document;
mod error;
mod format;
mod key;
mod renderer;
pub mod tool;

pub use artifact::{ArtifactFamily, BYPRODUCT_EXTS, DOCUMENT_EXT};
pub use config::{RenderConfig, ToolchainConfig};
pub use document::document_source;
pub use error::PipelineError;
pub use format::Format;
pub use key::{CacheKey, MAX_ENCODED_KEY_LEN};
pub use renderer::{RenderOptions, Renderer};
pub use tool::{ProcessRunner, ToolExit, ToolInvocation, ToolRunner, ToolStage, ToolStreams};

#[cfg(test)]
pub mod test_utils;

pub use texeq_cache::{
    CACHE_DIR_ENV, CacheError, CacheRoot, ClearOutcome, DEFAULT_CACHE_DIR, MARKER_FILE,
};
