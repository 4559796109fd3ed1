//! Command implementations

mod clear;
mod render;

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use texeq_core::RenderConfig;
use tracing::debug;

pub use clear::run_clear;
pub use render::run_render;

/// Loads `--config`, or a config file found in the working directory, or defaults.
pub fn find_config(explicit: Option<&Path>) -> Result<RenderConfig> {
    if let Some(path) = explicit {
        return RenderConfig::from_file(path).into_diagnostic();
    }

    if let Some(path) = RenderConfig::discover(".") {
        debug!("Using config: {}", path.display());
        return RenderConfig::from_file(&path).into_diagnostic();
    }

    debug!("No config file found, using defaults");
    Ok(RenderConfig::new())
}
