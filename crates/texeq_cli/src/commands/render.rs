//! Render command implementation

use std::fs;
use std::path::Path;

use miette::{IntoDiagnostic, Result};
use texeq_core::{RenderConfig, RenderOptions, Renderer};
use tracing::{debug, error};

use crate::cli::Cli;

/// Renders one expression and prints the resulting path.
///
/// Returns `Ok(true)` if the pipeline reported a failure.
pub fn run_render(cli: &Cli, config: RenderConfig, expression: &str) -> Result<bool> {
    let format = cli
        .format
        .clone()
        .unwrap_or_else(|| config.format.to_string());

    let options = RenderOptions {
        root: cli.cache_dir.clone(),
        invalidate: cli.invalidate,
        surface_tool_errors: cli.show_errors,
    };

    let renderer = Renderer::new(config);
    let rendered = match renderer.render(expression, &format, &options) {
        Ok(path) => path,
        Err(e) => {
            error!("{}", e);
            return Ok(true);
        }
    };

    let shown = match &cli.output {
        Some(output) if same_file(&rendered, output) => {
            debug!("{} is the cached file, not copying", output.display());
            output.clone()
        }
        Some(output) => {
            fs::copy(&rendered, output).into_diagnostic()?;
            debug!("Copied {} to {}", rendered.display(), output.display());
            output.clone()
        }
        None => rendered,
    };

    println!("{}", shown.display());
    Ok(false)
}

/// Copying a file onto itself truncates it.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
