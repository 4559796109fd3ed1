//! Clear command implementation

use miette::{IntoDiagnostic, Result};
use texeq_core::{ClearOutcome, RenderConfig, Renderer};
use tracing::info;

use crate::cli::Cli;

pub fn run_clear(cli: &Cli, config: RenderConfig) -> Result<()> {
    let renderer = Renderer::new(config);
    let root = renderer.resolve_root(cli.cache_dir.as_deref());

    match renderer.clear(Some(root.as_path())).into_diagnostic()? {
        ClearOutcome::Removed => info!("Removed {}", root.display()),
        ClearOutcome::NotPresent => info!("Nothing to clear at {}", root.display()),
    }

    println!("cleaned");
    Ok(())
}
