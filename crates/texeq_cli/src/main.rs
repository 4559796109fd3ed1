//! texeq CLI
//!
//! Renders LaTeX equations to PDF, SVG or PNG, caching every result.

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::Cli;
use commands::{find_config, run_clear, run_render};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(failed) => {
            if failed {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(true)` when rendering failed, `Err` for anything else going wrong.
fn run(cli: Cli) -> Result<bool> {
    let config = find_config(cli.config.as_deref())?;

    if cli.clear {
        return run_clear(&cli, config).map(|_| false);
    }

    match cli.expression.as_deref() {
        Some(expression) => run_render(&cli, config, expression),
        None => Err(miette::miette!("Missing expression")),
    }
}
