//! CLI argument definitions

use std::path::PathBuf;

use clap::Parser;
use texeq_core::CACHE_DIR_ENV;

/// texeq - Cached LaTeX equation renderer
#[derive(Parser, Debug)]
#[command(name = "texeq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// LaTeX expression to render
    #[arg(required_unless_present = "clear")]
    pub expression: Option<String>,

    /// Output format (pdf, svg, png) [default: from config, else pdf]
    #[arg(short, long)]
    pub format: Option<String>,

    /// Copy the rendered file to this path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Regenerate every cached stage
    #[arg(long)]
    pub invalidate: bool,

    /// Cache directory
    #[arg(long, value_name = "DIR", env = CACHE_DIR_ENV)]
    pub cache_dir: Option<PathBuf>,

    /// Remove the cache directory
    #[arg(long, conflicts_with_all = ["expression", "output", "invalidate"])]
    pub clear: bool,

    /// Show the output of the external tools
    #[arg(long)]
    pub show_errors: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
