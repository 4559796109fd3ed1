//! Pipeline error types.

use std::path::{Path, PathBuf};

use texeq_cache::CacheError;
use thiserror::Error;

/// Errors that can occur while rendering an equation.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The requested output format is not one of `pdf`, `svg`, `png`.
    #[error("Unsupported format '{requested}' (expected one of: pdf, svg, png)")]
    UnsupportedFormat { requested: String },

    /// The cache root could not be prepared.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The typesetting tool produced no intermediate file.
    #[error("Cannot create file. Error in LaTeX: {}", document.display())]
    CompilationFailed { document: PathBuf },

    /// The conversion tool produced no output file.
    #[error("Cannot convert file {} to {}", intermediate.display(), output.display())]
    ConversionFailed {
        intermediate: PathBuf,
        output: PathBuf,
    },

    /// File I/O error on a pipeline artifact.
    #[error("File error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Creates an unsupported-format error.
    pub fn unsupported_format(requested: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            requested: requested.into(),
        }
    }

    /// Creates an I/O error bound to an artifact path.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_error_is_transparent() {
        let cache_err = CacheError::unwritable(Path::new("eq.dir"), "denied");
        let expected = cache_err.to_string();

        let err = PipelineError::from(cache_err);

        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_unsupported_format_lists_choices() {
        let msg = PipelineError::unsupported_format("bmp").to_string();
        assert!(msg.contains("'bmp'"));
        assert!(msg.contains("pdf, svg, png"));
    }
}
