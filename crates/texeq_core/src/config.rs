//! Renderer configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::{Format, PipelineError};

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// External programs used by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Typesetting engine producing the intermediate PDF.
    pub latex: String,

    /// PDF to SVG converter.
    pub svg_converter: String,

    /// PDF to PNG converter (ImageMagick `convert` command line).
    pub png_converter: String,

    /// Rasterization density in DPI.
    pub png_density: u32,

    /// PNG quality setting passed to the converter.
    pub png_quality: u8,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            latex: "pdflatex".to_string(),
            svg_converter: "pdf2svg".to_string(),
            png_converter: "convert".to_string(),
            png_density: 300,
            png_quality: 90,
        }
    }
}

/// Configuration for a [`Renderer`](crate::Renderer).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Default cache directory, used when a render names no root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Default output format for callers that do not pick one.
    #[serde(default)]
    pub format: Format,

    /// External programs.
    #[serde(default)]
    pub tools: ToolchainConfig,

    /// Directory of the loaded config file. Relative `cache_dir` values are
    /// resolved against it.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl RenderConfig {
    /// Config file names, in discovery order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".texeq.jsonc", ".texeq.json"];

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default cache directory.
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| PipelineError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from a JSON (comments allowed) string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| PipelineError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(PipelineError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| PipelineError::config(format!("Invalid config: {}", e)))
    }

    /// Looks for a config file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Configured cache directory, relative paths joined onto `base_dir`.
    pub fn resolved_cache_dir(&self) -> Option<PathBuf> {
        let cache_dir = self.cache_dir.as_ref()?;
        match &self.base_dir {
            Some(base) if cache_dir.is_relative() => Some(base.join(cache_dir)),
            _ => Some(cache_dir.clone()),
        }
    }
}
