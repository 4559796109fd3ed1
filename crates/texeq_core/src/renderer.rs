//! The cached rendering pipeline.
//!
//! An equation flows through three stages, each gated on whether its output
//! file already exists:
//!
//! 1. document: `<key>.tex` written from the template
//! 2. intermediate: `<key>.pdf` compiled by the typesetting tool
//! 3. final: `<key>.svg` / `<key>.png` converted from the PDF (skipped for PDF output)
//!
//! Rewriting a stage removes the next stage's file, so staleness cascades
//! downwards without any extra metadata.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use texeq_cache::{CacheError, CacheRoot, ClearOutcome, resolve_root};
use tracing::{debug, info, warn};

use crate::document::document_source;
use crate::{
    ArtifactFamily, CacheKey, Format, PipelineError, ProcessRunner, RenderConfig, ToolInvocation,
    ToolRunner, ToolStreams,
};

/// Per-call rendering options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Cache root for this call. Falls back to the configured directory.
    pub root: Option<PathBuf>,

    /// Regenerate every stage even if cached files exist.
    pub invalidate: bool,

    /// Let external tools write to the caller's stdout and stderr.
    pub surface_tool_errors: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn invalidate(mut self, invalidate: bool) -> Self {
        self.invalidate = invalidate;
        self
    }

    pub fn surface_tool_errors(mut self, surface: bool) -> Self {
        self.surface_tool_errors = surface;
        self
    }
}

/// Renders equations into a cache directory.
pub struct Renderer<R = ProcessRunner> {
    config: RenderConfig,
    runner: R,
}

impl Renderer<ProcessRunner> {
    /// Creates a renderer that runs the configured tools as subprocesses.
    pub fn new(config: RenderConfig) -> Self {
        Self::with_runner(config, ProcessRunner)
    }
}

impl<R: ToolRunner> Renderer<R> {
    /// Creates a renderer with a custom tool runner.
    pub fn with_runner(config: RenderConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Cache directory for an optional explicit root.
    pub fn resolve_root(&self, explicit: Option<&Path>) -> PathBuf {
        resolve_root(explicit, self.config.resolved_cache_dir().as_deref())
    }

    /// Renders `equation` in the format named by `format` and returns the
    /// path of the cached file.
    ///
    /// An unknown format tag fails before touching the filesystem.
    pub fn render(
        &self,
        equation: &str,
        format: &str,
        options: &RenderOptions,
    ) -> Result<PathBuf, PipelineError> {
        let format: Format = format.parse()?;
        self.render_as(equation, format, options)
    }

    /// Renders `equation` as `format` and returns the path of the cached file.
    pub fn render_as(
        &self,
        equation: &str,
        format: Format,
        options: &RenderOptions,
    ) -> Result<PathBuf, PipelineError> {
        let root = CacheRoot::ensure(self.resolve_root(options.root.as_deref()))?;
        let key = CacheKey::new(equation);
        let family = ArtifactFamily::new(root.path(), &key, format);
        let streams = ToolStreams::from_surface(options.surface_tool_errors);
        let invalidate = options.invalidate;

        debug!(key = %key, format = %format, invalidate, "Rendering equation");

        if invalidate || !family.document().is_file() {
            self.write_document(equation, &family)?;
        } else {
            debug!("Document is fresh: {}", family.document().display());
        }

        if invalidate || !family.intermediate().is_file() {
            self.compile(root.path(), &family, streams)?;
        } else {
            debug!("Intermediate is fresh: {}", family.intermediate().display());
        }

        if family.output_is_intermediate() {
            return Ok(family.intermediate().to_path_buf());
        }

        if invalidate || !family.output().is_file() {
            self.convert(&family, streams)?;
        } else {
            debug!("Output is fresh: {}", family.output().display());
        }

        Ok(family.output().to_path_buf())
    }

    /// Removes the cache directory (`root`, or the configured default).
    pub fn clear(&self, root: Option<&Path>) -> Result<ClearOutcome, CacheError> {
        texeq_cache::clear(&self.resolve_root(root))
    }

    fn write_document(&self, equation: &str, family: &ArtifactFamily) -> Result<(), PipelineError> {
        remove_if_exists(family.intermediate())?;

        let document = family.document();
        fs::write(document, document_source(equation))
            .map_err(|e| PipelineError::io(document, e))?;
        debug!("Wrote document {}", document.display());
        Ok(())
    }

    fn compile(
        &self,
        root: &Path,
        family: &ArtifactFamily,
        streams: ToolStreams,
    ) -> Result<(), PipelineError> {
        for output in family.derived_outputs() {
            remove_if_exists(&output)?;
        }

        let invocation = ToolInvocation::typeset(
            &self.config.tools,
            family.document(),
            root,
            family.intermediate(),
        );
        self.invoke(&invocation, streams);

        if !family.intermediate().is_file() {
            return Err(PipelineError::CompilationFailed {
                document: family.document().to_path_buf(),
            });
        }

        for byproduct in family.byproducts() {
            match fs::remove_file(&byproduct) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove {}: {}", byproduct.display(), e),
            }
        }

        Ok(())
    }

    fn convert(&self, family: &ArtifactFamily, streams: ToolStreams) -> Result<(), PipelineError> {
        let tools = &self.config.tools;
        let invocation = match family.format() {
            Format::Svg => {
                ToolInvocation::vectorize(tools, family.intermediate(), family.output())
            }
            Format::Png => {
                ToolInvocation::rasterize(tools, family.intermediate(), family.output())
            }
            Format::Pdf => return Ok(()),
        };
        self.invoke(&invocation, streams);

        if !family.output().is_file() {
            return Err(PipelineError::ConversionFailed {
                intermediate: family.intermediate().to_path_buf(),
                output: family.output().to_path_buf(),
            });
        }

        Ok(())
    }

    /// Runs a tool. The outcome is only logged: callers check the output file.
    fn invoke(&self, invocation: &ToolInvocation, streams: ToolStreams) {
        info!("Running {}", invocation.command_line());
        match self.runner.run(invocation, streams) {
            Ok(exit) if exit.success() => {}
            Ok(exit) => warn!(
                "{} exited with status {}",
                invocation.program,
                exit.code
                    .map_or_else(|| "signal".to_string(), |c| c.to_string())
            ),
            Err(e) => warn!("Failed to run {}: {}", invocation.program, e),
        }
    }
}

fn remove_if_exists(path: &Path) -> Result<(), PipelineError> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed stale {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PipelineError::io(path, e)),
    }
}
