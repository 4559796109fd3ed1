//! External tool invocation.
//!
//! Tools are run as blocking subprocesses. Their exit status is reported for
//! logging only; the pipeline decides success by checking that the expected
//! output file exists afterwards.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::trace;

use crate::ToolchainConfig;

/// Pipeline stage a tool runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolStage {
    /// Document to intermediate PDF.
    Typeset,
    /// PDF to SVG.
    Vectorize,
    /// PDF to PNG.
    Rasterize,
}

/// What happens to a tool's stdout and stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolStreams {
    /// Captured and discarded (traced at `trace` level).
    #[default]
    Captured,
    /// Passed through to the caller's stdout and stderr.
    Inherited,
}

impl ToolStreams {
    pub fn from_surface(surface_tool_errors: bool) -> Self {
        if surface_tool_errors {
            Self::Inherited
        } else {
            Self::Captured
        }
    }
}

/// How a tool process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolExit {
    /// Exit code, `None` if terminated by a signal.
    pub code: Option<i32>,
}

impl ToolExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// A fully resolved command line plus the file it is expected to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub stage: ToolStage,
    pub program: String,
    pub args: Vec<OsString>,
    pub output: PathBuf,
}

impl ToolInvocation {
    /// `<latex> -interaction nonstopmode -output-directory=<dir> <document>`
    pub fn typeset(
        tools: &ToolchainConfig,
        document: &Path,
        output_dir: &Path,
        output: &Path,
    ) -> Self {
        let mut output_dir_arg = OsString::from("-output-directory=");
        output_dir_arg.push(output_dir);

        Self {
            stage: ToolStage::Typeset,
            program: tools.latex.clone(),
            args: vec![
                "-interaction".into(),
                "nonstopmode".into(),
                output_dir_arg,
                document.into(),
            ],
            output: output.to_path_buf(),
        }
    }

    /// `<svg_converter> <input> <output>`
    pub fn vectorize(tools: &ToolchainConfig, input: &Path, output: &Path) -> Self {
        Self {
            stage: ToolStage::Vectorize,
            program: tools.svg_converter.clone(),
            args: vec![input.into(), output.into()],
            output: output.to_path_buf(),
        }
    }

    /// `<png_converter> -density <dpi> <input> -quality <q> <output>`
    pub fn rasterize(tools: &ToolchainConfig, input: &Path, output: &Path) -> Self {
        Self {
            stage: ToolStage::Rasterize,
            program: tools.png_converter.clone(),
            args: vec![
                "-density".into(),
                tools.png_density.to_string().into(),
                input.into(),
                "-quality".into(),
                tools.png_quality.to_string().into(),
                output.into(),
            ],
            output: output.to_path_buf(),
        }
    }

    /// Space-joined command line, for log messages.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs external tools.
pub trait ToolRunner {
    /// Runs the invocation to completion.
    ///
    /// `Err` means the process could not be started or waited on.
    fn run(&self, invocation: &ToolInvocation, streams: ToolStreams) -> io::Result<ToolExit>;
}

/// Runs tools as child processes with [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &ToolInvocation, streams: ToolStreams) -> io::Result<ToolExit> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).stdin(Stdio::null());

        match streams {
            ToolStreams::Inherited => {
                let status = command.status()?;
                Ok(ToolExit {
                    code: status.code(),
                })
            }
            ToolStreams::Captured => {
                let output = command.output()?;
                trace!(
                    program = %invocation.program,
                    stdout = %String::from_utf8_lossy(&output.stdout),
                    stderr = %String::from_utf8_lossy(&output.stderr),
                    "Captured tool output"
                );
                Ok(ToolExit {
                    code: output.status.code(),
                })
            }
        }
    }
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    fn run(&self, invocation: &ToolInvocation, streams: ToolStreams) -> io::Result<ToolExit> {
        (**self).run(invocation, streams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_typeset_command_line() {
        let tools = ToolchainConfig::default();
        let invocation = ToolInvocation::typeset(
            &tools,
            Path::new("cache/785e32.tex"),
            Path::new("cache"),
            Path::new("cache/785e32.pdf"),
        );

        assert_eq!(invocation.stage, ToolStage::Typeset);
        assert_eq!(
            invocation.command_line(),
            "pdflatex -interaction nonstopmode -output-directory=cache cache/785e32.tex"
        );
        assert_eq!(invocation.output, PathBuf::from("cache/785e32.pdf"));
    }

    #[test]
    fn test_vectorize_command_line() {
        let tools = ToolchainConfig::default();
        let invocation = ToolInvocation::vectorize(
            &tools,
            Path::new("cache/785e32.pdf"),
            Path::new("cache/785e32.svg"),
        );

        assert_eq!(
            invocation.command_line(),
            "pdf2svg cache/785e32.pdf cache/785e32.svg"
        );
    }

    #[test]
    fn test_rasterize_uses_configured_quality() {
        let tools = ToolchainConfig {
            png_density: 600,
            png_quality: 75,
            ..ToolchainConfig::default()
        };
        let invocation = ToolInvocation::rasterize(
            &tools,
            Path::new("cache/785e32.pdf"),
            Path::new("cache/785e32.png"),
        );

        assert_eq!(
            invocation.command_line(),
            "convert -density 600 cache/785e32.pdf -quality 75 cache/785e32.png"
        );
    }

    #[test]
    fn test_streams_from_surface_flag() {
        assert_eq!(ToolStreams::from_surface(false), ToolStreams::Captured);
        assert_eq!(ToolStreams::from_surface(true), ToolStreams::Inherited);
    }

    #[test]
    fn test_process_runner_missing_program() {
        let invocation = ToolInvocation {
            stage: ToolStage::Typeset,
            program: "texeq-definitely-not-installed".to_string(),
            args: vec![],
            output: PathBuf::from("unused.pdf"),
        };

        let result = ProcessRunner.run(&invocation, ToolStreams::Captured);

        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_process_runner_reports_exit_code() {
        let invocation = ToolInvocation {
            stage: ToolStage::Vectorize,
            program: "sh".to_string(),
            args: vec!["-c".into(), "echo noise; exit 3".into()],
            output: PathBuf::from("unused.svg"),
        };

        let exit = ProcessRunner
            .run(&invocation, ToolStreams::Captured)
            .unwrap();

        assert_eq!(exit.code, Some(3));
        assert!(!exit.success());
    }
}
