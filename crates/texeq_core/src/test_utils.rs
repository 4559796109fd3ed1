use std::cell::RefCell;
use std::fs;
use std::io;

use crate::{ToolExit, ToolInvocation, ToolRunner, ToolStage, ToolStreams};

/// How the fake tool behaves for a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeBehavior {
    /// Writes the expected output (and byproducts for typesetting).
    Succeed,
    /// Exits 0 without producing anything.
    ProduceNothing,
    /// Fails to start, like a missing executable.
    NotInstalled,
}

/// Tool runner that fabricates output files and records every invocation.
pub struct FakeRunner {
    typeset: FakeBehavior,
    convert: FakeBehavior,
    calls: RefCell<Vec<ToolInvocation>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            typeset: FakeBehavior::Succeed,
            convert: FakeBehavior::Succeed,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_typeset(mut self, behavior: FakeBehavior) -> Self {
        self.typeset = behavior;
        self
    }

    pub fn with_convert(mut self, behavior: FakeBehavior) -> Self {
        self.convert = behavior;
        self
    }

    /// Stages run so far, in order.
    pub fn stages(&self) -> Vec<ToolStage> {
        self.calls.borrow().iter().map(|c| c.stage).collect()
    }

    pub fn calls(&self) -> Vec<ToolInvocation> {
        self.calls.borrow().clone()
    }

    pub fn reset(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl ToolRunner for FakeRunner {
    fn run(&self, invocation: &ToolInvocation, _streams: ToolStreams) -> io::Result<ToolExit> {
        self.calls.borrow_mut().push(invocation.clone());

        let behavior = match invocation.stage {
            ToolStage::Typeset => self.typeset,
            ToolStage::Vectorize | ToolStage::Rasterize => self.convert,
        };

        match behavior {
            FakeBehavior::NotInstalled => {
                return Err(io::Error::new(io::ErrorKind::NotFound, "not installed"));
            }
            FakeBehavior::ProduceNothing => {}
            FakeBehavior::Succeed => {
                fs::write(&invocation.output, format!("{:?}", invocation.stage))?;
                if invocation.stage == ToolStage::Typeset {
                    for ext in ["aux", "log"] {
                        let _ = fs::write(invocation.output.with_extension(ext), "byproduct");
                    }
                }
            }
        }

        Ok(ToolExit { code: Some(0) })
    }
}
