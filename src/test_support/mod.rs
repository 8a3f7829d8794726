//! Test utilities for unit tests.
//!
//! [`FakeCompiler`] stands in for the external toolchain so pipeline tests
//! run without spawning processes.
//!
//! # Example
//!
//! ```rust,ignore
//! use cross_release::test_support::{run_config, FakeCompiler};
//!
//! #[test]
//! fn test_example() {
//!     let tmp = TempDir::new().unwrap();
//!     let config = run_config(tmp.path(), &["tool-linux-amd64"]);
//!     let compiler = FakeCompiler::new().fail_on("tool-linux-amd64");
//!     // Run a Pipeline with them...
//! }
//! ```

pub mod fixtures;

use std::cell::RefCell;
use std::path::Path;

use crate::builder::compiler::Compiler;
use crate::core::artifact::ArtifactSpec;
use crate::error::{Error, Result};

pub use fixtures::*;

/// Compiler double that writes a small deterministic "binary" per artifact.
#[derive(Debug, Default)]
pub struct FakeCompiler {
    fail_on: Option<String>,
    write_output: bool,
    missing: bool,
    calls: RefCell<Vec<String>>,
}

impl FakeCompiler {
    pub fn new() -> Self {
        FakeCompiler {
            write_output: true,
            ..FakeCompiler::default()
        }
    }

    /// Fail the build of the artifact with this name.
    pub fn fail_on(mut self, name: &str) -> Self {
        self.fail_on = Some(name.to_string());
        self
    }

    /// Succeed without writing anything.
    pub fn without_output(mut self) -> Self {
        self.write_output = false;
        self
    }

    /// Fail preflight as if the toolchain were not installed.
    pub fn missing(mut self) -> Self {
        self.missing = true;
        self
    }

    /// Names of the artifacts compile was called for, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Bytes written for an artifact.
    pub fn binary_contents(artifact: &ArtifactSpec) -> Vec<u8> {
        format!(
            "fake binary {} for {}/{} native={} flags={:?}\n",
            artifact.name, artifact.os, artifact.arch, artifact.native_interop, artifact.flags
        )
        .into_bytes()
    }
}

impl Compiler for FakeCompiler {
    fn preflight(&self) -> Result<()> {
        if self.missing {
            return Err(Error::CompilerNotFound {
                program: "fake-go".to_string(),
                source: which::Error::CannotFindBinaryPath,
            });
        }
        Ok(())
    }

    fn compile(&self, artifact: &ArtifactSpec, _src_dir: &Path, output: &Path) -> Result<()> {
        self.calls.borrow_mut().push(artifact.name.clone());

        if self.fail_on.as_deref() == Some(artifact.name.as_str()) {
            return Err(Error::BuildFailed {
                artifact: artifact.name.clone(),
                command: format!("fake-go build -o {}", output.display()),
                code: Some(1),
                stderr: "fake compile error".to_string(),
            });
        }

        if self.write_output {
            std::fs::write(output, Self::binary_contents(artifact)).map_err(|source| {
                Error::BuildSpawn {
                    artifact: artifact.name.clone(),
                    command: "fake-go".to_string(),
                    source,
                }
            })?;
        }

        Ok(())
    }
}
