//! External compiler invocation.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::artifact::ArtifactSpec;
use crate::core::config::ToolchainConfig;
use crate::error::{Error, Result};
use crate::util::fs::{absolute_path, remove_file_if_exists};
use crate::util::process::{find_executable, ProcessBuilder};

/// Produces one binary per artifact.
pub trait Compiler {
    /// Check that the compiler can be run at all, before any artifact is built.
    fn preflight(&self) -> Result<()> {
        Ok(())
    }

    /// Build `artifact` from `src_dir` into `output`, blocking until done.
    fn compile(&self, artifact: &ArtifactSpec, src_dir: &Path, output: &Path) -> Result<()>;
}

/// Compiler driven through a child process, configured by [`ToolchainConfig`].
#[derive(Debug, Clone)]
pub struct ExternalCompiler {
    toolchain: ToolchainConfig,
}

impl ExternalCompiler {
    pub fn new(toolchain: ToolchainConfig) -> Self {
        ExternalCompiler { toolchain }
    }

    /// Program to spawn.
    ///
    /// A program given with a directory part is taken relative to the
    /// current directory, not to `src_dir` where the compiler runs. A bare
    /// name is left for `PATH` lookup.
    pub fn program(&self) -> io::Result<PathBuf> {
        let program = Path::new(&self.toolchain.program);
        if program.components().count() > 1 {
            absolute_path(program)
        } else {
            Ok(program.to_path_buf())
        }
    }

    /// Assemble the command that builds `artifact`.
    ///
    /// `output` is made absolute because the compiler runs inside `src_dir`.
    pub fn command(
        &self,
        artifact: &ArtifactSpec,
        src_dir: &Path,
        output: &Path,
    ) -> Result<ProcessBuilder> {
        let spawn_error = |source: io::Error| Error::BuildSpawn {
            artifact: artifact.name.clone(),
            command: self.toolchain.program.clone(),
            source,
        };
        let program = self.program().map_err(spawn_error)?;
        let output = absolute_path(output).map_err(spawn_error)?;

        let mut cmd = ProcessBuilder::new(program)
            .args(&self.toolchain.build_args)
            .arg(&output)
            .args(&artifact.flags)
            .env(&self.toolchain.os_env, &artifact.os)
            .env(&self.toolchain.arch_env, &artifact.arch)
            .cwd(src_dir);

        if artifact.native_interop {
            cmd = cmd.env(&self.toolchain.native_interop_env, "1");
        }

        Ok(cmd)
    }
}

impl Default for ExternalCompiler {
    fn default() -> Self {
        ExternalCompiler::new(ToolchainConfig::default())
    }
}

impl Compiler for ExternalCompiler {
    fn preflight(&self) -> Result<()> {
        let not_found = |source: which::Error| Error::CompilerNotFound {
            program: self.toolchain.program.clone(),
            source,
        };
        let program = self
            .program()
            .map_err(|_| not_found(which::Error::CannotCanonicalize))?;
        let path = find_executable(&program).map_err(not_found)?;
        debug!(compiler = %path.display(), "found compiler");
        Ok(())
    }

    fn compile(&self, artifact: &ArtifactSpec, src_dir: &Path, output: &Path) -> Result<()> {
        let cmd = self.command(artifact, src_dir, output)?;
        let command = cmd.display_command();

        // Debug level only: a progress bar is drawn exactly when debug output is off.
        debug!(
            artifact = %artifact.name,
            os = %artifact.os,
            arch = %artifact.arch,
            native_interop = artifact.native_interop,
            cmd = %command,
            "executing"
        );

        let process_output = cmd.exec().map_err(|source| Error::BuildSpawn {
            artifact: artifact.name.clone(),
            command: command.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&process_output.stdout);
        if !stdout.trim().is_empty() {
            debug!(artifact = %artifact.name, "compiler stdout:\n{}", stdout.trim_end());
        }

        if !process_output.status.success() {
            // A failed build may leave a truncated binary behind.
            if let Err(e) = remove_file_if_exists(output) {
                debug!(path = %output.display(), error = %e, "could not remove partial output");
            }
            return Err(Error::BuildFailed {
                artifact: artifact.name.clone(),
                command,
                code: process_output.status.code(),
                stderr: String::from_utf8_lossy(&process_output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}
