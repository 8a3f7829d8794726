//! The release pipeline.
//!
//! Artifacts are processed one after another in configuration order. Each
//! artifact runs its steps in a fixed order:
//!
//! ```text
//! build -> [md5] -> [sha1] -> [sha256] -> [sha512] -> [zip]
//! ```
//!
//! Bracketed steps run only when enabled in the [`RunConfig`]. The first
//! failing step ends the run; outputs of earlier artifacts stay on disk.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::builder::compiler::Compiler;
use crate::builder::events::{PipelineEvent, Step};
use crate::builder::report::Reporter;
use crate::core::artifact::ArtifactSpec;
use crate::core::config::RunConfig;
use crate::error::Result;
use crate::ops::archive::write_zip_archive;
use crate::ops::checksum::write_checksum_file;
use crate::util::hash::ChecksumKind;

/// Files produced for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltArtifact {
    pub name: String,
    pub binary: PathBuf,
    pub checksums: Vec<(ChecksumKind, PathBuf)>,
    pub archive: Option<PathBuf>,
}

impl BuiltArtifact {
    fn new(name: &str, binary: PathBuf) -> Self {
        BuiltArtifact {
            name: name.to_string(),
            binary,
            checksums: Vec::new(),
            archive: None,
        }
    }

    fn record(&mut self, step: Step, output: PathBuf) {
        match step {
            Step::Build => self.binary = output,
            Step::Checksum(kind) => self.checksums.push((kind, output)),
            Step::Archive => self.archive = Some(output),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub artifacts: Vec<BuiltArtifact>,
    pub duration: Duration,
}

/// Drives the compiler and post-build steps over a [`RunConfig`].
pub struct Pipeline<'a> {
    config: &'a RunConfig,
    compiler: &'a dyn Compiler,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a RunConfig, compiler: &'a dyn Compiler) -> Self {
        Pipeline { config, compiler }
    }

    /// Steps every artifact goes through, in execution order.
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = vec![Step::Build];
        steps.extend(self.config.checksums().into_iter().map(Step::Checksum));
        if self.config.zip_file {
            steps.push(Step::Archive);
        }
        steps
    }

    /// Run every artifact through its steps, stopping at the first failure.
    ///
    /// Directories and the compiler are checked before anything is built, so
    /// a misconfigured run leaves the output directory untouched.
    pub fn run(&self, reporter: &mut dyn Reporter) -> Result<RunSummary> {
        let start = Instant::now();

        self.config.validate_dirs()?;
        if !self.config.artifacts.is_empty() {
            self.compiler.preflight()?;
        }

        let total = self.config.artifacts.len();
        reporter.report(&PipelineEvent::started(
            total,
            &self.config.src_dir,
            &self.config.out_dir,
        ));

        let steps = self.steps();
        let mut built = Vec::with_capacity(total);

        for (index, artifact) in self.config.artifacts.iter().enumerate() {
            match self.run_artifact(artifact, &steps, reporter) {
                Ok(outputs) => {
                    built.push(outputs);
                    reporter.report(&PipelineEvent::artifact_finished(
                        &artifact.name,
                        index + 1,
                        total,
                    ));
                }
                Err(err) => {
                    reporter.report(&PipelineEvent::finished(false, start.elapsed(), built.len()));
                    return Err(err);
                }
            }
        }

        let duration = start.elapsed();
        reporter.report(&PipelineEvent::finished(true, duration, built.len()));

        Ok(RunSummary {
            artifacts: built,
            duration,
        })
    }

    fn run_artifact(
        &self,
        artifact: &ArtifactSpec,
        steps: &[Step],
        reporter: &mut dyn Reporter,
    ) -> Result<BuiltArtifact> {
        let binary = artifact.binary_path(&self.config.out_dir);
        let mut outputs = BuiltArtifact::new(&artifact.name, binary.clone());

        for &step in steps {
            let started = Instant::now();
            match self.run_step(step, artifact, &binary) {
                Ok(output) => {
                    reporter.report(&PipelineEvent::step_finished(
                        &artifact.name,
                        step,
                        &output,
                        started.elapsed(),
                    ));
                    outputs.record(step, output);
                }
                Err(err) => {
                    reporter.report(&PipelineEvent::step_failed(
                        &artifact.name,
                        step,
                        err.to_string(),
                        started.elapsed(),
                    ));
                    return Err(err);
                }
            }
        }

        Ok(outputs)
    }

    fn run_step(&self, step: Step, artifact: &ArtifactSpec, binary: &Path) -> Result<PathBuf> {
        let out_dir = &self.config.out_dir;
        match step {
            Step::Build => {
                self.compiler
                    .compile(artifact, &self.config.src_dir, binary)?;
                Ok(binary.to_path_buf())
            }
            Step::Checksum(kind) => {
                let dest = artifact.checksum_path(out_dir, kind);
                write_checksum_file(kind, binary, &artifact.name, &dest)?;
                Ok(dest)
            }
            Step::Archive => {
                let dest = artifact.archive_path(out_dir);
                write_zip_archive(binary, &dest)?;
                Ok(dest)
            }
        }
    }
}
