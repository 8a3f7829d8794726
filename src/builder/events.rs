//! Pipeline event types.
//!
//! A run reports its progress as a stream of [`PipelineEvent`]s handed to a
//! [`Reporter`](crate::builder::Reporter). With `--message-format=json` each
//! event is written as a single JSON object per line.
//!
//! # Event Types
//!
//! - `run-started`: directories checked, compiler found, building begins
//! - `step-finished`: a build, checksum or archive step produced a file
//! - `step-failed`: a step failed; the run stops after this event
//! - `artifact-finished`: every step of one artifact succeeded
//! - `run-finished`: the run ended (success or failure)

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::util::hash::ChecksumKind;

/// One step of an artifact's pass through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Build,
    Checksum(ChecksumKind),
    Archive,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Build => "build",
            Step::Checksum(kind) => kind.as_str(),
            Step::Archive => "zip",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Step {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// An event emitted while a run progresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason")]
pub enum PipelineEvent {
    #[serde(rename = "run-started")]
    RunStarted {
        /// Number of artifacts to build
        artifacts: usize,
        src_dir: PathBuf,
        out_dir: PathBuf,
    },

    #[serde(rename = "step-finished")]
    StepFinished {
        artifact: String,
        step: Step,
        /// File produced by the step
        output: PathBuf,
        duration_ms: u64,
    },

    #[serde(rename = "step-failed")]
    StepFailed {
        artifact: String,
        step: Step,
        /// Human-readable cause
        message: String,
        duration_ms: u64,
    },

    #[serde(rename = "artifact-finished")]
    ArtifactFinished {
        artifact: String,
        /// 1-based position in the artifact list
        index: usize,
        total: usize,
    },

    #[serde(rename = "run-finished")]
    RunFinished {
        success: bool,
        duration_ms: u64,
        artifacts_built: usize,
    },
}

impl PipelineEvent {
    pub fn started(artifacts: usize, src_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        PipelineEvent::RunStarted {
            artifacts,
            src_dir: src_dir.into(),
            out_dir: out_dir.into(),
        }
    }

    pub fn step_finished(
        artifact: impl Into<String>,
        step: Step,
        output: impl Into<PathBuf>,
        elapsed: Duration,
    ) -> Self {
        PipelineEvent::StepFinished {
            artifact: artifact.into(),
            step,
            output: output.into(),
            duration_ms: millis(elapsed),
        }
    }

    pub fn step_failed(
        artifact: impl Into<String>,
        step: Step,
        message: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        PipelineEvent::StepFailed {
            artifact: artifact.into(),
            step,
            message: message.into(),
            duration_ms: millis(elapsed),
        }
    }

    pub fn artifact_finished(artifact: impl Into<String>, index: usize, total: usize) -> Self {
        PipelineEvent::ArtifactFinished {
            artifact: artifact.into(),
            index,
            total,
        }
    }

    pub fn finished(success: bool, elapsed: Duration, artifacts_built: usize) -> Self {
        PipelineEvent::RunFinished {
            success,
            duration_ms: millis(elapsed),
            artifacts_built,
        }
    }

    /// Serialize this event to a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
