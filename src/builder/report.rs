//! Sinks for pipeline events.

use std::io::Write;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

use crate::builder::events::{PipelineEvent, Step};

/// Receives every event of a run, in order.
pub trait Reporter {
    fn report(&mut self, event: &PipelineEvent);
}

/// Collects events, mostly useful in tests.
impl Reporter for Vec<PipelineEvent> {
    fn report(&mut self, event: &PipelineEvent) {
        self.push(event.clone());
    }
}

/// Turns events into log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, event: &PipelineEvent) {
        match event {
            PipelineEvent::RunStarted {
                artifacts,
                src_dir,
                out_dir,
            } => info!(
                artifacts,
                src_dir = %src_dir.display(),
                out_dir = %out_dir.display(),
                "building binaries"
            ),
            PipelineEvent::StepFinished {
                artifact,
                step: Step::Build,
                duration_ms,
                ..
            } => info!(
                binary = %artifact,
                duration = ?Duration::from_millis(*duration_ms),
                "built"
            ),
            PipelineEvent::StepFinished { step, output, .. } => {
                info!(file = %output.display(), "created {}", step)
            }
            PipelineEvent::StepFailed {
                artifact,
                step,
                message,
                ..
            } => error!(artifact = %artifact, error = %message, "{} step failed", step),
            PipelineEvent::ArtifactFinished { .. } => {}
            PipelineEvent::RunFinished {
                success: true,
                duration_ms,
                artifacts_built,
            } => info!(
                artifacts_built,
                duration = ?Duration::from_millis(*duration_ms),
                "operation complete"
            ),
            PipelineEvent::RunFinished {
                success: false,
                duration_ms,
                artifacts_built,
            } => warn!(
                artifacts_built,
                duration = ?Duration::from_millis(*duration_ms),
                "operation aborted"
            ),
        }
    }
}

/// Writes one JSON object per event.
#[derive(Debug)]
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        JsonReporter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, event: &PipelineEvent) {
        if let Err(e) = writeln!(self.out, "{}", event.to_json()).and_then(|_| self.out.flush()) {
            warn!(error = %e, "failed to write build event");
        }
    }
}

/// Progress bar over artifacts, with log lines printed above it.
pub struct ProgressReporter {
    bar: ProgressBar,
    inner: TracingReporter,
}

impl ProgressReporter {
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
        bar.set_style(style);

        ProgressReporter {
            bar,
            inner: TracingReporter,
        }
    }
}

impl Reporter for ProgressReporter {
    fn report(&mut self, event: &PipelineEvent) {
        let inner = &mut self.inner;
        self.bar.suspend(|| inner.report(event));

        match event {
            PipelineEvent::StepFinished { artifact, step, .. } => {
                self.bar.set_message(format!("{} ({})", artifact, step));
            }
            PipelineEvent::ArtifactFinished { .. } => self.bar.inc(1),
            PipelineEvent::RunFinished { .. } => self.bar.finish_and_clear(),
            _ => {}
        }
    }
}
