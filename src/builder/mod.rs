//! Compiler driver and build reporting.
//!
//! This module spawns the external compiler for each artifact and defines the
//! events a run emits while it works.

pub mod compiler;
pub mod events;
pub mod report;

pub use compiler::{Compiler, ExternalCompiler};
pub use events::{PipelineEvent, Step};
pub use report::{JsonReporter, ProgressReporter, Reporter, TracingReporter};
