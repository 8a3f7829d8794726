//! High-level operations.
//!
//! The per-artifact steps (checksum records, zip archives) and the pipeline
//! that drives them.

pub mod archive;
pub mod checksum;
pub mod pipeline;

pub use archive::{write_zip_archive, EXECUTABLE_MODE};
pub use checksum::{write_checksum_file, ChecksumRecord};
pub use pipeline::{BuiltArtifact, Pipeline, RunSummary};
