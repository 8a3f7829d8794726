//! cross-release - config-driven cross compilation of release binaries.
//!
//! A run loads a [`RunConfig`], then for every configured [`ArtifactSpec`] it
//! invokes an external compiler, optionally writes checksum records, and
//! optionally packs the binary into a zip archive. Execution is sequential and
//! stops at the first failing step.

pub mod builder;
pub mod core;
pub mod error;
pub mod ops;
pub mod util;

/// Test utilities: a scripted compiler and config fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{artifact::ArtifactSpec, config::RunConfig};
pub use error::{Error, ErrorKind, Result};
pub use ops::pipeline::{Pipeline, RunSummary};
