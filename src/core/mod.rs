//! Core data structures for a release run.
//!
//! - [`ArtifactSpec`]: one binary to build for an OS/architecture pair
//! - [`RunConfig`]: directories, post-build switches and the artifact list

pub mod artifact;
pub mod config;

pub use artifact::ArtifactSpec;
pub use config::{ConfigFormat, ConfigWarning, RunConfig, ToolchainConfig, DEFAULT_CONFIG_FILE};
