//! Shared utilities

pub mod fs;
pub mod hash;
pub mod process;

pub use hash::ChecksumKind;
pub use process::ProcessBuilder;
