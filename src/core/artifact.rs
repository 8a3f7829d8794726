//! Artifact descriptor - one named build target.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::util::hash::ChecksumKind;

/// A binary to build for one operating system and architecture.
///
/// The name doubles as the output file name inside the output directory and
/// as the name recorded in checksum files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    /// Output file name, e.g. `tool-linux-amd64`
    pub name: String,

    /// Target operating system, passed through to the compiler
    pub os: String,

    /// Target architecture, passed through to the compiler
    pub arch: String,

    /// Enable linkage against native code (cgo for the Go toolchain)
    #[serde(
        rename = "cgoEnabled",
        alias = "nativeInterop",
        default,
        skip_serializing_if = "is_false"
    )]
    pub native_interop: bool,

    /// Extra compiler flags, appended after the standard build arguments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ArtifactSpec {
    pub fn new(name: impl Into<String>, os: impl Into<String>, arch: impl Into<String>) -> Self {
        ArtifactSpec {
            name: name.into(),
            os: os.into(),
            arch: arch.into(),
            native_interop: false,
            flags: Vec::new(),
        }
    }

    pub fn with_native_interop(mut self, enabled: bool) -> Self {
        self.native_interop = enabled;
        self
    }

    pub fn with_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags = flags.into_iter().map(Into::into).collect();
        self
    }

    /// Path of the built binary.
    pub fn binary_path(&self, out_dir: &Path) -> PathBuf {
        out_dir.join(&self.name)
    }

    /// Path of the checksum record for `kind`, e.g. `tool.sha256.txt`.
    pub fn checksum_path(&self, out_dir: &Path, kind: ChecksumKind) -> PathBuf {
        out_dir.join(format!("{}.{}.txt", self.name, kind))
    }

    /// Path of the zip archive, e.g. `tool.zip`.
    pub fn archive_path(&self, out_dir: &Path) -> PathBuf {
        out_dir.join(format!("{}.zip", self.name))
    }
}
