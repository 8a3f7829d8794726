//! Error types for a release run.
//!
//! Every failure is terminal for the run. [`Error::kind`] gives the category
//! that the CLI maps to a process exit status.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::util::hash::ChecksumKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigNotFound,
    ConfigRead,
    SrcDirNotFound,
    OutDirNotFound,
    ConfigInit,
    ArtifactOpen,
    Build,
    Checksum(ChecksumKind),
    Archive,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("config file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("failed to read config file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("source directory does not exist: {}", path.display())]
    SrcDirNotFound { path: PathBuf },

    #[error("output directory does not exist: {}", path.display())]
    OutDirNotFound { path: PathBuf },

    #[error("config file already exists: {} (use --force to overwrite)", path.display())]
    ConfigExists { path: PathBuf },

    #[error("failed to serialize config: {message}")]
    ConfigSerialize { message: String },

    #[error("failed to write config file {}", path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("compiler `{program}` not found")]
    CompilerNotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to spawn `{command}` for `{artifact}`")]
    BuildSpawn {
        artifact: String,
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("building `{artifact}` failed: `{command}` exited with {}{}", exit_code_display(*code), stderr_suffix(stderr))]
    BuildFailed {
        artifact: String,
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to read artifact {}", path.display())]
    ArtifactUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {kind} checksum file {}", path.display())]
    ChecksumWriteFailed {
        kind: ChecksumKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write zip archive {}", path.display())]
    ArchiveWriteFailed {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ConfigNotFound { .. } => ErrorKind::ConfigNotFound,
            Error::ConfigRead { .. } | Error::ConfigParse { .. } => ErrorKind::ConfigRead,
            Error::SrcDirNotFound { .. } => ErrorKind::SrcDirNotFound,
            Error::OutDirNotFound { .. } => ErrorKind::OutDirNotFound,
            Error::ConfigExists { .. }
            | Error::ConfigSerialize { .. }
            | Error::ConfigWrite { .. } => ErrorKind::ConfigInit,
            Error::CompilerNotFound { .. }
            | Error::BuildSpawn { .. }
            | Error::BuildFailed { .. } => ErrorKind::Build,
            Error::ArtifactUnreadable { .. } => ErrorKind::ArtifactOpen,
            Error::ChecksumWriteFailed { kind, .. } => ErrorKind::Checksum(*kind),
            Error::ArchiveWriteFailed { .. } => ErrorKind::Archive,
        }
    }

    pub(crate) fn artifact_unreadable(path: &Path, source: io::Error) -> Self {
        Error::ArtifactUnreadable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn archive_write(path: &Path, source: impl Into<zip::result::ZipError>) -> Self {
        Error::ArchiveWriteFailed {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}

fn exit_code_display(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}
