//! Process exit statuses.
//!
//! Calling scripts branch on these values, so they are part of the CLI's
//! interface and must not be renumbered.

use std::process::ExitCode;

use cross_release::util::ChecksumKind;
use cross_release::{Error, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Unknown = 1,
    ConfigFileNotFound = 2,
    ConfigRead = 3,
    SrcDirNotFound = 4,
    OutDirNotFound = 5,
    ConfigInit = 6,
    ArtifactOpen = 7,
    Build = 8,
    Md5File = 9,
    Sha1File = 10,
    Sha256File = 11,
    Sha512File = 12,
    ZipFile = 13,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Exit status for a failed command.
    ///
    /// Errors that did not come from the library map to [`ExitStatus::Unknown`].
    pub fn from_error(err: &anyhow::Error) -> Self {
        err.downcast_ref::<Error>()
            .map(|e| ExitStatus::from(e.kind()))
            .unwrap_or(ExitStatus::Unknown)
    }
}

impl From<ErrorKind> for ExitStatus {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::ConfigNotFound => ExitStatus::ConfigFileNotFound,
            ErrorKind::ConfigRead => ExitStatus::ConfigRead,
            ErrorKind::SrcDirNotFound => ExitStatus::SrcDirNotFound,
            ErrorKind::OutDirNotFound => ExitStatus::OutDirNotFound,
            ErrorKind::ConfigInit => ExitStatus::ConfigInit,
            ErrorKind::ArtifactOpen => ExitStatus::ArtifactOpen,
            ErrorKind::Build => ExitStatus::Build,
            ErrorKind::Checksum(ChecksumKind::Md5) => ExitStatus::Md5File,
            ErrorKind::Checksum(ChecksumKind::Sha1) => ExitStatus::Sha1File,
            ErrorKind::Checksum(ChecksumKind::Sha256) => ExitStatus::Sha256File,
            ErrorKind::Checksum(ChecksumKind::Sha512) => ExitStatus::Sha512File,
            ErrorKind::Archive => ExitStatus::ZipFile,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
