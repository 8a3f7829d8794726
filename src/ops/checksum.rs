//! Checksum record files.
//!
//! A record is one line, `<lowercase hex digest> <artifact name>\n`, the layout
//! `md5sum`/`sha256sum` print. The name is the artifact's declared name rather
//! than its path, so the record stays valid next to the downloaded file.

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::util::hash::{digest_file, ChecksumKind};

/// A digest bound to an artifact name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumRecord {
    pub kind: ChecksumKind,
    pub digest: String,
    pub name: String,
}

impl ChecksumRecord {
    /// Digest the file at `artifact` and bind the result to `name`.
    pub fn compute(kind: ChecksumKind, artifact: &Path, name: &str) -> Result<Self> {
        let digest =
            digest_file(kind, artifact).map_err(|e| Error::artifact_unreadable(artifact, e))?;
        Ok(ChecksumRecord {
            kind,
            digest,
            name: name.to_string(),
        })
    }

    /// The record as written to disk, including the trailing newline.
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }
}

impl fmt::Display for ChecksumRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.digest, self.name)
    }
}

/// Write the checksum record of `artifact` to `dest`, replacing any existing file.
pub fn write_checksum_file(
    kind: ChecksumKind,
    artifact: &Path,
    name: &str,
    dest: &Path,
) -> Result<ChecksumRecord> {
    let record = ChecksumRecord::compute(kind, artifact, name)?;

    std::fs::write(dest, record.to_line()).map_err(|source| Error::ChecksumWriteFailed {
        kind,
        path: dest.to_path_buf(),
        source,
    })?;

    Ok(record)
}
