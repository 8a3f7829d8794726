//! Zip archives of built artifacts.
//!
//! Each archive holds exactly one entry, the binary itself at the archive
//! root, so unpacking it anywhere leaves a runnable file in that directory.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};

/// Unix permissions of the archived binary.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Pack the file at `artifact` into a new zip archive at `dest`.
///
/// The entry is named after the artifact's base file name.
pub fn write_zip_archive(artifact: &Path, dest: &Path) -> Result<()> {
    let entry_name = artifact
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            Error::artifact_unreadable(
                artifact,
                io::Error::new(io::ErrorKind::InvalidInput, "artifact path has no file name"),
            )
        })?;

    let input = File::open(artifact).map_err(|e| Error::artifact_unreadable(artifact, e))?;
    let mut input = BufReader::new(input);

    let output = File::create(dest).map_err(|e| Error::archive_write(dest, e))?;
    let mut zip = ZipWriter::new(output);

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(EXECUTABLE_MODE);

    zip.start_file(entry_name, options)
        .map_err(|e| Error::archive_write(dest, e))?;
    io::copy(&mut input, &mut zip).map_err(|e| Error::archive_write(dest, e))?;
    zip.finish().map_err(|e| Error::archive_write(dest, e))?;

    Ok(())
}
