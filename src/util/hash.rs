//! Hashing utilities for checksum records.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

/// Digest algorithm used for a checksum record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumKind {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl ChecksumKind {
    /// All algorithms, in the order a run emits them.
    pub const ALL: [ChecksumKind; 4] = [
        ChecksumKind::Md5,
        ChecksumKind::Sha1,
        ChecksumKind::Sha256,
        ChecksumKind::Sha512,
    ];

    /// Lowercase name, also used in checksum file names.
    pub fn as_str(self) -> &'static str {
        match self {
            ChecksumKind::Md5 => "md5",
            ChecksumKind::Sha1 => "sha1",
            ChecksumKind::Sha256 => "sha256",
            ChecksumKind::Sha512 => "sha512",
        }
    }

    /// Compute the lowercase hex digest of everything `reader` yields.
    pub fn digest_reader(self, reader: impl Read) -> io::Result<String> {
        match self {
            ChecksumKind::Md5 => digest_with::<Md5>(reader),
            ChecksumKind::Sha1 => digest_with::<Sha1>(reader),
            ChecksumKind::Sha256 => digest_with::<Sha256>(reader),
            ChecksumKind::Sha512 => digest_with::<Sha512>(reader),
        }
    }
}

impl fmt::Display for ChecksumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the digest of a file.
pub fn digest_file(kind: ChecksumKind, path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    kind.digest_reader(BufReader::new(file))
}

fn digest_with<D: Digest>(mut reader: impl Read) -> io::Result<String> {
    let mut hasher = D::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_known_digests() {
        assert_eq!(
            ChecksumKind::Md5.digest_reader(&b"hello"[..]).unwrap(),
            "5d41402abc4b2a76b9719d911017c592"
        );
        assert_eq!(
            ChecksumKind::Sha1.digest_reader(&b"hello"[..]).unwrap(),
            "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
        );
        assert_eq!(
            ChecksumKind::Sha256.digest_reader(&b"hello"[..]).unwrap(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(
            ChecksumKind::Sha512.digest_reader(&b"hello"[..]).unwrap(),
            "9b71d224bd62f3785d96d46ad3ea3d73319bfbc2890caadae2dff72519673ca7\
             2323c3d99ba5c11d7c7acc6e14b8c5da0c4663475c2e5c3adef46f73bcdec043"
        );
    }

    #[test]
    fn test_digest_file_matches_reader() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tool");
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &data).unwrap();

        for kind in ChecksumKind::ALL {
            let from_file = digest_file(kind, &path).unwrap();
            assert_eq!(from_file, kind.digest_reader(&data[..]).unwrap());
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            ChecksumKind::Md5.digest_reader(&b""[..]).unwrap(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(
            ChecksumKind::Sha256.digest_reader(&b""[..]).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_digest_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = digest_file(ChecksumKind::Sha1, &tmp.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

}
