//! File-level integrity checks for extract batches.
//!
//! Operational counterparts to the decoder: a streaming checksum of the
//! raw file, the physical record count implied by the file size, and the
//! reconciliation of the header-declared count against what a scan
//! actually produced.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::warn;

use crate::error::{ExtractError, ExtractResult};
use crate::schema::Schema;

/// Chunk size for streaming reads.
const CHUNK_SIZE: usize = 8192;

/// SHA-256 of a file, read in [`CHUNK_SIZE`] chunks, as lowercase hex.
///
/// # Errors
/// [`ExtractError::Io`] with the file path when the file cannot be read.
pub fn file_sha256(path: impl AsRef<Path>) -> ExtractResult<String> {
    let path = path.as_ref();
    let io_err = |source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_err)?;
    let mut hasher = Sha256::new();
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut chunk).map_err(io_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&chunk[..n]);
    }

    let digest = hasher.finalize();
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}

/// Number of whole records the file can hold: `floor(size / width)`.
///
/// Matches what a scan under the default trailing policy produces,
/// without reading the file body.
///
/// # Errors
/// [`ExtractError::Io`] when the file's metadata cannot be read.
pub fn physical_record_count(path: impl AsRef<Path>, schema: &Schema) -> ExtractResult<u64> {
    let path = path.as_ref();
    let size = std::fs::metadata(path)
        .map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    Ok(size / schema.record_width() as u64)
}

/// Outcome of comparing the header-declared count with a scan result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountCheck {
    /// Header and scan agree.
    Match {
        /// The agreed count.
        count: u64,
    },
    /// Header and scan disagree.
    Mismatch {
        /// Count the header declared.
        declared: u64,
        /// Count the scan produced.
        scanned: u64,
    },
    /// No header file was present; nothing to compare against.
    HeaderUnavailable,
}

/// Compare the declared record count against the scanned one.
///
/// A mismatch is reported, not raised: whether it is fatal is a batch
/// policy decision that belongs to the caller.
pub fn reconcile_counts(declared: Option<u64>, scanned: u64) -> CountCheck {
    match declared {
        None => CountCheck::HeaderUnavailable,
        Some(declared) if declared == scanned => CountCheck::Match { count: scanned },
        Some(declared) => {
            warn!(
                "record count mismatch: header declares {}, scan produced {}",
                declared, scanned
            );
            CountCheck::Mismatch { declared, scanned }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    use crate::schema::{FieldSpec, FieldType};

    fn write_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_sha256_known_digest() {
        let file = write_file(b"hello world");
        assert_eq!(
            file_sha256(file.path()).unwrap(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_sha256_empty_file() {
        let file = write_file(b"");
        assert_eq!(
            file_sha256(file.path()).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_missing_file() {
        let err = file_sha256("/nonexistent/extract.DAT").unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }

    #[test]
    fn test_physical_record_count_floors() {
        let schema = Schema::new(vec![FieldSpec::new("F", FieldType::Char, 10)]).unwrap();
        let file = write_file(&[0x40; 25]);
        assert_eq!(physical_record_count(file.path(), &schema).unwrap(), 2);
    }

    #[test]
    fn test_reconcile_match() {
        assert_eq!(
            reconcile_counts(Some(3), 3),
            CountCheck::Match { count: 3 }
        );
    }

    #[test]
    fn test_reconcile_mismatch() {
        assert_eq!(
            reconcile_counts(Some(5), 3),
            CountCheck::Mismatch {
                declared: 5,
                scanned: 3
            }
        );
    }

    #[test]
    fn test_reconcile_without_header() {
        assert_eq!(reconcile_counts(None, 3), CountCheck::HeaderUnavailable);
    }
}
