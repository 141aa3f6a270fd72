//! Companion header file reading.
//!
//! The source system writes an optional companion file next to each
//! extract declaring the record count it believes it wrote. The naming
//! rule is fixed: `X.DAT` has header `X_hdr.DAT` (the `_hdr` suffix goes
//! before the extension). The first line of the header, decoded with the
//! same code page as the data, holds whitespace-delimited tokens; the
//! second token is the declared count.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use mfextract_encoding::ebcdic::{CodePage, CP500};
use tracing::info;

use crate::error::{ExtractError, ExtractResult};

/// Companion header path for a data file.
///
/// The recognized extension is stripped, `_hdr` appended, and the same
/// extension restored; an extensionless file simply gains `_hdr`.
pub fn header_path_for(data_path: &Path) -> PathBuf {
    let stem = data_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let name = match data_path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_hdr.{ext}"),
        None => format!("{stem}_hdr"),
    };
    data_path.with_file_name(name)
}

/// Read the record count the source system declared for a data file.
///
/// Returns `Ok(None)` when no header file exists — a legitimate
/// operating condition, not an error. Uses the default code page.
///
/// # Errors
/// - [`ExtractError::Io`] when the header exists but cannot be read.
/// - [`ExtractError::HeaderParse`] when the first line has no second
///   token or the token is not an integer. Callers rely on this count
///   for validation, so a malformed header is surfaced, never defaulted.
pub fn header_declared_count(data_path: impl AsRef<Path>) -> ExtractResult<Option<u64>> {
    header_declared_count_with_code_page(data_path, &CP500)
}

/// [`header_declared_count`] with an explicit code page.
pub fn header_declared_count_with_code_page(
    data_path: impl AsRef<Path>,
    code_page: &CodePage,
) -> ExtractResult<Option<u64>> {
    let header_path = header_path_for(data_path.as_ref());
    if !header_path.exists() {
        info!("no header file at '{}'", header_path.display());
        return Ok(None);
    }

    let file = File::open(&header_path).map_err(|source| ExtractError::Io {
        path: header_path.clone(),
        source,
    })?;
    let mut line = Vec::new();
    BufReader::new(file)
        .read_until(b'\n', &mut line)
        .map_err(|source| ExtractError::Io {
            path: header_path.clone(),
            source,
        })?;

    let text = code_page.decode(&line);
    let Some(token) = text.split_whitespace().nth(1) else {
        return Err(ExtractError::HeaderParse {
            path: header_path,
            reason: "missing record-count token".to_string(),
        });
    };
    let count = token.parse::<u64>().map_err(|_| ExtractError::HeaderParse {
        path: header_path.clone(),
        reason: format!("record-count token '{token}' is not an integer"),
    })?;
    Ok(Some(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::TempDir;

    /// Write an EBCDIC header file next to `data_name` and return the
    /// data file's path.
    fn setup(dir: &TempDir, data_name: &str, header_name: &str, line: &str) -> PathBuf {
        let header_path = dir.path().join(header_name);
        let mut file = File::create(&header_path).unwrap();
        file.write_all(&CP500.encode(line).unwrap()).unwrap();
        dir.path().join(data_name)
    }

    #[test]
    fn test_header_path_naming() {
        assert_eq!(
            header_path_for(Path::new("/data/X.DAT")),
            Path::new("/data/X_hdr.DAT")
        );
        assert_eq!(
            header_path_for(Path::new("EXTRACT.dat")),
            Path::new("EXTRACT_hdr.dat")
        );
        assert_eq!(header_path_for(Path::new("plain")), Path::new("plain_hdr"));
    }

    #[test]
    fn test_missing_header_is_none() {
        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("X.DAT");
        assert_eq!(header_declared_count(&data_path).unwrap(), None);
    }

    #[test]
    fn test_declared_count_parsed() {
        let dir = TempDir::new().unwrap();
        let data_path = setup(&dir, "X.DAT", "X_hdr.DAT", "EXTRACT 00012345\n");
        assert_eq!(header_declared_count(&data_path).unwrap(), Some(12345));
    }

    #[test]
    fn test_header_without_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let data_path = setup(&dir, "X.DAT", "X_hdr.DAT", "EXTRACT 42");
        assert_eq!(header_declared_count(&data_path).unwrap(), Some(42));
    }

    #[test]
    fn test_missing_second_token_is_fatal() {
        let dir = TempDir::new().unwrap();
        let data_path = setup(&dir, "X.DAT", "X_hdr.DAT", "EXTRACT\n");
        let err = header_declared_count(&data_path).unwrap_err();
        assert!(matches!(err, ExtractError::HeaderParse { .. }));
    }

    #[test]
    fn test_non_numeric_token_is_fatal() {
        let dir = TempDir::new().unwrap();
        let data_path = setup(&dir, "X.DAT", "X_hdr.DAT", "EXTRACT COUNT\n");
        let err = header_declared_count(&data_path).unwrap_err();
        match err {
            ExtractError::HeaderParse { reason, .. } => {
                assert!(reason.contains("COUNT"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_tokens_after_count_ignored() {
        let dir = TempDir::new().unwrap();
        let data_path = setup(&dir, "X.DAT", "X_hdr.DAT", "EXTRACT 3 20260131 FULL\n");
        assert_eq!(header_declared_count(&data_path).unwrap(), Some(3));
    }
}
