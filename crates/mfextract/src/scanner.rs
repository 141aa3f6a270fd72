//! Sequential record scanning over a fixed-width data file.
//!
//! The scanner reads the file in chunks of exactly one record width and
//! hands each chunk to the field decoder. It is a lazy, finite,
//! non-restartable iterator: each read depends on the offset the
//! previous one left, so scanning is strictly sequential. The file
//! handle is owned by the iterator and closed when it is dropped, on
//! every exit path.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

use mfextract_encoding::ebcdic::{CodePage, CP500};
use tracing::{debug, warn};

use crate::decode::{FailurePolicy, FieldDecoder};
use crate::error::{ExtractError, ExtractResult};
use crate::record::DecodedRecord;
use crate::schema::Schema;

/// What to do with a nonzero trailing chunk shorter than one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingPolicy {
    /// Discard the partial chunk and end the scan normally. This is the
    /// legacy behavior: the source system pads files with trailing slack
    /// bytes and readers are expected to tolerate them.
    #[default]
    Drop,
    /// Surface the partial chunk as [`ExtractError::TruncatedRecord`],
    /// for callers that would rather catch a truncated transfer than
    /// silently lose data.
    Strict,
}

/// Scan configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// What failed fields decode to.
    pub policy: FailurePolicy,
    /// How a short trailing chunk is handled.
    pub trailing: TrailingPolicy,
}

/// Lazy iterator of decoded records from one data file.
///
/// Yields `Ok(DecodedRecord)` per full record; a read error or (in
/// strict mode) a truncated tail yields one `Err` and then the iterator
/// is exhausted.
#[derive(Debug)]
pub struct RecordScanner<'a> {
    schema: &'a Schema,
    decoder: FieldDecoder,
    trailing: TrailingPolicy,
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
    offset: u64,
    index: u64,
    failures: u64,
    done: bool,
}

impl<'a> RecordScanner<'a> {
    /// Open a data file for scanning with the default code page.
    ///
    /// # Errors
    /// [`ExtractError::Io`] when the file cannot be opened. The schema
    /// is already validated by construction.
    pub fn open(
        path: impl AsRef<Path>,
        schema: &'a Schema,
        options: ScanOptions,
    ) -> ExtractResult<Self> {
        Self::open_with_code_page(path, schema, options, &CP500)
    }

    /// Open a data file for scanning with an explicit code page.
    pub fn open_with_code_page(
        path: impl AsRef<Path>,
        schema: &'a Schema,
        options: ScanOptions,
        code_page: &'static CodePage,
    ) -> ExtractResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| ExtractError::Io {
            path: path.clone(),
            source,
        })?;
        let width = schema.record_width();
        debug!(
            "scanning '{}' with {} fields, record width {}",
            path.display(),
            schema.len(),
            width
        );
        Ok(Self {
            schema,
            decoder: FieldDecoder::new(code_page, options.policy),
            trailing: options.trailing,
            path,
            reader: BufReader::new(file),
            buf: vec![0u8; width],
            offset: 0,
            index: 0,
            failures: 0,
            done: false,
        })
    }

    /// Records decoded so far.
    pub fn records_read(&self) -> u64 {
        self.index
    }

    /// Field decode failures accumulated so far.
    pub fn failure_count(&self) -> u64 {
        self.failures
    }

    /// Fill the record buffer, retrying short reads until the buffer is
    /// full or EOF. Returns the number of bytes obtained.
    fn read_chunk(&mut self) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < self.buf.len() {
            match self.reader.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl Iterator for RecordScanner<'_> {
    type Item = ExtractResult<DecodedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let width = self.buf.len();
        let got = match self.read_chunk() {
            Ok(n) => n,
            Err(source) => {
                self.done = true;
                return Some(Err(ExtractError::Io {
                    path: self.path.clone(),
                    source,
                }));
            }
        };

        if got == 0 {
            // Clean end of file.
            self.done = true;
            debug!(
                "'{}': {} records, {} field failures",
                self.path.display(),
                self.index,
                self.failures
            );
            return None;
        }

        if got < width {
            self.done = true;
            return match self.trailing {
                TrailingPolicy::Drop => {
                    warn!(
                        "'{}': dropping {} trailing bytes (less than one {}-byte record)",
                        self.path.display(),
                        got,
                        width
                    );
                    None
                }
                TrailingPolicy::Strict => Some(Err(ExtractError::TruncatedRecord {
                    path: self.path.clone(),
                    offset: self.offset,
                    expected: width,
                    got,
                })),
            };
        }

        let record = self.decoder.decode_record(self.schema, &self.buf, self.index);
        self.failures += record.failure_count() as u64;
        self.offset += width as u64;
        self.index += 1;
        Some(Ok(record))
    }
}

/// Scan a whole file eagerly into an ordered batch of records.
///
/// # Errors
/// Propagates the first file-level error; field-level failures do not
/// error and are visible per record via
/// [`DecodedRecord::failure_count`].
pub fn scan_file(
    path: impl AsRef<Path>,
    schema: &Schema,
    options: ScanOptions,
) -> ExtractResult<Vec<DecodedRecord>> {
    RecordScanner::open(path, schema, options)?.collect()
}
