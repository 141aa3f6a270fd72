//! Schema-driven decoder for fixed-width EBCDIC mainframe extract files.
//!
//! A legacy platform dumps tables as fixed-width binary extracts: every
//! record is the same width, and each field within it is fixed-width
//! text in code page 500, a big-endian unsigned binary integer (COMP),
//! or a packed decimal with sign nibble (COMP-3). This crate decodes
//! those files into typed records against a caller-supplied schema.
//!
//! # Components
//!
//! - [`schema`] — validated record layouts ([`Schema`], [`FieldSpec`])
//! - [`decode`] — the field decoder with an explicit failure policy
//! - [`scanner`] — lazy record scanning over a data file
//! - [`header`] — companion header file with the declared record count
//! - [`integrity`] — checksums and record-count reconciliation
//!
//! # Example
//!
//! ```rust
//! use mfextract::decode::{FailurePolicy, FieldDecoder};
//! use mfextract::record::FieldValue;
//! use mfextract::schema::{FieldSpec, FieldType, Schema};
//! use mfextract_encoding::ebcdic::CP500;
//!
//! let schema = Schema::new(vec![
//!     FieldSpec::new("ID", FieldType::Comp, 4),
//!     FieldSpec::new("NAME", FieldType::Char, 8),
//! ])
//! .unwrap();
//!
//! // One 12-byte record image: binary 1,000,000 then EBCDIC "TESTDATA".
//! let bytes = [
//!     0x00, 0x0F, 0x42, 0x40, 0xE3, 0xC5, 0xE2, 0xE3, 0xC4, 0xC1, 0xE3, 0xC1,
//! ];
//!
//! let decoder = FieldDecoder::new(&CP500, FailurePolicy::Null);
//! let record = decoder.decode_record(&schema, &bytes, 0);
//! assert_eq!(record.get("ID"), Some(&FieldValue::Binary(1_000_000)));
//! assert_eq!(record.get("NAME"), Some(&FieldValue::Text("TESTDATA".into())));
//! ```
//!
//! File-based scanning goes through [`scanner::RecordScanner`] (lazy)
//! or [`scanner::scan_file`] (eager); both close the file on every exit
//! path. Field-level decode failures never abort a scan — they decode
//! to the policy default and are counted.

pub mod decode;
pub mod error;
pub mod header;
pub mod integrity;
pub mod record;
pub mod scanner;
pub mod schema;

pub use decode::{FailurePolicy, FieldDecoder};
pub use error::{ExtractError, ExtractResult};
pub use header::{header_declared_count, header_path_for};
pub use integrity::{file_sha256, physical_record_count, reconcile_counts, CountCheck};
pub use record::{DecodedRecord, FieldValue};
pub use scanner::{scan_file, RecordScanner, ScanOptions, TrailingPolicy};
pub use schema::{FieldSpec, FieldType, Schema, SchemaError};
