//! Codec error types.

use thiserror::Error;

/// Errors raised by the byte-level codecs.
///
/// Every variant is field-local from the point of view of the extract
/// decoder: a failed field never invalidates the surrounding record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// A nibble in a digit position was outside 0-9.
    #[error("invalid digit nibble 0x{nibble:X} in byte 0x{byte:02X}")]
    InvalidDigitNibble {
        /// The offending nibble value (0xA-0xF).
        nibble: u8,
        /// The byte the nibble was extracted from.
        byte: u8,
    },

    /// The sign nibble of a packed field was not 0xC, 0xD, or 0xF.
    #[error("invalid sign nibble 0x{0:X}")]
    InvalidSignNibble(u8),

    /// An empty slice where at least one byte is required.
    #[error("empty {0} field")]
    EmptyField(&'static str),

    /// Fewer bytes than the declared field width.
    #[error("{kind} field truncated: expected {expected} bytes, got {got}")]
    TruncatedField {
        /// Field kind ("binary integer" or "packed decimal").
        kind: &'static str,
        /// Declared field width in bytes.
        expected: usize,
        /// Bytes actually present.
        got: usize,
    },

    /// The field is wider than the 128-bit decode ceiling.
    #[error("{kind} field of {len} bytes exceeds the {max}-byte limit")]
    FieldTooWide {
        /// Field kind ("binary integer" or "packed decimal").
        kind: &'static str,
        /// Declared field width in bytes.
        len: usize,
        /// Widest supported field in bytes.
        max: usize,
    },

    /// The value does not fit the requested field width (encode side).
    #[error("value {value} does not fit in {len} bytes of {kind}")]
    ValueTooLarge {
        /// The value that was being encoded.
        value: String,
        /// Target field width in bytes.
        len: usize,
        /// Field kind ("binary integer" or "packed decimal").
        kind: &'static str,
    },

    /// A character has no representation in the target code page.
    #[error("character '{ch}' (U+{codepoint:04X}) cannot be encoded in {page}")]
    Unencodable {
        /// The character that failed to encode.
        ch: char,
        /// Its Unicode code point.
        codepoint: u32,
        /// Name of the code page.
        page: &'static str,
    },
}
