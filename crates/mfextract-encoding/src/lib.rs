//! EBCDIC and COBOL numeric codecs for mainframe extract files.
//!
//! This crate provides the byte-level conversions the extract decoder is
//! built on. It performs no I/O; every function is a pure conversion
//! over a byte slice.
//!
//! # Features
//!
//! - **EBCDIC Conversion**: IBM code page 500 as a static table
//! - **Packed Decimal**: COMP-3 BCD decoding with sign nibble
//! - **Binary Integer**: COMP big-endian unsigned decoding
//!
//! # Example
//!
//! ```rust
//! use mfextract_encoding::decimal::{decode_comp, unpack_comp3, Sign};
//! use mfextract_encoding::ebcdic::CP500;
//!
//! // EBCDIC conversion
//! let ebcdic = CP500.encode("HELLO").unwrap();
//! assert_eq!(CP500.decode(&ebcdic), "HELLO");
//!
//! // Binary integer
//! assert_eq!(decode_comp(&[0x00, 0x0F, 0x42, 0x40]).unwrap(), 1_000_000);
//!
//! // Packed decimal
//! let (value, sign) = unpack_comp3(&[0x12, 0x34, 0x5D]).unwrap();
//! assert_eq!(value, -12345);
//! assert_eq!(sign, Sign::Negative);
//! ```

pub mod decimal;
pub mod ebcdic;
pub mod error;

pub use decimal::{
    decode_comp, encode_comp, pack_comp3, unpack_comp3, Sign, MAX_COMP3_DIGITS, MAX_COMP_BYTES,
};
pub use ebcdic::{CodePage, CP500};
pub use error::EncodingError;

/// Result type for encoding operations.
pub type Result<T> = std::result::Result<T, EncodingError>;
