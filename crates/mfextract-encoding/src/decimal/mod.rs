//! Numeric codecs for the two binary field formats in extract files.
//!
//! - **Packed Decimal (COMP-3)**: BCD digits packed two per byte, sign in
//!   the final low nibble.
//! - **Binary Integer (COMP)**: big-endian unsigned integer of any width
//!   up to 16 bytes.
//!
//! Both decoders are pure functions over their input slice; there is no
//! shared state and no configuration beyond the arguments.

mod binary;
mod packed;

pub use binary::{decode_comp, encode_comp, MAX_COMP_BYTES};
pub use packed::{pack_comp3, unpack_comp3, MAX_COMP3_DIGITS};

use crate::error::EncodingError;

/// Result type for numeric codec operations.
pub type Result<T> = std::result::Result<T, EncodingError>;

/// Sign indicator carried in the last nibble of a packed decimal field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive value (sign nibble 0xC).
    Positive,
    /// Negative value (sign nibble 0xD).
    Negative,
    /// Unsigned value (sign nibble 0xF, treated as positive).
    Unsigned,
}

impl Sign {
    /// The nibble written when encoding this sign.
    pub fn to_nibble(self) -> u8 {
        match self {
            Sign::Positive => 0x0C,
            Sign::Negative => 0x0D,
            Sign::Unsigned => 0x0F,
        }
    }

    /// Parse a sign nibble.
    ///
    /// Only 0xC, 0xD, and 0xF are accepted; the source platform never
    /// emits the alternate sign codes, so anything else is corrupt data.
    pub fn from_nibble(nibble: u8) -> Result<Self> {
        match nibble & 0x0F {
            0x0C => Ok(Sign::Positive),
            0x0D => Ok(Sign::Negative),
            0x0F => Ok(Sign::Unsigned),
            other => Err(EncodingError::InvalidSignNibble(other)),
        }
    }

    /// Apply this sign to an unsigned magnitude.
    pub fn apply(self, magnitude: i128) -> i128 {
        match self {
            Sign::Negative => -magnitude,
            Sign::Positive | Sign::Unsigned => magnitude,
        }
    }
}
