//! EBCDIC text conversion for extract files.
//!
//! Extract files and their companion header files carry text in IBM code
//! page 500. The conversion is a static 256-entry table in both
//! directions; see [`tables`] for the data.

mod tables;

pub use tables::{CodePage, CP500};

use crate::error::EncodingError;

/// Result type for code page operations.
pub type Result<T> = std::result::Result<T, EncodingError>;

impl CodePage {
    /// Decode EBCDIC bytes to a UTF-8 string.
    ///
    /// Every byte has a mapping (the page covers all 256 code points), so
    /// decoding cannot fail. Control bytes come out as their Unicode C0/C1
    /// counterparts.
    pub fn decode(&self, bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|&b| char::from(self.ebcdic_to_latin1[b as usize]))
            .collect()
    }

    /// Encode a UTF-8 string to EBCDIC bytes.
    ///
    /// # Errors
    /// Returns [`EncodingError::Unencodable`] for any character outside
    /// the Latin-1 range, which this page cannot represent.
    pub fn encode(&self, s: &str) -> Result<Vec<u8>> {
        let mut result = Vec::with_capacity(s.len());
        for ch in s.chars() {
            if ch as u32 > 255 {
                return Err(EncodingError::Unencodable {
                    ch,
                    codepoint: ch as u32,
                    page: self.name,
                });
            }
            result.push(self.latin1_to_ebcdic[ch as usize]);
        }
        Ok(result)
    }

    /// Convert a single EBCDIC byte to its Unicode character.
    #[inline]
    pub fn to_char(&self, ebcdic: u8) -> char {
        char::from(self.ebcdic_to_latin1[ebcdic as usize])
    }

    /// Convert a single EBCDIC byte to Latin-1.
    #[inline]
    pub fn to_latin1_byte(&self, ebcdic: u8) -> u8 {
        self.ebcdic_to_latin1[ebcdic as usize]
    }

    /// Convert a single Latin-1 byte to EBCDIC.
    #[inline]
    pub fn from_latin1_byte(&self, latin1: u8) -> u8 {
        self.latin1_to_ebcdic[latin1 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_text() {
        let original = "HELLO WORLD";
        let encoded = CP500.encode(original).unwrap();
        let decoded = CP500.decode(&encoded);
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_roundtrip_all_bytes() {
        // CP500 is a Latin-1 bijection: encode(decode(b)) == b for all b.
        for b in 0u8..=255 {
            let decoded = CP500.decode(&[b]);
            let re_encoded = CP500.encode(&decoded).unwrap();
            assert_eq!(
                re_encoded,
                vec![b],
                "roundtrip failed for byte 0x{:02X} -> '{}'",
                b,
                decoded
            );
        }
    }

    #[test]
    fn test_testdata_bytes() {
        let encoded = CP500.encode("TESTDATA").unwrap();
        assert_eq!(
            encoded,
            vec![0xE3, 0xC5, 0xE2, 0xE3, 0xC4, 0xC1, 0xE3, 0xC1]
        );
        assert_eq!(CP500.decode(&encoded), "TESTDATA");
    }

    #[test]
    fn test_digits() {
        let encoded = CP500.encode("0123456789").unwrap();
        assert_eq!(
            encoded,
            vec![0xF0, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8, 0xF9]
        );
    }

    #[test]
    fn test_space_is_0x40() {
        assert_eq!(CP500.encode(" ").unwrap(), vec![0x40]);
        assert_eq!(CP500.to_char(0x40), ' ');
    }

    #[test]
    fn test_cp500_signature_positions() {
        // The bracket and bang positions distinguish CP500 from CP037.
        assert_eq!(CP500.to_char(0x4A), '[');
        assert_eq!(CP500.to_char(0x5A), ']');
        assert_eq!(CP500.to_char(0x4F), '!');
        assert_eq!(CP500.to_char(0x5F), '^');
        assert_eq!(CP500.to_char(0xBA), '¬');
        assert_eq!(CP500.to_char(0xBB), '|');
    }

    #[test]
    fn test_letters() {
        assert_eq!(CP500.to_char(0xC1), 'A');
        assert_eq!(CP500.to_char(0xC9), 'I');
        assert_eq!(CP500.to_char(0xD1), 'J');
        assert_eq!(CP500.to_char(0xE2), 'S');
        assert_eq!(CP500.to_char(0x81), 'a');
        assert_eq!(CP500.to_char(0xA9), 'z');
    }

    #[test]
    fn test_ccsid() {
        assert_eq!(CP500.ccsid, 500);
        assert_eq!(CP500.name, "CP500");
    }

    #[test]
    fn test_encode_unsupported_char() {
        let err = CP500.encode("€").unwrap_err();
        assert!(matches!(err, EncodingError::Unencodable { .. }));
    }

    #[test]
    fn test_decode_newline() {
        // Header lines end in an ASCII line feed; EBCDIC LF is 0x25.
        assert_eq!(CP500.decode(&[0x25]), "\n");
        assert_eq!(CP500.encode("\n").unwrap(), vec![0x25]);
    }
}
