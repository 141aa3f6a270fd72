//! Field decoding with an explicit failure policy.
//!
//! The legacy platform ran two parallel copies of this logic differing
//! only in what a failed field decoded to (a null marker in one, a zero
//! default in the other). Here there is one decoder, parameterized by
//! [`FailurePolicy`] at construction. The decode context is immutable
//! and carries everything a decode needs — the code page and the policy
//! — so decoding is deterministic and safe to run from multiple threads
//! over disjoint byte ranges.

use std::collections::HashMap;

use mfextract_encoding::decimal::{decode_comp, unpack_comp3};
use mfextract_encoding::ebcdic::CodePage;
use mfextract_encoding::EncodingError;
use tracing::{trace, warn};

use crate::record::{DecodedRecord, FieldValue};
use crate::schema::{FieldSpec, FieldType, Schema};

/// What a failed field decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Failed fields become [`FieldValue::Null`].
    #[default]
    Null,
    /// Failed fields become the type's zero default: `Binary(0)`,
    /// `Packed(0)`, or empty text.
    Zero,
}

/// Decodes raw field bytes into typed values.
///
/// Stateless apart from its immutable configuration; every decode is a
/// pure function of the input slice.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecoder {
    code_page: &'static CodePage,
    policy: FailurePolicy,
}

impl FieldDecoder {
    /// Create a decoder for the given code page and failure policy.
    pub fn new(code_page: &'static CodePage, policy: FailurePolicy) -> Self {
        Self { code_page, policy }
    }

    /// The configured failure policy.
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Decode one field, applying the failure policy on error.
    ///
    /// Failures are field-local: the caller always receives a value and
    /// may continue with the rest of the record.
    pub fn decode_field(&self, spec: &FieldSpec, bytes: &[u8]) -> FieldValue {
        match self.try_decode(spec, bytes) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "decoding {:?} field '{}' failed: {}",
                    spec.field_type, spec.name, err
                );
                self.fallback(spec.field_type)
            }
        }
    }

    /// Decode a full record image into a [`DecodedRecord`].
    ///
    /// `bytes` must be exactly one record wide; the slice is partitioned
    /// into consecutive per-field sub-slices in schema order.
    pub fn decode_record(&self, schema: &Schema, bytes: &[u8], index: u64) -> DecodedRecord {
        debug_assert_eq!(bytes.len(), schema.record_width());

        let mut fields = HashMap::with_capacity(schema.len());
        let mut failures = 0;
        let mut offset = 0;

        for spec in schema.fields() {
            let start = offset.min(bytes.len());
            let end = (offset + spec.length).min(bytes.len());
            let slice = &bytes[start..end];
            trace!(
                "field '{}' occupies bytes {}..{}",
                spec.name,
                offset,
                offset + spec.length
            );
            offset += spec.length;

            let value = match self.try_decode(spec, slice) {
                Ok(value) => value,
                Err(err) => {
                    failures += 1;
                    warn!(
                        "record {}: decoding {:?} field '{}' failed: {}",
                        index, spec.field_type, spec.name, err
                    );
                    self.fallback(spec.field_type)
                }
            };
            fields.insert(spec.name.clone(), value);
        }

        DecodedRecord::new(index, fields, failures)
    }

    fn try_decode(&self, spec: &FieldSpec, bytes: &[u8]) -> Result<FieldValue, EncodingError> {
        match spec.field_type {
            FieldType::Char => {
                // A short slice can only come from a truncated tail;
                // substitute a blank field of the declared width rather
                // than decode partial text.
                if bytes.len() < spec.length {
                    return Ok(FieldValue::Text(" ".repeat(spec.length)));
                }
                let text = self.code_page.decode(bytes);
                Ok(FieldValue::Text(text.trim_end_matches(' ').to_string()))
            }
            FieldType::Comp => {
                if bytes.len() < spec.length {
                    return Err(EncodingError::TruncatedField {
                        kind: "binary integer",
                        expected: spec.length,
                        got: bytes.len(),
                    });
                }
                decode_comp(bytes).map(FieldValue::Binary)
            }
            FieldType::Comp3 => {
                if bytes.len() < spec.length {
                    return Err(EncodingError::TruncatedField {
                        kind: "packed decimal",
                        expected: spec.length,
                        got: bytes.len(),
                    });
                }
                unpack_comp3(bytes).map(|(value, _sign)| FieldValue::Packed(value))
            }
        }
    }

    fn fallback(&self, field_type: FieldType) -> FieldValue {
        match self.policy {
            FailurePolicy::Null => FieldValue::Null,
            FailurePolicy::Zero => match field_type {
                FieldType::Char => FieldValue::Text(String::new()),
                FieldType::Comp => FieldValue::Binary(0),
                FieldType::Comp3 => FieldValue::Packed(0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mfextract_encoding::ebcdic::CP500;
    use crate::schema::Schema;

    fn decoder(policy: FailurePolicy) -> FieldDecoder {
        FieldDecoder::new(&CP500, policy)
    }

    fn id_name_schema() -> Schema {
        Schema::new(vec![
            FieldSpec::new("ID", FieldType::Comp, 4),
            FieldSpec::new("NAME", FieldType::Char, 8),
        ])
        .unwrap()
    }

    #[test]
    fn test_end_to_end_record() {
        // 00 0F 42 40 is 1,000,000; the next 8 bytes are "TESTDATA".
        let mut bytes = vec![0x00, 0x0F, 0x42, 0x40];
        bytes.extend(CP500.encode("TESTDATA").unwrap());

        let record = decoder(FailurePolicy::Null).decode_record(&id_name_schema(), &bytes, 0);
        assert_eq!(record.get("ID"), Some(&FieldValue::Binary(1_000_000)));
        assert_eq!(
            record.get("NAME"),
            Some(&FieldValue::Text("TESTDATA".to_string()))
        );
        assert_eq!(record.failure_count(), 0);
    }

    #[test]
    fn test_text_trailing_spaces_stripped() {
        let spec = FieldSpec::new("NAME", FieldType::Char, 8);
        let bytes = CP500.encode("AB      ").unwrap();
        let value = decoder(FailurePolicy::Null).decode_field(&spec, &bytes);
        assert_eq!(value, FieldValue::Text("AB".to_string()));
    }

    #[test]
    fn test_text_interior_spaces_kept() {
        let spec = FieldSpec::new("NAME", FieldType::Char, 8);
        let bytes = CP500.encode("A B    C").unwrap();
        let value = decoder(FailurePolicy::Null).decode_field(&spec, &bytes);
        assert_eq!(value, FieldValue::Text("A B    C".to_string()));
    }

    #[test]
    fn test_short_text_slice_yields_blanks() {
        let spec = FieldSpec::new("NAME", FieldType::Char, 8);
        let value = decoder(FailurePolicy::Null).decode_field(&spec, &[0xC1, 0xC2]);
        assert_eq!(value, FieldValue::Text(" ".repeat(8)));
    }

    #[test]
    fn test_bad_nibble_null_policy() {
        let spec = FieldSpec::new("AMT", FieldType::Comp3, 3);
        let value = decoder(FailurePolicy::Null).decode_field(&spec, &[0xAB, 0x12, 0x3C]);
        assert_eq!(value, FieldValue::Null);
    }

    #[test]
    fn test_bad_nibble_zero_policy() {
        let spec = FieldSpec::new("AMT", FieldType::Comp3, 3);
        let value = decoder(FailurePolicy::Zero).decode_field(&spec, &[0xAB, 0x12, 0x3C]);
        assert_eq!(value, FieldValue::Packed(0));
    }

    #[test]
    fn test_truncated_comp_zero_policy() {
        let spec = FieldSpec::new("ID", FieldType::Comp, 4);
        let value = decoder(FailurePolicy::Zero).decode_field(&spec, &[0x01, 0x02]);
        assert_eq!(value, FieldValue::Binary(0));
    }

    #[test]
    fn test_failure_is_field_local() {
        // A bad packed field must not disturb its neighbors.
        let schema = Schema::new(vec![
            FieldSpec::new("A", FieldType::Comp, 2),
            FieldSpec::new("B", FieldType::Comp3, 2),
            FieldSpec::new("C", FieldType::Char, 3),
        ])
        .unwrap();
        let mut bytes = vec![0x00, 0x07]; // A = 7
        bytes.extend([0x1F, 0x2C]); // B: digit nibble 0xF in body
        bytes.extend(CP500.encode("XYZ").unwrap());

        let record = decoder(FailurePolicy::Null).decode_record(&schema, &bytes, 3);
        assert_eq!(record.get("A"), Some(&FieldValue::Binary(7)));
        assert_eq!(record.get("B"), Some(&FieldValue::Null));
        assert_eq!(record.get("C"), Some(&FieldValue::Text("XYZ".to_string())));
        assert_eq!(record.failure_count(), 1);
        assert_eq!(record.index(), 3);
    }

    #[test]
    fn test_negative_packed_field() {
        let spec = FieldSpec::new("AMT", FieldType::Comp3, 3);
        let value = decoder(FailurePolicy::Null).decode_field(&spec, &[0x12, 0x34, 0x5D]);
        assert_eq!(value, FieldValue::Packed(-12345));
    }
}
