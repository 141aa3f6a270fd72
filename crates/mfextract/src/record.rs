//! Decoded record values.

use std::collections::HashMap;

use serde::Serialize;

/// A decoded field value.
///
/// Numeric variants are 128-bit so any field the codecs accept (16
/// binary bytes, 38 packed digits) is held exactly. Serialization is
/// untagged: text becomes a JSON string, numbers become JSON numbers,
/// and the failure marker becomes `null`, matching the shape downstream
/// reformatters expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text with trailing spaces stripped.
    Text(String),
    /// Unsigned binary integer (COMP).
    Binary(u128),
    /// Signed packed decimal magnitude (COMP-3).
    Packed(i128),
    /// Failure marker under the null policy.
    Null,
}

impl FieldValue {
    /// Whether this is the failure marker.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// The text value, if this is a text field.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The unsigned integer value, if this is a binary field.
    pub fn as_binary(&self) -> Option<u128> {
        match self {
            FieldValue::Binary(v) => Some(*v),
            _ => None,
        }
    }

    /// The signed value, if this is a packed field.
    pub fn as_packed(&self) -> Option<i128> {
        match self {
            FieldValue::Packed(v) => Some(*v),
            _ => None,
        }
    }
}

/// One decoded physical record.
///
/// Serializes as a flat JSON object of field name to value; the ordinal
/// index and failure count are scan-side metadata and stay out of the
/// payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedRecord {
    #[serde(skip)]
    index: u64,
    #[serde(skip)]
    failures: usize,
    #[serde(flatten)]
    fields: HashMap<String, FieldValue>,
}

impl DecodedRecord {
    pub(crate) fn new(index: u64, fields: HashMap<String, FieldValue>, failures: usize) -> Self {
        Self {
            index,
            failures,
            fields,
        }
    }

    /// Ordinal position of this record in the file, starting at 0.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Number of fields that failed to decode in this record.
    pub fn failure_count(&self) -> usize {
        self.failures
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the record, yielding the field map.
    pub fn into_fields(self) -> HashMap<String, FieldValue> {
        self.fields
    }
}
