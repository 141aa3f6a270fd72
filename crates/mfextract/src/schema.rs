//! Record layout schema for extract files.
//!
//! A schema is an ordered list of field specifications; field order
//! defines physical byte order within a record, and the record width is
//! the sum of all field lengths. Validation happens at construction so a
//! bad layout is rejected before any file is opened.
//!
//! `FieldSpec` serializes with the legacy spelling used by the source
//! platform's JSON layout files (`name` / `type` / `length`, with types
//! `CHAR`, `COMP`, `COMP-3`), so callers may load those files with any
//! serde deserializer and pass the result to [`Schema::new`].

use std::collections::HashSet;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors detected while validating a schema.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum SchemaError {
    /// The field list is empty.
    #[error("schema has no fields")]
    Empty,

    /// A field declares a zero byte length.
    #[error("field '{name}' has zero length")]
    ZeroLength {
        /// Name of the offending field.
        name: String,
    },

    /// Two fields share a name.
    #[error("duplicate field name '{name}'")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },
}

/// Storage format of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Fixed-width text in the legacy code page.
    #[serde(rename = "CHAR")]
    Char,
    /// Big-endian unsigned binary integer.
    #[serde(rename = "COMP")]
    Comp,
    /// Packed decimal with sign nibble.
    #[serde(rename = "COMP-3")]
    Comp3,
}

/// One field of the record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name, unique within the schema.
    pub name: String,
    /// Storage format.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Field width in bytes.
    pub length: usize,
}

impl FieldSpec {
    /// Create a field specification.
    pub fn new(name: &str, field_type: FieldType, length: usize) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            length,
        }
    }
}

/// Validated, immutable record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Validate a field list into a schema.
    ///
    /// # Errors
    /// Rejects an empty list, a zero-length field, or a duplicate name.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut seen = HashSet::new();
        for field in &fields {
            if field.length == 0 {
                return Err(SchemaError::ZeroLength {
                    name: field.name.clone(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateName {
                    name: field.name.clone(),
                });
            }
        }
        Ok(Self { fields })
    }

    /// Total bytes of one physical record.
    pub fn record_width(&self) -> usize {
        self.fields.iter().map(|f| f.length).sum()
    }

    /// The fields in declaration (physical) order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields. Always false for a validated
    /// schema; present for completeness of the collection-like API.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
