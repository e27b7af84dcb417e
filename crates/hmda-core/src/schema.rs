//! # Field Schemas
//!
//! A submission's shape is given externally as two ordered lists of
//! field names: one for the transmittal sheet, one for LAR rows. The
//! lists vary by filing year, so they are caller-supplied rather than
//! embedded here.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// An ordered list of unique field names with by-name position lookup.
///
/// Schemas are immutable once built and shared between every record of
/// a record set via [`Arc`]. Deserialization goes through the same
/// validation as [`RecordSchema::new`], rebuilding the position index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchema")]
pub struct RecordSchema {
    fields: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

/// Serialized shape of a schema: the field list only.
#[derive(Deserialize)]
struct RawSchema {
    fields: Vec<String>,
}

impl TryFrom<RawSchema> for RecordSchema {
    type Error = SchemaError;

    fn try_from(raw: RawSchema) -> Result<Self, Self::Error> {
        Self::build(raw.fields)
    }
}

impl RecordSchema {
    /// Build a schema from an ordered field-name list.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Empty`] for an empty list and
    /// [`SchemaError::DuplicateField`] when a name repeats.
    pub fn new<I, S>(fields: I) -> Result<Arc<Self>, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(fields.into_iter().map(Into::into).collect()).map(Arc::new)
    }

    fn build(fields: Vec<String>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut index = HashMap::with_capacity(fields.len());
        for (pos, name) in fields.iter().enumerate() {
            if index.insert(name.clone(), pos).is_some() {
                return Err(SchemaError::DuplicateField(name.clone()));
            }
        }
        Ok(Self { fields, index })
    }

    /// Number of fields a conforming record must carry.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the schema has no fields. Unreachable for schemas
    /// built through [`RecordSchema::new`], which rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of a field by name, if the schema carries it.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// The ordered field names.
    pub fn field_names(&self) -> &[String] {
        &self.fields
    }
}

/// The filing year edits compare date fields against.
///
/// Exactly four ASCII digits. Kept as a string because date fields are
/// compared by fixed-width prefix, never by arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilingYear(String);

impl FilingYear {
    /// Validate and wrap a four-digit year string.
    pub fn new(year: impl Into<String>) -> Result<Self, SchemaError> {
        let year = year.into();
        if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(year))
        } else {
            Err(SchemaError::InvalidFilingYear(year))
        }
    }

    /// The year as its four-digit string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FilingYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
