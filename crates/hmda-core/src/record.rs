//! # Record Model
//!
//! A submission is one transmittal sheet row followed by zero or more
//! LAR rows, all pipe-or-otherwise delimited text. This module parses
//! that text into typed, immutable records and gives the record set the
//! operations edits need: by-name field access, file-ordered iteration,
//! and whole-row duplicate detection.
//!
//! ## Invariants
//!
//! - Every record's value count equals its schema's field count; a
//!   mismatch is a load-time [`SubmissionError`], not an edit failure.
//! - Records never change after construction. Field values are exactly
//!   the wire strings; `""` is "blank".

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::SubmissionError;
use crate::schema::RecordSchema;

/// Field name that carries a LAR row's natural identifier.
pub const ULI_FIELD: &str = "uli";

// ---------------------------------------------------------------------------
// TransmittalSheet
// ---------------------------------------------------------------------------

/// The single summary row at the top of a submission: filer identity,
/// contact information, reporting period, and declared record counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmittalSheet {
    schema: Arc<RecordSchema>,
    values: Vec<String>,
}

impl TransmittalSheet {
    /// Build a transmittal sheet from already-split field values.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::FieldCountMismatch`] (reported as
    /// line 1) when the value count disagrees with the schema.
    pub fn new(
        schema: Arc<RecordSchema>,
        values: Vec<String>,
    ) -> Result<Self, SubmissionError> {
        check_field_count(&schema, &values, 1)?;
        Ok(Self { schema, values })
    }

    /// Read a field by name. An unknown field name reads as blank,
    /// which is the wire meaning of "absent".
    pub fn field(&self, name: &str) -> &str {
        self.schema
            .position(name)
            .map(|pos| self.values[pos].as_str())
            .unwrap_or("")
    }

    /// The schema this record was parsed under.
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }
}

// ---------------------------------------------------------------------------
// LarRecord / LarRecordSet
// ---------------------------------------------------------------------------

/// One reported transaction row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LarRecord {
    schema: Arc<RecordSchema>,
    values: Vec<String>,
}

impl LarRecord {
    /// Read a field by name. An unknown field name reads as blank.
    pub fn field(&self, name: &str) -> &str {
        self.schema
            .position(name)
            .map(|pos| self.values[pos].as_str())
            .unwrap_or("")
    }

    /// The row's natural identifier (the `uli` field).
    pub fn uli(&self) -> &str {
        self.field(ULI_FIELD)
    }

    /// All field values in schema order.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// The ordered collection of LAR rows. Order is file order; it drives
/// both stable row identification and the order of reported fail ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LarRecordSet {
    schema: Arc<RecordSchema>,
    records: Vec<LarRecord>,
}

impl LarRecordSet {
    /// Build a record set from already-split rows.
    ///
    /// `first_line` is the 1-based line number of the first row, used
    /// for error reporting (2 when the rows follow a transmittal sheet).
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::FieldCountMismatch`] for the first
    /// row whose value count disagrees with the schema.
    pub fn new(
        schema: Arc<RecordSchema>,
        rows: Vec<Vec<String>>,
        first_line: usize,
    ) -> Result<Self, SubmissionError> {
        let mut records = Vec::with_capacity(rows.len());
        for (offset, values) in rows.into_iter().enumerate() {
            check_field_count(&schema, &values, first_line + offset)?;
            records.push(LarRecord {
                schema: Arc::clone(&schema),
                values,
            });
        }
        Ok(Self { schema, records })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the submission reported no transactions.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Row by 0-based position.
    pub fn get(&self, index: usize) -> Option<&LarRecord> {
        self.records.get(index)
    }

    /// Iterate rows in file order.
    pub fn iter(&self) -> impl Iterator<Item = &LarRecord> {
        self.records.iter()
    }

    /// The schema the rows were parsed under.
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Indices (file order) of every row whose full value vector occurs
    /// at least twice in the set. All copies are flagged, including the
    /// first occurrence — a duplicate pair reports both rows.
    pub fn duplicate_rows(&self) -> Vec<usize> {
        let mut by_values: HashMap<&[String], Vec<usize>> = HashMap::new();
        for (idx, record) in self.records.iter().enumerate() {
            by_values.entry(record.values()).or_default().push(idx);
        }
        let mut duplicates: Vec<usize> = by_values
            .into_values()
            .filter(|indices| indices.len() > 1)
            .flatten()
            .collect();
        duplicates.sort_unstable();
        duplicates
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// A fully loaded submission: the transmittal sheet plus the LAR rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The transmittal sheet (line 1 of the file).
    pub ts: TransmittalSheet,
    /// The LAR rows (lines 2..), in file order.
    pub lar: LarRecordSet,
}

impl Submission {
    /// Parse delimited text into a submission.
    ///
    /// The first line is parsed under `ts_schema`, every following line
    /// under `lar_schema`. A trailing `\r` on any line is stripped; a
    /// trailing newline does not produce a phantom row.
    ///
    /// # Errors
    ///
    /// [`SubmissionError::Empty`] for input with no lines, and
    /// [`SubmissionError::FieldCountMismatch`] (with the offending
    /// 1-based line number) for any line whose field count disagrees
    /// with its schema. No edit runs against a submission that fails
    /// to load.
    pub fn parse(
        text: &str,
        delimiter: char,
        ts_schema: Arc<RecordSchema>,
        lar_schema: Arc<RecordSchema>,
    ) -> Result<Self, SubmissionError> {
        let mut lines = text.lines().map(|line| line.trim_end_matches('\r'));

        let ts_line = lines.next().ok_or(SubmissionError::Empty)?;
        let ts = TransmittalSheet::new(ts_schema, split_line(ts_line, delimiter))?;

        let rows: Vec<Vec<String>> = lines.map(|line| split_line(line, delimiter)).collect();
        let lar = LarRecordSet::new(lar_schema, rows, 2)?;

        Ok(Self { ts, lar })
    }
}

fn split_line(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter).map(str::to_string).collect()
}

fn check_field_count(
    schema: &RecordSchema,
    values: &[String],
    line: usize,
) -> Result<(), SubmissionError> {
    if values.len() != schema.len() {
        return Err(SubmissionError::FieldCountMismatch {
            line,
            expected: schema.len(),
            found: values.len(),
        });
    }
    Ok(())
}
