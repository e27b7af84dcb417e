//! # Error Types — Structural Failures
//!
//! Errors in this crate are structural: a submission that cannot be
//! loaded, a schema that cannot be built, reference tables that are
//! missing, or a check-digit provider that misbehaves. Business-rule
//! violations are never errors — they are verdicts, produced by the
//! edits crate.

use thiserror::Error;

/// Error building a [`RecordSchema`](crate::schema::RecordSchema) or a
/// [`FilingYear`](crate::schema::FilingYear).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A schema must carry at least one field name.
    #[error("schema has no field names")]
    Empty,

    /// Field names within one schema must be unique.
    #[error("duplicate field name in schema: {0}")]
    DuplicateField(String),

    /// The filing year must be exactly four ASCII digits.
    #[error("invalid filing year: {0:?} (expected four digits, e.g. \"2018\")")]
    InvalidFilingYear(String),
}

/// Error loading a submission from delimited text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The input had no lines at all; a transmittal sheet row is required.
    #[error("submission is empty; a transmittal sheet row is required")]
    Empty,

    /// A line's field count disagrees with its schema. Lines are
    /// numbered from 1; line 1 is the transmittal sheet.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCountMismatch {
        /// 1-based line number within the submission text.
        line: usize,
        /// Field count the schema requires.
        expected: usize,
        /// Field count actually present on the line.
        found: usize,
    },
}

/// Error constructing [`ReferenceData`](crate::refdata::ReferenceData).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceDataError {
    /// The state-code table is the backbone of the geography edits and
    /// cannot be empty.
    #[error("state code table is empty")]
    EmptyStateCodes,
}

/// Error from a [`CheckDigitProvider`](crate::checkdigit::CheckDigitProvider).
///
/// A provider failure is structural: the evaluation run aborts rather
/// than folding the failure into an edit verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckDigitError {
    /// The provider could not produce a check sequence for the prefix.
    #[error("check digit provider failed for prefix {prefix:?}: {reason}")]
    ProviderFailure {
        /// The ULI prefix that was submitted.
        prefix: String,
        /// Provider-supplied reason.
        reason: String,
    },
}
