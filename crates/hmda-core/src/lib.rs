//! # hmda-core — Record Model for HMDA Submission Files
//!
//! Foundational types for working with a parsed HMDA submission: the
//! transmittal sheet (TS), the loan/application register rows (LAR),
//! the field schemas that give both their shape, the static reference
//! tables edits consult, and the check-digit provider interface.
//!
//! ## Key Design Principles
//!
//! 1. **Fields stay strings.** Every field is stored exactly as it
//!    appeared on the wire; the empty string means "blank". Numeric and
//!    date interpretation happens at edit-evaluation time through the
//!    non-panicking helpers in [`coerce`], never at load time.
//!
//! 2. **Structural failures are load failures.** A row whose field
//!    count disagrees with its schema aborts the load with a
//!    [`SubmissionError`] before any edit runs. Edits never see a
//!    malformed record set.
//!
//! 3. **Immutable after load.** `TransmittalSheet`, `LarRecordSet`, and
//!    `ReferenceData` expose read-only accessors only. An evaluation
//!    run never mutates its inputs.
//!
//! 4. **The check digit is someone else's algorithm.** [`CheckDigitProvider`]
//!    is a single-operation trait injected by the caller; this crate
//!    never recomputes the check sequence itself.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hmda-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod checkdigit;
pub mod coerce;
pub mod error;
pub mod record;
pub mod refdata;
pub mod schema;

// Re-export primary types for ergonomic imports.
pub use checkdigit::{CheckDigitProvider, CHECK_SEQUENCE_LEN};
pub use error::{CheckDigitError, ReferenceDataError, SchemaError, SubmissionError};
pub use record::{LarRecord, LarRecordSet, Submission, TransmittalSheet};
pub use refdata::ReferenceData;
pub use schema::{FilingYear, RecordSchema};
