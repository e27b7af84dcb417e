//! # hmda-edits — Edit Catalog and Evaluation Engine
//!
//! Evaluates a loaded HMDA submission against the syntactic (S) and
//! validity (V) edits of the Filing Instructions Guide, producing one
//! pass/fail verdict per edit and, for LAR-scoped edits, the ULIs of
//! every failing row.
//!
//! ## Shape
//!
//! - [`catalog::catalog`] — the data-driven edit registry. Each edit is
//!   a name, a reported field, and a predicate over the record model;
//!   adding an edit is adding an entry, not adding control flow.
//! - [`engine::EditsEngine`] — one generic loop that runs every catalog
//!   entry against the submission and classifies the failing subset.
//! - [`results::ResultsStore`] — the per-run verdict map, built fresh
//!   for every run and serializable as a flat JSON document keyed by
//!   edit name.
//!
//! ## Failure Classes
//!
//! Business-rule violations are verdicts, never errors. The only error
//! path out of a run is structural: a check-digit provider failure
//! (load and reference-data failures are surfaced by `hmda-core`
//! before an engine exists). A run therefore yields either a complete
//! [`results::ResultsStore`] or a single [`error::EngineError`] —
//! never a partial store.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod results;

pub use catalog::{catalog, EditRule, RuleKind};
pub use engine::{EditsEngine, EvalContext};
pub use error::{EngineError, EngineResult};
pub use results::{FieldStatus, ResultsStore, RowType, RuleVerdict};
