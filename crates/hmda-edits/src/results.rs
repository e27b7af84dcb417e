//! # Results Model
//!
//! One [`RuleVerdict`] per evaluated edit, collected into a per-run
//! [`ResultsStore`]. The store serializes as a flat JSON object keyed
//! by edit name:
//!
//! ```json
//! {
//!   "v611": {
//!     "row_type": "LAR",
//!     "loan_type": "failed",
//!     "fail_count": 2,
//!     "fail_ids": ["BANK1...", "BANK1..."]
//!   },
//!   "v602": { "row_type": "TS", "calendar_quarter": "passed" }
//! }
//! ```
//!
//! ## Invariants
//!
//! - A verdict carries at least one field-status entry.
//! - `fail_ids` is present iff the edit is LAR-scoped and at least one
//!   row failed; `fail_count` accompanies it and equals its length.
//! - `BTreeMap` keys make iteration and serialization deterministic:
//!   two runs over the same inputs produce bit-identical documents.

use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// FieldStatus / RowType
// ---------------------------------------------------------------------------

/// Pass/fail status reported for one inspected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    /// No record violated the edit.
    Passed,
    /// At least one record violated the edit.
    Failed,
}

/// Which record set an edit reports against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowType {
    /// The transmittal sheet.
    #[serde(rename = "TS")]
    Ts,
    /// The LAR rows; failing rows are identified by ULI.
    #[serde(rename = "LAR")]
    Lar,
    /// A relationship between the transmittal sheet and the LAR rows.
    /// No single natural identifier applies, so no fail ids.
    #[serde(rename = "TS/LAR")]
    TsLar,
}

impl std::fmt::Display for RowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ts => f.write_str("TS"),
            Self::Lar => f.write_str("LAR"),
            Self::TsLar => f.write_str("TS/LAR"),
        }
    }
}

// ---------------------------------------------------------------------------
// RuleVerdict
// ---------------------------------------------------------------------------

/// The outcome of evaluating one edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleVerdict {
    /// Scope the edit reports against.
    pub row_type: RowType,
    /// Status per inspected field name, flattened into the verdict
    /// object on serialization. Never empty.
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldStatus>,
    /// Number of failing rows; LAR-scoped failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_count: Option<usize>,
    /// ULIs of failing rows in file order; LAR-scoped failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_ids: Option<Vec<String>>,
}

impl RuleVerdict {
    /// A passing verdict for one field.
    pub fn passed(row_type: RowType, field: &str) -> Self {
        Self {
            row_type,
            fields: BTreeMap::from([(field.to_string(), FieldStatus::Passed)]),
            fail_count: None,
            fail_ids: None,
        }
    }

    /// A failing verdict with no row identifiers (TS and TS/LAR scope).
    pub fn failed(row_type: RowType, field: &str) -> Self {
        Self {
            row_type,
            fields: BTreeMap::from([(field.to_string(), FieldStatus::Failed)]),
            fail_count: None,
            fail_ids: None,
        }
    }

    /// A failing LAR verdict carrying the failing rows' ULIs in file
    /// order.
    pub fn failed_rows(field: &str, fail_ids: Vec<String>) -> Self {
        Self {
            row_type: RowType::Lar,
            fields: BTreeMap::from([(field.to_string(), FieldStatus::Failed)]),
            fail_count: Some(fail_ids.len()),
            fail_ids: Some(fail_ids),
        }
    }

    /// True when every reported field passed.
    pub fn is_pass(&self) -> bool {
        self.fields.values().all(|s| *s == FieldStatus::Passed)
    }

    /// Status of one reported field, if the verdict carries it.
    pub fn field_status(&self, field: &str) -> Option<FieldStatus> {
        self.fields.get(field).copied()
    }
}

// ---------------------------------------------------------------------------
// ResultsStore
// ---------------------------------------------------------------------------

/// Verdicts for one evaluation run, keyed by edit name.
///
/// Built incrementally while the catalog executes; read-only for
/// consumers afterwards. Edit names are the external contract's
/// primary key — a second submission under the same name is a catalog
/// defect, logged and resolved by overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultsStore {
    #[serde(flatten)]
    verdicts: BTreeMap<String, RuleVerdict>,
}

impl ResultsStore {
    /// An empty store for a fresh run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one edit's verdict. Overwrites (with a warning) if the
    /// name was already present.
    pub fn insert(&mut self, name: &str, verdict: RuleVerdict) {
        if self.verdicts.insert(name.to_string(), verdict).is_some() {
            tracing::warn!(edit = name, "duplicate edit name; verdict overwritten");
        }
    }

    /// Verdict for an edit, if it was evaluated.
    pub fn get(&self, name: &str) -> Option<&RuleVerdict> {
        self.verdicts.get(name)
    }

    /// Iterate verdicts in edit-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleVerdict)> {
        self.verdicts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of evaluated edits.
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    /// True when no edit has been recorded.
    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    /// Names of every failing edit, in name order.
    pub fn failing_edits(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, v)| !v.is_pass())
            .map(|(name, _)| name)
            .collect()
    }
}
