//! # Evaluation Engine
//!
//! One generic loop: for each catalog entry, compute the failing
//! subset, classify it into a [`RuleVerdict`], and record it in a
//! fresh-per-run [`ResultsStore`].
//!
//! ## Isolation
//!
//! The submission and reference data are read-only for the whole run;
//! no edit depends on another edit's verdict, and each edit's only
//! write is its own slot in the store. Evaluation order carries no
//! semantics.

use hmda_core::{CheckDigitProvider, FilingYear, ReferenceData, Submission};

use crate::catalog::{catalog, EditRule, RuleKind};
use crate::error::EngineResult;
use crate::results::{ResultsStore, RowType, RuleVerdict};

/// Read-only context threaded through every predicate.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    /// Filing year the submission is compared against.
    pub year: &'a FilingYear,
    /// State, tract, and county tables.
    pub reference: &'a ReferenceData,
    /// Injected check-sequence computation for the ULI checksum edit.
    pub check_digit: &'a dyn CheckDigitProvider,
}

impl std::fmt::Debug for EvalContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvalContext")
            .field("year", &self.year)
            .finish_non_exhaustive()
    }
}

/// Evaluates the edit catalog against one loaded submission.
pub struct EditsEngine<'a> {
    submission: &'a Submission,
    ctx: EvalContext<'a>,
}

impl<'a> EditsEngine<'a> {
    /// Wire an engine to a submission and its run inputs. Construction
    /// is cheap; all work happens in [`run`](Self::run).
    pub fn new(
        submission: &'a Submission,
        year: &'a FilingYear,
        reference: &'a ReferenceData,
        check_digit: &'a dyn CheckDigitProvider,
    ) -> Self {
        Self {
            submission,
            ctx: EvalContext {
                year,
                reference,
                check_digit,
            },
        }
    }

    /// Evaluate a single edit into its verdict.
    ///
    /// # Errors
    ///
    /// Only the check-digit provider can fail; every business-rule
    /// violation, malformed number, and bad date is classified into
    /// the verdict instead.
    pub fn evaluate(&self, rule: &EditRule) -> EngineResult<RuleVerdict> {
        let ts = &self.submission.ts;
        let lar = &self.submission.lar;
        match rule.kind {
            RuleKind::Ts(predicate) => Ok(if predicate(ts, &self.ctx)? {
                RuleVerdict::failed(RowType::Ts, rule.field)
            } else {
                RuleVerdict::passed(RowType::Ts, rule.field)
            }),
            RuleKind::Lar(predicate) => {
                let mut fail_ids = Vec::new();
                for record in lar.iter() {
                    if predicate(record, &self.ctx)? {
                        fail_ids.push(record.uli().to_string());
                    }
                }
                Ok(Self::classify_lar(rule.field, fail_ids))
            }
            RuleKind::LarSet(predicate) => {
                let fail_ids = predicate(lar, &self.ctx)?
                    .into_iter()
                    .filter_map(|idx| lar.get(idx))
                    .map(|record| record.uli().to_string())
                    .collect();
                Ok(Self::classify_lar(rule.field, fail_ids))
            }
            RuleKind::Cross(predicate) => Ok(if predicate(ts, lar, &self.ctx)? {
                RuleVerdict::failed(RowType::TsLar, rule.field)
            } else {
                RuleVerdict::passed(RowType::TsLar, rule.field)
            }),
        }
    }

    /// Run the full catalog.
    ///
    /// Returns either a verdict for every edit or the first structural
    /// error — never a partial store.
    pub fn run(&self) -> EngineResult<ResultsStore> {
        tracing::info!(
            edits = catalog().len(),
            lar_rows = self.submission.lar.len(),
            year = %self.ctx.year,
            "running edit catalog"
        );
        let mut store = ResultsStore::new();
        for rule in catalog() {
            store.insert(rule.name, self.evaluate(rule)?);
        }
        Ok(store)
    }

    fn classify_lar(field: &str, fail_ids: Vec<String>) -> RuleVerdict {
        if fail_ids.is_empty() {
            RuleVerdict::passed(RowType::Lar, field)
        } else {
            RuleVerdict::failed_rows(field, fail_ids)
        }
    }
}
