//! # Engine Errors
//!
//! Structural failures that abort an evaluation run. Edit failures are
//! never represented here — they are [`RuleVerdict`](crate::results::RuleVerdict)s.

use thiserror::Error;

use hmda_core::CheckDigitError;

/// Convenience alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// A structural failure during catalog evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The injected check-digit provider failed; the run aborts rather
    /// than folding the failure into the `v609` verdict.
    #[error("check digit provider error: {0}")]
    CheckDigit(#[from] CheckDigitError),
}
