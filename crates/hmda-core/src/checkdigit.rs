//! # Check-Digit Provider Interface
//!
//! A ULI's last two characters are a check sequence derived from the
//! rest of the identifier. The derivation algorithm is regulatory
//! territory owned elsewhere; the edit engine only needs one
//! deterministic operation: prefix in, expected check sequence out.
//!
//! Injecting the provider keeps the edit catalog independent of the
//! algorithm and lets tests drive the checksum edit with a stub.

use crate::error::CheckDigitError;

/// Length of the check sequence at the end of a ULI.
pub const CHECK_SEQUENCE_LEN: usize = 2;

/// Deterministic, side-effect-free check-sequence computation.
///
/// Implementations must return the same output for the same prefix on
/// every call; the engine treats a provider failure as structural and
/// aborts the run rather than recording an edit verdict.
pub trait CheckDigitProvider: Send + Sync {
    /// Expected trailing check sequence for a ULI prefix, exactly
    /// [`CHECK_SEQUENCE_LEN`] characters.
    fn check_sequence(&self, prefix: &str) -> Result<String, CheckDigitError>;
}
