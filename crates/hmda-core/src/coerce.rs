//! # Field Coercion Helpers
//!
//! Fields are stored as wire strings; edits that need a number or a
//! date coerce at the point of the predicate through these helpers.
//! Every helper is total: uncoercible input yields `false`/`None`, so a
//! malformed field becomes an edit failure for that record instead of
//! aborting the run.

use chrono::NaiveDate;

/// Calendar format date fields must satisfy when not `"NA"`.
const DATE_FORMAT: &str = "%Y%m%d";

/// True when `s` is non-empty and all ASCII digits.
pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// True when `s`, with hyphens removed, is non-empty and all ASCII
/// digits. Phone numbers, ZIP+4 codes, and tax ids carry embedded
/// hyphens on the wire.
pub fn digits_ignoring_hyphens(s: &str) -> bool {
    let stripped: String = s.chars().filter(|&c| c != '-').collect();
    is_digits(&stripped)
}

/// Parse a plain whole number. `None` for blank, signs, separators, or
/// anything else that is not a digit string.
pub fn parse_whole_number(s: &str) -> Option<i64> {
    if is_digits(s) {
        s.parse().ok()
    } else {
        None
    }
}

/// Loan-amount coercion: blank reads as zero (which then fails the
/// positive-amount bound); a non-blank non-digit value is `None`.
pub fn amount_or_zero(s: &str) -> Option<i64> {
    if s.is_empty() {
        Some(0)
    } else {
        parse_whole_number(s)
    }
}

/// True when `s` is exactly eight digits naming a real calendar date.
///
/// The digit pre-check pins the width: chrono alone would accept
/// variable-width years.
pub fn valid_date(s: &str) -> bool {
    s.len() == 8 && is_digits(s) && NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok()
}
