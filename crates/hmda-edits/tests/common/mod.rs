//! Shared fixtures for the engine integration tests: realistic TS/LAR
//! schemas, a baseline passing submission, reference tables, and a
//! stub check-digit provider.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;

use hmda_core::{CheckDigitError, CheckDigitProvider, RecordSchema, ReferenceData};

pub const TS_FIELDS: &[&str] = &[
    "record_id",
    "inst_name",
    "calendar_year",
    "calendar_quarter",
    "contact_name",
    "contact_tel",
    "contact_email",
    "contact_street_address",
    "office_city",
    "office_state",
    "office_zip",
    "tax_id",
    "lei",
    "lar_entries",
];

pub const LAR_FIELDS: &[&str] = &[
    "record_id",
    "lei",
    "uli",
    "app_date",
    "loan_type",
    "loan_purpose",
    "preapproval",
    "const_method",
    "occ_type",
    "loan_amount",
    "action_taken",
    "action_date",
    "street_address",
    "city",
    "state",
    "zip_code",
    "county",
    "tract",
    "reverse_mortgage",
    "open_end_credit",
    "affordable_units",
    "manufactured_type",
    "manufactured_interest",
];

pub const LEI: &str = "BANK1LEIXXXXXXXXXXXX";

pub fn ts_schema() -> Arc<RecordSchema> {
    RecordSchema::new(TS_FIELDS.iter().copied()).unwrap()
}

pub fn lar_schema() -> Arc<RecordSchema> {
    RecordSchema::new(LAR_FIELDS.iter().copied()).unwrap()
}

/// Check-digit stub: two-digit byte sum. Deterministic, and easy to
/// both satisfy and violate from a test.
pub struct ByteSumProvider;

impl CheckDigitProvider for ByteSumProvider {
    fn check_sequence(&self, prefix: &str) -> Result<String, CheckDigitError> {
        let sum: u32 = prefix.bytes().map(u32::from).sum();
        Ok(format!("{:02}", sum % 100))
    }
}

/// A 23-character ULI whose check sequence satisfies [`ByteSumProvider`].
pub fn valid_uli(tag: &str) -> String {
    let mut prefix = format!("{LEI}{tag}");
    prefix.truncate(21);
    while prefix.len() < 21 {
        prefix.push('0');
    }
    let suffix = ByteSumProvider.check_sequence(&prefix).unwrap();
    format!("{prefix}{suffix}")
}

pub fn reference_data() -> ReferenceData {
    let states = BTreeMap::from(
        [
            ("AK", "02"),
            ("AL", "01"),
            ("CA", "06"),
            ("DC", "11"),
            ("MD", "24"),
            ("NY", "36"),
            ("TX", "48"),
            ("VA", "51"),
        ]
        .map(|(k, v)| (k.to_string(), v.to_string())),
    );
    let tracts = BTreeSet::from(
        ["24031700101", "51059482001", "06037206300"].map(str::to_string),
    );
    let counties = BTreeSet::from(["24031", "51059", "06037"].map(str::to_string));
    ReferenceData::new(states, tracts, counties).unwrap()
}

/// A transmittal sheet line that passes every TS edit, declaring
/// `lar_entries` rows.
pub fn passing_ts_line(lar_entries: usize) -> String {
    let values: BTreeMap<&str, String> = BTreeMap::from([
        ("record_id", "1".to_string()),
        ("inst_name", "First Test Bank".to_string()),
        ("calendar_year", "2018".to_string()),
        ("calendar_quarter", "4".to_string()),
        ("contact_name", "Pat Smith".to_string()),
        ("contact_tel", "301-555-0100".to_string()),
        ("contact_email", "pat.smith@example.com".to_string()),
        ("contact_street_address", "1 Bank Plaza".to_string()),
        ("office_city", "Rockville".to_string()),
        ("office_state", "MD".to_string()),
        ("office_zip", "20850".to_string()),
        ("tax_id", "12-3456789".to_string()),
        ("lei", LEI.to_string()),
        ("lar_entries", lar_entries.to_string()),
    ]);
    join_line(TS_FIELDS, &values)
}

/// A LAR line that passes every edit, with per-field overrides.
pub fn lar_line(uli: &str, overrides: &[(&str, &str)]) -> String {
    let mut values: BTreeMap<&str, String> = BTreeMap::from([
        ("record_id", "2".to_string()),
        ("lei", LEI.to_string()),
        ("uli", uli.to_string()),
        ("app_date", "20180101".to_string()),
        ("loan_type", "1".to_string()),
        ("loan_purpose", "1".to_string()),
        ("preapproval", "1".to_string()),
        ("const_method", "1".to_string()),
        ("occ_type", "1".to_string()),
        ("loan_amount", "250000".to_string()),
        ("action_taken", "1".to_string()),
        ("action_date", "20180601".to_string()),
        ("street_address", "123 Main St".to_string()),
        ("city", "Rockville".to_string()),
        ("state", "MD".to_string()),
        ("zip_code", "20850".to_string()),
        ("county", "24031".to_string()),
        ("tract", "24031700101".to_string()),
        ("reverse_mortgage", "2".to_string()),
        ("open_end_credit", "2".to_string()),
        ("affordable_units", "NA".to_string()),
        ("manufactured_type", "3".to_string()),
        ("manufactured_interest", "5".to_string()),
    ]);
    for (field, value) in overrides {
        values.insert(field, value.to_string());
    }
    join_line(LAR_FIELDS, &values)
}

fn join_line(fields: &[&str], values: &BTreeMap<&str, String>) -> String {
    fields
        .iter()
        .map(|f| values[f].as_str())
        .collect::<Vec<_>>()
        .join("|")
}

/// Assemble a full submission text from LAR lines, with a matching
/// declared entry count.
pub fn submission_text(lar_lines: &[String]) -> String {
    let mut text = passing_ts_line(lar_lines.len());
    for line in lar_lines {
        text.push('\n');
        text.push_str(line);
    }
    text.push('\n');
    text
}
