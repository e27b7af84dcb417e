//! # Edit Catalog
//!
//! The registry of syntactic (S) and validity (V) edits. Each entry
//! names the edit, the field it reports against, and a predicate over
//! the record model; the engine is one generic loop over the registry.
//! Adding an edit is adding an entry here — never new control flow in
//! the engine.
//!
//! ## Predicate Contract
//!
//! Predicates identify **failures**: a `Ts`/`Lar`/`Cross` predicate
//! returns `true` for a violating record (or relationship), and a
//! `LarSet` predicate returns the violating row indices in file order.
//! Predicates read the record model and reference data only; the one
//! structural escape is the check-digit provider, threaded through
//! [`EngineResult`].
//!
//! ## Regulatory Constants
//!
//! The length constants below come from the filing specification and
//! are preserved as configuration, not re-derived.

use hmda_core::coerce::{
    amount_or_zero, digits_ignoring_hyphens, is_digits, parse_whole_number, valid_date,
};
use hmda_core::{LarRecord, LarRecordSet, TransmittalSheet, CHECK_SEQUENCE_LEN};

use crate::engine::EvalContext;
use crate::error::EngineResult;

/// The not-applicable sentinel, distinct from blank.
pub const NA: &str = "NA";

/// Required LEI width.
pub const LEI_LEN: usize = 20;
/// Accepted ULI widths.
pub const ULI_LENGTHS: [usize; 2] = [23, 45];
/// Phone number width, hyphens included (`999-999-9999`).
pub const PHONE_LEN: usize = 12;
/// Accepted ZIP code widths (`12345` or `12345-1010`).
pub const ZIP_LENGTHS: [usize; 2] = [5, 10];
/// Federal tax id width, hyphen included (`99-9999999`).
pub const TAX_ID_LEN: usize = 10;
/// Census tract width.
pub const TRACT_LEN: usize = 11;
/// County FIPS code width.
pub const COUNTY_LEN: usize = 5;

// ---------------------------------------------------------------------------
// Rule definition
// ---------------------------------------------------------------------------

/// Predicate over the transmittal sheet; `true` means the edit fails.
pub type TsPredicate = fn(&TransmittalSheet, &EvalContext<'_>) -> EngineResult<bool>;
/// Per-row predicate over LAR rows; `true` means the row fails.
pub type LarPredicate = fn(&LarRecord, &EvalContext<'_>) -> EngineResult<bool>;
/// Whole-set predicate over the LAR rows; returns failing row indices.
pub type LarSetPredicate = fn(&LarRecordSet, &EvalContext<'_>) -> EngineResult<Vec<usize>>;
/// Predicate over the TS/LAR relationship; `true` means the edit fails.
pub type CrossPredicate =
    fn(&TransmittalSheet, &LarRecordSet, &EvalContext<'_>) -> EngineResult<bool>;

/// How an edit inspects the record model, and therefore how its
/// verdict is scoped and reported.
#[derive(Debug, Clone, Copy)]
pub enum RuleKind {
    /// Transmittal-sheet edit; verdict row type `TS`, no fail ids.
    Ts(TsPredicate),
    /// Per-row LAR edit; verdict row type `LAR`, failing ULIs reported
    /// in file order.
    Lar(LarPredicate),
    /// Whole-set LAR edit (duplicate detection); reported like [`RuleKind::Lar`].
    LarSet(LarSetPredicate),
    /// Header/detail relationship edit; verdict row type `TS/LAR`, no
    /// fail ids — no single natural identifier applies.
    Cross(CrossPredicate),
}

/// One named, independent edit.
#[derive(Debug, Clone, Copy)]
pub struct EditRule {
    /// Edit identifier, the results store's key (e.g. `"v611"`).
    pub name: &'static str,
    /// Field name the verdict reports against.
    pub field: &'static str,
    /// Scope and predicate.
    pub kind: RuleKind,
}

/// The full edit registry, in catalog order. Order carries no
/// semantics: every edit is independent of every other edit's verdict.
pub fn catalog() -> &'static [EditRule] {
    CATALOG
}

macro_rules! edits {
    ($($name:ident: $field:expr => $kind:ident),+ $(,)?) => {
        &[$(EditRule {
            name: stringify!($name),
            field: $field,
            kind: RuleKind::$kind($name),
        }),+]
    };
}

static CATALOG: &[EditRule] = edits![
    s300_1: "record_id" => Ts,
    s300_2: "record_id" => Lar,
    s301: "LEI" => Cross,
    s302: "calendar_year" => Ts,
    s304: "lar_entries" => Cross,
    s305: "all" => LarSet,
    v600: "LEI" => Lar,
    v601_1: "inst_name" => Ts,
    v601_2: "contact_name" => Ts,
    v601_3: "contact_email" => Ts,
    v601_4: "contact_street_address" => Ts,
    v601_5: "office_city" => Ts,
    v602: "calendar_quarter" => Ts,
    v603: "contact_tel" => Ts,
    v604: "office_state" => Ts,
    v605: "office_zip" => Ts,
    v606: "lar_entries" => Ts,
    v607: "tax_id" => Ts,
    v608: "ULI" => Lar,
    v609: "ULI" => Lar,
    v610_1: "app_date" => Lar,
    v610_2: "app_date" => Lar,
    v611: "loan_type" => Lar,
    v612_1: "loan_purpose" => Lar,
    v612_2: "loan_purpose" => Lar,
    v613_1: "preapproval" => Lar,
    v613_2: "preapproval" => Lar,
    v613_3: "preapproval" => Lar,
    v613_4: "preapproval" => Lar,
    v614_1: "preapproval" => Lar,
    v614_2: "preapproval" => Lar,
    v614_3: "preapproval" => Lar,
    v614_4: "preapproval" => Lar,
    v615_1: "const_method" => Lar,
    v615_2: "const_method" => Lar,
    v615_3: "const_method" => Lar,
    v616: "occupancy" => Lar,
    v617: "loan_amount" => Lar,
    v618: "action_taken" => Lar,
    v619_1: "action_date" => Lar,
    v619_2: "action_date" => Lar,
    v619_3: "action_date" => Lar,
    v620: "street_address" => Lar,
    v621: "city" => Lar,
    v622_1: "city" => Lar,
    v622_2: "state" => Lar,
    v622_3: "zip_code" => Lar,
    v623: "state" => Lar,
    v624: "zip_code" => Lar,
    v625_1: "tract" => Lar,
    v625_2: "tract" => Lar,
    v626: "county" => Lar,
    v627: "tract/county" => Lar,
];

fn one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value)
}

// ---------------------------------------------------------------------------
// Syntactic edits
// ---------------------------------------------------------------------------

/// The first row of the file must begin with record id 1.
fn s300_1(ts: &TransmittalSheet, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(ts.field("record_id") != "1")
}

/// Every subsequent row must begin with record id 2.
fn s300_2(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(r.field("record_id") != "2")
}

/// Every row's LEI must match the transmittal sheet's LEI.
fn s301(
    ts: &TransmittalSheet,
    lar: &LarRecordSet,
    _ctx: &EvalContext<'_>,
) -> EngineResult<bool> {
    let ts_lei = ts.field("lei");
    Ok(lar.iter().any(|r| r.field("lei") != ts_lei))
}

/// The reported calendar year must match the filing year.
fn s302(ts: &TransmittalSheet, ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(ts.field("calendar_year") != ctx.year.as_str())
}

/// The declared entry count must equal the number of LAR rows loaded.
fn s304(
    ts: &TransmittalSheet,
    lar: &LarRecordSet,
    _ctx: &EvalContext<'_>,
) -> EngineResult<bool> {
    Ok(ts.field("lar_entries") != lar.len().to_string())
}

/// No row may be an exact duplicate of another on every field. Every
/// copy of a duplicated row is flagged, the first occurrence included.
fn s305(lar: &LarRecordSet, _ctx: &EvalContext<'_>) -> EngineResult<Vec<usize>> {
    Ok(lar.duplicate_rows())
}

// ---------------------------------------------------------------------------
// LEI and transmittal sheet validity edits
// ---------------------------------------------------------------------------

/// LEI must be 20 characters and not blank.
fn v600(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let lei = r.field("lei");
    Ok(lei.is_empty() || lei.chars().count() != LEI_LEN)
}

/// Financial institution name is required.
fn v601_1(ts: &TransmittalSheet, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(ts.field("inst_name").is_empty())
}

/// Contact person's name is required.
fn v601_2(ts: &TransmittalSheet, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(ts.field("contact_name").is_empty())
}

/// Contact person's e-mail address is required.
fn v601_3(ts: &TransmittalSheet, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(ts.field("contact_email").is_empty())
}

/// Contact person's office street address is required.
fn v601_4(ts: &TransmittalSheet, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(ts.field("contact_street_address").is_empty())
}

/// Contact person's office city is required.
fn v601_5(ts: &TransmittalSheet, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(ts.field("office_city").is_empty())
}

/// Calendar quarter must equal 4.
fn v602(ts: &TransmittalSheet, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(ts.field("calendar_quarter") != "4")
}

/// Telephone number must be 999-999-9999.
fn v603(ts: &TransmittalSheet, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let tel = ts.field("contact_tel");
    Ok(tel.chars().count() != PHONE_LEN || !digits_ignoring_hyphens(tel))
}

/// Office state must be a known two-letter state code.
fn v604(ts: &TransmittalSheet, ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(!ctx.reference.is_known_state(ts.field("office_state")))
}

/// Office ZIP code must be 12345 or 12345-1010.
fn v605(ts: &TransmittalSheet, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let zip = ts.field("office_zip");
    Ok(!ZIP_LENGTHS.contains(&zip.chars().count()) || !digits_ignoring_hyphens(zip))
}

/// Declared entry count must be a whole number greater than zero.
/// Blank or non-numeric text is a failure, not a coercion escape.
fn v606(ts: &TransmittalSheet, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(match parse_whole_number(ts.field("lar_entries")) {
        Some(n) => n < 1,
        None => true,
    })
}

/// Federal tax id must be 99-9999999.
fn v607(ts: &TransmittalSheet, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let tax_id = ts.field("tax_id");
    Ok(tax_id.chars().count() != TAX_ID_LEN || !digits_ignoring_hyphens(tax_id))
}

// ---------------------------------------------------------------------------
// ULI edits
// ---------------------------------------------------------------------------

/// ULI must be one of the accepted widths and not blank.
fn v608(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let uli = r.field("uli");
    Ok(uli.is_empty() || !ULI_LENGTHS.contains(&uli.chars().count()))
}

/// The ULI's trailing check sequence must match the provider's value
/// for the remaining prefix. The algorithm is entirely the provider's;
/// a provider failure aborts the run.
fn v609(r: &LarRecord, ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let uli = r.field("uli");
    // Too short to carry a check sequence, or not cleanly splittable.
    if !uli.is_ascii() || uli.len() <= CHECK_SEQUENCE_LEN {
        return Ok(true);
    }
    let (prefix, suffix) = uli.split_at(uli.len() - CHECK_SEQUENCE_LEN);
    Ok(suffix != ctx.check_digit.check_sequence(prefix)?)
}

// ---------------------------------------------------------------------------
// Date edits
// ---------------------------------------------------------------------------

/// Application date must be a valid YYYYMMDD date or NA.
fn v610_1(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let app_date = r.field("app_date");
    Ok(app_date != NA && !valid_date(app_date))
}

/// Action taken 6 iff application date NA (both directions).
fn v610_2(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let app_date = r.field("app_date");
    let action_taken = r.field("action_taken");
    Ok((app_date == NA && action_taken != "6") || (action_taken == "6" && app_date != NA))
}

/// Action date must be a valid YYYYMMDD date and not blank.
fn v619_1(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let action_date = r.field("action_date");
    Ok(action_date.is_empty() || !valid_date(action_date))
}

/// Action date must fall in the filing year. Fixed-width format makes
/// the four-character prefix comparison exact.
fn v619_2(r: &LarRecord, ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(!r.field("action_date").starts_with(ctx.year.as_str()))
}

/// Action date must be on or after the application date when one was
/// reported. Fixed-width YYYYMMDD makes string order date order.
fn v619_3(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let app_date = r.field("app_date");
    Ok(app_date != NA && r.field("action_date") < app_date)
}

// ---------------------------------------------------------------------------
// Categorical edits
// ---------------------------------------------------------------------------

/// Loan type must be 1-4.
fn v611(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(!one_of(r.field("loan_type"), &["1", "2", "3", "4"]))
}

/// Loan purpose must be 1, 2, 31, 32, 4, or 5.
fn v612_1(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(!one_of(r.field("loan_purpose"), &["1", "2", "31", "32", "4", "5"]))
}

/// If preapproval was requested, loan purpose must be home purchase.
fn v612_2(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(r.field("preapproval") == "1" && r.field("loan_purpose") != "1")
}

/// Preapproval must be 1 or 2.
fn v613_1(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(!one_of(r.field("preapproval"), &["1", "2"]))
}

/// Preapproval-specific actions (7, 8) require preapproval 1.
fn v613_2(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(one_of(r.field("action_taken"), &["7", "8"]) && r.field("preapproval") != "1")
}

/// Actions 3-6 require preapproval 2.
fn v613_3(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(one_of(r.field("action_taken"), &["3", "4", "5", "6"])
        && r.field("preapproval") != "2")
}

/// Preapproval 1 allows only actions 1, 2, 7, or 8.
fn v613_4(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(r.field("preapproval") == "1"
        && !one_of(r.field("action_taken"), &["1", "2", "7", "8"]))
}

/// Non-purchase loan purposes require preapproval 2.
fn v614_1(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(one_of(r.field("loan_purpose"), &["2", "4", "31", "32", "5"])
        && r.field("preapproval") != "2")
}

/// A numeric multifamily affordable-units value requires preapproval 2.
fn v614_2(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(is_digits(r.field("affordable_units")) && r.field("preapproval") != "2")
}

/// Reverse mortgages require preapproval 2.
fn v614_3(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(r.field("reverse_mortgage") == "1" && r.field("preapproval") != "2")
}

/// Open-end lines of credit require preapproval 2.
fn v614_4(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(r.field("open_end_credit") == "1" && r.field("preapproval") != "2")
}

/// Construction method must be 1 or 2.
fn v615_1(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(!one_of(r.field("const_method"), &["1", "2"]))
}

/// A manufactured-home land property interest requires construction
/// method 2.
fn v615_2(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(one_of(r.field("manufactured_interest"), &["1", "2", "3", "4"])
        && r.field("const_method") != "2")
}

/// A manufactured-home secured property type requires construction
/// method 2.
fn v615_3(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(one_of(r.field("manufactured_type"), &["1", "2"])
        && r.field("const_method") != "2")
}

/// Occupancy type must be 1, 2, or 3.
fn v616(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(!one_of(r.field("occ_type"), &["1", "2", "3"]))
}

/// Loan amount must be a number greater than zero. Blank coerces to
/// zero and fails the bound; uncoercible text fails outright.
fn v617(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(match amount_or_zero(r.field("loan_amount")) {
        Some(amount) => amount < 1,
        None => true,
    })
}

/// Action taken must be 1-8.
fn v618(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(!one_of(
        r.field("action_taken"),
        &["1", "2", "3", "4", "5", "6", "7", "8"],
    ))
}

// ---------------------------------------------------------------------------
// Geography edits
// ---------------------------------------------------------------------------

/// Street address is required.
fn v620(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(r.field("street_address").is_empty())
}

/// City is required.
fn v621(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(r.field("city").is_empty())
}

/// A reported street address requires a reported city.
fn v622_1(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(r.field("street_address") != NA && r.field("city") == NA)
}

/// A reported street address requires a reported state.
fn v622_2(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(r.field("street_address") != NA && r.field("state") == NA)
}

/// A reported street address requires a reported ZIP code.
fn v622_3(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    Ok(r.field("street_address") != NA && r.field("zip_code") == NA)
}

/// State must be a known two-letter code and not the NA sentinel.
fn v623(r: &LarRecord, ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let state = r.field("state");
    Ok(state == NA || !ctx.reference.is_known_state(state))
}

/// ZIP code must be 12345, 12345-1010, or NA.
fn v624(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let zip = r.field("zip_code");
    Ok(zip != NA
        && (!ZIP_LENGTHS.contains(&zip.chars().count()) || !digits_ignoring_hyphens(zip)))
}

/// Census tract must be an eleven-digit number or NA.
fn v625_1(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let tract = r.field("tract");
    Ok(tract != NA && (tract.chars().count() != TRACT_LEN || !is_digits(tract)))
}

/// A reported census tract must exist in the Census Bureau table.
fn v625_2(r: &LarRecord, ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let tract = r.field("tract");
    Ok(tract != NA && !ctx.reference.is_known_tract(tract))
}

/// County must be a five-digit FIPS code or NA.
fn v626(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let county = r.field("county");
    Ok(county != NA && (county.chars().count() != COUNTY_LEN || !is_digits(county)))
}

/// When both are reported, the tract's first five digits must equal
/// the county FIPS code. A tract too short to carry a county prefix
/// fails here as well as in `v625_1`.
fn v627(r: &LarRecord, _ctx: &EvalContext<'_>) -> EngineResult<bool> {
    let county = r.field("county");
    let tract = r.field("tract");
    if county == NA || tract == NA {
        return Ok(false);
    }
    Ok(match tract.get(..COUNTY_LEN) {
        Some(prefix) => prefix != county,
        None => true,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use hmda_core::{
        CheckDigitError, CheckDigitProvider, FilingYear, LarRecordSet, RecordSchema,
        ReferenceData,
    };

    use super::*;

    struct ByteSumProvider;

    impl CheckDigitProvider for ByteSumProvider {
        fn check_sequence(&self, prefix: &str) -> Result<String, CheckDigitError> {
            let sum: u32 = prefix.bytes().map(u32::from).sum();
            Ok(format!("{:02}", sum % 100))
        }
    }

    fn reference() -> ReferenceData {
        ReferenceData::new(
            BTreeMap::from([
                ("MD".to_string(), "24".to_string()),
                ("VA".to_string(), "51".to_string()),
            ]),
            BTreeSet::from(["24031700101".to_string()]),
            BTreeSet::from(["24031".to_string()]),
        )
        .unwrap()
    }

    fn lar_fields() -> Vec<&'static str> {
        vec![
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
        ]
    }

    /// One LAR row with clean baseline values, overridable per field.
    fn row(overrides: &[(&str, &str)]) -> hmda_core::LarRecord {
        let fields = lar_fields();
        let schema = RecordSchema::new(fields.clone()).unwrap();
        let mut values: BTreeMap<&str, String> = BTreeMap::from([
            ("record_id", "2".to_string()),
            ("lei", "BANK1LEIXXXXXXXXXXXX".to_string()),
            ("uli", "BANK1LEIXXXXXXXXXXXX123".to_string()),
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
        let ordered: Vec<String> = fields.iter().map(|f| values[f].clone()).collect();
        let set = LarRecordSet::new(schema, vec![ordered], 2).unwrap();
        set.get(0).unwrap().clone()
    }

    fn ctx_parts() -> (FilingYear, ReferenceData) {
        (FilingYear::new("2018").unwrap(), reference())
    }

    macro_rules! with_ctx {
        ($ctx:ident, $body:expr) => {{
            let (year, reference) = ctx_parts();
            let provider = ByteSumProvider;
            let $ctx = EvalContext {
                year: &year,
                reference: &reference,
                check_digit: &provider,
            };
            $body
        }};
    }

    #[test]
    fn catalog_names_are_unique() {
        let mut names: Vec<&str> = catalog().iter().map(|r| r.name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total, "duplicate edit names in catalog");
        assert_eq!(total, 53);
    }

    #[test]
    fn v610_2_is_a_biconditional() {
        with_ctx!(ctx, {
            // action 6 with a real date: fails.
            assert!(v610_2(&row(&[("action_taken", "6")]), &ctx).unwrap());
            // NA date without action 6: fails.
            assert!(v610_2(&row(&[("app_date", "NA")]), &ctx).unwrap());
            // Both sides agree: passes either way.
            assert!(!v610_2(&row(&[("action_taken", "6"), ("app_date", "NA")]), &ctx).unwrap());
            assert!(!v610_2(&row(&[]), &ctx).unwrap());
        });
    }

    #[test]
    fn v617_blank_amount_coerces_to_zero_and_fails() {
        with_ctx!(ctx, {
            assert!(v617(&row(&[("loan_amount", "")]), &ctx).unwrap());
            assert!(v617(&row(&[("loan_amount", "0")]), &ctx).unwrap());
            assert!(v617(&row(&[("loan_amount", "abc")]), &ctx).unwrap());
            assert!(!v617(&row(&[("loan_amount", "1")]), &ctx).unwrap());
        });
    }

    #[test]
    fn v623_rejects_unknown_state_and_na() {
        with_ctx!(ctx, {
            assert!(v623(&row(&[("state", "ZZ")]), &ctx).unwrap());
            assert!(v623(&row(&[("state", "NA")]), &ctx).unwrap());
            assert!(!v623(&row(&[("state", "VA")]), &ctx).unwrap());
        });
    }

    #[test]
    fn v609_round_trips_with_the_provider() {
        with_ctx!(ctx, {
            let prefix = "BANK1LEIXXXXXXXXXXXX1"; // 21 chars; suffix brings it to 23
            let suffix = ctx.check_digit.check_sequence(prefix).unwrap();
            let good = format!("{prefix}{suffix}");
            assert!(!v609(&row(&[("uli", &good)]), &ctx).unwrap());

            let bad_suffix = if suffix == "00" { "01" } else { "00" };
            let bad = format!("{prefix}{bad_suffix}");
            assert!(v609(&row(&[("uli", &bad)]), &ctx).unwrap());

            // Too short to carry a check sequence at all.
            assert!(v609(&row(&[("uli", "A")]), &ctx).unwrap());
        });
    }

    #[test]
    fn v608_accepts_both_regulatory_widths() {
        with_ctx!(ctx, {
            assert!(!v608(&row(&[("uli", &"A".repeat(23))]), &ctx).unwrap());
            assert!(!v608(&row(&[("uli", &"A".repeat(45))]), &ctx).unwrap());
            assert!(v608(&row(&[("uli", &"A".repeat(30))]), &ctx).unwrap());
            assert!(v608(&row(&[("uli", "")]), &ctx).unwrap());
        });
    }

    #[test]
    fn v619_date_consistency() {
        with_ctx!(ctx, {
            // Wrong year prefix.
            assert!(v619_2(&row(&[("action_date", "20170601")]), &ctx).unwrap());
            assert!(!v619_2(&row(&[]), &ctx).unwrap());
            // Action before application.
            assert!(v619_3(
                &row(&[("app_date", "20180601"), ("action_date", "20180101")]),
                &ctx
            )
            .unwrap());
            // NA application date disables the ordering check.
            assert!(!v619_3(
                &row(&[("app_date", "NA"), ("action_date", "20180101")]),
                &ctx
            )
            .unwrap());
        });
    }

    #[test]
    fn v627_matches_tract_prefix_to_county() {
        with_ctx!(ctx, {
            assert!(!v627(&row(&[]), &ctx).unwrap());
            assert!(v627(&row(&[("county", "51059")]), &ctx).unwrap());
            // Either side NA disables the combination check.
            assert!(!v627(&row(&[("county", "NA")]), &ctx).unwrap());
            assert!(!v627(&row(&[("tract", "NA")]), &ctx).unwrap());
            // Malformed short tract cannot match any county.
            assert!(v627(&row(&[("tract", "123")]), &ctx).unwrap());
        });
    }

    #[test]
    fn v625_2_consults_the_tract_table() {
        with_ctx!(ctx, {
            assert!(!v625_2(&row(&[]), &ctx).unwrap());
            assert!(v625_2(&row(&[("tract", "99999999999")]), &ctx).unwrap());
            assert!(!v625_2(&row(&[("tract", "NA")]), &ctx).unwrap());
        });
    }

    #[test]
    fn v606_treats_uncoercible_counts_as_failures() {
        with_ctx!(ctx, {
            let ts = |entries: &str| {
                let schema = RecordSchema::new(["lar_entries"]).unwrap();
                hmda_core::TransmittalSheet::new(schema, vec![entries.to_string()]).unwrap()
            };
            assert!(v606(&ts(""), &ctx).unwrap());
            assert!(v606(&ts("0"), &ctx).unwrap());
            assert!(v606(&ts("ten"), &ctx).unwrap());
            assert!(!v606(&ts("3"), &ctx).unwrap());
        });
    }

    #[test]
    fn preapproval_conditionals() {
        with_ctx!(ctx, {
            // v613_3: action 4 requires preapproval 2.
            assert!(v613_3(&row(&[("action_taken", "4")]), &ctx).unwrap());
            assert!(!v613_3(
                &row(&[("action_taken", "4"), ("preapproval", "2")]),
                &ctx
            )
            .unwrap());
            // v614_2: numeric affordable units requires preapproval 2.
            assert!(v614_2(&row(&[("affordable_units", "12")]), &ctx).unwrap());
            assert!(!v614_2(&row(&[]), &ctx).unwrap());
        });
    }
}
