//! # Reference Data
//!
//! Static lookup tables the geography edits consult: the two-letter
//! state/territory code → two-digit FIPS mapping, the set of valid
//! census tract numbers, and the set of valid county FIPS codes.
//!
//! The tables are caller-supplied (they change on the Census Bureau's
//! schedule, not this crate's) and immutable for the lifetime of an
//! evaluation run. `BTreeMap`/`BTreeSet` keep serialization
//! deterministic.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::ReferenceDataError;

/// Read-only reference tables for one evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceData {
    state_codes: BTreeMap<String, String>,
    tracts: BTreeSet<String>,
    counties: BTreeSet<String>,
}

impl ReferenceData {
    /// Build reference data from caller-supplied tables.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDataError::EmptyStateCodes`] when the state
    /// table is empty — a run without reference data is a structural
    /// failure, not a stream of edit failures.
    pub fn new(
        state_codes: BTreeMap<String, String>,
        tracts: BTreeSet<String>,
        counties: BTreeSet<String>,
    ) -> Result<Self, ReferenceDataError> {
        if state_codes.is_empty() {
            return Err(ReferenceDataError::EmptyStateCodes);
        }
        Ok(Self {
            state_codes,
            tracts,
            counties,
        })
    }

    /// True when `code` is a known two-letter state or territory code.
    pub fn is_known_state(&self, code: &str) -> bool {
        self.state_codes.contains_key(code)
    }

    /// The two-digit FIPS code for a state, if known.
    pub fn state_fips(&self, code: &str) -> Option<&str> {
        self.state_codes.get(code).map(String::as_str)
    }

    /// True when `tract` is a valid census tract number.
    pub fn is_known_tract(&self, tract: &str) -> bool {
        self.tracts.contains(tract)
    }

    /// True when `county` is a valid five-digit county FIPS code.
    pub fn is_known_county(&self, county: &str) -> bool {
        self.counties.contains(county)
    }

    /// Number of entries in the state-code table.
    pub fn state_count(&self) -> usize {
        self.state_codes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReferenceData {
        let states = BTreeMap::from([
            ("MD".to_string(), "24".to_string()),
            ("VA".to_string(), "51".to_string()),
        ]);
        let tracts = BTreeSet::from(["24031700101".to_string()]);
        let counties = BTreeSet::from(["24031".to_string()]);
        ReferenceData::new(states, tracts, counties).unwrap()
    }

    #[test]
    fn lookups_hit_and_miss() {
        let refdata = sample();
        assert!(refdata.is_known_state("MD"));
        assert!(!refdata.is_known_state("ZZ"));
        assert_eq!(refdata.state_fips("VA"), Some("51"));
        assert!(refdata.is_known_tract("24031700101"));
        assert!(!refdata.is_known_tract("99999999999"));
        assert!(refdata.is_known_county("24031"));
        assert!(!refdata.is_known_county("00000"));
    }

    #[test]
    fn empty_state_table_is_structural() {
        let err = ReferenceData::new(BTreeMap::new(), BTreeSet::new(), BTreeSet::new())
            .unwrap_err();
        assert_eq!(err, ReferenceDataError::EmptyStateCodes);
    }

    #[test]
    fn tables_round_trip_through_json() {
        let refdata = sample();
        let json = serde_json::to_string(&refdata).unwrap();
        let back: ReferenceData = serde_json::from_str(&json).unwrap();
        assert!(back.is_known_state("MD"));
        assert_eq!(back.state_count(), 2);
    }
}
