//! Code aliasing and name cleanup for geodata stations.
//!
//! The geodata source still tags some stations with deprecated or duplicate
//! codes, and qualifies some names with a platform level ("High Level",
//! "Low Level") that the output should not carry.

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::debug;

use crate::domain::{NormalizedStationRecord, RawStationRecord};

/// Deprecated or duplicate code → the canonical code for the same station.
///
/// Records under a key are dropped; the canonical code's own record supplies
/// the station.
static EXTRANEOUS_CODES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| HashMap::from([("EBF", "EBD"), ("SPL", "STP")]));

/// Trailing qualifiers removed from station names, matched case-insensitively.
const NAME_SUFFIXES: &[&str] = &["high level", "low level"];

/// Returns the canonical code if `code` is a known alias.
pub fn canonical_code(code: &str) -> Option<&'static str> {
    EXTRANEOUS_CODES.get(code).copied()
}

/// Strip the configured trailing qualifiers from a station name.
///
/// Only a suffix is removed; a qualifier in the middle of the name is left
/// alone. Whitespace around the remainder is trimmed after each removal.
pub fn strip_name_suffixes(name: &str) -> String {
    let mut name = name;
    for suffix in NAME_SUFFIXES {
        if let Some(stripped) = strip_suffix_ignore_ascii_case(name, suffix) {
            name = stripped.trim();
        }
    }
    name.to_string()
}

fn strip_suffix_ignore_ascii_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    if !s.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = s.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

/// Normalize one geodata record, or `None` if it should be dropped.
pub fn normalize(record: RawStationRecord) -> Option<NormalizedStationRecord> {
    if let Some(canonical) = canonical_code(&record.code) {
        debug!(code = %record.code, canonical, "Dropping aliased station code");
        return None;
    }

    Some(NormalizedStationRecord {
        name: strip_name_suffixes(&record.raw_name),
        code: record.code,
        lat: record.lat,
        lon: record.lon,
    })
}

/// Normalize a batch of geodata records, dropping aliased codes.
pub fn normalize_all(
    records: impl IntoIterator<Item = RawStationRecord>,
) -> Vec<NormalizedStationRecord> {
    records.into_iter().filter_map(normalize).collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A trailing qualifier in any case is removed and the prefix kept
        #[test]
        fn strips_any_case_suffix(
            prefix in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]",
            suffix in "[hH][iI][gG][hH] [lL][eE][vV][eE][lL]",
        ) {
            let name = format!("{prefix} {suffix}");
            prop_assert_eq!(strip_name_suffixes(&name), prefix.trim().to_string());
        }

        /// Every aliased code is dropped regardless of name
        #[test]
        fn alias_keys_always_dropped(idx in 0usize..2, name in ".{0,20}") {
            let code = *EXTRANEOUS_CODES.keys().nth(idx).unwrap();
            let record = RawStationRecord {
                code: code.to_string(),
                lat: 0.0,
                lon: 0.0,
                raw_name: name,
            };
            prop_assert!(normalize(record).is_none());
        }
    }
}
