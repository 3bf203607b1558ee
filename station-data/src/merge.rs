//! Combine geodata stations with station index names.

use tracing::debug;

use crate::domain::{Crs, NormalizedStationRecord, StationMapping, StationRecord};
use crate::station_index::CodeNameTable;

/// Build the output mapping.
///
/// Every geodata record becomes one entry keyed by its code; a later record
/// with the same code replaces an earlier one. Where the station index has
/// a name for the code, that name replaces the geodata name. Coordinates
/// always come from the geodata, and codes known only to the station index
/// are not added.
pub fn merge(
    records: impl IntoIterator<Item = NormalizedStationRecord>,
    names: &CodeNameTable,
) -> StationMapping {
    let mut mapping = StationMapping::new();
    let mut overridden = 0usize;

    for record in records {
        let index_name = Crs::parse(&record.code)
            .ok()
            .and_then(|crs| names.get(&crs));

        let name = match index_name {
            Some(name) => {
                overridden += 1;
                name.to_string()
            }
            None => record.name,
        };

        mapping.insert(
            record.code,
            StationRecord {
                lat: record.lat,
                lon: record.lon,
                name,
            },
        );
    }

    debug!(
        stations = mapping.len(),
        overridden, "merged station index names"
    );
    mapping
}
