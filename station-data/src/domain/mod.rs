//! Domain types for station data.
//!
//! Station codes are validated at construction time; the record types
//! describe each stage a station passes through on its way to the output
//! mapping.

mod station;

pub use station::{
    Crs, InvalidCrs, NormalizedStationRecord, RawStationRecord, StationMapping, StationRecord,
};
