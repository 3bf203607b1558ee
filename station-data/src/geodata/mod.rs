//! Overpass API client for station geodata.
//!
//! Queries OpenStreetMap for every node carrying a `ref:crs` tag and turns
//! the response into [`RawStationRecord`](crate::domain::RawStationRecord)s.

mod client;
mod error;
mod types;

pub use client::{OverpassClient, OverpassConfig, parse_response};
pub use error::GeodataError;
pub use types::{Element, OverpassResponse, raw_records};
