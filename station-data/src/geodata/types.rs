//! Overpass response types.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::RawStationRecord;

/// Tag holding the station's CRS code.
const CRS_TAG: &str = "ref:crs";

/// Tag holding the station's display name.
const NAME_TAG: &str = "name";

/// Top-level Overpass JSON response.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// A single OSM element. Only the fields needed for stations are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Element {
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl Element {
    /// Convert to a raw station record, or `None` if the element has no CRS tag.
    pub fn to_raw_record(&self) -> Option<RawStationRecord> {
        let code = self.tags.get(CRS_TAG)?;

        Some(RawStationRecord {
            code: code.clone(),
            lat: self.lat,
            lon: self.lon,
            raw_name: self.tags.get(NAME_TAG).cloned().unwrap_or_default(),
        })
    }
}

/// Raw station records for every element that carries a CRS tag.
pub fn raw_records(elements: &[Element]) -> Vec<RawStationRecord> {
    elements.iter().filter_map(Element::to_raw_record).collect()
}
