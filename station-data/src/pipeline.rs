//! End-to-end station data build.

use std::path::PathBuf;

use tracing::info;

use crate::domain::{RawStationRecord, StationMapping};
use crate::error::Error;
use crate::geodata::{OverpassClient, OverpassConfig};
use crate::merge::merge;
use crate::normalize::normalize_all;
use crate::output::{DEFAULT_OUTPUT_PATH, StationDataFile};
use crate::station_index::{CodeNameTable, PositionedFragment, read_pages};

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Station index PDF
    pub document: PathBuf,
    pub overpass: OverpassConfig,
    /// Where the mapping is written
    pub output: PathBuf,
}

impl RunConfig {
    /// Defaults for everything except the station index path.
    pub fn new(document: impl Into<PathBuf>) -> Self {
        Self {
            document: document.into(),
            overpass: OverpassConfig::default(),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_overpass(mut self, overpass: OverpassConfig) -> Self {
        self.overpass = overpass;
        self
    }
}

/// Build the mapping from geodata records and station index pages.
pub fn build_mapping<P>(
    records: impl IntoIterator<Item = RawStationRecord>,
    pages: impl IntoIterator<Item = P>,
) -> StationMapping
where
    P: AsRef<[PositionedFragment]>,
{
    let normalized = normalize_all(records);
    info!(stations = normalized.len(), "Normalized geodata");

    let names = CodeNameTable::from_pages(pages);
    info!(entries = names.len(), "Extracted station index");

    merge(normalized, &names)
}

/// Fetch geodata, read the station index, and write the mapping.
///
/// Nothing is written unless every step before it succeeded.
pub async fn run(config: &RunConfig) -> Result<StationMapping, Error> {
    let client = OverpassClient::new(config.overpass.clone())?;
    let records = client.fetch_stations().await?;

    let pages = read_pages(&config.document)?;
    let mapping = build_mapping(records, &pages);

    StationDataFile::new(&config.output).save(&mapping)?;
    Ok(mapping)
}
