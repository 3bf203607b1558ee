//! Station data file: writing the mapping and looking stations up in it.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{StationMapping, StationRecord};

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "stationData.json";

/// Errors reading or writing the station data file.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to create directory for {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid station data JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The station data file on disk.
#[derive(Debug, Clone)]
pub struct StationDataFile {
    path: PathBuf,
}

impl StationDataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write the mapping as a JSON object keyed by code.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, mapping: &StationMapping) -> Result<(), OutputError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
                path: self.path.clone(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(mapping)?;

        std::fs::write(&self.path, json).map_err(|source| OutputError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), stations = mapping.len(), "Wrote station data");
        Ok(())
    }

    /// Read a previously written mapping.
    pub fn load(&self) -> Result<StationMapping, OutputError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| OutputError::Read {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for StationDataFile {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_PATH)
    }
}

/// Read-only station lookup over a written mapping.
#[derive(Debug, Clone, Default)]
pub struct StationData {
    stations: StationMapping,
}

impl StationData {
    pub fn new(stations: StationMapping) -> Self {
        Self { stations }
    }

    /// Load the lookup from a station data file.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, OutputError> {
        StationDataFile::new(path).load().map(Self::new)
    }

    /// Display name for a code, or the code itself when it is unknown.
    pub fn name<'a>(&'a self, code: &'a str) -> &'a str {
        self.stations
            .get(code)
            .map(|s| s.name.as_str())
            .unwrap_or(code)
    }

    /// Full record for a code.
    pub fn detail(&self, code: &str) -> Option<&StationRecord> {
        self.stations.get(code)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
