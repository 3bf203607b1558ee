//! Crate-level error type.

use crate::geodata::GeodataError;
use crate::output::OutputError;
use crate::station_index::IndexError;

/// Any failure that aborts a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("geodata: {0}")]
    Geodata(#[from] GeodataError),

    #[error("station index: {0}")]
    Index(#[from] IndexError),

    #[error("output: {0}")]
    Output(#[from] OutputError),
}
