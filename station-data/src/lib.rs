//! Station data builder.
//!
//! Builds a CRS code → coordinates and name lookup by combining station
//! nodes from OpenStreetMap with the canonical names printed in the
//! station index PDF.

pub mod domain;
pub mod error;
pub mod geodata;
pub mod merge;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod station_index;

pub use error::Error;
