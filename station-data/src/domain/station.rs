//! Station code and record types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid CRS code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CRS code: {reason}")]
pub struct InvalidCrs {
    reason: &'static str,
}

/// A valid 3-letter CRS (Computer Reservation System) station code.
///
/// CRS codes are always 3 uppercase ASCII letters. This type guarantees
/// that any `Crs` value is valid by construction.
///
/// # Examples
///
/// ```
/// use station_data::domain::Crs;
///
/// let stp = Crs::parse("STP").unwrap();
/// assert_eq!(stp.as_str(), "STP");
///
/// // Lowercase is rejected
/// assert!(Crs::parse("stp").is_err());
///
/// // Only the leading letters matter for a prefix match
/// assert_eq!(Crs::from_prefix("STPX"), Some(stp));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Crs([u8; 3]);

impl Crs {
    /// Parse a CRS code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidCrs> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidCrs {
                reason: "must be exactly 3 characters",
            });
        }

        Self::from_prefix(s).ok_or(InvalidCrs {
            reason: "must be uppercase ASCII letters A-Z",
        })
    }

    /// Take a CRS code from the first three characters of `s`.
    ///
    /// Anything after the third letter is ignored. Returns `None` when `s`
    /// is shorter than three bytes or does not start with three uppercase
    /// ASCII letters.
    pub fn from_prefix(s: &str) -> Option<Self> {
        match s.as_bytes() {
            [a, b, c, ..] if [a, b, c].iter().all(|x| x.is_ascii_uppercase()) => {
                Some(Crs([*a, *b, *c]))
            }
            _ => None,
        }
    }

    /// Returns the CRS code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Crs({})", self.as_str())
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A station as reported by the geodata source.
///
/// The code is kept verbatim: the geodata source is free-form and may carry
/// values that are not valid CRS codes.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStationRecord {
    pub code: String,
    pub lat: f64,
    pub lon: f64,
    pub raw_name: String,
}

/// A geodata station after alias filtering and name cleanup.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedStationRecord {
    pub code: String,
    pub lat: f64,
    pub lon: f64,
    pub name: String,
}

/// One entry of the output mapping. The code is the mapping key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
}

/// The final code → station mapping.
pub type StationMapping = BTreeMap<String, StationRecord>;
