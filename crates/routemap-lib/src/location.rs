//! Canonical geographic coordinates.
//!
//! A [`Location`] is validated against the Web-Mercator world bounds and
//! rounded to five decimal places when constructed. The rounded values are
//! stored as integer hundred-thousandths of a degree so equality, hashing and
//! ordering are exact.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

pub const MIN_LNG: f64 = -180.0;
pub const MAX_LNG: f64 = 180.0;
pub const MIN_LAT: f64 = -85.05115;
pub const MAX_LAT: f64 = 85.0;

/// Number of canonical units per degree (five decimal digits).
const SCALE: f64 = 100_000.0;

/// Bounds-checked coordinate with five decimal digits of precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    lng_e5: i64,
    lat_e5: i64,
}

impl Location {
    /// Validate and canonicalize a longitude/latitude pair.
    pub fn new(lng: f64, lat: f64) -> Result<Self> {
        if !lng.is_finite()
            || !lat.is_finite()
            || !(MIN_LNG..=MAX_LNG).contains(&lng)
            || !(MIN_LAT..=MAX_LAT).contains(&lat)
        {
            return Err(Error::InvalidCoordinate { lng, lat });
        }

        Ok(Self {
            lng_e5: canonicalize(lng),
            lat_e5: canonicalize(lat),
        })
    }

    pub fn lng(&self) -> f64 {
        self.lng_e5 as f64 / SCALE
    }

    pub fn lat(&self) -> f64 {
        self.lat_e5 as f64 / SCALE
    }
}

// `f64::round` rounds half away from zero.
fn canonicalize(value: f64) -> i64 {
    (value * SCALE).round() as i64
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lng(), self.lat())
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for Location {
    type Err = Error;

    /// Parse a `lng,lat` pair.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::LocationSyntax {
            input: s.to_string(),
        };
        let (lng, lat) = s.split_once(',').ok_or_else(malformed)?;
        let lng = lng.trim().parse::<f64>().map_err(|_| malformed())?;
        let lat = lat.trim().parse::<f64>().map_err(|_| malformed())?;
        Location::new(lng, lat)
    }
}
