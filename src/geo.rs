//! # Geographic primitives
//!
//! Points are latitude/longitude pairs in degrees, each tagged with one of
//! three ordered visiting tiers.

use std::fmt;

use crate::error::{Result, TourError};

/// Mean Earth radius in kilometres (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A geographic position in decimal degrees.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Bit pattern of the coordinate, usable as a hash key.
    pub(crate) fn key(&self) -> (u64, u64) {
        (self.latitude.to_bits(), self.longitude.to_bits())
    }

    /// Great-circle distance to `other` in kilometres (haversine formula).
    pub fn haversine_km(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        // Rounding can push `a` marginally above 1 for antipodal points.
        let c = 2.0 * a.sqrt().min(1.0).asin();
        EARTH_RADIUS_KM * c
    }
}

/// Visiting tier of a point. Every tier-1 point is visited before any tier-2
/// point, and every tier-2 point before any tier-3 point.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Tier1,
    Tier2,
    Tier3,
}

impl Priority {
    /// All tiers in visiting order.
    pub const ALL: [Priority; 3] = [Priority::Tier1, Priority::Tier2, Priority::Tier3];

    /// Numeric tier value, 1 to 3.
    pub fn level(self) -> u8 {
        match self {
            Priority::Tier1 => 1,
            Priority::Tier2 => 2,
            Priority::Tier3 => 3,
        }
    }

    /// Position of the tier in [`Priority::ALL`].
    pub(crate) fn rank(self) -> usize {
        self.level() as usize - 1
    }
}

impl TryFrom<u8> for Priority {
    type Error = TourError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Priority::Tier1),
            2 => Ok(Priority::Tier2),
            3 => Ok(Priority::Tier3),
            other => Err(TourError::InvalidInput(format!(
                "Priority must be 1, 2 or 3, got {}",
                other
            ))),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.level()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.level())
    }
}
