use crate::core::constants::{MAX_SCALE_PERCENT, MAX_ZOOM, MIN_ZOOM, SCALE_CONVERSION};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Latitude bounds in degrees
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;

/// Longitude bounds in degrees
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate without validation
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate, rejecting non-finite or out-of-range values
    pub fn try_new(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(MapError::InvalidCoordinate(format!(
                "{lat}, {lng} is not a real number"
            )));
        }
        let coord = Self::new(lat, lng);
        if !coord.is_valid() {
            return Err(MapError::InvalidCoordinate(format!(
                "{lat}, {lng} is outside [-90, 90] x [-180, 180]"
            )));
        }
        Ok(coord)
    }

    /// Parses a coordinate from separate latitude and longitude strings
    pub fn parse(lat: &str, lng: &str) -> Result<Self> {
        let lat = parse_degrees(lat, "latitude")?;
        let lng = parse_degrees(lng, "longitude")?;
        Self::try_new(lat, lng)
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        (MIN_LATITUDE..=MAX_LATITUDE).contains(&self.lat)
            && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.lng)
    }

    /// Clamps latitude to valid range
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(MIN_LATITUDE, MAX_LATITUDE)
    }

    /// Clamps longitude to valid range
    pub fn clamp_lng(lng: f64) -> f64 {
        lng.clamp(MIN_LONGITUDE, MAX_LONGITUDE)
    }

    /// Returns a copy moved by the given degrees, saturating at the map edge
    pub fn offset_clamped(&self, d_lat: f64, d_lng: f64) -> Self {
        Self::new(
            Self::clamp_lat(self.lat + d_lat),
            Self::clamp_lng(self.lng + d_lng),
        )
    }

    /// Provider ordering: longitude first
    pub fn to_lon_lat_string(&self) -> String {
        format!("{},{}", self.lng, self.lat)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

fn parse_degrees(text: &str, axis: &str) -> Result<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(MapError::InvalidCoordinate(format!("{axis} is empty")));
    }
    text.parse::<f64>()
        .map_err(|_| MapError::InvalidCoordinate(format!("{axis} '{text}' is not a number")))
}

/// Integer zoom level, always inside `[MIN_ZOOM, MAX_ZOOM]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "u8")]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    pub const MIN: ZoomLevel = ZoomLevel(MIN_ZOOM);
    pub const MAX: ZoomLevel = ZoomLevel(MAX_ZOOM);

    /// Clamps any integer into the supported range
    pub fn clamped(z: i32) -> Self {
        Self(z.clamp(MIN_ZOOM as i32, MAX_ZOOM as i32) as u8)
    }

    /// Converts a legacy 0-100 scale percent into a zoom level
    pub fn from_percent(percent: f64) -> Result<Self> {
        if !percent.is_finite() {
            return Err(MapError::InvalidScale(format!(
                "{percent} is not a number"
            )));
        }
        if !(0.0..=MAX_SCALE_PERCENT).contains(&percent) {
            return Err(MapError::InvalidScale(format!(
                "{percent} is outside 0-{MAX_SCALE_PERCENT}%"
            )));
        }
        Ok(Self::clamped((SCALE_CONVERSION * percent).floor() as i32))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// One level closer to street view, saturating at the maximum
    pub fn increment(self) -> Self {
        Self::clamped(self.0 as i32 + 1)
    }

    /// One level closer to world view, saturating at zero
    pub fn decrement(self) -> Self {
        Self::clamped(self.0 as i32 - 1)
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(crate::core::constants::DEFAULT_ZOOM)
    }
}

impl From<i32> for ZoomLevel {
    fn from(z: i32) -> Self {
        Self::clamped(z)
    }
}

impl From<ZoomLevel> for u8 {
    fn from(z: ZoomLevel) -> Self {
        z.0
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
