//! Request Value Types
//!
//! Immutable values describing *where*, *when* and *what* a fusion request
//! covers. Constructors validate; serde deserialization does not, so values
//! arriving over the wire are checked with `validate()` at the entry point.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::errors::{DatasetError, InputError, InputResult};

/// Geographic point of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in decimal degrees, [-90, 90]
    pub lat: f64,
    /// Longitude in decimal degrees, [-180, 180]
    pub lon: f64,
    /// Optional human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl GeoLocation {
    /// Create a validated location
    pub fn new(lat: f64, lon: f64) -> InputResult<Self> {
        let location = Self { lat, lon, name: None };
        location.validate()?;
        Ok(location)
    }

    /// Attach a display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Check coordinate bounds
    pub fn validate(&self) -> InputResult<()> {
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(InputError::NonFiniteCoordinate);
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(InputError::LatitudeOutOfRange { value: self.lat });
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(InputError::LongitudeOutOfRange { value: self.lon });
        }
        Ok(())
    }

    /// Bounding box `(west, south, east, north)` around the point
    ///
    /// Used by sources whose upstream APIs query by area rather than point.
    pub fn bbox(&self, offset_deg: f64) -> (f64, f64, f64, f64) {
        (
            self.lon - offset_deg,
            self.lat - offset_deg,
            self.lon + offset_deg,
            self.lat + offset_deg,
        )
    }
}

/// Closed time window with timezone-aware endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    /// Window start
    pub start: DateTime<FixedOffset>,
    /// Window end, never before `start`
    pub end: DateTime<FixedOffset>,
}

impl DateRange {
    /// Create a validated range
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> InputResult<Self> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    /// Check ordering
    pub fn validate(&self) -> InputResult<()> {
        if self.start > self.end {
            return Err(InputError::ReversedDateRange);
        }
        Ok(())
    }

    /// Whole days covered by the window
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Supported remote-sensing datasets
///
/// The set is fixed; anything else is rejected at the acquisition boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetId {
    /// SMAP L3 surface soil moisture
    SmapL3,
    /// SMAP L4 root-zone soil moisture
    SmapL4,
    /// MODIS vegetation indices (NDVI, EVI)
    ModisVegetation,
    /// MODIS land-surface temperature
    ModisLst,
    /// GPM IMERG precipitation
    Gpm,
    /// ECOSTRESS evapotranspiration
    Ecostress,
    /// GRACE groundwater anomaly
    Grace,
    /// Landsat multispectral (NDVI, NDWI)
    Landsat,
}

impl DatasetId {
    /// Every supported dataset, in canonical order
    pub const ALL: [DatasetId; 8] = [
        DatasetId::SmapL3,
        DatasetId::SmapL4,
        DatasetId::ModisVegetation,
        DatasetId::ModisLst,
        DatasetId::Gpm,
        DatasetId::Ecostress,
        DatasetId::Grace,
        DatasetId::Landsat,
    ];

    /// Wire identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            DatasetId::SmapL3 => "smap_l3",
            DatasetId::SmapL4 => "smap_l4",
            DatasetId::ModisVegetation => "modis_vegetation",
            DatasetId::ModisLst => "modis_lst",
            DatasetId::Gpm => "gpm",
            DatasetId::Ecostress => "ecostress",
            DatasetId::Grace => "grace",
            DatasetId::Landsat => "landsat",
        }
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetId {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatasetId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DatasetError::Unknown { name: s.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_location_bounds() {
        assert!(GeoLocation::new(40.7128, -74.0060).is_ok());
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert_eq!(
            GeoLocation::new(90.5, 0.0),
            Err(InputError::LatitudeOutOfRange { value: 90.5 })
        );
        assert_eq!(
            GeoLocation::new(0.0, -180.1),
            Err(InputError::LongitudeOutOfRange { value: -180.1 })
        );
        assert_eq!(GeoLocation::new(f64::NAN, 0.0), Err(InputError::NonFiniteCoordinate));
    }

    #[test]
    fn test_bbox() {
        let loc = GeoLocation::new(10.0, 20.0).unwrap().with_name("Plot 7");
        let (w, s, e, n) = loc.bbox(0.1);
        assert!((w - 19.9).abs() < 1e-9);
        assert!((s - 9.9).abs() < 1e-9);
        assert!((e - 20.1).abs() < 1e-9);
        assert!((n - 10.1).abs() < 1e-9);
        assert_eq!(loc.name.as_deref(), Some("Plot 7"));
    }

    #[test]
    fn test_date_range_ordering() {
        let start = ts("2024-01-01T00:00:00Z");
        let end = ts("2024-01-31T23:59:59Z");
        let range = DateRange::new(start, end).unwrap();
        assert_eq!(range.days(), 30);
        assert_eq!(DateRange::new(end, start), Err(InputError::ReversedDateRange));
        // Single instant is a valid range
        assert!(DateRange::new(start, start).is_ok());
    }

    #[test]
    fn test_dataset_id_round_trip_names() {
        for id in DatasetId::ALL {
            assert_eq!(id.as_str().parse::<DatasetId>(), Ok(id));
        }
        assert!(matches!(
            "sentinel_2".parse::<DatasetId>(),
            Err(DatasetError::Unknown { .. })
        ));
        // Ids are case-sensitive wire identifiers
        assert!("SMAP_L3".parse::<DatasetId>().is_err());
    }
}
