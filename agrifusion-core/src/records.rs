//! Per-Dataset Record Types
//!
//! ## Overview
//!
//! Each supported dataset has its own record struct carrying the product's
//! named fields. Typed records replace string-keyed maps so a misspelled
//! field is a decode error at the acquisition boundary instead of a silent
//! fallback deep inside an index computation.
//!
//! ## Wire Format
//!
//! Records travel adjacently tagged:
//!
//! ```text
//! {
//!   "dataset": "smap_l3",
//!   "data": { "surface_moisture": 0.21, "quality_flag": "good", "uncertainty": 0.08 }
//! }
//! ```
//!
//! Every field is optional. Unknown keys inside `data` are rejected.
//!
//! ## Fallbacks
//!
//! Accessors on [`RawDataMap`] return `Option`s; index computations apply the
//! documented defaults from [`crate::constants::fallbacks`] when a dataset is
//! absent or a field is missing.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::errors::DatasetError;
use crate::quality::QualityFlag;
use crate::types::DatasetId;

/// SMAP soil moisture retrieval (L3 surface or L4 root-zone)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SoilMoistureRecord {
    /// Surface (0-5 cm) volumetric moisture, m³/m³
    pub surface_moisture: Option<f64>,
    /// Root-zone (0-100 cm) volumetric moisture, m³/m³
    pub root_zone_moisture: Option<f64>,
    /// Soil temperature, °C
    pub soil_temperature: Option<f64>,
    /// Retrieval quality flag
    pub quality_flag: Option<QualityFlag>,
    /// Retrieval uncertainty, m³/m³
    pub uncertainty: Option<f64>,
}

/// MODIS vegetation indices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VegetationRecord {
    /// Normalized Difference Vegetation Index
    pub ndvi: Option<f64>,
    /// Enhanced Vegetation Index
    pub evi: Option<f64>,
    /// Pixel reliability rank: 0 good, 1 marginal, 2 snow/ice, 3 cloudy
    pub pixel_reliability: Option<u8>,
    /// Aerosol optical depth at 550 nm
    pub aerosol_optical_depth: Option<f64>,
    /// Composite day of year
    pub composite_day: Option<u16>,
    /// Retrieval quality flag
    pub quality_flag: Option<QualityFlag>,
}

/// MODIS land-surface temperature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandSurfaceTemperatureRecord {
    /// Daytime LST, °C
    pub day_lst: Option<f64>,
    /// Night-time LST, °C
    pub night_lst: Option<f64>,
    /// Broadband emissivity
    pub emissivity: Option<f64>,
    /// Retrieval quality flag
    pub quality_flag: Option<QualityFlag>,
}

/// GPM IMERG precipitation with near-surface wind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrecipitationRecord {
    /// Instantaneous rate, mm/hour
    pub precipitation_rate: Option<f64>,
    /// Calibrated accumulation over the window, mm
    pub precipitation_cal: Option<f64>,
    /// Probability of liquid precipitation, [0, 1]
    pub probability_of_precipitation: Option<f64>,
    /// Near-surface wind speed, m/s
    pub wind_speed: Option<f64>,
    /// Retrieval quality flag
    pub quality_flag: Option<QualityFlag>,
}

/// ECOSTRESS evapotranspiration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvapotranspirationRecord {
    /// Actual ET, mm/day
    pub et_actual: Option<f64>,
    /// Potential ET, mm/day
    pub et_potential: Option<f64>,
    /// Land-surface temperature at overpass, °C
    pub land_surface_temperature: Option<f64>,
    /// Retrieval quality flag
    pub quality_flag: Option<QualityFlag>,
}

/// GRACE terrestrial water storage anomalies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroundwaterRecord {
    /// Groundwater anomaly, cm equivalent water height
    pub groundwater_anomaly: Option<f64>,
    /// Soil moisture anomaly, cm
    pub soil_moisture_anomaly: Option<f64>,
    /// Total water storage anomaly, cm
    pub total_water_storage_anomaly: Option<f64>,
    /// Retrieval quality flag
    pub quality_flag: Option<QualityFlag>,
    /// Anomaly uncertainty, cm
    pub uncertainty: Option<f64>,
}

/// Landsat multispectral indices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultispectralRecord {
    /// Normalized Difference Vegetation Index
    pub ndvi: Option<f64>,
    /// Normalized Difference Water Index
    pub ndwi: Option<f64>,
    /// Surface temperature, °C
    pub surface_temperature: Option<f64>,
    /// Scene cloud cover, %
    pub cloud_cover: Option<f64>,
    /// Retrieval quality flag
    pub quality_flag: Option<QualityFlag>,
}

/// One dataset's record for the requested location and window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dataset", content = "data", rename_all = "snake_case")]
pub enum RawRecord {
    /// SMAP L3
    SmapL3(SoilMoistureRecord),
    /// SMAP L4
    SmapL4(SoilMoistureRecord),
    /// MODIS vegetation
    ModisVegetation(VegetationRecord),
    /// MODIS LST
    ModisLst(LandSurfaceTemperatureRecord),
    /// GPM
    Gpm(PrecipitationRecord),
    /// ECOSTRESS
    Ecostress(EvapotranspirationRecord),
    /// GRACE
    Grace(GroundwaterRecord),
    /// Landsat
    Landsat(MultispectralRecord),
}

impl RawRecord {
    /// Dataset this record belongs to
    pub fn dataset(&self) -> DatasetId {
        match self {
            RawRecord::SmapL3(_) => DatasetId::SmapL3,
            RawRecord::SmapL4(_) => DatasetId::SmapL4,
            RawRecord::ModisVegetation(_) => DatasetId::ModisVegetation,
            RawRecord::ModisLst(_) => DatasetId::ModisLst,
            RawRecord::Gpm(_) => DatasetId::Gpm,
            RawRecord::Ecostress(_) => DatasetId::Ecostress,
            RawRecord::Grace(_) => DatasetId::Grace,
            RawRecord::Landsat(_) => DatasetId::Landsat,
        }
    }

    /// Quality flag carried by the record, if any
    pub fn quality_flag(&self) -> Option<&QualityFlag> {
        match self {
            RawRecord::SmapL3(r) | RawRecord::SmapL4(r) => r.quality_flag.as_ref(),
            RawRecord::ModisVegetation(r) => r.quality_flag.as_ref(),
            RawRecord::ModisLst(r) => r.quality_flag.as_ref(),
            RawRecord::Gpm(r) => r.quality_flag.as_ref(),
            RawRecord::Ecostress(r) => r.quality_flag.as_ref(),
            RawRecord::Grace(r) => r.quality_flag.as_ref(),
            RawRecord::Landsat(r) => r.quality_flag.as_ref(),
        }
    }

    /// Reported retrieval uncertainty, for products that carry one
    pub fn uncertainty(&self) -> Option<f64> {
        match self {
            RawRecord::SmapL3(r) | RawRecord::SmapL4(r) => r.uncertainty,
            RawRecord::Grace(r) => r.uncertainty,
            _ => None,
        }
    }

    /// Reject NaN and infinite values
    pub fn validate(&self) -> Result<(), DatasetError> {
        let dataset = self.dataset();
        let fields: Vec<(&'static str, Option<f64>)> = match self {
            RawRecord::SmapL3(r) | RawRecord::SmapL4(r) => vec![
                ("surface_moisture", r.surface_moisture),
                ("root_zone_moisture", r.root_zone_moisture),
                ("soil_temperature", r.soil_temperature),
                ("uncertainty", r.uncertainty),
            ],
            RawRecord::ModisVegetation(r) => vec![
                ("ndvi", r.ndvi),
                ("evi", r.evi),
                ("aerosol_optical_depth", r.aerosol_optical_depth),
            ],
            RawRecord::ModisLst(r) => vec![
                ("day_lst", r.day_lst),
                ("night_lst", r.night_lst),
                ("emissivity", r.emissivity),
            ],
            RawRecord::Gpm(r) => vec![
                ("precipitation_rate", r.precipitation_rate),
                ("precipitation_cal", r.precipitation_cal),
                ("probability_of_precipitation", r.probability_of_precipitation),
                ("wind_speed", r.wind_speed),
            ],
            RawRecord::Ecostress(r) => vec![
                ("et_actual", r.et_actual),
                ("et_potential", r.et_potential),
                ("land_surface_temperature", r.land_surface_temperature),
            ],
            RawRecord::Grace(r) => vec![
                ("groundwater_anomaly", r.groundwater_anomaly),
                ("soil_moisture_anomaly", r.soil_moisture_anomaly),
                ("total_water_storage_anomaly", r.total_water_storage_anomaly),
                ("uncertainty", r.uncertainty),
            ],
            RawRecord::Landsat(r) => vec![
                ("ndvi", r.ndvi),
                ("ndwi", r.ndwi),
                ("surface_temperature", r.surface_temperature),
                ("cloud_cover", r.cloud_cover),
            ],
        };

        match fields.iter().find(|(_, v)| v.map_or(false, |v| !v.is_finite())) {
            Some((field, _)) => Err(DatasetError::NonFiniteField { dataset, field }),
            None => Ok(()),
        }
    }
}

/// Records that survived acquisition, keyed by dataset
///
/// Absence of a key means the dataset was not requested or permanently
/// failed. The map is read-only once acquisition hands it over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDataMap {
    records: BTreeMap<DatasetId, RawRecord>,
}

impl RawDataMap {
    /// Empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its own dataset id, replacing any previous one
    pub fn insert(&mut self, record: RawRecord) -> Option<RawRecord> {
        self.records.insert(record.dataset(), record)
    }

    /// Builder-style insert
    pub fn with(mut self, record: RawRecord) -> Self {
        self.insert(record);
        self
    }

    /// Record for a dataset
    pub fn get(&self, dataset: DatasetId) -> Option<&RawRecord> {
        self.records.get(&dataset)
    }

    /// Whether a dataset is present
    pub fn contains(&self, dataset: DatasetId) -> bool {
        self.records.contains_key(&dataset)
    }

    /// Number of present datasets
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no dataset is present
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Present records in canonical dataset order
    pub fn iter(&self) -> impl Iterator<Item = (DatasetId, &RawRecord)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    /// SMAP L3 record
    pub fn smap_l3(&self) -> Option<&SoilMoistureRecord> {
        match self.get(DatasetId::SmapL3) {
            Some(RawRecord::SmapL3(r)) => Some(r),
            _ => None,
        }
    }

    /// SMAP L4 record
    pub fn smap_l4(&self) -> Option<&SoilMoistureRecord> {
        match self.get(DatasetId::SmapL4) {
            Some(RawRecord::SmapL4(r)) => Some(r),
            _ => None,
        }
    }

    /// MODIS vegetation record
    pub fn modis_vegetation(&self) -> Option<&VegetationRecord> {
        match self.get(DatasetId::ModisVegetation) {
            Some(RawRecord::ModisVegetation(r)) => Some(r),
            _ => None,
        }
    }

    /// MODIS LST record
    pub fn modis_lst(&self) -> Option<&LandSurfaceTemperatureRecord> {
        match self.get(DatasetId::ModisLst) {
            Some(RawRecord::ModisLst(r)) => Some(r),
            _ => None,
        }
    }

    /// GPM record
    pub fn gpm(&self) -> Option<&PrecipitationRecord> {
        match self.get(DatasetId::Gpm) {
            Some(RawRecord::Gpm(r)) => Some(r),
            _ => None,
        }
    }

    /// ECOSTRESS record
    pub fn ecostress(&self) -> Option<&EvapotranspirationRecord> {
        match self.get(DatasetId::Ecostress) {
            Some(RawRecord::Ecostress(r)) => Some(r),
            _ => None,
        }
    }

    /// GRACE record
    pub fn grace(&self) -> Option<&GroundwaterRecord> {
        match self.get(DatasetId::Grace) {
            Some(RawRecord::Grace(r)) => Some(r),
            _ => None,
        }
    }

    /// Landsat record
    pub fn landsat(&self) -> Option<&MultispectralRecord> {
        match self.get(DatasetId::Landsat) {
            Some(RawRecord::Landsat(r)) => Some(r),
            _ => None,
        }
    }
}

impl FromIterator<RawRecord> for RawDataMap {
    fn from_iter<I: IntoIterator<Item = RawRecord>>(iter: I) -> Self {
        let mut map = RawDataMap::new();
        for record in iter {
            map.insert(record);
        }
        map
    }
}
