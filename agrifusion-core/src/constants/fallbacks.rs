//! Fallback Raw Values
//!
//! Substituted when a dataset is absent or a record omits a field, so the
//! affected component degrades to a documented default instead of aborting
//! the index. Values are raw physical quantities, applied before
//! normalization.

/// SMAP surface soil moisture, m³/m³.
pub const SURFACE_MOISTURE: f64 = 0.25;

/// SMAP root-zone soil moisture, m³/m³.
pub const ROOT_ZONE_MOISTURE: f64 = 0.30;

/// GPM precipitation rate, mm/hour.
pub const PRECIPITATION_RATE: f64 = 2.0;

/// GPM accumulated precipitation, mm.
pub const PRECIPITATION_TOTAL: f64 = 20.0;

/// GPM probability of precipitation.
pub const PRECIPITATION_PROBABILITY: f64 = 0.3;

/// Near-surface wind speed, m/s.
pub const WIND_SPEED: f64 = 5.0;

/// MODIS daytime land-surface temperature, °C.
pub const DAY_LST: f64 = 30.0;

/// MODIS night-time land-surface temperature, °C.
pub const NIGHT_LST: f64 = 15.0;

/// Air temperature used by AWLI and PAOI when no LST dataset is present, °C.
pub const AIR_TEMPERATURE: f64 = 25.0;

/// ECOSTRESS actual evapotranspiration, mm/day.
pub const ET_ACTUAL: f64 = 5.0;

/// ECOSTRESS potential evapotranspiration, mm/day.
pub const ET_POTENTIAL: f64 = 8.0;

/// MODIS NDVI.
pub const NDVI: f64 = 0.5;

/// MODIS EVI.
pub const EVI: f64 = 0.3;

/// MODIS pixel reliability rank (0 = good).
pub const PIXEL_RELIABILITY: u8 = 0;

/// Aerosol optical depth at 550 nm.
pub const AEROSOL_OPTICAL_DEPTH: f64 = 0.3;

/// GRACE groundwater anomaly, cm.
pub const GROUNDWATER_ANOMALY: f64 = 0.0;

/// Landsat NDWI.
pub const NDWI: f64 = 0.3;

/// Crop water requirement when the growth stage has no table entry, mm/day.
pub const WATER_REQUIREMENT_MM_PER_DAY: f64 = 6.0;
