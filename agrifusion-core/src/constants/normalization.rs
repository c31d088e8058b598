//! Physical Domain Ranges and Reference Values
//!
//! Raw quantities arrive in their physical units (m³/m³, mm, °C, m/s) and are
//! mapped into [0, 1] before fusion. The ranges below are the fixed domains
//! used for that mapping.

/// Inclusive physical domain used by range normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationRange {
    /// Value mapped to 0.0
    pub min: f64,
    /// Value mapped to 1.0
    pub max: f64,
}

/// Volumetric soil moisture, m³/m³.
///
/// 0.5 is near saturation for most mineral soils.
pub const SOIL_MOISTURE_RANGE: NormalizationRange = NormalizationRange { min: 0.0, max: 0.5 };

/// Accumulated precipitation, mm.
pub const PRECIPITATION_RANGE: NormalizationRange = NormalizationRange { min: 0.0, max: 50.0 };

/// Surface temperature, °C.
pub const TEMPERATURE_RANGE: NormalizationRange = NormalizationRange { min: 0.0, max: 50.0 };

/// Reference "optimal" precipitation rate for temporal normalization, mm/day.
pub const OPTIMAL_PRECIPITATION_MM_PER_DAY: f64 = 5.0;

/// Default window for temporal precipitation normalization, days.
pub const PRECIPITATION_WINDOW_DAYS: u32 = 7;

// ===== TEMPERATURE STRESS =====

/// Lower bound of the no-stress temperature band, °C.
pub const TEMP_STRESS_OPTIMAL_MIN_C: f64 = 20.0;

/// Upper bound of the no-stress temperature band, °C.
pub const TEMP_STRESS_OPTIMAL_MAX_C: f64 = 30.0;

/// Degrees above the band over which the score falls from 1 to 0.
pub const TEMP_STRESS_HEAT_SPAN_C: f64 = 20.0;

/// ET deficit ratio reported when no precipitation total is available.
///
/// Neutral midpoint: absent precipitation must not read as zero risk.
pub const ET_DEFICIT_NEUTRAL: f64 = 0.5;

// ===== VEGETATION WATER STRESS =====

/// NDVI above which canopy is considered unstressed.
pub const NDVI_UNSTRESSED: f64 = 0.6;

/// NDVI below which canopy is considered fully stressed.
pub const NDVI_STRESSED: f64 = 0.4;

/// Land-surface temperature below which canopy is considered cool, °C.
pub const LST_COOL_C: f64 = 30.0;

/// Land-surface temperature above which canopy is considered heat-stressed, °C.
pub const LST_HOT_C: f64 = 35.0;

// ===== GROUNDWATER =====

/// Half-width of the GRACE groundwater anomaly domain, cm.
///
/// Anomalies in [-10, +10] cm map linearly onto [0, 1].
pub const GROUNDWATER_ANOMALY_SPAN_CM: f64 = 10.0;

/// Potential evapotranspiration per °C of mean surface temperature, mm/day.
pub const PET_MM_PER_DEGREE: f64 = 0.3;

// ===== PAOI =====

/// Temperature window over which pest favorability falls from 1 to 0, °C.
pub const PEST_TEMP_TOLERANCE_C: f64 = 10.0;

/// Wind speed at which spraying suitability reaches zero, m/s.
pub const SPRAY_WIND_LIMIT_MS: f64 = 10.0;

/// Ideal air temperature for spraying, °C.
pub const SPRAY_OPTIMAL_TEMP_C: f64 = 25.0;

/// Temperature deviation over which spraying suitability reaches zero, °C.
pub const SPRAY_TEMP_TOLERANCE_C: f64 = 15.0;

/// Wind speed considered full drift risk, m/s.
pub const DRIFT_WIND_HIGH_MS: f64 = 8.0;

/// Aerosol optical depth (550 nm) considered full drift risk.
pub const DRIFT_AOD_HIGH: f64 = 0.4;

/// Hours in the application-window day.
pub const APPLICATION_DAY_HOURS: f64 = 24.0;

/// Preferred spraying slot, local time.
pub const APPLICATION_PREFERRED_SLOT: &str = "06:00-10:00";

/// Slot to avoid for spraying, local time.
pub const APPLICATION_AVOID_SLOT: &str = "14:00-18:00";
