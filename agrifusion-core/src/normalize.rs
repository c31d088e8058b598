//! Normalization Functions
//!
//! ## Overview
//!
//! Maps raw physical quantities onto [0, 1] component values. Every function
//! here is total: division by zero, negative inputs and out-of-domain values
//! are absorbed by clamping or a neutral default, never by a panic or error.
//!
//! ```text
//! raw (m³/m³, mm, °C, m/s)  ──normalize──→  component ∈ [0, 1]
//! ```
//!
//! ## Piecewise Functions
//!
//! ### Temperature stress
//! ```text
//! 1.0 ┤        ┌──────────┐
//!     │       ╱            ╲
//!     │      ╱              ╲
//! 0.0 ┼─────┴────┴──────────┴─────────┴──→ °C
//!     0         20         30         50
//! ```
//!
//! ### Vegetation water stress
//! - NDVI > 0.6 and LST < 30 °C: unstressed (1.0)
//! - NDVI < 0.4 or LST > 35 °C: fully stressed (0.0)
//! - otherwise linear in NDVI between 0.4 and 0.6
//!
//! Inputs are assumed finite; records are validated at the acquisition
//! boundary. `f64::max`/`f64::min` still map a stray NaN onto the clamp bound.

use crate::constants::normalization::{
    NormalizationRange, DRIFT_AOD_HIGH, DRIFT_WIND_HIGH_MS, ET_DEFICIT_NEUTRAL,
    GROUNDWATER_ANOMALY_SPAN_CM, LST_COOL_C, LST_HOT_C, NDVI_STRESSED, NDVI_UNSTRESSED,
    OPTIMAL_PRECIPITATION_MM_PER_DAY, PEST_TEMP_TOLERANCE_C, PET_MM_PER_DEGREE,
    SPRAY_OPTIMAL_TEMP_C, SPRAY_TEMP_TOLERANCE_C, SPRAY_WIND_LIMIT_MS,
    TEMP_STRESS_HEAT_SPAN_C, TEMP_STRESS_OPTIMAL_MAX_C, TEMP_STRESS_OPTIMAL_MIN_C,
};
use crate::config::ClimatologyBaseline;

/// Clamp into [0, 1]
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    value.max(0.0).min(1.0)
}

/// Division that yields 0.0 for a zero denominator
#[inline]
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Linear map of `value` from `range` onto [0, 1]
pub fn range_normalize(value: f64, range: NormalizationRange) -> f64 {
    clamp_unit(safe_divide(value - range.min, range.max - range.min))
}

/// Accumulated precipitation against `days` of optimal daily rainfall
pub fn precipitation_factor(total_mm: f64, days: u32) -> f64 {
    clamp_unit(safe_divide(
        total_mm,
        f64::from(days) * OPTIMAL_PRECIPITATION_MM_PER_DAY,
    ))
}

/// Thermal suitability of the mean surface temperature
pub fn temperature_stress(temp_c: f64) -> f64 {
    if temp_c < TEMP_STRESS_OPTIMAL_MIN_C {
        clamp_unit(temp_c / TEMP_STRESS_OPTIMAL_MIN_C)
    } else if temp_c > TEMP_STRESS_OPTIMAL_MAX_C {
        clamp_unit(1.0 - (temp_c - TEMP_STRESS_OPTIMAL_MAX_C) / TEMP_STRESS_HEAT_SPAN_C)
    } else {
        1.0
    }
}

/// ET deficit relative to precipitation supply
///
/// Neutral 0.5 when there is no positive precipitation total to compare with.
pub fn et_deficit_ratio(et_deficit: f64, precipitation_total: f64) -> f64 {
    if precipitation_total > 0.0 {
        clamp_unit(et_deficit / precipitation_total)
    } else {
        ET_DEFICIT_NEUTRAL
    }
}

/// Canopy water stress from NDVI and land-surface temperature
pub fn vegetation_water_stress(ndvi: f64, lst_c: f64) -> f64 {
    if ndvi > NDVI_UNSTRESSED && lst_c < LST_COOL_C {
        1.0
    } else if ndvi < NDVI_STRESSED || lst_c > LST_HOT_C {
        0.0
    } else {
        clamp_unit((ndvi - NDVI_STRESSED) / (NDVI_UNSTRESSED - NDVI_STRESSED))
    }
}

/// Current precipitation against the climatological mean
///
/// Relative anomaly of -1 maps to 0.0, no anomaly to 0.5, +1 or more to 1.0.
/// A non-positive mean yields the neutral 0.5.
pub fn precipitation_anomaly(current_mm: f64, baseline: &ClimatologyBaseline) -> f64 {
    if baseline.mean <= 0.0 {
        return 0.5;
    }
    let anomaly = (current_mm - baseline.mean) / baseline.mean;
    clamp_unit((anomaly + 1.0) / 2.0)
}

/// GRACE groundwater anomaly (cm) onto [0, 1]
pub fn groundwater_anomaly(anomaly_cm: f64) -> f64 {
    clamp_unit((anomaly_cm + GROUNDWATER_ANOMALY_SPAN_CM) / (2.0 * GROUNDWATER_ANOMALY_SPAN_CM))
}

/// Temperature-driven potential evapotranspiration, mm/day
pub fn potential_et(temp_c: f64) -> f64 {
    (temp_c * PET_MM_PER_DEGREE).max(0.0)
}

/// Humidity proxy from precipitation and temperature
pub fn humidity_proxy(precipitation_mm: f64, temp_c: f64) -> f64 {
    clamp_unit(safe_divide(precipitation_mm, temp_c * 2.0))
}

/// How favorable temperature and humidity are for the target pest
pub fn pest_favorability(temp_c: f64, humidity: f64, pest_optimal_c: f64) -> f64 {
    let temp_favorability =
        clamp_unit(1.0 - libm::fabs(temp_c - pest_optimal_c) / PEST_TEMP_TOLERANCE_C);
    (temp_favorability + clamp_unit(humidity)) / 2.0
}

/// Spraying suitability from wind, rain probability and temperature
pub fn weather_suitability(wind_ms: f64, precipitation_probability: f64, temp_c: f64) -> f64 {
    let wind = clamp_unit(1.0 - wind_ms / SPRAY_WIND_LIMIT_MS);
    let rain = clamp_unit(1.0 - precipitation_probability);
    let temp = clamp_unit(1.0 - libm::fabs(temp_c - SPRAY_OPTIMAL_TEMP_C) / SPRAY_TEMP_TOLERANCE_C);
    (wind + rain + temp) / 3.0
}

/// Likelihood that applied product drifts off target
pub fn spray_drift_risk(wind_ms: f64, aerosol_optical_depth: f64) -> f64 {
    let wind = clamp_unit(wind_ms / DRIFT_WIND_HIGH_MS);
    let aerosol = clamp_unit(aerosol_optical_depth / DRIFT_AOD_HIGH);
    (wind + aerosol) / 2.0
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Population standard deviation, `None` for an empty slice
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    Some(libm::sqrt(variance))
}
