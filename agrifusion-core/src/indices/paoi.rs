//! Pesticide Application Optimization Index (PAOI)
//!
//! ## Components
//!
//! ```text
//! component                  inputs                              weight
//! ─────────────────────────────────────────────────────────────────────
//! vegetation_stress          NDVI, pixel reliability             0.30
//! pest_favorable_conditions  temperature vs pest optimum, humidity 0.25
//! weather_suitability        wind, rain probability, temperature 0.20
//! phenology_timing           (growth stage, pest) table          0.15
//! spray_drift_safety         1 - drift risk (wind, aerosol)      0.10
//! ```
//!
//! Wind comes from the GPM record and aerosol optical depth from the MODIS
//! vegetation record; both fall back to fixed values when missing.
//!
//! Confidence is the mean of the components. The application window reuses
//! that mean to size the number of suitable hours in the day.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use super::{
    air_temperature, extend_unique, mean_confidence, note_fallbacks, ApplicationSuitability,
    IndexKind,
};
use crate::config::FusionConfig;
use crate::constants::fallbacks;
use crate::constants::normalization::{
    APPLICATION_AVOID_SLOT, APPLICATION_DAY_HOURS, APPLICATION_PREFERRED_SLOT, NDVI_STRESSED,
    NDVI_UNSTRESSED,
};
use crate::constants::thresholds::{PAOI_FAVORABLE, PAOI_MARGINAL};
use crate::constants::weights::{
    PAOI_PEST_FAVORABLE_CONDITIONS, PAOI_PHENOLOGY_TIMING, PAOI_SPRAY_DRIFT_SAFETY,
    PAOI_VEGETATION_STRESS, PAOI_WEATHER_SUITABILITY,
};
use crate::crops::GrowthStage;
use crate::normalize::{
    clamp_unit, humidity_proxy, pest_favorability, spray_drift_risk, weather_suitability,
};
use crate::records::RawDataMap;
use crate::types::DatasetId;

/// Datasets PAOI draws from
pub const SOURCES: [DatasetId; 3] = [DatasetId::ModisVegetation, DatasetId::ModisLst, DatasetId::Gpm];

/// Normalized PAOI components, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaoiComponents {
    /// Canopy condition from NDVI and pixel reliability
    pub vegetation_stress: f64,
    /// Temperature and humidity favorability for the pest
    pub pest_favorable_conditions: f64,
    /// Spraying weather
    pub weather_suitability: f64,
    /// Stage-versus-pest timing
    pub phenology_timing: f64,
    /// Inverse drift risk
    pub spray_drift_safety: f64,
}

impl PaoiComponents {
    /// Weighted sum, before clamping
    pub fn weighted_sum(&self) -> f64 {
        self.vegetation_stress * PAOI_VEGETATION_STRESS
            + self.pest_favorable_conditions * PAOI_PEST_FAVORABLE_CONDITIONS
            + self.weather_suitability * PAOI_WEATHER_SUITABILITY
            + self.phenology_timing * PAOI_PHENOLOGY_TIMING
            + self.spray_drift_safety * PAOI_SPRAY_DRIFT_SAFETY
    }

    /// Component values in canonical order
    pub fn values(&self) -> [f64; 5] {
        [
            self.vegetation_stress,
            self.pest_favorable_conditions,
            self.weather_suitability,
            self.phenology_timing,
            self.spray_drift_safety,
        ]
    }
}

/// Suggested spraying window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationWindow {
    /// Suitable hours in the day, `floor(24 × mean component)`
    pub optimal_hours: u32,
    /// Preferred local-time slot
    pub next_optimal_time: String,
    /// Local-time slot to avoid
    pub avoid_times: String,
    /// Mean component score
    pub confidence: f64,
}

impl ApplicationWindow {
    fn from_score(score: f64) -> Self {
        Self {
            optimal_hours: libm::floor(APPLICATION_DAY_HOURS * clamp_unit(score)) as u32,
            next_optimal_time: APPLICATION_PREFERRED_SLOT.into(),
            avoid_times: APPLICATION_AVOID_SLOT.into(),
            confidence: clamp_unit(score),
        }
    }
}

/// Pesticide application suitability for a crop and target pest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PesticideApplicationIndex {
    /// Fused value, [0, 1]
    pub value: f64,
    /// Mean of the components, [0, 1]
    pub confidence: f64,
    /// Crop as requested
    pub crop_type: String,
    /// Target pest as requested
    pub target_pest: String,
    /// Growth stage inferred from NDVI
    pub growth_stage: GrowthStage,
    /// Suitability ladder
    pub suitability: ApplicationSuitability,
    /// Suggested spraying window
    pub application_window: ApplicationWindow,
    /// Mean of weather suitability and drift safety; higher is gentler
    pub environmental_impact_score: f64,
    /// Normalized inputs
    pub components: PaoiComponents,
    /// Ordered application advice
    pub recommendations: Vec<String>,
}

/// Fuse PAOI for `crop` against `pest`
pub fn compute(
    raw: &RawDataMap,
    crop: &str,
    pest: &str,
    config: &FusionConfig,
) -> PesticideApplicationIndex {
    note_fallbacks(IndexKind::Paoi, raw, &SOURCES);

    let temperature = air_temperature(raw);
    let vegetation = raw.modis_vegetation();
    let ndvi = vegetation.and_then(|r| r.ndvi).unwrap_or(fallbacks::NDVI);
    let reliability = vegetation
        .and_then(|r| r.pixel_reliability)
        .unwrap_or(fallbacks::PIXEL_RELIABILITY);
    let aerosol = vegetation
        .and_then(|r| r.aerosol_optical_depth)
        .unwrap_or(fallbacks::AEROSOL_OPTICAL_DEPTH);

    let gpm = raw.gpm();
    let precipitation_total = gpm
        .and_then(|r| r.precipitation_cal)
        .unwrap_or(fallbacks::PRECIPITATION_TOTAL);
    let rain_probability = gpm
        .and_then(|r| r.probability_of_precipitation)
        .unwrap_or(fallbacks::PRECIPITATION_PROBABILITY);
    let wind = gpm.and_then(|r| r.wind_speed).unwrap_or(fallbacks::WIND_SPEED);

    let growth_stage = GrowthStage::from_ndvi(ndvi);
    let drift_risk = spray_drift_risk(wind, aerosol);
    let weather = weather_suitability(wind, rain_probability, temperature);

    let components = PaoiComponents {
        vegetation_stress: vegetation_stress(ndvi, reliability),
        pest_favorable_conditions: pest_favorability(
            temperature,
            humidity_proxy(precipitation_total, temperature),
            config.pests.optimal_temperature_c(pest),
        ),
        weather_suitability: weather,
        phenology_timing: config.pests.timing_score(growth_stage, pest),
        spray_drift_safety: 1.0 - drift_risk,
    };

    let value = clamp_unit(components.weighted_sum());
    let confidence = mean_confidence(&components.values());
    let suitability = ApplicationSuitability::from_value(value);

    log::debug!(
        "PAOI computed for {} vs {}: value={:.3} confidence={:.3} suitability={:?}",
        crop,
        pest,
        value,
        confidence,
        suitability
    );

    PesticideApplicationIndex {
        value,
        confidence,
        crop_type: crop.into(),
        target_pest: pest.into(),
        growth_stage,
        suitability,
        application_window: ApplicationWindow::from_score(confidence),
        environmental_impact_score: clamp_unit((weather + (1.0 - drift_risk)) / 2.0),
        components,
        recommendations: recommendations(value),
    }
}

/// Canopy condition: 1 for healthy reliable pixels, 0 for sparse or unreliable
fn vegetation_stress(ndvi: f64, pixel_reliability: u8) -> f64 {
    if ndvi > NDVI_UNSTRESSED && pixel_reliability == 0 {
        1.0
    } else if ndvi < NDVI_STRESSED || pixel_reliability > 1 {
        0.0
    } else {
        clamp_unit(ndvi)
    }
}

fn recommendations(value: f64) -> Vec<String> {
    let messages: [&str; 3] = if value > PAOI_FAVORABLE {
        [
            "Optimal conditions for pesticide application",
            "Proceed with planned application",
            "Monitor weather conditions during application",
        ]
    } else if value > PAOI_MARGINAL {
        [
            "Moderate conditions for application",
            "Consider waiting for better conditions",
            "Use targeted application methods",
        ]
    } else {
        [
            "Poor conditions for pesticide application",
            "Postpone application until conditions improve",
            "Consider alternative pest management strategies",
        ]
    };
    let mut out = Vec::with_capacity(messages.len());
    extend_unique(&mut out, messages);
    out
}
