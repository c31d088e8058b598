//! Agricultural Water Level Indicator (AWLI)
//!
//! ## Components
//!
//! ```text
//! component                   source            weight
//! ───────────────────────────────────────────────────────
//! groundwater_anomaly         grace             0.30
//! precipitation_anomaly       gpm               0.25
//! vegetation_water_stress     modis_vegetation  0.20
//! et_ratio                    ecostress         0.15
//! surface_water_availability  landsat           0.10
//! ```
//!
//! AWLI applies no quality weighting. The crop only selects labels: the
//! daily water requirement at the NDVI-derived growth stage and the crop
//! name quoted in irrigation advice.
//!
//! `et_ratio` is actual over temperature-driven potential ET and is reported
//! unclamped; the fused value is clamped.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use super::{
    air_temperature, dispersion_confidence, extend_unique, note_fallbacks, IndexKind,
    IrrigationNeed, WaterStatus,
};
use crate::config::FusionConfig;
use crate::constants::fallbacks;
use crate::constants::thresholds::{AWLI_IRRIGATE_NOW, AWLI_IRRIGATE_SOON};
use crate::constants::weights::{
    AWLI_ET_RATIO, AWLI_GROUNDWATER_ANOMALY, AWLI_PRECIPITATION_ANOMALY,
    AWLI_SURFACE_WATER_AVAILABILITY, AWLI_VEGETATION_WATER_STRESS,
};
use crate::crops::GrowthStage;
use crate::normalize::{
    clamp_unit, groundwater_anomaly, potential_et, precipitation_anomaly, safe_divide,
    vegetation_water_stress,
};
use crate::records::RawDataMap;
use crate::types::DatasetId;

/// Datasets AWLI draws from, in component order
pub const SOURCES: [DatasetId; 5] = [
    DatasetId::Grace,
    DatasetId::Gpm,
    DatasetId::ModisVegetation,
    DatasetId::Ecostress,
    DatasetId::Landsat,
];

/// AWLI component weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AwliWeights {
    /// Groundwater anomaly
    pub groundwater_anomaly: f64,
    /// Precipitation anomaly
    pub precipitation_anomaly: f64,
    /// Vegetation water stress
    pub vegetation_water_stress: f64,
    /// ET ratio
    pub et_ratio: f64,
    /// Surface water availability
    pub surface_water_availability: f64,
}

impl AwliWeights {
    /// Reference weighting, shared by every crop
    pub const REFERENCE: Self = Self {
        groundwater_anomaly: AWLI_GROUNDWATER_ANOMALY,
        precipitation_anomaly: AWLI_PRECIPITATION_ANOMALY,
        vegetation_water_stress: AWLI_VEGETATION_WATER_STRESS,
        et_ratio: AWLI_ET_RATIO,
        surface_water_availability: AWLI_SURFACE_WATER_AVAILABILITY,
    };
}

/// Normalized AWLI components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AwliComponents {
    /// GRACE anomaly mapped from ±10 cm
    pub groundwater_anomaly: f64,
    /// GPM accumulation against climatology
    pub precipitation_anomaly: f64,
    /// Canopy water stress from NDVI and temperature
    pub vegetation_water_stress: f64,
    /// Actual over potential evapotranspiration, ≥ 0
    pub et_ratio: f64,
    /// Landsat NDWI, clamped
    pub surface_water_availability: f64,
}

impl AwliComponents {
    /// Normalize the raw inputs, applying field fallbacks
    pub fn from_raw(raw: &RawDataMap, config: &FusionConfig) -> Self {
        let temperature = air_temperature(raw);

        let anomaly_cm = raw
            .grace()
            .and_then(|r| r.groundwater_anomaly)
            .unwrap_or(fallbacks::GROUNDWATER_ANOMALY);
        let precipitation_total = raw
            .gpm()
            .and_then(|r| r.precipitation_cal)
            .unwrap_or(fallbacks::PRECIPITATION_TOTAL);
        let ndvi = ndvi(raw);
        let et_actual = raw
            .ecostress()
            .and_then(|r| r.et_actual)
            .unwrap_or(fallbacks::ET_ACTUAL);
        let ndwi = raw.landsat().and_then(|r| r.ndwi).unwrap_or(fallbacks::NDWI);

        Self {
            groundwater_anomaly: groundwater_anomaly(anomaly_cm),
            precipitation_anomaly: precipitation_anomaly(precipitation_total, &config.climatology),
            vegetation_water_stress: vegetation_water_stress(ndvi, temperature),
            et_ratio: safe_divide(et_actual, potential_et(temperature)).max(0.0),
            surface_water_availability: clamp_unit(ndwi),
        }
    }

    /// Weighted sum, before clamping
    pub fn weighted_sum(&self, weights: &AwliWeights) -> f64 {
        self.groundwater_anomaly * weights.groundwater_anomaly
            + self.precipitation_anomaly * weights.precipitation_anomaly
            + self.vegetation_water_stress * weights.vegetation_water_stress
            + self.et_ratio * weights.et_ratio
            + self.surface_water_availability * weights.surface_water_availability
    }

    /// Component values in canonical order
    pub fn values(&self) -> [f64; 5] {
        [
            self.groundwater_anomaly,
            self.precipitation_anomaly,
            self.vegetation_water_stress,
            self.et_ratio,
            self.surface_water_availability,
        ]
    }
}

/// Water availability for a crop at the requested location and window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterLevelIndicator {
    /// Fused value, [0, 1]
    pub value: f64,
    /// Confidence per the configured strategy, [0, 1]
    pub confidence: f64,
    /// Crop as requested
    pub crop_type: String,
    /// Catalog entry actually used, `None` when the catalog has no fallback either
    pub resolved_crop: Option<String>,
    /// Status ladder
    pub water_requirement_status: WaterStatus,
    /// Inverse reading of the status ladder
    pub irrigation_need: IrrigationNeed,
    /// Growth stage inferred from NDVI
    pub growth_stage: GrowthStage,
    /// Crop water requirement at that stage, mm/day
    pub daily_water_requirement_mm: f64,
    /// Normalized inputs
    pub components: AwliComponents,
    /// Ordered irrigation advice
    pub recommendations: Vec<String>,
}

/// Fuse AWLI for `crop`
pub fn compute(raw: &RawDataMap, crop: &str, config: &FusionConfig) -> WaterLevelIndicator {
    note_fallbacks(IndexKind::Awli, raw, &SOURCES);

    let resolved = config.crops.resolve(crop, &config.default_crop);
    if resolved.map_or(true, |(key, _)| !key.eq_ignore_ascii_case(crop)) {
        log::warn!("AWLI: unknown crop '{}', using '{}'", crop, config.default_crop);
    }

    let components = AwliComponents::from_raw(raw, config);
    let weights = config.crops.awli_weights(crop);
    let value = clamp_unit(components.weighted_sum(&weights));

    let growth_stage = GrowthStage::from_ndvi(ndvi(raw));
    let daily_water_requirement_mm = resolved.map_or(fallbacks::WATER_REQUIREMENT_MM_PER_DAY, |(_, p)| {
        p.daily_water_requirement_mm(growth_stage)
    });

    let confidence = dispersion_confidence(config.awli_confidence, &components.values());
    let water_requirement_status = WaterStatus::from_value(value);

    log::debug!(
        "AWLI computed for {}: value={:.3} confidence={:.3} status={:?}",
        crop,
        value,
        confidence,
        water_requirement_status
    );

    WaterLevelIndicator {
        value,
        confidence,
        crop_type: crop.into(),
        resolved_crop: resolved.map(|(key, _)| String::from(key)),
        water_requirement_status,
        irrigation_need: IrrigationNeed::from_value(value),
        growth_stage,
        daily_water_requirement_mm,
        components,
        recommendations: recommendations(value, crop),
    }
}

fn ndvi(raw: &RawDataMap) -> f64 {
    raw.modis_vegetation()
        .and_then(|r| r.ndvi)
        .unwrap_or(fallbacks::NDVI)
}

fn recommendations(value: f64, crop: &str) -> Vec<String> {
    let mut out = Vec::new();
    if value < AWLI_IRRIGATE_NOW {
        let amount = format!("Apply 15-20mm water for {}", crop);
        extend_unique(
            &mut out,
            ["Immediate irrigation required", amount.as_str(), "Monitor soil moisture closely"],
        );
    } else if value < AWLI_IRRIGATE_SOON {
        let amount = format!("Apply 10-15mm water for {}", crop);
        extend_unique(
            &mut out,
            [
                "Irrigation recommended within 2 days",
                amount.as_str(),
                "Check weather forecast before irrigation",
            ],
        );
    } else {
        extend_unique(&mut out, ["Water levels adequate, continue monitoring"]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AwliConfidence;
    use crate::records::{
        GroundwaterRecord, LandSurfaceTemperatureRecord, MultispectralRecord, PrecipitationRecord,
        RawRecord, VegetationRecord,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_reference_weights_sum_to_one() {
        let w = AwliWeights::REFERENCE;
        let total = w.groundwater_anomaly
            + w.precipitation_anomaly
            + w.vegetation_water_stress
            + w.et_ratio
            + w.surface_water_availability;
        assert!(close(total, 1.0));
    }

    #[test]
    fn test_all_fallbacks() {
        let config = FusionConfig::default();
        let awli = compute(&RawDataMap::new(), "corn", &config);

        // groundwater 0.5, precip anomaly 0.4, veg stress 0.5, et 5/7.5, ndwi 0.3
        let c = awli.components;
        assert!(close(c.groundwater_anomaly, 0.5));
        assert!(close(c.precipitation_anomaly, 0.4));
        assert!(close(c.vegetation_water_stress, 0.5));
        assert!(close(c.et_ratio, 5.0 / 7.5));
        assert!(close(c.surface_water_availability, 0.3));

        let expected = 0.15 + 0.1 + 0.1 + 0.15 * (5.0 / 7.5) + 0.03;
        assert!(close(awli.value, expected));
        assert_eq!(awli.water_requirement_status, WaterStatus::Moderate);
        assert_eq!(awli.growth_stage, GrowthStage::Vegetative);
        assert_eq!(awli.daily_water_requirement_mm, 8.0);
        assert_eq!(
            awli.recommendations,
            [
                "Irrigation recommended within 2 days",
                "Apply 10-15mm water for corn",
                "Check weather forecast before irrigation",
            ]
        );
    }

    #[test]
    fn test_unknown_crop_falls_back_to_corn() {
        let config = FusionConfig::default();
        let awli = compute(&RawDataMap::new(), "dragonfruit", &config);
        assert_eq!(awli.crop_type, "dragonfruit");
        assert_eq!(awli.resolved_crop.as_deref(), Some("corn"));
        assert_eq!(awli.daily_water_requirement_mm, 8.0);
    }

    #[test]
    fn test_crop_lookup_ignores_case() {
        let awli = compute(&RawDataMap::new(), "RICE", &FusionConfig::default());
        assert_eq!(awli.resolved_crop.as_deref(), Some("rice"));
        assert_eq!(awli.daily_water_requirement_mm, 12.0);
    }

    #[test]
    fn test_drought_recommends_irrigation_for_crop() {
        let raw = RawDataMap::new()
            .with(RawRecord::Grace(GroundwaterRecord {
                groundwater_anomaly: Some(-10.0),
                ..Default::default()
            }))
            .with(RawRecord::Gpm(PrecipitationRecord {
                precipitation_cal: Some(0.0),
                ..Default::default()
            }))
            .with(RawRecord::ModisVegetation(VegetationRecord {
                ndvi: Some(0.2),
                ..Default::default()
            }))
            .with(RawRecord::Landsat(MultispectralRecord {
                ndwi: Some(-0.2),
                ..Default::default()
            }))
            .with(RawRecord::ModisLst(LandSurfaceTemperatureRecord {
                day_lst: Some(45.0),
                night_lst: Some(25.0),
                ..Default::default()
            }));

        let awli = compute(&raw, "wheat", &FusionConfig::default());
        // Only the ET ratio contributes: 5 / (0.3 × 35)
        assert!(close(awli.value, 0.15 * 5.0 / 10.5));
        assert_eq!(awli.water_requirement_status, WaterStatus::Critical);
        assert_eq!(awli.irrigation_need, IrrigationNeed::High);
        assert_eq!(awli.growth_stage, GrowthStage::Emergence);
        assert_eq!(awli.daily_water_requirement_mm, 3.0);
        assert_eq!(awli.recommendations[1], "Apply 15-20mm water for wheat");
    }

    #[test]
    fn test_confidence_strategy_is_configurable() {
        let raw = RawDataMap::new();
        let dispersion = compute(&raw, "corn", &FusionConfig::default());
        let agreement = compute(
            &raw,
            "corn",
            &FusionConfig::default().with_awli_confidence(AwliConfidence::ComponentAgreement),
        );
        assert!(close(dispersion.confidence + agreement.confidence, 1.0));
        assert_eq!(dispersion.value, agreement.value);
    }
}
