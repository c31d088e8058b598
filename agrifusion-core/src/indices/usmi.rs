//! Unified Soil Moisture Index (USMI)
//!
//! ## Components
//!
//! ```text
//! component            source      weight  normalization
//! ─────────────────────────────────────────────────────────────────
//! surface_moisture     smap_l3     0.35    range [0, 0.5] m³/m³
//! root_zone_moisture   smap_l4     0.25    range [0, 0.5] m³/m³
//! precipitation_factor gpm         0.20    total / (window × 5 mm)
//! temperature_stress   modis_lst   0.15    piecewise, optimal 20-30 °C
//! et_deficit           ecostress   0.05    deficit / precipitation
//! ```
//!
//! Each term is additionally multiplied by the quality weight of its source
//! dataset. Uncertainty accumulates `0.1 × (1 - w)` for every present source
//! dataset, capped at 0.5; confidence is its complement.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use super::{extend_unique, note_fallbacks, observed_mean_lst, IndexKind, MoistureCategory};
use crate::config::FusionConfig;
use crate::constants::fallbacks;
use crate::constants::normalization::SOIL_MOISTURE_RANGE;
use crate::constants::quality::{UNCERTAINTY_CAP, UNCERTAINTY_SCALE};
use crate::constants::thresholds::{USMI_IRRIGATE_NOW, USMI_IRRIGATE_SOON, USMI_NO_ACTION};
use crate::constants::weights::{
    USMI_ET_DEFICIT, USMI_PRECIPITATION_FACTOR, USMI_ROOT_ZONE_MOISTURE, USMI_SURFACE_MOISTURE,
    USMI_TEMPERATURE_STRESS,
};
use crate::normalize::{
    clamp_unit, et_deficit_ratio, precipitation_factor, range_normalize, temperature_stress,
};
use crate::quality::{quality_report, DatasetQuality, QualityWeights};
use crate::records::RawDataMap;
use crate::types::DatasetId;

/// Datasets USMI draws from, in component order
pub const SOURCES: [DatasetId; 5] = [
    DatasetId::SmapL3,
    DatasetId::SmapL4,
    DatasetId::Gpm,
    DatasetId::ModisLst,
    DatasetId::Ecostress,
];

/// Normalized USMI components, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsmiComponents {
    /// SMAP L3 surface moisture
    pub surface_moisture: f64,
    /// SMAP L4 root-zone moisture
    pub root_zone_moisture: f64,
    /// GPM accumulation against the window optimum
    pub precipitation_factor: f64,
    /// MODIS LST thermal suitability
    pub temperature_stress: f64,
    /// ECOSTRESS deficit relative to precipitation
    pub et_deficit: f64,
}

impl UsmiComponents {
    /// Normalize the raw inputs, applying field fallbacks
    pub fn from_raw(raw: &RawDataMap, window_days: u32) -> Self {
        let surface = raw
            .smap_l3()
            .and_then(|r| r.surface_moisture)
            .unwrap_or(fallbacks::SURFACE_MOISTURE);
        let root_zone = raw
            .smap_l4()
            .and_then(|r| r.root_zone_moisture)
            .unwrap_or(fallbacks::ROOT_ZONE_MOISTURE);
        let precipitation_total = raw
            .gpm()
            .and_then(|r| r.precipitation_cal)
            .unwrap_or(fallbacks::PRECIPITATION_TOTAL);
        let mean_lst = observed_mean_lst(raw)
            .unwrap_or((fallbacks::DAY_LST + fallbacks::NIGHT_LST) / 2.0);

        let et = raw.ecostress();
        let et_actual = et.and_then(|r| r.et_actual).unwrap_or(fallbacks::ET_ACTUAL);
        let et_potential = et.and_then(|r| r.et_potential).unwrap_or(fallbacks::ET_POTENTIAL);
        let deficit = (et_potential - et_actual).max(0.0);

        Self {
            surface_moisture: range_normalize(surface, SOIL_MOISTURE_RANGE),
            root_zone_moisture: range_normalize(root_zone, SOIL_MOISTURE_RANGE),
            precipitation_factor: precipitation_factor(precipitation_total, window_days),
            temperature_stress: temperature_stress(mean_lst),
            et_deficit: et_deficit_ratio(deficit, precipitation_total),
        }
    }

    /// Components paired with their weight and source dataset
    pub fn weighted_terms(&self) -> [(f64, f64, DatasetId); 5] {
        [
            (self.surface_moisture, USMI_SURFACE_MOISTURE, DatasetId::SmapL3),
            (self.root_zone_moisture, USMI_ROOT_ZONE_MOISTURE, DatasetId::SmapL4),
            (self.precipitation_factor, USMI_PRECIPITATION_FACTOR, DatasetId::Gpm),
            (self.temperature_stress, USMI_TEMPERATURE_STRESS, DatasetId::ModisLst),
            (self.et_deficit, USMI_ET_DEFICIT, DatasetId::Ecostress),
        ]
    }
}

/// Soil moisture sufficiency for the requested location and window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilMoistureIndex {
    /// Fused value, [0, 1]
    pub value: f64,
    /// Propagated quality uncertainty, [0, 0.5]
    pub uncertainty: f64,
    /// `1 - uncertainty`
    pub confidence: f64,
    /// Normalized inputs
    pub components: UsmiComponents,
    /// Ladder category
    pub category: MoistureCategory,
    /// Quality summary of every requested dataset
    pub quality: Vec<DatasetQuality>,
    /// Ordered, duplicate-free advice
    pub recommendations: Vec<String>,
}

/// Fuse USMI from a raw map and its quality weights
pub fn compute(
    raw: &RawDataMap,
    weights: &QualityWeights,
    requested: &[DatasetId],
    config: &FusionConfig,
) -> SoilMoistureIndex {
    note_fallbacks(IndexKind::Usmi, raw, &SOURCES);

    let components = UsmiComponents::from_raw(raw, config.precipitation_window_days);
    let value = clamp_unit(
        components
            .weighted_terms()
            .iter()
            .map(|(component, weight, dataset)| component * weight * weights.multiplier(*dataset))
            .sum(),
    );

    let uncertainty = propagate_uncertainty(weights);
    let category = MoistureCategory::from_value(value);

    log::debug!(
        "USMI computed: value={:.3} uncertainty={:.3} category={:?}",
        value,
        uncertainty,
        category
    );

    SoilMoistureIndex {
        value,
        uncertainty,
        confidence: 1.0 - uncertainty,
        components,
        category,
        quality: quality_report(raw, requested),
        recommendations: recommendations(value),
    }
}

/// `min(0.5, Σ 0.1·(1 - w))` over the present USMI sources
pub fn propagate_uncertainty(weights: &QualityWeights) -> f64 {
    let total: f64 = SOURCES
        .iter()
        .filter_map(|dataset| weights.get(*dataset))
        .map(|w| (1.0 - w) * UNCERTAINTY_SCALE)
        .sum();
    clamp_unit(total).min(UNCERTAINTY_CAP)
}

fn recommendations(value: f64) -> Vec<String> {
    let messages: &[&str] = if value < USMI_IRRIGATE_NOW {
        &[
            "Critical soil moisture levels detected",
            "Immediate irrigation recommended",
            "Consider soil moisture monitoring system",
        ]
    } else if value < USMI_IRRIGATE_SOON {
        &[
            "Below optimal soil moisture",
            "Schedule irrigation within 2-3 days",
            "Monitor soil conditions closely",
        ]
    } else if value > USMI_NO_ACTION {
        &[
            "Excellent soil moisture conditions",
            "No irrigation needed",
            "Continue current management practices",
        ]
    } else {
        &["Soil moisture within acceptable range"]
    };

    let mut out = Vec::with_capacity(messages.len());
    extend_unique(&mut out, messages.iter().copied());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::QualityFlag;
    use crate::records::{RawRecord, SoilMoistureRecord};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn smap_pair(surface: f64, root: f64, flag: QualityFlag) -> RawDataMap {
        RawDataMap::new()
            .with(RawRecord::SmapL3(SoilMoistureRecord {
                surface_moisture: Some(surface),
                quality_flag: Some(flag.clone()),
                ..Default::default()
            }))
            .with(RawRecord::SmapL4(SoilMoistureRecord {
                root_zone_moisture: Some(root),
                quality_flag: Some(flag),
                ..Default::default()
            }))
    }

    #[test]
    fn test_soil_moisture_terms_for_reference_point() {
        let raw = smap_pair(0.25, 0.30, QualityFlag::Good);
        let components = UsmiComponents::from_raw(&raw, 7);
        assert!(close(components.surface_moisture, 0.5));
        assert!(close(components.root_zone_moisture, 0.6));

        let weights = QualityWeights::assess(&raw);
        let partial: f64 = components.weighted_terms()[..2]
            .iter()
            .map(|(c, w, d)| c * w * weights.multiplier(*d))
            .sum();
        assert!(close(partial, 0.325));
    }

    #[test]
    fn test_all_fallbacks() {
        let raw = RawDataMap::new();
        let usmi = compute(&raw, &QualityWeights::assess(&raw), &[], &FusionConfig::default());

        // 0.35·0.5 + 0.25·0.6 + 0.20·(20/35) + 0.15·1.0 + 0.05·(3/20)
        let expected = 0.175 + 0.15 + 0.2 * (20.0 / 35.0) + 0.15 + 0.05 * 0.15;
        assert!(close(usmi.value, expected));
        assert_eq!(usmi.uncertainty, 0.0);
        assert_eq!(usmi.confidence, 1.0);
        assert_eq!(usmi.category, MoistureCategory::Moderate);
        assert_eq!(usmi.recommendations, ["Soil moisture within acceptable range"]);
    }

    #[test]
    fn test_good_flags_give_full_confidence() {
        let raw = smap_pair(0.2, 0.2, QualityFlag::Good);
        let usmi = compute(&raw, &QualityWeights::assess(&raw), &SOURCES, &FusionConfig::default());
        assert_eq!(usmi.uncertainty, 0.0);
        assert_eq!(usmi.confidence, 1.0);
        assert_eq!(usmi.quality.len(), 5);
    }

    #[test]
    fn test_marginal_flags_raise_uncertainty() {
        let raw = smap_pair(0.2, 0.2, QualityFlag::Marginal);
        let weights = QualityWeights::assess(&raw);
        assert!(close(propagate_uncertainty(&weights), 0.06));
    }

    #[test]
    fn test_non_source_datasets_do_not_add_uncertainty() {
        let raw = RawDataMap::new().with(RawRecord::Grace(Default::default()));
        let weights = QualityWeights::assess(&raw);
        assert_eq!(weights.get(DatasetId::Grace), Some(0.8));
        assert_eq!(propagate_uncertainty(&weights), 0.0);
    }

    #[test]
    fn test_dry_soil_recommends_irrigation() {
        let raw = smap_pair(0.0, 0.0, QualityFlag::Good);
        let usmi = compute(&raw, &QualityWeights::assess(&raw), &[], &FusionConfig::default());
        assert!(usmi.value < 0.3);
        assert_eq!(usmi.recommendations[1], "Immediate irrigation recommended");
        assert_eq!(usmi.recommendations.len(), 3);
    }
}
