//! Composite Index Computation
//!
//! ## Overview
//!
//! Three indices are fused from the same read-only [`RawDataMap`]:
//!
//! | Index | Question answered | Confidence strategy |
//! |-------|-------------------|---------------------|
//! | USMI  | Is there enough soil moisture? | quality-weight uncertainty |
//! | AWLI  | Is there enough water for this crop? | component dispersion (configurable) |
//! | PAOI  | Is now a good time to spray? | component mean |
//!
//! Each index combines five normalized components with fixed weights, clamps
//! the result into [0, 1], places it on a category ladder and attaches an
//! ordered recommendation list.
//!
//! ## Category Ladders
//!
//! Ladders are evaluated top-down. USMI and AWLI use `>=`, so boundary values
//! land in the higher band; PAOI suitability uses strict `>`.
//!
//! ```text
//! USMI   0 ── critical ── 0.2 ── poor ── 0.4 ── moderate ── 0.6 ── good ── 0.8 ── optimal ── 1
//! AWLI   0 ── critical ────────────────── 0.4 ── moderate ────────────── 0.7 ── adequate ─── 1
//! PAOI   0 ── unfavorable ────────────── 0.4] ── marginal ───────────── 0.7] ── favorable ── 1
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::AwliConfidence;
use crate::constants::fallbacks;
use crate::constants::quality::CONFIDENCE_NO_COMPONENTS;
use crate::constants::thresholds::{
    AWLI_ADEQUATE, AWLI_MODERATE, PAOI_FAVORABLE, PAOI_MARGINAL, USMI_GOOD, USMI_MODERATE,
    USMI_OPTIMAL, USMI_POOR,
};
use crate::normalize::{clamp_unit, mean, std_dev};
use crate::records::RawDataMap;
use crate::types::DatasetId;

pub mod awli;
pub mod paoi;
pub mod usmi;

pub use awli::{AwliComponents, AwliWeights, WaterLevelIndicator};
pub use paoi::{ApplicationWindow, PaoiComponents, PesticideApplicationIndex};
pub use usmi::{SoilMoistureIndex, UsmiComponents};

/// The three composite indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Unified Soil Moisture Index
    Usmi,
    /// Agricultural Water Level Indicator
    Awli,
    /// Pesticide Application Optimization Index
    Paoi,
}

impl IndexKind {
    /// Lowercase key used in result maps
    pub const fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Usmi => "usmi",
            IndexKind::Awli => "awli",
            IndexKind::Paoi => "paoi",
        }
    }

    /// Uppercase acronym
    pub const fn acronym(&self) -> &'static str {
        match self {
            IndexKind::Usmi => "USMI",
            IndexKind::Awli => "AWLI",
            IndexKind::Paoi => "PAOI",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.acronym())
    }
}

/// USMI category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoistureCategory {
    /// Below 0.2
    Critical,
    /// [0.2, 0.4)
    Poor,
    /// [0.4, 0.6)
    Moderate,
    /// [0.6, 0.8)
    Good,
    /// 0.8 and above
    Optimal,
}

impl MoistureCategory {
    /// Place a USMI value on the ladder
    pub fn from_value(value: f64) -> Self {
        if value >= USMI_OPTIMAL {
            MoistureCategory::Optimal
        } else if value >= USMI_GOOD {
            MoistureCategory::Good
        } else if value >= USMI_MODERATE {
            MoistureCategory::Moderate
        } else if value >= USMI_POOR {
            MoistureCategory::Poor
        } else {
            MoistureCategory::Critical
        }
    }
}

/// AWLI water requirement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterStatus {
    /// Below 0.4
    Critical,
    /// [0.4, 0.7)
    Moderate,
    /// 0.7 and above
    Adequate,
}

impl WaterStatus {
    /// Place an AWLI value on the ladder
    pub fn from_value(value: f64) -> Self {
        if value >= AWLI_ADEQUATE {
            WaterStatus::Adequate
        } else if value >= AWLI_MODERATE {
            WaterStatus::Moderate
        } else {
            WaterStatus::Critical
        }
    }
}

/// AWLI irrigation need, the inverse reading of [`WaterStatus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationNeed {
    /// Water adequate
    Low,
    /// Water moderate
    Moderate,
    /// Water critical
    High,
}

impl IrrigationNeed {
    /// Irrigation need for an AWLI value
    pub fn from_value(value: f64) -> Self {
        match WaterStatus::from_value(value) {
            WaterStatus::Adequate => IrrigationNeed::Low,
            WaterStatus::Moderate => IrrigationNeed::Moderate,
            WaterStatus::Critical => IrrigationNeed::High,
        }
    }
}

/// PAOI application suitability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationSuitability {
    /// 0.4 and below
    Unfavorable,
    /// (0.4, 0.7]
    Marginal,
    /// Above 0.7
    Favorable,
}

impl ApplicationSuitability {
    /// Place a PAOI value on the ladder
    pub fn from_value(value: f64) -> Self {
        if value > PAOI_FAVORABLE {
            ApplicationSuitability::Favorable
        } else if value > PAOI_MARGINAL {
            ApplicationSuitability::Marginal
        } else {
            ApplicationSuitability::Unfavorable
        }
    }
}

/// AWLI confidence from the spread of its components
pub fn dispersion_confidence(strategy: AwliConfidence, components: &[f64]) -> f64 {
    let Some(sigma) = std_dev(components) else {
        return CONFIDENCE_NO_COMPONENTS;
    };
    let spread = clamp_unit(sigma * 2.0);
    match strategy {
        AwliConfidence::ComponentDispersion => spread,
        AwliConfidence::ComponentAgreement => 1.0 - spread,
    }
}

/// PAOI confidence: the clamped mean of its components
pub fn mean_confidence(components: &[f64]) -> f64 {
    mean(components).map_or(CONFIDENCE_NO_COMPONENTS, clamp_unit)
}

/// Mean of day and night LST when a modis_lst record is present
pub(crate) fn observed_mean_lst(raw: &RawDataMap) -> Option<f64> {
    raw.modis_lst().map(|lst| {
        (lst.day_lst.unwrap_or(fallbacks::DAY_LST) + lst.night_lst.unwrap_or(fallbacks::NIGHT_LST))
            / 2.0
    })
}

/// Air temperature used by AWLI and PAOI
pub(crate) fn air_temperature(raw: &RawDataMap) -> f64 {
    observed_mean_lst(raw).unwrap_or(fallbacks::AIR_TEMPERATURE)
}

/// Log and return the source datasets an index is missing
pub(crate) fn note_fallbacks(index: IndexKind, raw: &RawDataMap, sources: &[DatasetId]) -> Vec<DatasetId> {
    let missing: Vec<DatasetId> = sources.iter().copied().filter(|id| !raw.contains(*id)).collect();
    for dataset in &missing {
        log::warn!("{}: {} absent, using fallback values", index, dataset);
    }
    missing
}

/// Push each message, skipping ones already present
pub(crate) fn extend_unique<'a>(into: &mut Vec<String>, messages: impl IntoIterator<Item = &'a str>) {
    for message in messages {
        if !into.iter().any(|m| m == message) {
            into.push(message.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moisture_ladder_boundaries() {
        assert_eq!(MoistureCategory::from_value(0.0), MoistureCategory::Critical);
        assert_eq!(MoistureCategory::from_value(0.19), MoistureCategory::Critical);
        assert_eq!(MoistureCategory::from_value(0.2), MoistureCategory::Poor);
        assert_eq!(MoistureCategory::from_value(0.4), MoistureCategory::Moderate);
        assert_eq!(MoistureCategory::from_value(0.6), MoistureCategory::Good);
        assert_eq!(MoistureCategory::from_value(0.8), MoistureCategory::Optimal);
        assert_eq!(MoistureCategory::from_value(1.0), MoistureCategory::Optimal);
    }

    #[test]
    fn test_water_ladders() {
        assert_eq!(WaterStatus::from_value(0.39), WaterStatus::Critical);
        assert_eq!(WaterStatus::from_value(0.4), WaterStatus::Moderate);
        assert_eq!(WaterStatus::from_value(0.7), WaterStatus::Adequate);
        assert_eq!(IrrigationNeed::from_value(0.7), IrrigationNeed::Low);
        assert_eq!(IrrigationNeed::from_value(0.5), IrrigationNeed::Moderate);
        assert_eq!(IrrigationNeed::from_value(0.1), IrrigationNeed::High);
    }

    #[test]
    fn test_suitability_is_strict() {
        assert_eq!(ApplicationSuitability::from_value(0.7), ApplicationSuitability::Marginal);
        assert_eq!(ApplicationSuitability::from_value(0.71), ApplicationSuitability::Favorable);
        assert_eq!(ApplicationSuitability::from_value(0.4), ApplicationSuitability::Unfavorable);
    }

    #[test]
    fn test_confidence_strategies() {
        let agreeing = [0.5, 0.5, 0.5];
        assert_eq!(dispersion_confidence(AwliConfidence::ComponentDispersion, &agreeing), 0.0);
        assert_eq!(dispersion_confidence(AwliConfidence::ComponentAgreement, &agreeing), 1.0);

        let split = [0.0, 1.0];
        assert_eq!(dispersion_confidence(AwliConfidence::ComponentDispersion, &split), 1.0);
        assert_eq!(dispersion_confidence(AwliConfidence::ComponentDispersion, &[]), 0.5);

        assert_eq!(mean_confidence(&[0.25, 0.5, 0.75]), 0.5);
        assert_eq!(mean_confidence(&[]), 0.5);
    }

    #[test]
    fn test_extend_unique_preserves_first_occurrence() {
        let mut out = Vec::new();
        extend_unique(&mut out, ["a", "b", "a"]);
        extend_unique(&mut out, ["c", "b"]);
        assert_eq!(out, ["a", "b", "c"]);
    }
}
