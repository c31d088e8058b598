//! Crop and Pest Reference Catalogs
//!
//! ## Overview
//!
//! Static agronomic tables consulted by AWLI and PAOI. Both catalogs are
//! plain values owned by [`crate::FusionConfig`]; there is no global crop
//! database. `Default` yields the reference tables for corn, wheat, soybean
//! and rice and for the three modelled pests.
//!
//! ## Lookups Never Fail
//!
//! - Crop names match case-insensitively; an unknown crop resolves to the
//!   configured fallback crop.
//! - An unknown pest uses the default optimal temperature (25 °C).
//! - A (stage, pest) pair missing from the timing table scores 0.6.
//!
//! ## Growth Stage
//!
//! The stage is inferred from NDVI:
//!
//! ```text
//! NDVI   0.0 ── 0.3 ── 0.6 ── 0.8 ── 1.0
//!        emergence │ vegetative │ reproductive │ maturity
//! ```

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::fallbacks::WATER_REQUIREMENT_MM_PER_DAY;
use crate::constants::thresholds::{
    NDVI_EMERGENCE_MAX, NDVI_REPRODUCTIVE_MAX, NDVI_VEGETATIVE_MAX,
};
use crate::indices::awli::AwliWeights;

/// Default optimal temperature for pests without a table entry, °C
pub const DEFAULT_PEST_OPTIMAL_TEMP_C: f64 = 25.0;

/// Timing score for (stage, pest) pairs without a table entry
pub const DEFAULT_TIMING_SCORE: f64 = 0.6;

/// Crop phenology stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    /// Germination through first leaves
    Emergence,
    /// Canopy development
    Vegetative,
    /// Flowering and grain fill
    Reproductive,
    /// Senescence
    Maturity,
}

impl GrowthStage {
    /// Infer the stage from canopy greenness
    pub fn from_ndvi(ndvi: f64) -> Self {
        if ndvi < NDVI_EMERGENCE_MAX {
            GrowthStage::Emergence
        } else if ndvi < NDVI_VEGETATIVE_MAX {
            GrowthStage::Vegetative
        } else if ndvi < NDVI_REPRODUCTIVE_MAX {
            GrowthStage::Reproductive
        } else {
            GrowthStage::Maturity
        }
    }

    /// Lowercase name
    pub const fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Emergence => "emergence",
            GrowthStage::Vegetative => "vegetative",
            GrowthStage::Reproductive => "reproductive",
            GrowthStage::Maturity => "maturity",
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agronomic profile of one crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    /// Display name
    pub name: String,
    /// Daily water requirement per stage, mm/day
    pub water_requirements_mm: BTreeMap<GrowthStage, f64>,
    /// Optimal air temperature band, °C
    pub optimal_temperature_c: (f64, f64),
    /// Optimal volumetric soil moisture band, m³/m³
    pub soil_moisture_optimal: (f64, f64),
    /// Relative susceptibility per pest, [0, 1]
    pub pest_susceptibility: BTreeMap<String, f64>,
    /// Days after planting at which each stage begins
    pub phenology_days: BTreeMap<GrowthStage, u16>,
}

impl CropProfile {
    fn reference(
        name: &str,
        water: [f64; 4],
        temperature: (f64, f64),
        moisture: (f64, f64),
        pests: [(&str, f64); 3],
        days: [u16; 4],
    ) -> Self {
        const STAGES: [GrowthStage; 4] = [
            GrowthStage::Emergence,
            GrowthStage::Vegetative,
            GrowthStage::Reproductive,
            GrowthStage::Maturity,
        ];
        Self {
            name: name.into(),
            water_requirements_mm: STAGES.iter().copied().zip(water).collect(),
            optimal_temperature_c: temperature,
            soil_moisture_optimal: moisture,
            pest_susceptibility: pests.iter().map(|(p, s)| (String::from(*p), *s)).collect(),
            phenology_days: STAGES.iter().copied().zip(days).collect(),
        }
    }

    /// Daily water requirement at `stage`, mm/day
    pub fn daily_water_requirement_mm(&self, stage: GrowthStage) -> f64 {
        self.water_requirements_mm
            .get(&stage)
            .copied()
            .unwrap_or(WATER_REQUIREMENT_MM_PER_DAY)
    }
}

/// Crop profiles keyed by lowercase name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropCatalog {
    crops: BTreeMap<String, CropProfile>,
}

impl Default for CropCatalog {
    fn default() -> Self {
        let crops = [
            (
                "corn",
                CropProfile::reference(
                    "Corn",
                    [5.0, 8.0, 12.0, 6.0],
                    (18.0, 27.0),
                    (0.3, 0.6),
                    [("corn_borer", 0.8), ("aphids", 0.6), ("rust", 0.4)],
                    [10, 45, 85, 120],
                ),
            ),
            (
                "wheat",
                CropProfile::reference(
                    "Wheat",
                    [3.0, 6.0, 8.0, 4.0],
                    (15.0, 25.0),
                    (0.25, 0.5),
                    [("rust", 0.7), ("aphids", 0.5), ("weevils", 0.6)],
                    [7, 60, 120, 150],
                ),
            ),
            (
                "soybean",
                CropProfile::reference(
                    "Soybean",
                    [4.0, 7.0, 10.0, 5.0],
                    (20.0, 30.0),
                    (0.3, 0.55),
                    [("aphids", 0.7), ("caterpillars", 0.6), ("rust", 0.5)],
                    [8, 35, 75, 110],
                ),
            ),
            (
                "rice",
                CropProfile::reference(
                    "Rice",
                    [8.0, 12.0, 15.0, 8.0],
                    (25.0, 35.0),
                    (0.4, 0.7),
                    [("brown_plant_hopper", 0.8), ("rice_blast", 0.7), ("stem_borer", 0.6)],
                    [12, 50, 90, 130],
                ),
            ),
        ];

        Self {
            crops: crops.into_iter().map(|(k, v)| (String::from(k), v)).collect(),
        }
    }
}

impl CropCatalog {
    /// Catalog with no crops
    pub fn empty() -> Self {
        Self { crops: BTreeMap::new() }
    }

    /// Add or replace a crop; the key is stored lowercase
    pub fn with_crop(mut self, key: &str, profile: CropProfile) -> Self {
        self.crops.insert(key.to_lowercase(), profile);
        self
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<(&str, &CropProfile)> {
        self.crops
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(key, profile)| (key.as_str(), profile))
    }

    /// Lookup falling back to `fallback` for unknown names
    ///
    /// `None` only when neither name is in the catalog.
    pub fn resolve(&self, name: &str, fallback: &str) -> Option<(&str, &CropProfile)> {
        self.get(name).or_else(|| self.get(fallback))
    }

    /// Known crop keys
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.crops.keys().map(String::as_str)
    }

    /// AWLI component weights for a crop
    ///
    /// Every crop currently uses the reference table.
    pub fn awli_weights(&self, _crop: &str) -> AwliWeights {
        AwliWeights::REFERENCE
    }
}

/// One row of the pesticide timing table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingEntry {
    /// Crop stage
    pub stage: GrowthStage,
    /// Pest identifier
    pub pest: String,
    /// Timing suitability, [0, 1]
    pub score: f64,
}

/// Pest temperature optima and application timing table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PestCatalog {
    optimal_temperatures_c: BTreeMap<String, f64>,
    timing: Vec<TimingEntry>,
}

impl Default for PestCatalog {
    fn default() -> Self {
        let optimal_temperatures_c = [("corn_borer", 25.0), ("aphids", 20.0), ("rust", 22.0)]
            .into_iter()
            .map(|(pest, t)| (String::from(pest), t))
            .collect();

        let timing = [
            (GrowthStage::Vegetative, "corn_borer", 0.9),
            (GrowthStage::Reproductive, "corn_borer", 0.7),
            (GrowthStage::Vegetative, "aphids", 0.8),
            (GrowthStage::Reproductive, "aphids", 0.6),
            (GrowthStage::Vegetative, "rust", 0.5),
            (GrowthStage::Reproductive, "rust", 0.9),
        ]
        .into_iter()
        .map(|(stage, pest, score)| TimingEntry { stage, pest: pest.into(), score })
        .collect();

        Self { optimal_temperatures_c, timing }
    }
}

impl PestCatalog {
    /// Optimal development temperature for a pest, °C
    pub fn optimal_temperature_c(&self, pest: &str) -> f64 {
        self.optimal_temperatures_c
            .get(pest)
            .copied()
            .unwrap_or(DEFAULT_PEST_OPTIMAL_TEMP_C)
    }

    /// Application timing score for a crop stage and pest
    pub fn timing_score(&self, stage: GrowthStage, pest: &str) -> f64 {
        self.timing
            .iter()
            .find(|entry| entry.stage == stage && entry.pest == pest)
            .map_or(DEFAULT_TIMING_SCORE, |entry| entry.score)
    }
}
