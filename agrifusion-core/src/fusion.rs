//! Fusion Engine and Result Assembly
//!
//! ## Overview
//!
//! [`FusionEngine`] owns an immutable [`FusionConfig`] and turns one
//! [`RawDataMap`] into a [`FusionResult`]:
//!
//! ```text
//! FusionRequest ──validate──→ ok?
//!                              │
//! RawDataMap ──┬──→ compute_usmi ──┐
//!              ├──→ compute_awli ──┼──→ assemble ──→ FusionResult
//!              └──→ compute_paoi ──┘       │
//!                                          └── alerts, merged advice,
//!                                              confidence map, missing ids
//! ```
//!
//! The three `compute_*` methods only read the map and the config, so callers
//! may run them concurrently and hand the results to [`FusionEngine::assemble`].
//! [`FusionEngine::fuse`] is the sequential convenience path.
//!
//! The engine never reads a clock: the caller supplies the result timestamp.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alerts::{self, Alert};
use crate::config::FusionConfig;
use crate::errors::InputResult;
use crate::indices::{
    awli, paoi, usmi, IndexKind, PesticideApplicationIndex, SoilMoistureIndex,
    WaterLevelIndicator,
};
use crate::quality::QualityWeights;
use crate::records::RawDataMap;
use crate::types::{DatasetId, DateRange, GeoLocation};

/// One fusion request
///
/// Dataset ids are kept as given; ids outside the supported set end up in
/// [`FusionResult::missing_datasets`] instead of failing the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionRequest {
    /// Point of interest
    pub location: GeoLocation,
    /// Time window
    pub date_range: DateRange,
    /// Crop name; the configured default when `None`
    #[serde(default)]
    pub crop_type: Option<String>,
    /// Target pest; the configured default when `None`
    #[serde(default)]
    pub target_pest: Option<String>,
    /// Requested dataset ids, in request order
    #[serde(default = "all_dataset_names")]
    pub datasets: Vec<String>,
}

fn all_dataset_names() -> Vec<String> {
    DatasetId::ALL.iter().map(|id| String::from(id.as_str())).collect()
}

impl FusionRequest {
    /// Request every supported dataset for a location and window
    pub fn new(location: GeoLocation, date_range: DateRange) -> Self {
        Self {
            location,
            date_range,
            crop_type: None,
            target_pest: None,
            datasets: all_dataset_names(),
        }
    }

    /// Set the crop
    pub fn with_crop(mut self, crop: impl Into<String>) -> Self {
        self.crop_type = Some(crop.into());
        self
    }

    /// Set the target pest
    pub fn with_pest(mut self, pest: impl Into<String>) -> Self {
        self.target_pest = Some(pest.into());
        self
    }

    /// Replace the requested dataset ids
    pub fn with_datasets<I, S>(mut self, datasets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datasets = datasets.into_iter().map(Into::into).collect();
        self
    }

    /// Reject impossible coordinates or a reversed window
    pub fn validate(&self) -> InputResult<()> {
        self.location.validate()?;
        self.date_range.validate()
    }

    /// Supported ids among the requested ones, first occurrence order
    pub fn known_datasets(&self) -> Vec<DatasetId> {
        let mut known: Vec<DatasetId> = Vec::with_capacity(self.datasets.len());
        for id in self.datasets.iter().filter_map(|name| name.parse::<DatasetId>().ok()) {
            if !known.contains(&id) {
                known.push(id);
            }
        }
        known
    }

    /// Crop to compute for
    pub fn crop_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.crop_type.as_deref().unwrap_or(default)
    }

    /// Pest to compute for
    pub fn pest_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.target_pest.as_deref().unwrap_or(default)
    }
}

/// Complete answer to one fusion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionResult {
    /// When the result was produced
    pub timestamp: DateTime<Utc>,
    /// Point of interest
    pub location: GeoLocation,
    /// Time window
    pub date_range: DateRange,
    /// Soil moisture index
    pub usmi: SoilMoistureIndex,
    /// Water level indicator
    pub awli: WaterLevelIndicator,
    /// Pesticide application index
    pub paoi: PesticideApplicationIndex,
    /// Merged, duplicate-free advice
    pub integrated_recommendations: Vec<String>,
    /// Threshold alerts
    pub alerts: Vec<Alert>,
    /// Confidence per index
    pub confidence_scores: BTreeMap<IndexKind, f64>,
    /// Requested ids that ended absent, in request order
    pub missing_datasets: Vec<String>,
}

/// Pure fusion engine
#[derive(Debug, Clone, Default)]
pub struct FusionEngine {
    config: FusionConfig,
}

impl FusionEngine {
    /// Create an engine around a configuration
    pub fn new(config: FusionConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Unified Soil Moisture Index
    ///
    /// `requested` drives the per-dataset quality report.
    pub fn compute_usmi(&self, raw: &RawDataMap, requested: &[DatasetId]) -> SoilMoistureIndex {
        let weights = QualityWeights::assess(raw);
        usmi::compute(raw, &weights, requested, &self.config)
    }

    /// Agricultural Water Level Indicator for `crop`
    pub fn compute_awli(&self, raw: &RawDataMap, crop: &str) -> WaterLevelIndicator {
        awli::compute(raw, crop, &self.config)
    }

    /// Pesticide Application Optimization Index for `crop` against `pest`
    pub fn compute_paoi(&self, raw: &RawDataMap, crop: &str, pest: &str) -> PesticideApplicationIndex {
        paoi::compute(raw, crop, pest, &self.config)
    }

    /// Combine computed indices into a result
    pub fn assemble(
        &self,
        request: &FusionRequest,
        raw: &RawDataMap,
        usmi: SoilMoistureIndex,
        awli: WaterLevelIndicator,
        paoi: PesticideApplicationIndex,
        timestamp: DateTime<Utc>,
    ) -> FusionResult {
        let alerts = alerts::evaluate(&usmi, &awli, &paoi);
        let integrated_recommendations = alerts::integrate_recommendations(&usmi, &awli, &paoi);

        let confidence_scores = [
            (IndexKind::Usmi, usmi.confidence),
            (IndexKind::Awli, awli.confidence),
            (IndexKind::Paoi, paoi.confidence),
        ]
        .into_iter()
        .collect();

        FusionResult {
            timestamp,
            location: request.location.clone(),
            date_range: request.date_range.clone(),
            usmi,
            awli,
            paoi,
            integrated_recommendations,
            alerts,
            confidence_scores,
            missing_datasets: missing_datasets(request, raw),
        }
    }

    /// Validate the request and compute every index sequentially
    pub fn fuse(
        &self,
        raw: &RawDataMap,
        request: &FusionRequest,
        timestamp: DateTime<Utc>,
    ) -> InputResult<FusionResult> {
        request.validate()?;

        let crop = request.crop_or(&self.config.default_crop);
        let pest = request.pest_or(&self.config.default_pest);

        let usmi = self.compute_usmi(raw, &request.known_datasets());
        let awli = self.compute_awli(raw, crop);
        let paoi = self.compute_paoi(raw, crop, pest);

        log::debug!(
            "Fused {} datasets: usmi={:.3} awli={:.3} paoi={:.3}",
            raw.len(),
            usmi.value,
            awli.value,
            paoi.value
        );

        Ok(self.assemble(request, raw, usmi, awli, paoi, timestamp))
    }
}

/// Requested ids without a record, first occurrence order
fn missing_datasets(request: &FusionRequest, raw: &RawDataMap) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for name in &request.datasets {
        let present = name.parse::<DatasetId>().map_or(false, |id| raw.contains(id));
        if !present && !missing.contains(name) {
            missing.push(name.clone());
        }
    }
    missing
}
