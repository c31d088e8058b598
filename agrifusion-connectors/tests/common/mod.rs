//! Shared fixtures for agrifusion-connectors integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agrifusion_connectors::{DataSource, SourceError, SourceResult};
use agrifusion_core::records::{
    EvapotranspirationRecord, GroundwaterRecord, LandSurfaceTemperatureRecord,
    MultispectralRecord, PrecipitationRecord, SoilMoistureRecord, VegetationRecord,
};
use agrifusion_core::{DatasetId, DateRange, FusionRequest, GeoLocation, QualityFlag, RawRecord};
use chrono::DateTime;

/// Scripted behaviour for one dataset
#[derive(Clone)]
pub enum Script {
    /// Fail with a transient error `n` times, then succeed
    FailTimes(u32),
    /// Always fail with a retryable 503
    AlwaysFail,
    /// Fail once with a non-retryable status
    Reject(u16),
    /// Succeed after sleeping
    Slow(Duration),
    /// Answer with a record for another dataset
    WrongDataset(DatasetId),
}

/// Data source driven by per-dataset scripts; unscripted datasets succeed
pub struct ScriptedSource {
    scripts: HashMap<DatasetId, Script>,
    calls: HashMap<DatasetId, AtomicU32>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            calls: DatasetId::ALL.iter().map(|d| (*d, AtomicU32::new(0))).collect(),
        }
    }

    pub fn script(mut self, dataset: DatasetId, script: Script) -> Self {
        self.scripts.insert(dataset, script);
        self
    }

    pub fn calls(&self, dataset: DatasetId) -> u32 {
        self.calls[&dataset].load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> u32 {
        self.calls.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// A good-quality record for `dataset` with default fields
pub fn record_for(dataset: DatasetId) -> RawRecord {
    let good = Some(QualityFlag::Good);
    match dataset {
        DatasetId::SmapL3 => RawRecord::SmapL3(SoilMoistureRecord {
            surface_moisture: Some(0.25),
            quality_flag: good,
            ..Default::default()
        }),
        DatasetId::SmapL4 => RawRecord::SmapL4(SoilMoistureRecord {
            root_zone_moisture: Some(0.30),
            quality_flag: good,
            ..Default::default()
        }),
        DatasetId::ModisVegetation => RawRecord::ModisVegetation(VegetationRecord {
            ndvi: Some(0.5),
            quality_flag: good,
            ..Default::default()
        }),
        DatasetId::ModisLst => RawRecord::ModisLst(LandSurfaceTemperatureRecord {
            day_lst: Some(30.0),
            night_lst: Some(15.0),
            quality_flag: good,
            ..Default::default()
        }),
        DatasetId::Gpm => RawRecord::Gpm(PrecipitationRecord {
            precipitation_cal: Some(20.0),
            quality_flag: good,
            ..Default::default()
        }),
        DatasetId::Ecostress => RawRecord::Ecostress(EvapotranspirationRecord {
            et_actual: Some(5.0),
            et_potential: Some(8.0),
            quality_flag: good,
            ..Default::default()
        }),
        DatasetId::Grace => RawRecord::Grace(GroundwaterRecord {
            groundwater_anomaly: Some(0.0),
            quality_flag: good,
            ..Default::default()
        }),
        DatasetId::Landsat => RawRecord::Landsat(MultispectralRecord {
            ndwi: Some(0.3),
            quality_flag: good,
            ..Default::default()
        }),
    }
}

#[async_trait::async_trait]
impl DataSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch(
        &self,
        dataset: DatasetId,
        _location: &GeoLocation,
        _range: &DateRange,
    ) -> SourceResult<RawRecord> {
        let call = self.calls[&dataset].fetch_add(1, Ordering::SeqCst);

        match self.scripts.get(&dataset) {
            None => Ok(record_for(dataset)),
            Some(Script::FailTimes(n)) if call < *n => {
                Err(SourceError::Transient(format!("connection reset ({})", call + 1)))
            }
            Some(Script::FailTimes(_)) => Ok(record_for(dataset)),
            Some(Script::AlwaysFail) => Err(SourceError::Status {
                status: 503,
                message: "unavailable".into(),
            }),
            Some(Script::Reject(status)) => Err(SourceError::Status {
                status: *status,
                message: "rejected".into(),
            }),
            Some(Script::Slow(delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(record_for(dataset))
            }
            Some(Script::WrongDataset(other)) => Ok(record_for(*other)),
        }
    }
}

pub fn location() -> GeoLocation {
    GeoLocation::new(40.7128, -74.0060).unwrap()
}

pub fn range() -> DateRange {
    DateRange::new(
        DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap(),
        DateTime::parse_from_rfc3339("2024-01-31T23:59:59Z").unwrap(),
    )
    .unwrap()
}

pub fn request() -> FusionRequest {
    FusionRequest::new(location(), range())
}

pub fn names(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}
