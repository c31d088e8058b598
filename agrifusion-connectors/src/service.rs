//! Fusion Service Entry Point
//!
//! ## Request Lifecycle
//!
//! ```text
//! FusionRequest
//!     │ validate                      ✗ → ServiceError::InvalidInput
//!     ▼
//! DatasetAcquirer::acquire            (concurrent, retried, optional deadline)
//!     │ RawDataMap (immutable, Arc)
//!     ├──→ spawn_blocking(usmi) ──┐
//!     ├──→ spawn_blocking(awli) ──┼── try_join
//!     └──→ spawn_blocking(paoi) ──┘
//!                                 ▼
//!                     FusionEngine::assemble ──→ FusionResult
//! ```
//!
//! The service holds no per-request state; one instance can serve many
//! requests concurrently.

use std::sync::Arc;

use agrifusion_core::{FusionEngine, FusionRequest, FusionResult, InputError};
use chrono::Utc;
use log::info;
use thiserror::Error;

use crate::acquire::{Acquisition, DatasetAcquirer};
use crate::config::ServiceConfig;
use crate::DataSource;

/// Result type for service calls
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Request-level failures
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was rejected before any work started
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// An index computation task panicked or was cancelled
    #[error("Index computation failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The blocking entry point could not start a runtime
    #[error("Failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Acquisition plus fusion behind one call
pub struct FusionService {
    engine: Arc<FusionEngine>,
    acquirer: DatasetAcquirer,
    default_datasets: Vec<String>,
}

impl FusionService {
    /// Create a service around a data source
    pub fn new(config: ServiceConfig, source: Arc<dyn DataSource>) -> Self {
        let acquirer = DatasetAcquirer::new(source)
            .with_retry(config.retry.clone())
            .with_deadline(config.acquisition_deadline());

        Self {
            engine: Arc::new(FusionEngine::new(config.fusion)),
            acquirer,
            default_datasets: config.default_datasets,
        }
    }

    /// Fusion engine in use
    pub fn engine(&self) -> &FusionEngine {
        &self.engine
    }

    /// Validate a request and fetch its datasets without fusing
    pub async fn acquire(&self, request: &FusionRequest) -> ServiceResult<Acquisition> {
        request.validate()?;
        Ok(self
            .acquirer
            .acquire(&request.location, &request.date_range, self.datasets_for(request))
            .await)
    }

    /// Compute all three indices for one request
    ///
    /// Fails only on invalid input; unavailable datasets degrade the result
    /// and are listed in [`FusionResult::missing_datasets`].
    pub async fn compute_fusion(&self, mut request: FusionRequest) -> ServiceResult<FusionResult> {
        request.validate()?;
        if request.datasets.is_empty() {
            request.datasets = self.default_datasets.clone();
        }

        let acquisition = self
            .acquirer
            .acquire(&request.location, &request.date_range, &request.datasets)
            .await;
        let raw = Arc::new(acquisition.records);

        let config = self.engine.config();
        let crop = request.crop_or(&config.default_crop).to_string();
        let pest = request.pest_or(&config.default_pest).to_string();
        let requested = request.known_datasets();

        let usmi = tokio::task::spawn_blocking({
            let (engine, raw) = (Arc::clone(&self.engine), Arc::clone(&raw));
            move || engine.compute_usmi(&raw, &requested)
        });
        let awli = tokio::task::spawn_blocking({
            let (engine, raw, crop) = (Arc::clone(&self.engine), Arc::clone(&raw), crop.clone());
            move || engine.compute_awli(&raw, &crop)
        });
        let paoi = tokio::task::spawn_blocking({
            let (engine, raw) = (Arc::clone(&self.engine), Arc::clone(&raw));
            move || engine.compute_paoi(&raw, &crop, &pest)
        });
        let (usmi, awli, paoi) = tokio::try_join!(usmi, awli, paoi)?;

        let result = self
            .engine
            .assemble(&request, &raw, usmi, awli, paoi, Utc::now());

        info!(
            "Fusion at ({:.4}, {:.4}): usmi={:.3} awli={:.3} paoi={:.3}, {} alerts, {} missing, acquired in {:?}",
            request.location.lat,
            request.location.lon,
            result.usmi.value,
            result.awli.value,
            result.paoi.value,
            result.alerts.len(),
            result.missing_datasets.len(),
            acquisition.elapsed
        );

        Ok(result)
    }

    /// Blocking variant of [`compute_fusion`](Self::compute_fusion)
    ///
    /// Builds a private runtime; must not be called from inside one.
    pub fn compute_fusion_blocking(&self, request: FusionRequest) -> ServiceResult<FusionResult> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.compute_fusion(request))
    }

    fn datasets_for<'a>(&'a self, request: &'a FusionRequest) -> &'a [String] {
        if request.datasets.is_empty() {
            &self.default_datasets
        } else {
            &request.datasets
        }
    }
}
