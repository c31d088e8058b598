//! Dataset Sources and Acquisition for AgriFusion
//!
//! ## Overview
//!
//! This crate is the std/async half of AgriFusion. It owns everything that
//! touches the outside world so that `agrifusion-core` can stay pure:
//!
//! - [`DataSource`]: per-dataset fetch capability (network or synthetic)
//! - [`acquire::DatasetAcquirer`]: concurrent fan-out with bounded retry and
//!   an optional overall deadline
//! - [`service::FusionService`]: request validation, acquisition, concurrent
//!   index computation and result assembly
//!
//! ## Source Selection
//!
//! ### HTTP (`http` feature)
//!
//! Talks to a dataset gateway that already serves decoded records as JSON.
//! Satellite-file parsing is the gateway's job, not ours.
//!
//! ### Synthetic (`synthetic` feature)
//!
//! Seeded, reproducible records in realistic physical ranges. Used by the
//! demo and for exercising the full pipeline without a network.
//!
//! ## Failure Model
//!
//! ```text
//! Request ──validate──✗──→ ServiceError::InvalidInput   (only request failure)
//!    │
//!    └──→ per-dataset slot
//!            ├── unknown id         → absent, 1 attempt, no backoff
//!            ├── retryable error    → backoff base·2^attempt, up to 3 attempts
//!            ├── permanent error    → absent
//!            └── deadline expired   → absent
//! ```
//!
//! Absent slots never fail a request; the indices fall back to their
//! documented defaults and the id is listed in `missing_datasets`.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use agrifusion_connectors::{service::FusionService, synthetic::SyntheticSource, ServiceConfig};
//! use agrifusion_core::{DateRange, FusionRequest, GeoLocation};
//! use chrono::DateTime;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = FusionService::new(ServiceConfig::default(), Arc::new(SyntheticSource::new(7)));
//!
//! let range = DateRange::new(
//!     DateTime::parse_from_rfc3339("2024-06-01T00:00:00Z")?,
//!     DateTime::parse_from_rfc3339("2024-06-07T23:59:59Z")?,
//! )?;
//! let request = FusionRequest::new(GeoLocation::new(41.59, -93.62)?, range).with_crop("soybean");
//!
//! let result = service.compute_fusion(request).await?;
//! println!("USMI {:.2} ({:?})", result.usmi.value, result.usmi.category);
//! # Ok(())
//! # }
//! ```

pub mod acquire;
pub mod config;
pub mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "synthetic")]
pub mod synthetic;

// Re-export common types
pub use acquire::{AbsenceReason, Acquisition, DatasetAcquirer, RetryPolicy, SlotOutcome};
pub use config::{ConfigError, ServiceConfig};
pub use service::{FusionService, ServiceError, ServiceResult};

#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpDataSource};

#[cfg(feature = "synthetic")]
pub use synthetic::SyntheticSource;

use agrifusion_core::{DatasetError, DatasetId, DateRange, GeoLocation, RawRecord};
use thiserror::Error;

/// Result type for source fetches
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors a [`DataSource`] can report for one fetch attempt
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network or transport failure
    #[error("Transient failure: {0}")]
    Transient(String),

    /// The upstream answered with an error status
    #[error("Source returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The payload could not be decoded into a record
    #[error("Decode error: {0}")]
    Decode(String),

    /// The source is misconfigured
    #[error("Configuration error: {0}")]
    Config(String),

    /// The record itself is unusable
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

impl SourceError {
    /// Whether another attempt could succeed
    ///
    /// Transport failures, 5xx and 429 are retried; everything else is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            SourceError::Transient(_) => true,
            SourceError::Status { status, .. } => *status >= 500 || *status == 429,
            SourceError::Decode(_) | SourceError::Config(_) => false,
            SourceError::Dataset(e) => e.is_retryable(),
        }
    }
}

/// Per-dataset fetch capability
///
/// Implementations must be cheap to share: the acquirer holds one behind an
/// `Arc` and calls `fetch` from many tasks at once.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Fetch one dataset's record for a location and window
    async fn fetch(
        &self,
        dataset: DatasetId,
        location: &GeoLocation,
        range: &DateRange,
    ) -> SourceResult<RawRecord>;
}
