//! Core fusion engine for AgriFusion
//!
//! Turns per-dataset remote-sensing records for one location and time window
//! into three composite agricultural indices:
//!
//! - **USMI**: Unified Soil Moisture Index
//! - **AWLI**: Agricultural Water Level Indicator
//! - **PAOI**: Pesticide Application Optimization Index
//!
//! plus cross-index alerts and a merged recommendation list.
//!
//! Everything in this crate is pure and synchronous. Acquisition (network,
//! retries, deadlines) lives in `agrifusion-connectors`; this crate only sees
//! the immutable [`RawDataMap`] that acquisition produced.
//!
//! ```text
//! RawDataMap ──→ quality::assess ──→ QualityWeights
//!      │                                   │
//!      ├──→ indices::usmi ←────────────────┘
//!      ├──→ indices::awli
//!      └──→ indices::paoi
//!                 │
//!                 └──→ alerts ──→ FusionResult
//! ```
//!
//! Key constraints:
//! - Every index value and confidence lies in [0, 1]
//! - Missing datasets degrade to documented fallbacks, never to errors
//! - No randomness, clocks, or global state in the computation path
//!
//! ```no_run
//! use agrifusion_core::{FusionConfig, FusionEngine, RawDataMap};
//!
//! let engine = FusionEngine::new(FusionConfig::default());
//! let raw = RawDataMap::new();
//!
//! // Every dataset absent: all components use their fallbacks
//! let usmi = engine.compute_usmi(&raw, &[]);
//! assert!(usmi.value >= 0.0 && usmi.value <= 1.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

pub mod alerts;
pub mod config;
pub mod constants;
pub mod crops;
pub mod errors;
pub mod fusion;
pub mod indices;
pub mod normalize;
pub mod quality;
pub mod records;
pub mod types;

// Public API
pub use alerts::{Alert, AlertSeverity};
pub use config::{AwliConfidence, ClimatologyBaseline, FusionConfig};
pub use crops::{CropCatalog, CropProfile, GrowthStage, PestCatalog};
pub use errors::{DatasetError, InputError, InputResult};
pub use fusion::{FusionEngine, FusionRequest, FusionResult};
pub use indices::{
    IndexKind, PesticideApplicationIndex, SoilMoistureIndex, WaterLevelIndicator,
};
pub use quality::{QualityFlag, QualityWeights};
pub use records::{RawDataMap, RawRecord};
pub use types::{DatasetId, DateRange, GeoLocation};

/// Crate version, reported in service metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
