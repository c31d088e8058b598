//! Constants for AgriFusion Core
//!
//! Every fixed number used by the fusion engine is defined here with a short
//! note on what it controls. Index weights, quality tiers, normalization
//! domains, fallbacks and category thresholds are grouped by concern.
//!
//! ## Organization
//!
//! - **Quality**: trust weights derived from per-record quality flags
//! - **Normalization**: physical domain ranges and reference rates
//! - **Fallbacks**: raw values substituted when a dataset or field is missing
//! - **Weights**: per-index component weights
//! - **Thresholds**: category ladders and alert triggers
//!
//! ## Usage Guidelines
//!
//! 1. Use these constants instead of magic numbers
//! 2. Include the unit in the name where one applies
//! 3. Changing a weight changes every index computed afterwards; the weights
//!    of each index sum to 1.0 and tests assert that

/// Quality-flag trust tiers.
pub mod quality;

/// Physical domain ranges and normalization reference values.
pub mod normalization;

/// Fallback raw values for missing datasets and fields.
pub mod fallbacks;

/// Component weights for USMI, AWLI and PAOI.
pub mod weights;

/// Category ladders and alert thresholds.
pub mod thresholds;

pub use quality::{
    QUALITY_WEIGHT_GOOD, QUALITY_WEIGHT_MARGINAL, QUALITY_WEIGHT_OTHER,
    QUALITY_WEIGHT_UNFLAGGED, ABSENT_DATASET_MULTIPLIER,
};

pub use normalization::{
    SOIL_MOISTURE_RANGE, PRECIPITATION_RANGE, TEMPERATURE_RANGE,
    OPTIMAL_PRECIPITATION_MM_PER_DAY,
};
