//! Category Ladders and Alert Thresholds
//!
//! Ladders are evaluated top-down with `>=`, so a value sitting exactly on a
//! boundary lands in the higher band.

// ===== USMI CATEGORIES =====

/// USMI at or above this is `optimal`.
pub const USMI_OPTIMAL: f64 = 0.8;
/// USMI at or above this is `good`.
pub const USMI_GOOD: f64 = 0.6;
/// USMI at or above this is `moderate`.
pub const USMI_MODERATE: f64 = 0.4;
/// USMI at or above this is `poor`; below is `critical`.
pub const USMI_POOR: f64 = 0.2;

// ===== USMI RECOMMENDATIONS =====

/// Below this USMI, recommend immediate irrigation.
pub const USMI_IRRIGATE_NOW: f64 = 0.3;
/// Below this USMI, recommend scheduling irrigation.
pub const USMI_IRRIGATE_SOON: f64 = 0.5;
/// Above this USMI, no action is needed.
pub const USMI_NO_ACTION: f64 = 0.8;

// ===== AWLI STATUS =====

/// AWLI at or above this is `adequate`.
pub const AWLI_ADEQUATE: f64 = 0.7;
/// AWLI at or above this is `moderate`; below is `critical`.
pub const AWLI_MODERATE: f64 = 0.4;

// ===== AWLI RECOMMENDATIONS =====

/// Below this AWLI, irrigation is required immediately.
pub const AWLI_IRRIGATE_NOW: f64 = 0.3;
/// Below this AWLI, irrigation is recommended within two days.
pub const AWLI_IRRIGATE_SOON: f64 = 0.5;

// ===== PAOI =====

/// PAOI above this is favorable for application.
pub const PAOI_FAVORABLE: f64 = 0.7;
/// PAOI above this is marginal; at or below is unfavorable.
pub const PAOI_MARGINAL: f64 = 0.4;

// ===== PHENOLOGY FROM NDVI =====

/// NDVI below this is `emergence`.
pub const NDVI_EMERGENCE_MAX: f64 = 0.3;
/// NDVI below this is `vegetative`.
pub const NDVI_VEGETATIVE_MAX: f64 = 0.6;
/// NDVI below this is `reproductive`; at or above is `maturity`.
pub const NDVI_REPRODUCTIVE_MAX: f64 = 0.8;

// ===== ALERTS =====

/// USMI below this raises a critical alert.
pub const ALERT_USMI_CRITICAL: f64 = 0.2;
/// AWLI below this raises a critical alert.
pub const ALERT_AWLI_CRITICAL: f64 = 0.2;
/// PAOI below this raises a warning.
pub const ALERT_PAOI_WARNING: f64 = 0.3;

/// USMI and AWLI both below this add the combined critical recommendation.
pub const COMBINED_WATER_CRITICAL: f64 = 0.4;
/// PAOI above this (with USMI above [`COMBINED_OPTIMAL_USMI`]) adds the
/// integrated-management recommendation.
pub const COMBINED_OPTIMAL_PAOI: f64 = 0.7;
/// USMI threshold paired with [`COMBINED_OPTIMAL_PAOI`].
pub const COMBINED_OPTIMAL_USMI: f64 = 0.6;
