//! Quality Flag Trust Tiers
//!
//! Each record may carry a categorical quality flag set by the producing
//! mission. The flag maps to a multiplicative trust weight in [0, 1] that
//! scales the record's contribution to USMI and feeds its uncertainty.

/// Weight for records flagged `good`.
///
/// Nominal retrieval, no known degradation.
pub const QUALITY_WEIGHT_GOOD: f64 = 1.0;

/// Weight for records flagged `marginal`.
///
/// Retrieval succeeded with reduced confidence:
/// - Partial cloud or snow contamination
/// - Dense vegetation masking the soil signal
/// - Off-nadir viewing geometry
pub const QUALITY_WEIGHT_MARGINAL: f64 = 0.7;

/// Weight for records carrying any other flag value.
///
/// Unrecognised flags are treated as suspect rather than discarded.
pub const QUALITY_WEIGHT_OTHER: f64 = 0.4;

/// Weight for records with no quality flag at all.
///
/// Default trust for products without quality semantics. Non-zero so a
/// weighted sum is never collapsed by missing metadata.
pub const QUALITY_WEIGHT_UNFLAGGED: f64 = 0.8;

/// Multiplier applied to a component whose source dataset is absent.
///
/// The component already fell back to its documented default raw value,
/// so the default is taken at face value.
pub const ABSENT_DATASET_MULTIPLIER: f64 = 1.0;

/// Scale applied to each `(1 - weight)` term when propagating USMI uncertainty.
pub const UNCERTAINTY_SCALE: f64 = 0.1;

/// Ceiling on propagated USMI uncertainty.
pub const UNCERTAINTY_CAP: f64 = 0.5;

/// Confidence reported when an index has no components to score.
pub const CONFIDENCE_NO_COMPONENTS: f64 = 0.5;
