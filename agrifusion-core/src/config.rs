//! Fusion Configuration
//!
//! Immutable settings for the fusion engine, built once and shared by
//! reference. Holds the reference catalogs, the precipitation climatology and
//! the small number of tunables the indices expose.
//!
//! ```rust
//! use agrifusion_core::{AwliConfidence, FusionConfig};
//!
//! let config = FusionConfig::default()
//!     .with_default_crop("wheat")
//!     .with_awli_confidence(AwliConfidence::ComponentAgreement);
//! assert_eq!(config.default_crop, "wheat");
//! ```

use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::constants::normalization::PRECIPITATION_WINDOW_DAYS;
use crate::crops::{CropCatalog, PestCatalog};

/// Long-run precipitation reference for the anomaly component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimatologyBaseline {
    /// Mean accumulated precipitation, mm
    pub mean: f64,
    /// Standard deviation, mm
    pub std: f64,
}

impl Default for ClimatologyBaseline {
    fn default() -> Self {
        Self { mean: 25.0, std: 10.0 }
    }
}

/// How AWLI turns component spread into a confidence figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwliConfidence {
    /// `min(1, 2·σ)`: grows with disagreement between components
    #[default]
    ComponentDispersion,
    /// `1 - min(1, 2·σ)`: grows with agreement between components
    ComponentAgreement,
}

/// Fusion engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Crop reference profiles
    pub crops: CropCatalog,
    /// Pest optima and timing table
    pub pests: PestCatalog,
    /// Precipitation climatology
    pub climatology: ClimatologyBaseline,
    /// Window assumed by the precipitation factor, days
    pub precipitation_window_days: u32,
    /// Crop used when a request names none or an unknown one
    pub default_crop: String,
    /// Pest used when a request names none
    pub default_pest: String,
    /// AWLI confidence strategy
    pub awli_confidence: AwliConfidence,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            crops: CropCatalog::default(),
            pests: PestCatalog::default(),
            climatology: ClimatologyBaseline::default(),
            precipitation_window_days: PRECIPITATION_WINDOW_DAYS,
            default_crop: "corn".into(),
            default_pest: "general".into(),
            awli_confidence: AwliConfidence::default(),
        }
    }
}

impl FusionConfig {
    /// Set the fallback crop
    pub fn with_default_crop(mut self, crop: impl Into<String>) -> Self {
        self.default_crop = crop.into();
        self
    }

    /// Set the fallback pest
    pub fn with_default_pest(mut self, pest: impl Into<String>) -> Self {
        self.default_pest = pest.into();
        self
    }

    /// Replace the precipitation climatology
    pub fn with_climatology(mut self, climatology: ClimatologyBaseline) -> Self {
        self.climatology = climatology;
        self
    }

    /// Set the precipitation window
    pub fn with_precipitation_window_days(mut self, days: u32) -> Self {
        self.precipitation_window_days = days;
        self
    }

    /// Select the AWLI confidence strategy
    pub fn with_awli_confidence(mut self, strategy: AwliConfidence) -> Self {
        self.awli_confidence = strategy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_tables() {
        let config = FusionConfig::default();
        assert_eq!(config.precipitation_window_days, 7);
        assert_eq!(config.default_crop, "corn");
        assert_eq!(config.default_pest, "general");
        assert_eq!(config.climatology, ClimatologyBaseline { mean: 25.0, std: 10.0 });
        assert_eq!(config.awli_confidence, AwliConfidence::ComponentDispersion);
        assert!(config.crops.get("soybean").is_some());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: FusionConfig =
            serde_json::from_str(r#"{"default_crop":"rice","awli_confidence":"component_agreement"}"#)
                .unwrap();
        assert_eq!(config.default_crop, "rice");
        assert_eq!(config.awli_confidence, AwliConfidence::ComponentAgreement);
        assert_eq!(config.precipitation_window_days, 7);
        assert_eq!(config.crops, CropCatalog::default());
    }
}
