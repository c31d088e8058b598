//! Cross-Index Alerts and Integrated Recommendations
//!
//! Threshold rules evaluated over all three indices once they are computed:
//!
//! ```text
//! USMI < 0.2                 → critical  "Extremely low soil moisture detected"
//! AWLI < 0.2                 → critical  "Critical water shortage detected"
//! PAOI < 0.3                 → warning   "Poor conditions for pest management"
//!
//! USMI < 0.4 and AWLI < 0.4  → combined critical recommendation
//! else PAOI > 0.7 and USMI > 0.6 → integrated-management recommendation
//! ```
//!
//! Integrated recommendations are the USMI, AWLI and PAOI lists in that order
//! followed by the combined message, with later duplicates dropped.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::thresholds::{
    ALERT_AWLI_CRITICAL, ALERT_PAOI_WARNING, ALERT_USMI_CRITICAL, COMBINED_OPTIMAL_PAOI,
    COMBINED_OPTIMAL_USMI, COMBINED_WATER_CRITICAL,
};
use crate::indices::{
    extend_unique, IndexKind, PesticideApplicationIndex, SoilMoistureIndex, WaterLevelIndicator,
};

/// Message added when soil moisture and water levels are both low
pub const COMBINED_CRITICAL_MESSAGE: &str =
    "CRITICAL: Both soil moisture and water levels are low - immediate action required";

/// Message added when spraying and soil conditions are both good
pub const INTEGRATED_OPTIMAL_MESSAGE: &str = "Optimal conditions for integrated crop management";

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// Attention advised
    Warning,
    /// Action required
    Critical,
}

impl AlertSeverity {
    /// Uppercase label used when rendering
    pub const fn label(&self) -> &'static str {
        match self {
            AlertSeverity::Warning => "WARNING",
            AlertSeverity::Critical => "CRITICAL",
        }
    }
}

/// Threshold alert raised by one index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Severity
    pub severity: AlertSeverity,
    /// Index that triggered the alert
    pub index: IndexKind,
    /// Human-readable description
    pub message: String,
}

impl Alert {
    fn new(severity: AlertSeverity, index: IndexKind, message: &str) -> Self {
        Self { severity, index, message: message.into() }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.label(), self.message)
    }
}

/// Evaluate the per-index alert thresholds
pub fn evaluate(
    usmi: &SoilMoistureIndex,
    awli: &WaterLevelIndicator,
    paoi: &PesticideApplicationIndex,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if usmi.value < ALERT_USMI_CRITICAL {
        alerts.push(Alert::new(
            AlertSeverity::Critical,
            IndexKind::Usmi,
            "Extremely low soil moisture detected",
        ));
    }
    if awli.value < ALERT_AWLI_CRITICAL {
        alerts.push(Alert::new(
            AlertSeverity::Critical,
            IndexKind::Awli,
            "Critical water shortage detected",
        ));
    }
    if paoi.value < ALERT_PAOI_WARNING {
        alerts.push(Alert::new(
            AlertSeverity::Warning,
            IndexKind::Paoi,
            "Poor conditions for pest management",
        ));
    }
    for alert in &alerts {
        log::warn!("{} alert: {}", alert.index, alert);
    }
    alerts
}

/// Merge the three recommendation lists and add cross-index advice
pub fn integrate_recommendations(
    usmi: &SoilMoistureIndex,
    awli: &WaterLevelIndicator,
    paoi: &PesticideApplicationIndex,
) -> Vec<String> {
    let mut merged = Vec::new();
    for list in [&usmi.recommendations, &awli.recommendations, &paoi.recommendations] {
        extend_unique(&mut merged, list.iter().map(String::as_str));
    }

    if usmi.value < COMBINED_WATER_CRITICAL && awli.value < COMBINED_WATER_CRITICAL {
        extend_unique(&mut merged, [COMBINED_CRITICAL_MESSAGE]);
    } else if paoi.value > COMBINED_OPTIMAL_PAOI && usmi.value > COMBINED_OPTIMAL_USMI {
        extend_unique(&mut merged, [INTEGRATED_OPTIMAL_MESSAGE]);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FusionConfig;
    use crate::fusion::FusionEngine;
    use crate::records::RawDataMap;
    use alloc::string::ToString;

    fn indices() -> (SoilMoistureIndex, WaterLevelIndicator, PesticideApplicationIndex) {
        let engine = FusionEngine::new(FusionConfig::default());
        let raw = RawDataMap::new();
        (
            engine.compute_usmi(&raw, &[]),
            engine.compute_awli(&raw, "corn"),
            engine.compute_paoi(&raw, "corn", "general"),
        )
    }

    #[test]
    fn test_low_water_raises_both_critical_alerts() {
        let (mut usmi, mut awli, paoi) = indices();
        usmi.value = 0.15;
        awli.value = 0.15;

        let alerts = evaluate(&usmi, &awli, &paoi);
        let critical: Vec<_> = alerts
            .iter()
            .filter(|a| a.severity == AlertSeverity::Critical)
            .map(|a| a.index)
            .collect();
        assert_eq!(critical, [IndexKind::Usmi, IndexKind::Awli]);
        assert_eq!(alerts[0].to_string(), "CRITICAL: Extremely low soil moisture detected");

        let merged = integrate_recommendations(&usmi, &awli, &paoi);
        assert_eq!(merged.last().map(String::as_str), Some(COMBINED_CRITICAL_MESSAGE));
    }

    #[test]
    fn test_boundary_values_do_not_alert() {
        let (mut usmi, mut awli, mut paoi) = indices();
        usmi.value = 0.2;
        awli.value = 0.2;
        paoi.value = 0.3;
        assert!(evaluate(&usmi, &awli, &paoi).is_empty());
    }

    #[test]
    fn test_poor_paoi_warns() {
        let (usmi, awli, mut paoi) = indices();
        paoi.value = 0.1;
        let alerts = evaluate(&usmi, &awli, &paoi);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].to_string(), "WARNING: Poor conditions for pest management");
    }

    #[test]
    fn test_integrated_optimal_message() {
        let (mut usmi, awli, mut paoi) = indices();
        usmi.value = 0.65;
        paoi.value = 0.75;
        let merged = integrate_recommendations(&usmi, &awli, &paoi);
        assert_eq!(merged.last().map(String::as_str), Some(INTEGRATED_OPTIMAL_MESSAGE));
        assert!(!merged.iter().any(|m| m == COMBINED_CRITICAL_MESSAGE));
    }

    #[test]
    fn test_merge_keeps_first_occurrence_order() {
        let (mut usmi, mut awli, paoi) = indices();
        usmi.recommendations = ["a", "b"].map(String::from).to_vec();
        awli.recommendations = ["b", "c"].map(String::from).to_vec();
        let merged = integrate_recommendations(&usmi, &awli, &paoi);
        assert_eq!(&merged[..3], ["a", "b", "c"]);
        assert_eq!(merged.len(), 3 + paoi.recommendations.len());
    }
}
