//! Quality Assessment
//!
//! ## Overview
//!
//! Every present record is assigned a trust weight in [0, 1] from its quality
//! flag. USMI multiplies each component by the weight of the dataset it came
//! from and propagates `(1 - weight)` into its uncertainty.
//!
//! ## Tiers
//!
//! ```text
//! flag                 weight
//! ─────────────────────────────
//! good                  1.0
//! marginal              0.7
//! any other value       0.4
//! no flag               0.8
//! dataset absent        1.0 (component already on its fallback)
//! ```
//!
//! Assessment is pure: the same map always yields the same weights.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::constants::quality::{
    ABSENT_DATASET_MULTIPLIER, QUALITY_WEIGHT_GOOD, QUALITY_WEIGHT_MARGINAL,
    QUALITY_WEIGHT_OTHER, QUALITY_WEIGHT_UNFLAGGED,
};
use crate::records::RawDataMap;
use crate::types::DatasetId;

/// Categorical trust indicator attached to a record by its producer
///
/// Anything other than `good` or `marginal` is kept verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QualityFlag {
    /// Nominal retrieval
    Good,
    /// Retrieval with reduced confidence
    Marginal,
    /// Unrecognised flag value
    Other(String),
}

impl QualityFlag {
    /// Trust weight for this flag
    pub fn weight(&self) -> f64 {
        match self {
            QualityFlag::Good => QUALITY_WEIGHT_GOOD,
            QualityFlag::Marginal => QUALITY_WEIGHT_MARGINAL,
            QualityFlag::Other(_) => QUALITY_WEIGHT_OTHER,
        }
    }

    /// Wire spelling
    pub fn as_str(&self) -> &str {
        match self {
            QualityFlag::Good => "good",
            QualityFlag::Marginal => "marginal",
            QualityFlag::Other(raw) => raw,
        }
    }
}

impl From<String> for QualityFlag {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "good" => QualityFlag::Good,
            "marginal" => QualityFlag::Marginal,
            _ => QualityFlag::Other(raw),
        }
    }
}

impl From<&str> for QualityFlag {
    fn from(raw: &str) -> Self {
        QualityFlag::from(String::from(raw))
    }
}

impl From<QualityFlag> for String {
    fn from(flag: QualityFlag) -> Self {
        match flag {
            QualityFlag::Good => "good".into(),
            QualityFlag::Marginal => "marginal".into(),
            QualityFlag::Other(raw) => raw,
        }
    }
}

/// Trust weight per present dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityWeights {
    weights: BTreeMap<DatasetId, f64>,
}

impl QualityWeights {
    /// Derive weights for every record in the map
    pub fn assess(raw: &RawDataMap) -> Self {
        let weights = raw
            .iter()
            .map(|(id, record)| {
                let weight = record
                    .quality_flag()
                    .map_or(QUALITY_WEIGHT_UNFLAGGED, QualityFlag::weight);
                (id, weight)
            })
            .collect();
        Self { weights }
    }

    /// Weight of a present dataset
    pub fn get(&self, dataset: DatasetId) -> Option<f64> {
        self.weights.get(&dataset).copied()
    }

    /// Multiplier for a component sourced from `dataset`
    ///
    /// Absent datasets contribute their fallback at face value.
    pub fn multiplier(&self, dataset: DatasetId) -> f64 {
        self.get(dataset).unwrap_or(ABSENT_DATASET_MULTIPLIER)
    }

    /// Weights in canonical dataset order
    pub fn iter(&self) -> impl Iterator<Item = (DatasetId, f64)> + '_ {
        self.weights.iter().map(|(id, w)| (*id, *w))
    }

    /// Number of weighted datasets
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True when no dataset was present
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Flag label reported per requested dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagLabel {
    /// Flagged `good`
    Good,
    /// Flagged `marginal`
    Marginal,
    /// Flagged with any other value
    Other,
    /// Present without a flag
    Unknown,
    /// Not present
    Missing,
}

/// Temporal coverage of a requested dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalCoverage {
    /// A record covers the window
    Complete,
    /// No record for the window
    Incomplete,
}

/// Quality summary of one requested dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetQuality {
    /// Dataset described
    pub dataset: DatasetId,
    /// Reported flag, or why there is none
    pub flag: FlagLabel,
    /// 1.0 when present, 0.0 when absent
    pub data_completeness: f64,
    /// Whether the window is covered
    pub temporal_coverage: TemporalCoverage,
}

/// Per-dataset quality summary for the requested ids, in request order
///
/// Repeated ids are reported once.
pub fn quality_report(raw: &RawDataMap, requested: &[DatasetId]) -> Vec<DatasetQuality> {
    let mut report: Vec<DatasetQuality> = Vec::with_capacity(requested.len());
    for &dataset in requested {
        if report.iter().any(|q| q.dataset == dataset) {
            continue;
        }
        let entry = match raw.get(dataset) {
            Some(record) => DatasetQuality {
                dataset,
                flag: match record.quality_flag() {
                    Some(QualityFlag::Good) => FlagLabel::Good,
                    Some(QualityFlag::Marginal) => FlagLabel::Marginal,
                    Some(QualityFlag::Other(_)) => FlagLabel::Other,
                    None => FlagLabel::Unknown,
                },
                data_completeness: 1.0,
                temporal_coverage: TemporalCoverage::Complete,
            },
            None => DatasetQuality {
                dataset,
                flag: FlagLabel::Missing,
                data_completeness: 0.0,
                temporal_coverage: TemporalCoverage::Incomplete,
            },
        };
        report.push(entry);
    }
    report
}
