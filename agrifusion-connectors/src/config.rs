//! Service Configuration
//!
//! [`ServiceConfig`] bundles everything the fusion service needs besides a
//! data source: the acquirer's retry policy and deadline, the dataset list
//! used when a request names none, and the core [`FusionConfig`].
//!
//! Every field has a default, so partial JSON documents are accepted:
//!
//! ```
//! use agrifusion_connectors::ServiceConfig;
//!
//! let config = ServiceConfig::from_json_str(r#"{
//!     "retry": { "base_delay_ms": 250 },
//!     "deadline_ms": 30000,
//!     "fusion": { "default_crop": "wheat" }
//! }"#).unwrap();
//!
//! assert_eq!(config.retry.max_attempts, 3);
//! assert_eq!(config.fusion.default_crop, "wheat");
//! ```

use std::time::Duration;

use agrifusion_core::{DatasetId, FusionConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::acquire::RetryPolicy;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Fusion service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Per-dataset retry policy
    pub retry: RetryPolicy,
    /// Overall acquisition deadline in milliseconds; unbounded when `None`
    pub deadline_ms: Option<u64>,
    /// Datasets fetched when a request lists none
    pub default_datasets: Vec<String>,
    /// Index computation settings
    pub fusion: FusionConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            deadline_ms: None,
            default_datasets: DatasetId::ALL.iter().map(|d| d.as_str().to_string()).collect(),
            fusion: FusionConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the number of fetch attempts per dataset
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.retry.max_attempts = attempts;
        self
    }

    /// Set the base backoff delay
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.retry = RetryPolicy::new(self.retry.max_attempts, delay);
        self
    }

    /// Bound the acquisition phase
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline_ms = Some(deadline.as_millis().min(u64::MAX as u128) as u64);
        self
    }

    /// Replace the default dataset list
    pub fn default_datasets<I, S>(mut self, datasets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_datasets = datasets.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the fusion settings
    pub fn with_fusion(mut self, fusion: FusionConfig) -> Self {
        self.fusion = fusion;
        self
    }

    /// Acquisition deadline, if any
    pub fn acquisition_deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid("retry.max_attempts must be at least 1".into()));
        }
        if self.deadline_ms == Some(0) {
            return Err(ConfigError::Invalid("deadline_ms must be positive".into()));
        }
        if let Some(unknown) = self
            .default_datasets
            .iter()
            .find(|name| name.parse::<DatasetId>().is_err())
        {
            return Err(ConfigError::Invalid(format!(
                "default_datasets contains unknown dataset {}",
                unknown
            )));
        }
        if self.fusion.precipitation_window_days == 0 {
            return Err(ConfigError::Invalid(
                "fusion.precipitation_window_days must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
