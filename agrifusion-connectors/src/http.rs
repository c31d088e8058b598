//! HTTP Dataset Source - Gateway Integration
//!
//! ## Overview
//!
//! [`HttpDataSource`] fetches decoded dataset records from an HTTP gateway.
//! The gateway does the heavy lifting (granule search, HDF/NetCDF parsing,
//! spatial subsetting) and answers with one adjacently tagged record:
//!
//! ```text
//! GET {base_url}/api/v1/datasets/{dataset}?lat=..&lon=..&start=..&end=..
//!
//! 200 {"dataset": "gpm", "data": {"precipitation_cal": 12.4, "quality_flag": "good"}}
//! ```
//!
//! ## Implementation Choices
//!
//! - Blocking `ureq` client run on tokio's blocking pool; one agent is shared
//!   by every fetch so connections are reused
//! - No retries here: a single call is one attempt, the acquirer owns backoff
//! - Status classification feeds [`SourceError::is_retryable`]: 5xx, 429 and
//!   transport errors are transient, other statuses are final
//!
//! ## Example Usage
//!
//! ```no_run
//! use agrifusion_connectors::http::{HttpConfig, HttpDataSource};
//!
//! let config = HttpConfig::new("https://datasets.example.com")
//!     .bearer_token("your-api-token")
//!     .timeout_secs(20);
//!
//! let source = HttpDataSource::new(config)?;
//! # Ok::<(), agrifusion_connectors::SourceError>(())
//! ```

use std::collections::HashMap;
use std::time::Duration;

use agrifusion_core::{DatasetId, DateRange, GeoLocation, RawRecord};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::{DataSource, SourceError, SourceResult};

/// HTTP configuration
#[derive(Clone)]
pub struct HttpConfig {
    /// Base URL for the gateway
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Authentication method
    pub auth: AuthMethod,
    /// Custom headers
    pub headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

/// Authentication methods
#[derive(Clone)]
pub enum AuthMethod {
    /// No authentication
    None,
    /// Bearer token
    Bearer(String),
    /// Basic authentication
    Basic { username: String, password: String },
    /// API key in header
    ApiKey { header: String, value: String },
}

impl AuthMethod {
    /// Header carrying the credentials, if any
    fn header(&self) -> Option<(String, String)> {
        match self {
            AuthMethod::None => None,
            AuthMethod::Bearer(token) => {
                Some(("Authorization".into(), format!("Bearer {}", token)))
            }
            AuthMethod::Basic { username, password } => {
                let credentials = STANDARD.encode(format!("{}:{}", username, password));
                Some(("Authorization".into(), format!("Basic {}", credentials)))
            }
            AuthMethod::ApiKey { header, value } => Some((header.clone(), value.clone())),
        }
    }
}

impl HttpConfig {
    /// Create new configuration with base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            auth: AuthMethod::None,
            headers: HashMap::new(),
            user_agent: format!("AgriFusion/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set bearer token authentication
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.auth = AuthMethod::Bearer(token.into());
        self
    }

    /// Set basic authentication
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = AuthMethod::Basic {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    /// Set API key authentication
    pub fn api_key(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.auth = AuthMethod::ApiKey {
            header: header.into(),
            value: value.into(),
        };
        self
    }

    /// Set request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Add custom header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Check the configuration before any request is made
    pub fn validate(&self) -> SourceResult<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(SourceError::Config(
                "Base URL must start with http:// or https://".into(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(SourceError::Config("Timeout must be positive".into()));
        }
        Ok(())
    }

    /// Endpoint for one dataset
    fn dataset_url(&self, dataset: DatasetId) -> String {
        format!(
            "{}/api/v1/datasets/{}",
            self.base_url.trim_end_matches('/'),
            dataset.as_str()
        )
    }
}

/// Dataset source backed by an HTTP gateway
pub struct HttpDataSource {
    config: HttpConfig,
    agent: ureq::Agent,
}

impl HttpDataSource {
    /// Create a source; fails on an invalid configuration
    pub fn new(config: HttpConfig) -> SourceResult<Self> {
        config.validate()?;

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Ok(Self { config, agent })
    }

    /// Active configuration
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Build the GET request for one dataset
    fn build_request(
        &self,
        dataset: DatasetId,
        location: &GeoLocation,
        range: &DateRange,
    ) -> ureq::Request {
        let mut request = self
            .agent
            .get(&self.config.dataset_url(dataset))
            .query("lat", &location.lat.to_string())
            .query("lon", &location.lon.to_string())
            .query("start", &range.start.to_rfc3339())
            .query("end", &range.end.to_rfc3339());

        if let Some((name, value)) = self.config.auth.header() {
            request = request.set(&name, &value);
        }
        for (name, value) in &self.config.headers {
            request = request.set(name, value);
        }

        request.set("Accept", "application/json")
    }
}

/// Perform one blocking call and return the body
fn execute(request: ureq::Request) -> SourceResult<String> {
    match request.call() {
        Ok(response) => response
            .into_string()
            .map_err(|e| SourceError::Transient(e.to_string())),
        Err(ureq::Error::Status(status, response)) => Err(SourceError::Status {
            status,
            message: response.into_string().unwrap_or_default(),
        }),
        Err(ureq::Error::Transport(e)) => Err(SourceError::Transient(e.to_string())),
    }
}

/// Decode a gateway body into a record
fn decode(body: &str) -> SourceResult<RawRecord> {
    serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))
}

#[async_trait::async_trait]
impl DataSource for HttpDataSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(
        &self,
        dataset: DatasetId,
        location: &GeoLocation,
        range: &DateRange,
    ) -> SourceResult<RawRecord> {
        let request = self.build_request(dataset, location, range);
        let body = tokio::task::spawn_blocking(move || execute(request))
            .await
            .map_err(|e| SourceError::Transient(format!("Request task failed: {}", e)))??;
        decode(&body)
    }
}
