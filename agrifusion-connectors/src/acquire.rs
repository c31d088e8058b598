//! Concurrent Dataset Acquisition
//!
//! ## Overview
//!
//! [`DatasetAcquirer`] fans one request out into one task per dataset and
//! collects whatever arrives into a [`RawDataMap`]:
//!
//! ```text
//!               ┌── task(smap_l3) ── fetch ─✗─ sleep 1s ── fetch ── ok ──┐
//! requested ids ├── task(gpm)     ── fetch ── ok ─────────────────────────┼──→ Acquisition
//!               ├── task(grace)   ── fetch ─✗─ 1s ─✗─ 2s ─✗─ absent ──────┤
//!               └── "sentinel_2"  ── unknown, absent (never spawned) ─────┘
//! ```
//!
//! ## Retry Policy
//!
//! Each slot retries privately: up to `max_attempts` fetches, sleeping
//! `base_delay * 2^attempt` after each retryable failure except the last.
//! Non-retryable errors (4xx, decode failures, invalid records) end the slot
//! immediately. A failing slot never affects its siblings.
//!
//! ## Deadline
//!
//! With a deadline configured, the collection loop stops when it expires and
//! every outstanding task is aborted; those slots are absent with
//! [`AbsenceReason::DeadlineExceeded`].

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agrifusion_core::{DatasetError, DatasetId, DateRange, GeoLocation, RawDataMap, RawRecord};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tokio::time::{self, Instant};

use crate::{DataSource, SourceError, SourceResult};

/// Bounded exponential backoff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Fetch attempts per dataset, including the first
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}

impl RetryPolicy {
    /// Create a policy
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay_ms: base_delay.as_millis().min(u64::MAX as u128) as u64,
        }
    }

    /// Delay before the first retry
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Sleep after failed attempt number `attempt` (counted from 0)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay().saturating_mul(factor)
    }
}

/// Why a requested dataset ended up without a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsenceReason {
    /// Id outside the supported set; never fetched
    UnknownDataset,
    /// Every attempt failed with a retryable error; holds the last one
    Exhausted(String),
    /// A non-retryable error ended the slot
    Rejected(String),
    /// The acquisition deadline expired first
    DeadlineExceeded,
    /// The fetch task panicked or was cancelled
    TaskFailed,
}

/// What happened to one requested dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOutcome {
    /// Dataset id as requested
    pub dataset: String,
    /// Fetch attempts made
    pub attempts: u32,
    /// `None` when the record arrived
    pub absence: Option<AbsenceReason>,
}

impl SlotOutcome {
    /// Whether the record arrived
    pub fn is_present(&self) -> bool {
        self.absence.is_none()
    }
}

/// Result of one acquisition
#[derive(Debug, Clone)]
pub struct Acquisition {
    /// Records that arrived and passed validation
    pub records: RawDataMap,
    /// One outcome per distinct requested id, in request order
    pub slots: Vec<SlotOutcome>,
    /// Wall time spent acquiring
    pub elapsed: Duration,
}

impl Acquisition {
    /// Outcome for a requested id
    pub fn slot(&self, dataset: &str) -> Option<&SlotOutcome> {
        self.slots.iter().find(|s| s.dataset == dataset)
    }

    /// Slots that ended without a record
    pub fn absent(&self) -> impl Iterator<Item = &SlotOutcome> {
        self.slots.iter().filter(|s| !s.is_present())
    }
}

/// Concurrent, partial-failure-tolerant dataset fetcher
#[derive(Clone)]
pub struct DatasetAcquirer {
    source: Arc<dyn DataSource>,
    retry: RetryPolicy,
    deadline: Option<Duration>,
}

impl DatasetAcquirer {
    /// Create an acquirer with the default retry policy and no deadline
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            retry: RetryPolicy::default(),
            deadline: None,
        }
    }

    /// Set the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Bound the whole acquisition
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Retry policy in effect
    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Fetch every requested dataset concurrently
    ///
    /// Never fails: unusable slots are absent and described in
    /// [`Acquisition::slots`]. Repeated ids are fetched once.
    pub async fn acquire(
        &self,
        location: &GeoLocation,
        range: &DateRange,
        requested: &[String],
    ) -> Acquisition {
        let started = Instant::now();
        let deadline = self.deadline.map(|d| started + d);

        let mut names: Vec<String> = Vec::with_capacity(requested.len());
        for name in requested {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }

        let mut absences: Vec<Option<AbsenceReason>> = vec![None; names.len()];
        let mut finished = vec![false; names.len()];
        let mut counters: Vec<Arc<AtomicU32>> = Vec::with_capacity(names.len());
        let mut tasks = JoinSet::new();

        for (slot, name) in names.iter().enumerate() {
            let attempts = Arc::new(AtomicU32::new(0));
            counters.push(Arc::clone(&attempts));

            let dataset = match name.parse::<DatasetId>() {
                Ok(dataset) => dataset,
                Err(e) => {
                    warn!("{}; slot left empty", e);
                    attempts.store(1, Ordering::Relaxed);
                    absences[slot] = Some(AbsenceReason::UnknownDataset);
                    finished[slot] = true;
                    continue;
                }
            };

            let source = Arc::clone(&self.source);
            let retry = self.retry.clone();
            let location = location.clone();
            let range = range.clone();
            tasks.spawn(async move {
                let outcome =
                    fetch_with_retry(source.as_ref(), dataset, &location, &range, &retry, &attempts)
                        .await;
                (slot, outcome)
            });
        }

        let mut records = RawDataMap::new();
        let mut expired = false;
        loop {
            let next = match deadline {
                Some(at) => match time::timeout_at(at, tasks.join_next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        warn!(
                            "Acquisition deadline expired with {} fetches outstanding",
                            tasks.len()
                        );
                        tasks.abort_all();
                        expired = true;
                        break;
                    }
                },
                None => tasks.join_next().await,
            };

            let Some(joined) = next else { break };
            match joined {
                Ok((slot, Ok(record))) => {
                    records.insert(record);
                    finished[slot] = true;
                }
                Ok((slot, Err(reason))) => {
                    warn!("Dataset {} absent after {:?}", names[slot], reason);
                    absences[slot] = Some(reason);
                    finished[slot] = true;
                }
                Err(e) => warn!("Fetch task failed: {}", e),
            }
        }

        let slots = names
            .into_iter()
            .enumerate()
            .map(|(slot, dataset)| {
                let absence = if finished[slot] {
                    absences[slot].take()
                } else if expired {
                    Some(AbsenceReason::DeadlineExceeded)
                } else {
                    Some(AbsenceReason::TaskFailed)
                };
                SlotOutcome {
                    dataset,
                    attempts: counters[slot].load(Ordering::Relaxed),
                    absence,
                }
            })
            .collect();

        let acquisition = Acquisition {
            records,
            slots,
            elapsed: started.elapsed(),
        };
        debug!(
            "Acquired {}/{} datasets from {} in {:?}",
            acquisition.records.len(),
            acquisition.slots.len(),
            self.source.name(),
            acquisition.elapsed
        );
        acquisition
    }
}

/// One slot's private retry loop
async fn fetch_with_retry(
    source: &dyn DataSource,
    dataset: DatasetId,
    location: &GeoLocation,
    range: &DateRange,
    retry: &RetryPolicy,
    attempts: &AtomicU32,
) -> Result<RawRecord, AbsenceReason> {
    let max_attempts = retry.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempts.fetch_add(1, Ordering::Relaxed);
        let outcome = source
            .fetch(dataset, location, range)
            .await
            .and_then(|record| accept(dataset, record));

        match outcome {
            Ok(record) => return Ok(record),
            Err(e) if !e.is_retryable() => return Err(AbsenceReason::Rejected(e.to_string())),
            Err(e) if attempt + 1 >= max_attempts => {
                return Err(AbsenceReason::Exhausted(e.to_string()))
            }
            Err(e) => {
                let delay = retry.delay_for(attempt);
                warn!(
                    "Fetch {} attempt {}/{} failed: {}; retrying in {:?}",
                    dataset,
                    attempt + 1,
                    max_attempts,
                    e,
                    delay
                );
                time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Boundary validation for a fetched record
fn accept(expected: DatasetId, record: RawRecord) -> SourceResult<RawRecord> {
    let received = record.dataset();
    if received != expected {
        return Err(SourceError::Dataset(DatasetError::Mismatch { expected, received }));
    }
    record.validate()?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrifusion_core::records::SoilMoistureRecord;

    #[test]
    fn test_backoff_doubles_from_base() {
        let retry = RetryPolicy::default();
        assert_eq!(retry.delay_for(0), Duration::from_secs(1));
        assert_eq!(retry.delay_for(1), Duration::from_secs(2));
        assert_eq!(retry.delay_for(2), Duration::from_secs(4));
    }

    #[test]
    fn test_backoff_saturates() {
        let retry = RetryPolicy::new(3, Duration::from_millis(10));
        assert_eq!(retry.delay_for(40), Duration::from_millis(10).saturating_mul(u32::MAX));
    }

    #[test]
    fn test_accept_rejects_mismatched_dataset() {
        let record = RawRecord::SmapL4(SoilMoistureRecord::default());
        let err = accept(DatasetId::SmapL3, record).unwrap_err();
        assert!(!err.is_retryable());
        assert!(matches!(
            err,
            SourceError::Dataset(DatasetError::Mismatch { expected: DatasetId::SmapL3, .. })
        ));
    }

    #[test]
    fn test_accept_rejects_non_finite_values() {
        let record = RawRecord::SmapL3(SoilMoistureRecord {
            surface_moisture: Some(f64::NAN),
            ..Default::default()
        });
        assert!(accept(DatasetId::SmapL3, record).is_err());
    }

    #[test]
    fn test_retry_policy_partial_json() {
        let retry: RetryPolicy = serde_json::from_str(r#"{"max_attempts": 5}"#).unwrap();
        assert_eq!(retry.max_attempts, 5);
        assert_eq!(retry.base_delay_ms, 1000);
    }
}
