//! Integration tests for concurrent acquisition
//!
//! Run on a paused clock so backoff and deadline timing are checked without
//! real sleeps.

mod common;

use std::time::Duration;

use agrifusion_connectors::{AbsenceReason, DatasetAcquirer, RetryPolicy};
use agrifusion_core::DatasetId;

use common::{location, names, range, Script, ScriptedSource};

#[tokio::test(start_paused = true)]
async fn test_unknown_dataset_is_absent_without_backoff() {
    let source = ScriptedSource::new().shared();
    let acquirer = DatasetAcquirer::new(source.clone());

    let acquisition = acquirer
        .acquire(&location(), &range(), &names(&["sentinel_2", "gpm"]))
        .await;

    let slot = acquisition.slot("sentinel_2").unwrap();
    assert_eq!(slot.attempts, 1);
    assert_eq!(slot.absence, Some(AbsenceReason::UnknownDataset));
    assert_eq!(source.total_calls(), 1);
    assert!(acquisition.records.contains(DatasetId::Gpm));
    assert_eq!(acquisition.elapsed, Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_two_failures_then_success() {
    let source = ScriptedSource::new()
        .script(DatasetId::SmapL3, Script::FailTimes(2))
        .shared();
    let acquirer = DatasetAcquirer::new(source.clone());

    let acquisition = acquirer
        .acquire(&location(), &range(), &names(&["smap_l3"]))
        .await;

    assert!(acquisition.records.contains(DatasetId::SmapL3));
    assert_eq!(acquisition.slot("smap_l3").unwrap().attempts, 3);
    assert_eq!(source.calls(DatasetId::SmapL3), 3);
    // 1s after the first failure, 2s after the second
    assert!(acquisition.elapsed >= Duration::from_secs(3));
    assert!(acquisition.elapsed < Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_slot_does_not_abort_siblings() {
    let source = ScriptedSource::new()
        .script(DatasetId::Grace, Script::AlwaysFail)
        .shared();
    let acquirer = DatasetAcquirer::new(source.clone());

    let acquisition = acquirer
        .acquire(&location(), &range(), &names(&["grace", "smap_l3", "modis_lst"]))
        .await;

    let grace = acquisition.slot("grace").unwrap();
    assert_eq!(grace.attempts, 3);
    assert!(matches!(grace.absence, Some(AbsenceReason::Exhausted(_))));
    assert_eq!(source.calls(DatasetId::Grace), 3);

    assert!(acquisition.records.contains(DatasetId::SmapL3));
    assert!(acquisition.records.contains(DatasetId::ModisLst));
    assert_eq!(acquisition.absent().count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_client_error_is_not_retried() {
    let source = ScriptedSource::new()
        .script(DatasetId::Ecostress, Script::Reject(404))
        .shared();
    let acquirer = DatasetAcquirer::new(source.clone());

    let acquisition = acquirer
        .acquire(&location(), &range(), &names(&["ecostress"]))
        .await;

    let slot = acquisition.slot("ecostress").unwrap();
    assert_eq!(slot.attempts, 1);
    assert!(matches!(slot.absence, Some(AbsenceReason::Rejected(_))));
    assert_eq!(acquisition.elapsed, Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_mismatched_record_is_rejected() {
    let source = ScriptedSource::new()
        .script(DatasetId::SmapL3, Script::WrongDataset(DatasetId::SmapL4))
        .shared();
    let acquirer = DatasetAcquirer::new(source.clone());

    let acquisition = acquirer
        .acquire(&location(), &range(), &names(&["smap_l3"]))
        .await;

    assert!(acquisition.records.is_empty());
    assert_eq!(source.calls(DatasetId::SmapL3), 1);
    assert!(matches!(
        acquisition.slot("smap_l3").unwrap().absence,
        Some(AbsenceReason::Rejected(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_deadline_cancels_outstanding_fetches() {
    let source = ScriptedSource::new()
        .script(DatasetId::Landsat, Script::Slow(Duration::from_secs(10)))
        .shared();
    let acquirer =
        DatasetAcquirer::new(source.clone()).with_deadline(Some(Duration::from_secs(2)));

    let acquisition = acquirer
        .acquire(&location(), &range(), &names(&["landsat", "gpm", "grace"]))
        .await;

    let landsat = acquisition.slot("landsat").unwrap();
    assert_eq!(landsat.absence, Some(AbsenceReason::DeadlineExceeded));
    assert_eq!(landsat.attempts, 1);
    assert!(acquisition.records.contains(DatasetId::Gpm));
    assert!(acquisition.records.contains(DatasetId::Grace));
    assert!(acquisition.elapsed >= Duration::from_secs(2));
    assert!(acquisition.elapsed < Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_deadline_cuts_backoff_short() {
    let source = ScriptedSource::new()
        .script(DatasetId::Gpm, Script::AlwaysFail)
        .shared();
    let acquirer = DatasetAcquirer::new(source.clone())
        .with_deadline(Some(Duration::from_millis(1500)));

    let acquisition = acquirer
        .acquire(&location(), &range(), &names(&["gpm"]))
        .await;

    let gpm = acquisition.slot("gpm").unwrap();
    assert_eq!(gpm.absence, Some(AbsenceReason::DeadlineExceeded));
    assert_eq!(gpm.attempts, 2);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_ids_fetched_once() {
    let source = ScriptedSource::new().shared();
    let acquirer = DatasetAcquirer::new(source.clone());

    let acquisition = acquirer
        .acquire(&location(), &range(), &names(&["gpm", "smap_l3", "gpm"]))
        .await;

    assert_eq!(source.calls(DatasetId::Gpm), 1);
    let order: Vec<_> = acquisition.slots.iter().map(|s| s.dataset.as_str()).collect();
    assert_eq!(order, ["gpm", "smap_l3"]);
}

#[tokio::test(start_paused = true)]
async fn test_custom_retry_policy() {
    let source = ScriptedSource::new()
        .script(DatasetId::ModisVegetation, Script::AlwaysFail)
        .shared();
    let acquirer = DatasetAcquirer::new(source.clone())
        .with_retry(RetryPolicy::new(4, Duration::from_millis(100)));

    let acquisition = acquirer
        .acquire(&location(), &range(), &names(&["modis_vegetation"]))
        .await;

    assert_eq!(source.calls(DatasetId::ModisVegetation), 4);
    // 100 + 200 + 400 ms
    assert!(acquisition.elapsed >= Duration::from_millis(700));
    assert!(acquisition.elapsed < Duration::from_millis(800));
}
