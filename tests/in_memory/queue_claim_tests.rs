//! Exclusivity tests for concurrent job claiming.

use dealflow::ingest::adapters::memory::InMemoryJobQueue;
use dealflow::ingest::domain::{JobId, JobStatus};
use dealflow::ingest::ports::JobQueue;
use mockable::DefaultClock;
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_claimants_receive_distinct_jobs() {
    let queue = Arc::new(InMemoryJobQueue::new(Arc::new(DefaultClock)));
    for index in 0..8 {
        queue
            .enqueue(&format!("note {index}"))
            .await
            .expect("enqueue should succeed");
    }

    let mut handles = Vec::new();
    for _ in 0..4 {
        let shared: Arc<dyn JobQueue> = queue.clone();
        handles.push(tokio::spawn(async move { shared.claim_next().await }));
    }

    let mut claimed: Vec<JobId> = Vec::new();
    for handle in handles {
        let job = handle
            .await
            .expect("claim task should not panic")
            .expect("claim should succeed")
            .expect("eight pending jobs should satisfy four claimants");
        assert_eq!(job.status(), JobStatus::Processing);
        claimed.push(job.id());
    }

    let distinct: HashSet<JobId> = claimed.iter().copied().collect();
    assert_eq!(distinct.len(), claimed.len(), "no job may be claimed twice");
}

#[tokio::test(flavor = "multi_thread")]
async fn claims_drain_in_creation_order_until_empty() {
    let queue = InMemoryJobQueue::new(Arc::new(DefaultClock));
    let mut expected = Vec::new();
    for index in 0..3 {
        expected.push(
            queue
                .enqueue(&format!("note {index}"))
                .await
                .expect("enqueue should succeed"),
        );
    }

    let mut claimed = Vec::new();
    while let Some(job) = queue.claim_next().await.expect("claim should succeed") {
        claimed.push(job.id());
    }

    assert_eq!(claimed, expected);
}

#[tokio::test(flavor = "multi_thread")]
async fn terminal_statuses_carry_exactly_one_outcome_field() {
    let queue = InMemoryJobQueue::new(Arc::new(DefaultClock));
    let completed_id = queue
        .enqueue("note for completion")
        .await
        .expect("enqueue should succeed");
    let failed_id = queue
        .enqueue("note for failure")
        .await
        .expect("enqueue should succeed");

    while queue
        .claim_next()
        .await
        .expect("claim should succeed")
        .is_some()
    {}

    let payload =
        dealflow::ingest::domain::ParsedActivity::new("Acme Corp").expect("valid payload");
    queue
        .complete(completed_id, &payload)
        .await
        .expect("complete should succeed");
    queue
        .fail(failed_id, "parser gave up")
        .await
        .expect("fail should succeed");

    for job in queue.recent(10).await.expect("recent should succeed") {
        match job.status() {
            JobStatus::Completed => {
                assert!(job.result_data().is_some());
                assert!(job.error_message().is_none());
            }
            JobStatus::Failed => {
                assert!(job.result_data().is_none());
                assert!(job.error_message().is_some());
            }
            other => panic!("unexpected non-terminal status {other}"),
        }
    }
}
