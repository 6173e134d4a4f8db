//! Worker scenarios from raw text to stored records.

use super::helpers::{IngestHarness, ScriptedParser};
use dealflow::crm::domain::{ActivitySource, CompanyName};
use dealflow::crm::ports::{ActivityLog, ClientDirectory};
use dealflow::ingest::domain::{JobStatus, ParseError, ParsedActivity};
use dealflow::ingest::ports::JobQueue;
use dealflow::ingest::services::WorkerOutcome;
use dealflow::pipeline::domain::{DealName, DealStage};
use dealflow::pipeline::ports::DealRepository;

#[tokio::test(flavor = "multi_thread")]
async fn new_company_note_creates_exactly_one_client_and_entry() {
    let harness = IngestHarness::new();
    let raw = "Visited Nordwind Logistics, they want a pilot for pallet tracking";
    harness
        .queue
        .enqueue(raw)
        .await
        .expect("enqueue should succeed");

    let parser = ScriptedParser::new([Ok(ParsedActivity::new("Nordwind Logistics")
        .expect("valid payload")
        .with_content("pilot for pallet tracking requested"))]);
    let outcome = harness
        .worker(parser)
        .poll_once()
        .await
        .expect("poll should succeed");
    assert!(matches!(outcome, WorkerOutcome::Completed(_)));

    let client = harness
        .directory
        .find_by_name(&CompanyName::new("Nordwind Logistics").expect("valid name"))
        .await
        .expect("lookup should succeed")
        .expect("client should have been created");
    assert_eq!(client.id().as_str(), "CLI-001");

    let entries = harness
        .activities
        .for_client(client.id(), 10)
        .await
        .expect("lookup should succeed");
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries.first().map(|entry| entry.source()),
        Some(ActivitySource::Ai)
    );

    let recent = harness.queue.recent(1).await.expect("recent should succeed");
    let job = recent.first().expect("job should be visible");
    assert_eq!(job.status(), JobStatus::Completed);
    assert_eq!(
        job.result_data().map(ParsedActivity::company_name),
        Some("Nordwind Logistics")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unparseable_note_fails_without_side_effects() {
    let harness = IngestHarness::new();
    harness
        .queue
        .enqueue("????")
        .await
        .expect("enqueue should succeed");

    let parser = ScriptedParser::new([Err(ParseError::MissingCompanyName)]);
    let outcome = harness
        .worker(parser)
        .poll_once()
        .await
        .expect("poll should succeed");
    assert!(matches!(outcome, WorkerOutcome::Failed(_)));

    let recent = harness.queue.recent(1).await.expect("recent should succeed");
    let job = recent.first().expect("job should be visible");
    assert_eq!(job.status(), JobStatus::Failed);
    assert!(
        job.error_message()
            .is_some_and(|message| !message.is_empty())
    );

    // No client, no activity: the stores are exactly as before.
    assert!(
        harness
            .directory
            .find_by_name(&CompanyName::new("Nordwind Logistics").expect("valid name"))
            .await
            .expect("lookup should succeed")
            .is_none()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn note_naming_a_deal_materializes_it_at_the_parsed_stage() {
    let harness = IngestHarness::new();
    harness
        .queue
        .enqueue("Acme wants a proposal for the conveyor retrofit")
        .await
        .expect("enqueue should succeed");

    let parser = ScriptedParser::new([Ok(ParsedActivity::new("Acme Corp")
        .expect("valid payload")
        .with_deal("Conveyor retrofit", DealStage::Proposal))]);
    harness
        .worker(parser)
        .poll_once()
        .await
        .expect("poll should succeed");

    let client = harness
        .directory
        .find_by_name(&CompanyName::new("Acme Corp").expect("valid name"))
        .await
        .expect("lookup should succeed")
        .expect("client should exist");
    let deal = harness
        .deals
        .find_by_name(
            client.id(),
            &DealName::new("Conveyor retrofit").expect("valid name"),
        )
        .await
        .expect("lookup should succeed")
        .expect("deal should exist");

    // Materialized directly at the parsed stage; no gating applies here.
    assert_eq!(deal.stage(), DealStage::Proposal);
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_enqueues_converge_on_one_client() {
    let harness = IngestHarness::new();
    let raw = "Call with Acme Corp about support renewal";
    harness
        .queue
        .enqueue(raw)
        .await
        .expect("enqueue should succeed");
    harness
        .queue
        .enqueue(raw)
        .await
        .expect("enqueue should succeed");

    let parser = ScriptedParser::new([
        Ok(ParsedActivity::new("Acme Corp").expect("valid payload")),
        Ok(ParsedActivity::new("Acme Corp").expect("valid payload")),
    ]);
    let worker = harness.worker(parser);
    worker.poll_once().await.expect("first poll should succeed");
    worker.poll_once().await.expect("second poll should succeed");

    let client = harness
        .directory
        .find_by_name(&CompanyName::new("Acme Corp").expect("valid name"))
        .await
        .expect("lookup should succeed")
        .expect("client should exist");
    assert_eq!(client.id().as_str(), "CLI-001");

    let jobs = harness.queue.recent(10).await.expect("recent should succeed");
    assert!(jobs.iter().all(|job| job.status() == JobStatus::Completed));
}
