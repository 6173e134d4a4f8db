//! Tests for the in-memory directory and activity log adapters.

use crate::crm::{
    adapters::memory::{InMemoryActivityLog, InMemoryClientDirectory},
    domain::{ActionType, ActivitySource, CompanyName, NewActivity},
    ports::{ActivityLog, ClientDirectory},
};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};
use std::sync::Arc;

#[fixture]
fn directory() -> Arc<InMemoryClientDirectory> {
    Arc::new(InMemoryClientDirectory::new())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_or_create_allocates_sequential_identifiers(
    directory: Arc<InMemoryClientDirectory>,
) -> eyre::Result<()> {
    let now = DefaultClock.utc();

    let first = directory
        .find_or_create(&CompanyName::new("Acme Corp")?, now)
        .await?;
    let second = directory
        .find_or_create(&CompanyName::new("Borealis Ltd")?, now)
        .await?;

    assert_eq!(first.id().as_str(), "CLI-001");
    assert_eq!(second.id().as_str(), "CLI-002");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_or_create_is_idempotent_per_name(
    directory: Arc<InMemoryClientDirectory>,
) -> eyre::Result<()> {
    let now = DefaultClock.utc();
    let name = CompanyName::new("Acme Corp")?;

    let first = directory.find_or_create(&name, now).await?;
    let again = directory.find_or_create(&name, DefaultClock.utc()).await?;

    assert_eq!(first, again);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_callers_agree_on_one_client_per_name(
    directory: Arc<InMemoryClientDirectory>,
) -> eyre::Result<()> {
    let mut handles = Vec::new();
    for _ in 0..8 {
        let shared = Arc::clone(&directory);
        handles.push(tokio::spawn(async move {
            shared
                .find_or_create(&CompanyName::new("Acme Corp")?, DefaultClock.utc())
                .await
                .map_err(eyre::Report::from)
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await??.id().clone());
    }

    ids.dedup();
    assert_eq!(ids.len(), 1, "every caller should see the same client");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn activity_log_returns_entries_newest_first() -> eyre::Result<()> {
    let log = InMemoryActivityLog::new();
    let directory = InMemoryClientDirectory::new();
    let clock = DefaultClock;
    let client = directory
        .find_or_create(&CompanyName::new("Acme Corp")?, clock.utc())
        .await?;

    for content in ["first visit", "second visit", "third visit"] {
        log.record(NewActivity::new(
            client.id().clone(),
            ActionType::Meeting,
            content,
            ActivitySource::Manual,
            &clock,
        )?)
        .await?;
    }

    let entries = log.for_client(client.id(), 2).await?;
    let contents: Vec<_> = entries.iter().map(|entry| entry.content()).collect();
    assert_eq!(contents, ["third visit", "second visit"]);
    Ok(())
}
