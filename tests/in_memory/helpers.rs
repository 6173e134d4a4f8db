//! Shared test helpers for in-memory integration tests.

use async_trait::async_trait;
use dealflow::crm::adapters::memory::{InMemoryActivityLog, InMemoryClientDirectory};
use dealflow::crm::ports::{ActivityLog, ClientDirectory};
use dealflow::ingest::adapters::memory::InMemoryJobQueue;
use dealflow::ingest::domain::{ParseError, ParsedActivity};
use dealflow::ingest::ports::{ActivityParser, JobQueue};
use dealflow::ingest::services::IngestWorker;
use dealflow::pipeline::adapters::memory::{InMemoryDealRepository, InMemoryQualificationRepository};
use dealflow::pipeline::domain::{DealStage, GateRequirement, GateRule, GateRuleSet, QualificationField};
use dealflow::pipeline::ports::DealRepository;
use mockable::DefaultClock;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Parser double that replays a scripted sequence of outcomes.
pub struct ScriptedParser {
    outcomes: Mutex<VecDeque<Result<ParsedActivity, ParseError>>>,
}

impl ScriptedParser {
    /// Creates a parser that answers with the given outcomes in order.
    pub fn new(outcomes: impl IntoIterator<Item = Result<ParsedActivity, ParseError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ActivityParser for ScriptedParser {
    async fn parse(&self, _raw_text: &str) -> Result<ParsedActivity, ParseError> {
        self.outcomes
            .lock()
            .expect("scripted parser lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(ParseError::Collaborator(
                    "scripted parser exhausted".to_owned(),
                ))
            })
    }
}

/// Everything an ingestion scenario needs, sharing one set of stores.
pub struct IngestHarness {
    pub queue: Arc<InMemoryJobQueue<DefaultClock>>,
    pub directory: Arc<InMemoryClientDirectory>,
    pub activities: Arc<InMemoryActivityLog>,
    pub deals: Arc<InMemoryDealRepository>,
}

impl IngestHarness {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(InMemoryJobQueue::new(Arc::new(DefaultClock))),
            directory: Arc::new(InMemoryClientDirectory::new()),
            activities: Arc::new(InMemoryActivityLog::new()),
            deals: Arc::new(InMemoryDealRepository::new()),
        }
    }

    /// Builds a worker over the shared stores and a scripted parser.
    pub fn worker(&self, parser: ScriptedParser) -> IngestWorker<DefaultClock> {
        IngestWorker::new(
            Arc::clone(&self.queue) as Arc<dyn JobQueue>,
            Arc::new(parser),
            Arc::clone(&self.directory) as Arc<dyn ClientDirectory>,
            Arc::clone(&self.activities) as Arc<dyn ActivityLog>,
            Arc::clone(&self.deals) as Arc<dyn DealRepository>,
            Arc::new(DefaultClock),
        )
    }
}

/// Qualification repositories are seeded with this rule in the gated
/// transition scenarios: six fields guard entry into the signed stage.
pub fn contract_gate_rules() -> GateRuleSet {
    GateRuleSet::empty().with_rule(
        DealStage::ContractSigned,
        GateRule::new([
            GateRequirement::new(QualificationField::Metrics, "Metrics"),
            GateRequirement::new(QualificationField::EconomicBuyer, "Economic buyer"),
            GateRequirement::new(QualificationField::DecisionCriteria, "Decision criteria"),
            GateRequirement::new(QualificationField::DecisionProcess, "Decision process"),
            GateRequirement::new(QualificationField::IdentifiedPain, "Identified pain"),
            GateRequirement::new(QualificationField::Champion, "Champion"),
        ]),
    )
}

/// Fresh deal and qualification stores for transition scenarios.
pub fn pipeline_stores() -> (
    Arc<InMemoryDealRepository>,
    Arc<InMemoryQualificationRepository>,
) {
    (
        Arc::new(InMemoryDealRepository::new()),
        Arc::new(InMemoryQualificationRepository::new()),
    )
}
