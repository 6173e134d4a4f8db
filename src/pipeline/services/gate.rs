//! Gate rule evaluation against a deal's qualification record.

use crate::pipeline::{
    domain::{DealId, DealStage, GateRuleSet},
    ports::{QualificationRepository, QualificationRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Outcome of evaluating the gate for one target stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    missing_labels: Vec<String>,
}

impl GateDecision {
    /// Decision for an ungated or fully satisfied target.
    #[must_use]
    pub const fn allowed() -> Self {
        Self {
            missing_labels: Vec::new(),
        }
    }

    /// Returns whether the transition may proceed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        self.missing_labels.is_empty()
    }

    /// Returns the labels of unmet requirements, in configured order.
    #[must_use]
    pub fn missing_labels(&self) -> &[String] {
        &self.missing_labels
    }

    /// Consumes the decision, yielding the missing labels.
    #[must_use]
    pub fn into_missing_labels(self) -> Vec<String> {
        self.missing_labels
    }
}

/// Errors raised while evaluating a gate.
#[derive(Debug, Clone, Error)]
pub enum GateEvaluationError {
    /// The qualification record could not be fetched.
    #[error(transparent)]
    Repository(#[from] QualificationRepositoryError),
}

/// Evaluates configured gate rules before a stage transition.
#[derive(Clone)]
pub struct GateEvaluator<Q>
where
    Q: QualificationRepository,
{
    rules: Arc<GateRuleSet>,
    qualifications: Arc<Q>,
}

impl<Q> GateEvaluator<Q>
where
    Q: QualificationRepository,
{
    /// Creates an evaluator over a rule set and a qualification store.
    #[must_use]
    pub const fn new(rules: Arc<GateRuleSet>, qualifications: Arc<Q>) -> Self {
        Self {
            rules,
            qualifications,
        }
    }

    /// Evaluates the gate for moving `deal_id` into `target`.
    ///
    /// A target with no configured rule is always allowed. Otherwise every
    /// required field that is absent or blank on the deal's qualification
    /// record is reported by its configured label, preserving configured
    /// order. A deal with no record at all fails every requirement.
    ///
    /// # Errors
    ///
    /// Returns [`GateEvaluationError::Repository`] when the record lookup
    /// fails.
    pub async fn evaluate(
        &self,
        deal_id: DealId,
        target: DealStage,
    ) -> Result<GateDecision, GateEvaluationError> {
        let Some(rule) = self.rules.rule_for(target) else {
            return Ok(GateDecision::allowed());
        };

        let record = self.qualifications.find_by_deal(deal_id).await?;
        let missing_labels = rule
            .requirements()
            .iter()
            .filter(|requirement| {
                !record
                    .as_ref()
                    .is_some_and(|sheet| sheet.is_filled(requirement.field()))
            })
            .map(|requirement| requirement.label().to_owned())
            .collect();

        Ok(GateDecision { missing_labels })
    }
}
