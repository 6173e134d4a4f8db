//! Transition engine composing the lifecycle graph and gate evaluation.

use super::{GateEvaluationError, GateEvaluator};
use crate::pipeline::{
    domain::{Deal, DealId, DealStage, format_stage_list},
    ports::{DealRepository, DealRepositoryError, QualificationRepository},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by [`TransitionService::transition`].
#[derive(Debug, Clone, Error)]
pub enum TransitionError {
    /// The referenced deal does not exist.
    #[error("deal not found: {0}")]
    NotFound(DealId),

    /// The target stage is not reachable from the current stage.
    #[error(
        "cannot transition from {from} to {target}; allowed next stages: [{}]",
        format_stage_list(.allowed)
    )]
    IllegalTransition {
        /// Stage the deal is currently in.
        from: DealStage,
        /// Requested target stage.
        target: DealStage,
        /// Legal next stages from `from`.
        allowed: &'static [DealStage],
    },

    /// A configured gate for the target stage has unmet requirements.
    #[error("stage {target} is gated; missing: {}", .missing.join(", "))]
    GateBlocked {
        /// Requested target stage.
        target: DealStage,
        /// Labels of unmet requirements, in configured order.
        missing: Vec<String>,
    },

    /// Gate evaluation failed before a decision was reached.
    #[error(transparent)]
    Gate(#[from] GateEvaluationError),

    /// Deal persistence failed.
    #[error(transparent)]
    Repository(#[from] DealRepositoryError),
}

/// Applies validated stage changes to deals.
///
/// The engine never retries: every failure is synchronous and
/// caller-visible, and a rejected transition leaves the deal untouched.
#[derive(Clone)]
pub struct TransitionService<D, Q, C>
where
    D: DealRepository,
    Q: QualificationRepository,
    C: Clock + Send + Sync,
{
    deals: Arc<D>,
    gate: GateEvaluator<Q>,
    clock: Arc<C>,
}

impl<D, Q, C> TransitionService<D, Q, C>
where
    D: DealRepository,
    Q: QualificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a transition service over a deal store and gate evaluator.
    #[must_use]
    pub const fn new(deals: Arc<D>, gate: GateEvaluator<Q>, clock: Arc<C>) -> Self {
        Self { deals, gate, clock }
    }

    /// Retrieves a deal by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NotFound`] when the deal does not exist,
    /// or [`TransitionError::Repository`] when the lookup fails.
    pub async fn find(&self, deal_id: DealId) -> Result<Deal, TransitionError> {
        self.deals
            .find_by_id(deal_id)
            .await?
            .ok_or(TransitionError::NotFound(deal_id))
    }

    /// Moves a deal to `target`, subject to gate and adjacency checks.
    ///
    /// With `force` set, both checks are skipped entirely, including the
    /// terminal-stage check; this is the operator escape hatch. On success
    /// the stage and `stage_changed_at` are persisted, and entering
    /// [`DealStage::ContractSigned`] immediately chains into
    /// [`DealStage::Planning`] with a second persisted write that bypasses
    /// all checks.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NotFound`] for an unknown deal,
    /// [`TransitionError::GateBlocked`] when a configured gate has unmet
    /// requirements, [`TransitionError::IllegalTransition`] when `target`
    /// is not adjacent to the current stage, and
    /// [`TransitionError::Gate`]/[`TransitionError::Repository`] for
    /// collaborator failures.
    pub async fn transition(
        &self,
        deal_id: DealId,
        target: DealStage,
        force: bool,
    ) -> Result<Deal, TransitionError> {
        let mut deal = self.find(deal_id).await?;

        if !force {
            let decision = self.gate.evaluate(deal_id, target).await?;
            if !decision.is_allowed() {
                return Err(TransitionError::GateBlocked {
                    target,
                    missing: decision.into_missing_labels(),
                });
            }

            let current = deal.stage();
            if !current.can_transition_to(target) {
                return Err(TransitionError::IllegalTransition {
                    from: current,
                    target,
                    allowed: current.legal_next_stages(),
                });
            }
        }

        deal.move_to(target, &*self.clock);
        self.deals.update(&deal).await?;

        // Entering the signed stage is never observable at rest: the
        // system rule chains straight into post-sale planning.
        if target == DealStage::ContractSigned {
            deal.move_to(DealStage::Planning, &*self.clock);
            self.deals.update(&deal).await?;
        }

        Ok(deal)
    }
}
