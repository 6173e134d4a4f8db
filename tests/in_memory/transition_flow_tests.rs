//! End-to-end gated transition scenarios.

use super::helpers::{contract_gate_rules, pipeline_stores};
use dealflow::crm::domain::ClientId;
use dealflow::pipeline::{
    domain::{DealName, DealStage, NewDeal, QualificationField, QualificationRecord},
    ports::{DealRepository, QualificationRepository},
    services::{GateEvaluator, TransitionError, TransitionService},
};
use mockable::DefaultClock;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread")]
async fn second_to_last_stage_gate_scenario() {
    let (deals, qualifications) = pipeline_stores();
    let gate = GateEvaluator::new(Arc::new(contract_gate_rules()), Arc::clone(&qualifications));
    let service = TransitionService::new(Arc::clone(&deals), gate, Arc::new(DefaultClock));
    let clock = DefaultClock;

    let deal = deals
        .create(NewDeal::new(
            ClientId::new("CLI-001").expect("valid client id"),
            DealName::new("Packaging line upgrade").expect("valid deal name"),
            DealStage::Negotiation,
            &clock,
        ))
        .await
        .expect("deal creation should succeed");

    // Three of six fields filled: the transition must fail listing
    // exactly the other three, in configured order.
    let partial = QualificationRecord::new(deal.id(), &clock)
        .with(QualificationField::Metrics, "30% faster changeover", &clock)
        .with(QualificationField::DecisionCriteria, "uptime guarantees", &clock)
        .with(QualificationField::Champion, "line supervisor", &clock);
    qualifications
        .upsert(&partial)
        .await
        .expect("upsert should succeed");

    let blocked = service
        .transition(deal.id(), DealStage::ContractSigned, false)
        .await;
    match blocked {
        Err(TransitionError::GateBlocked { missing, .. }) => {
            assert_eq!(
                missing,
                ["Economic buyer", "Decision process", "Identified pain"]
            );
        }
        other => panic!("expected GateBlocked, got {other:?}"),
    }

    let unchanged = service.find(deal.id()).await.expect("deal should exist");
    assert_eq!(unchanged.stage(), DealStage::Negotiation);
    assert_eq!(unchanged.stage_changed_at(), deal.stage_changed_at());

    // Filling the remaining fields lets the same call succeed, and the
    // signed stage immediately chains into post-sale planning.
    let mut complete = partial;
    complete.set(QualificationField::EconomicBuyer, "plant director", &clock);
    complete.set(QualificationField::DecisionProcess, "quarterly capex board", &clock);
    complete.set(QualificationField::IdentifiedPain, "unplanned downtime", &clock);
    qualifications
        .upsert(&complete)
        .await
        .expect("upsert should succeed");

    let updated = service
        .transition(deal.id(), DealStage::ContractSigned, false)
        .await
        .expect("gated transition should now succeed");

    assert_eq!(updated.stage(), DealStage::Planning);
    assert!(updated.stage_changed_at() >= deal.stage_changed_at());

    let stored = service.find(deal.id()).await.expect("deal should exist");
    assert_eq!(stored.stage(), DealStage::Planning);
}

#[tokio::test(flavor = "multi_thread")]
async fn forced_transition_ignores_both_checks() {
    let (deals, qualifications) = pipeline_stores();
    let gate = GateEvaluator::new(Arc::new(contract_gate_rules()), Arc::clone(&qualifications));
    let service = TransitionService::new(Arc::clone(&deals), gate, Arc::new(DefaultClock));

    let deal = deals
        .create(NewDeal::new(
            ClientId::new("CLI-002").expect("valid client id"),
            DealName::new("Shelved expansion").expect("valid deal name"),
            DealStage::OnHold,
            &DefaultClock,
        ))
        .await
        .expect("deal creation should succeed");

    // On-hold is absorbing and the target is gated with nothing filled,
    // yet force pushes straight through both checks.
    let updated = service
        .transition(deal.id(), DealStage::ContractSigned, true)
        .await
        .expect("forced transition should succeed");

    assert_eq!(updated.stage(), DealStage::Planning);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_transition_never_touches_the_timestamp() {
    let (deals, qualifications) = pipeline_stores();
    let gate = GateEvaluator::new(
        Arc::new(dealflow::pipeline::domain::GateRuleSet::empty()),
        qualifications,
    );
    let service = TransitionService::new(Arc::clone(&deals), gate, Arc::new(DefaultClock));

    let deal = deals
        .create(NewDeal::new(
            ClientId::new("CLI-003").expect("valid client id"),
            DealName::new("Early lead").expect("valid deal name"),
            DealStage::Lead,
            &DefaultClock,
        ))
        .await
        .expect("deal creation should succeed");

    let result = service
        .transition(deal.id(), DealStage::Acceptance, false)
        .await;
    assert!(matches!(
        result,
        Err(TransitionError::IllegalTransition { .. })
    ));

    let stored = service.find(deal.id()).await.expect("deal should exist");
    assert_eq!(stored.stage_changed_at(), deal.stage_changed_at());
}
