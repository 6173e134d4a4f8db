//! Domain-focused tests for deal aggregates, names, and gate config.

use crate::crm::domain::ClientId;
use crate::pipeline::domain::{
    Deal, DealDomainError, DealId, DealName, DealStage, GateConfigError, GateRuleSet, NewDeal,
    Priority, QualificationField, QualificationRecord,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn client_id() -> Result<ClientId, eyre::Report> {
    Ok(ClientId::new("CLI-001")?)
}

#[rstest]
fn deal_name_trims_surrounding_whitespace() -> eyre::Result<()> {
    let name = DealName::new("  Line upgrade  ")?;
    assert_eq!(name.as_str(), "Line upgrade");
    Ok(())
}

#[rstest]
fn deal_name_rejects_blank_input() {
    assert_eq!(DealName::new("   "), Err(DealDomainError::EmptyDealName));
}

#[rstest]
fn priority_round_trips_and_defaults_to_medium() -> eyre::Result<()> {
    assert_eq!(Priority::default(), Priority::Medium);
    for priority in [Priority::Low, Priority::Medium, Priority::High] {
        assert_eq!(Priority::try_from(priority.as_str())?, priority);
    }
    assert_eq!(
        Priority::try_from("urgent"),
        Err(DealDomainError::InvalidPriority("urgent".to_owned()))
    );
    Ok(())
}

#[rstest]
fn new_deal_materializes_with_matching_timestamps(clock: DefaultClock) -> eyre::Result<()> {
    let new_deal = NewDeal::new(client_id()?, DealName::new("POC rollout")?, DealStage::Lead, &clock)
        .with_owner("sales-eng")
        .with_priority(Priority::High);
    let deal = Deal::from_new(DealId::new(1), new_deal);

    assert_eq!(deal.stage(), DealStage::Lead);
    assert_eq!(deal.priority(), Priority::High);
    assert_eq!(deal.owner(), Some("sales-eng"));
    assert_eq!(deal.stage_changed_at(), deal.created_at());
    assert_eq!(deal.updated_at(), deal.created_at());
    Ok(())
}

#[rstest]
fn move_to_stamps_stage_changed_at(clock: DefaultClock) -> eyre::Result<()> {
    let new_deal = NewDeal::new(client_id()?, DealName::new("POC rollout")?, DealStage::Lead, &clock);
    let mut deal = Deal::from_new(DealId::new(7), new_deal);
    let before = deal.stage_changed_at();

    deal.move_to(DealStage::Tracking, &clock);

    assert_eq!(deal.stage(), DealStage::Tracking);
    eyre::ensure!(deal.stage_changed_at() >= before);
    assert_eq!(deal.updated_at(), deal.stage_changed_at());
    Ok(())
}

#[rstest]
fn qualification_blank_fields_count_as_unfilled(clock: DefaultClock) {
    let record = QualificationRecord::new(DealId::new(3), &clock)
        .with(QualificationField::Metrics, "20% throughput", &clock)
        .with(QualificationField::Champion, "   ", &clock);

    assert!(record.is_filled(QualificationField::Metrics));
    assert!(!record.is_filled(QualificationField::Champion));
    assert!(!record.is_filled(QualificationField::EconomicBuyer));
}

#[rstest]
fn gate_rule_set_parses_external_document() -> eyre::Result<()> {
    let document = r#"{
        "L7": [
            { "field": "metrics", "label": "Metrics" },
            { "field": "champion", "label": "Champion" }
        ]
    }"#;
    let rules = GateRuleSet::from_json(document)?;

    let rule = rules
        .rule_for(DealStage::ContractSigned)
        .ok_or_else(|| eyre::eyre!("expected a rule for L7"))?;
    let fields: Vec<_> = rule
        .requirements()
        .iter()
        .map(|requirement| (requirement.field(), requirement.label().to_owned()))
        .collect();
    assert_eq!(
        fields,
        vec![
            (QualificationField::Metrics, "Metrics".to_owned()),
            (QualificationField::Champion, "Champion".to_owned()),
        ]
    );
    assert!(rules.rule_for(DealStage::Planning).is_none());
    Ok(())
}

#[rstest]
fn gate_rule_set_rejects_unknown_stage_key() {
    let document = r#"{ "X1": [] }"#;
    assert_eq!(
        GateRuleSet::from_json(document),
        Err(GateConfigError::UnknownStage("X1".to_owned()))
    );
}

#[rstest]
fn gate_rule_set_rejects_malformed_documents() {
    assert!(matches!(
        GateRuleSet::from_json("not json"),
        Err(GateConfigError::Document(_))
    ));
}
