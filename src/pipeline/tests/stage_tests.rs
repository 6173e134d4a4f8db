//! Unit tests for the static lifecycle graph.

use crate::pipeline::domain::{DealStage, ParseStageError, format_stage_list};
use rstest::rstest;

#[rstest]
#[case(DealStage::Lead, &[DealStage::Tracking, DealStage::Lost, DealStage::OnHold])]
#[case(DealStage::Tracking, &[DealStage::Proposal, DealStage::Lost, DealStage::OnHold])]
#[case(DealStage::Proposal, &[DealStage::Registered, DealStage::Lost, DealStage::OnHold])]
#[case(DealStage::Registered, &[DealStage::PocExecution, DealStage::Lost, DealStage::OnHold])]
#[case(DealStage::PocExecution, &[DealStage::PocComplete, DealStage::Lost, DealStage::OnHold])]
#[case(DealStage::PocComplete, &[DealStage::Negotiation, DealStage::Lost, DealStage::OnHold])]
#[case(DealStage::Negotiation, &[DealStage::ContractSigned, DealStage::Lost, DealStage::OnHold])]
#[case(DealStage::ContractSigned, &[DealStage::Planning])]
#[case(DealStage::Planning, &[DealStage::Delivery])]
#[case(DealStage::Delivery, &[DealStage::Acceptance])]
#[case(DealStage::Acceptance, &[])]
#[case(DealStage::Lost, &[])]
#[case(DealStage::OnHold, &[])]
fn legal_next_stages_matches_declared_graph(
    #[case] stage: DealStage,
    #[case] expected: &[DealStage],
) {
    assert_eq!(stage.legal_next_stages(), expected);
}

#[rstest]
#[case(DealStage::Acceptance)]
#[case(DealStage::Lost)]
#[case(DealStage::OnHold)]
fn terminal_stages_have_no_outgoing_edges(#[case] stage: DealStage) {
    assert!(stage.is_terminal());
    assert!(stage.legal_next_stages().is_empty());
}

#[rstest]
fn every_non_terminal_stage_has_outgoing_edges() {
    for stage in DealStage::ALL {
        if !stage.is_terminal() {
            assert!(
                !stage.legal_next_stages().is_empty(),
                "{stage} should have outgoing edges"
            );
        }
    }
}

#[rstest]
fn can_transition_to_follows_the_edge_set() {
    assert!(DealStage::Lead.can_transition_to(DealStage::Tracking));
    assert!(DealStage::Lead.can_transition_to(DealStage::OnHold));
    assert!(!DealStage::Lead.can_transition_to(DealStage::Proposal));
    assert!(!DealStage::ContractSigned.can_transition_to(DealStage::Lost));
    assert!(!DealStage::Acceptance.can_transition_to(DealStage::Lead));
}

#[rstest]
fn chain_membership_is_exclusive() {
    for stage in DealStage::ALL {
        let in_chains = u8::from(stage.is_presale()) + u8::from(stage.is_postsale());
        let expected = u8::from(!matches!(stage, DealStage::Lost | DealStage::OnHold));
        assert_eq!(in_chains, expected, "{stage} chain membership");
    }
}

#[rstest]
fn stage_codes_round_trip_through_storage_form() {
    for stage in DealStage::ALL {
        assert_eq!(DealStage::try_from(stage.as_str()), Ok(stage));
    }
}

#[rstest]
fn stage_codes_parse_case_insensitively() {
    assert_eq!(DealStage::try_from("lost"), Ok(DealStage::Lost));
    assert_eq!(DealStage::try_from(" l7 "), Ok(DealStage::ContractSigned));
}

#[rstest]
fn unknown_stage_code_is_rejected() {
    assert_eq!(
        DealStage::try_from("Z9"),
        Err(ParseStageError("Z9".to_owned()))
    );
}

#[rstest]
fn format_stage_list_joins_codes() {
    assert_eq!(
        format_stage_list(&[DealStage::Tracking, DealStage::Lost, DealStage::OnHold]),
        "L1, LOST, HOLD"
    );
    assert_eq!(format_stage_list(&[]), "");
}
