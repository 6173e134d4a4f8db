//! Deal lifecycle stages and the static transition graph.

use super::ParseStageError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A point in the deal lifecycle.
///
/// The lifecycle is two ordered chains plus two absorbing stages: the
/// pre-sale chain `L0`..`L7`, the post-sale chain `P0`..`P2`, and the
/// absorbing `LOST` and `HOLD` stages. Stage codes are the canonical
/// storage representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DealStage {
    /// `L0` — lead identified, development not yet started.
    Lead,
    /// `L1` — lead is being tracked and qualified.
    Tracking,
    /// `L2` — proposal presented to the client.
    Proposal,
    /// `L3` — opportunity formally registered.
    Registered,
    /// `L4` — proof of concept in execution.
    PocExecution,
    /// `L5` — proof of concept complete.
    PocComplete,
    /// `L6` — commercial negotiation.
    Negotiation,
    /// `L7` — contract signed. Entering this stage chains into
    /// [`DealStage::Planning`] automatically.
    ContractSigned,
    /// `P0` — post-sale delivery planning.
    Planning,
    /// `P1` — delivery in progress.
    Delivery,
    /// `P2` — delivery accepted; final stage of the post-sale chain.
    Acceptance,
    /// `LOST` — opportunity lost; absorbing.
    Lost,
    /// `HOLD` — opportunity shelved; absorbing.
    OnHold,
}

impl DealStage {
    /// All stages in lifecycle order.
    pub const ALL: [Self; 13] = [
        Self::Lead,
        Self::Tracking,
        Self::Proposal,
        Self::Registered,
        Self::PocExecution,
        Self::PocComplete,
        Self::Negotiation,
        Self::ContractSigned,
        Self::Planning,
        Self::Delivery,
        Self::Acceptance,
        Self::Lost,
        Self::OnHold,
    ];

    /// Returns the canonical storage code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "L0",
            Self::Tracking => "L1",
            Self::Proposal => "L2",
            Self::Registered => "L3",
            Self::PocExecution => "L4",
            Self::PocComplete => "L5",
            Self::Negotiation => "L6",
            Self::ContractSigned => "L7",
            Self::Planning => "P0",
            Self::Delivery => "P1",
            Self::Acceptance => "P2",
            Self::Lost => "LOST",
            Self::OnHold => "HOLD",
        }
    }

    /// Returns the stages a deal in this stage may legally move to.
    ///
    /// The set is a static lookup, ordered with the chain successor first.
    /// Terminal stages return an empty slice.
    #[must_use]
    pub const fn legal_next_stages(self) -> &'static [Self] {
        match self {
            Self::Lead => &[Self::Tracking, Self::Lost, Self::OnHold],
            Self::Tracking => &[Self::Proposal, Self::Lost, Self::OnHold],
            Self::Proposal => &[Self::Registered, Self::Lost, Self::OnHold],
            Self::Registered => &[Self::PocExecution, Self::Lost, Self::OnHold],
            Self::PocExecution => &[Self::PocComplete, Self::Lost, Self::OnHold],
            Self::PocComplete => &[Self::Negotiation, Self::Lost, Self::OnHold],
            Self::Negotiation => &[Self::ContractSigned, Self::Lost, Self::OnHold],
            Self::ContractSigned => &[Self::Planning],
            Self::Planning => &[Self::Delivery],
            Self::Delivery => &[Self::Acceptance],
            Self::Acceptance | Self::Lost | Self::OnHold => &[],
        }
    }

    /// Returns whether `target` is in this stage's legal next set.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.legal_next_stages().contains(&target)
    }

    /// Returns whether this stage has no outgoing edges.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Acceptance | Self::Lost | Self::OnHold)
    }

    /// Returns whether this stage belongs to the pre-sale chain.
    #[must_use]
    pub const fn is_presale(self) -> bool {
        matches!(
            self,
            Self::Lead
                | Self::Tracking
                | Self::Proposal
                | Self::Registered
                | Self::PocExecution
                | Self::PocComplete
                | Self::Negotiation
                | Self::ContractSigned
        )
    }

    /// Returns whether this stage belongs to the post-sale chain.
    #[must_use]
    pub const fn is_postsale(self) -> bool {
        matches!(self, Self::Planning | Self::Delivery | Self::Acceptance)
    }
}

impl TryFrom<&str> for DealStage {
    type Error = ParseStageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "L0" => Ok(Self::Lead),
            "L1" => Ok(Self::Tracking),
            "L2" => Ok(Self::Proposal),
            "L3" => Ok(Self::Registered),
            "L4" => Ok(Self::PocExecution),
            "L5" => Ok(Self::PocComplete),
            "L6" => Ok(Self::Negotiation),
            "L7" => Ok(Self::ContractSigned),
            "P0" => Ok(Self::Planning),
            "P1" => Ok(Self::Delivery),
            "P2" => Ok(Self::Acceptance),
            "LOST" => Ok(Self::Lost),
            "HOLD" => Ok(Self::OnHold),
            _ => Err(ParseStageError(value.to_owned())),
        }
    }
}

impl fmt::Display for DealStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DealStage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DealStage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Self::try_from(code.as_str()).map_err(serde::de::Error::custom)
    }
}

/// Formats a stage list as comma-separated codes for error messages.
#[must_use]
pub fn format_stage_list(stages: &[DealStage]) -> String {
    let codes: Vec<&str> = stages.iter().map(|stage| stage.as_str()).collect();
    codes.join(", ")
}
