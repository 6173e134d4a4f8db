//! Deal aggregate root and related lifecycle types.

use super::{DealDomainError, DealId, DealName, DealStage};
use crate::crm::domain::ClientId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Commercial priority attached to a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Default priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = DealDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(DealDomainError::InvalidPriority(value.to_owned())),
        }
    }
}

/// Deal aggregate root.
///
/// The stage field is only ever rewritten through
/// [`Deal::move_to`], which stamps `stage_changed_at`; validation of the
/// move belongs to the transition service, not the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    id: DealId,
    client_id: ClientId,
    name: DealName,
    owner: Option<String>,
    priority: Priority,
    stage: DealStage,
    stage_changed_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Insert payload for a deal that does not yet have a store identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeal {
    /// Owning client.
    pub client_id: ClientId,
    /// Deal name, unique within the client.
    pub name: DealName,
    /// Responsible owner, if assigned.
    pub owner: Option<String>,
    /// Commercial priority.
    pub priority: Priority,
    /// Initial lifecycle stage.
    pub stage: DealStage,
    /// Creation timestamp; also the initial `stage_changed_at`.
    pub created_at: DateTime<Utc>,
}

impl NewDeal {
    /// Creates an insert payload at the given initial stage.
    #[must_use]
    pub fn new(client_id: ClientId, name: DealName, stage: DealStage, clock: &impl Clock) -> Self {
        Self {
            client_id,
            name,
            owner: None,
            priority: Priority::default(),
            stage,
            created_at: clock.utc(),
        }
    }

    /// Sets the responsible owner.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the commercial priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Parameter object for reconstructing a persisted deal aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDealData {
    /// Persisted deal identifier.
    pub id: DealId,
    /// Persisted owning client.
    pub client_id: ClientId,
    /// Persisted deal name.
    pub name: DealName,
    /// Persisted owner, if any.
    pub owner: Option<String>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted lifecycle stage.
    pub stage: DealStage,
    /// Persisted stage-change timestamp.
    pub stage_changed_at: DateTime<Utc>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    /// Materializes a deal from an insert payload and a store-allocated id.
    #[must_use]
    pub fn from_new(id: DealId, new_deal: NewDeal) -> Self {
        Self {
            id,
            client_id: new_deal.client_id,
            name: new_deal.name,
            owner: new_deal.owner,
            priority: new_deal.priority,
            stage: new_deal.stage,
            stage_changed_at: new_deal.created_at,
            created_at: new_deal.created_at,
            updated_at: new_deal.created_at,
        }
    }

    /// Reconstructs a deal from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedDealData) -> Self {
        Self {
            id: data.id,
            client_id: data.client_id,
            name: data.name,
            owner: data.owner,
            priority: data.priority,
            stage: data.stage,
            stage_changed_at: data.stage_changed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the deal identifier.
    #[must_use]
    pub const fn id(&self) -> DealId {
        self.id
    }

    /// Returns the owning client identifier.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the deal name.
    #[must_use]
    pub const fn name(&self) -> &DealName {
        &self.name
    }

    /// Returns the responsible owner, if assigned.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Returns the commercial priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the current lifecycle stage.
    #[must_use]
    pub const fn stage(&self) -> DealStage {
        self.stage
    }

    /// Returns the timestamp of the last accepted stage change.
    #[must_use]
    pub const fn stage_changed_at(&self) -> DateTime<Utc> {
        self.stage_changed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Rewrites the stage unconditionally, stamping `stage_changed_at`.
    ///
    /// Gate and adjacency validation is the transition service's concern;
    /// the aggregate records whatever stage the engine decided on.
    pub fn move_to(&mut self, stage: DealStage, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.stage = stage;
        self.stage_changed_at = timestamp;
        self.updated_at = timestamp;
    }

    /// Reassigns the responsible owner.
    pub fn assign_owner(&mut self, owner: impl Into<String>, clock: &impl Clock) {
        self.owner = Some(owner.into());
        self.updated_at = clock.utc();
    }
}
