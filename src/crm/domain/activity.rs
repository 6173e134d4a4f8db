//! Activity log entries attached to clients.

use super::{ActivityId, ClientId, CrmDomainError, ParseActionTypeError, ParseActivitySourceError};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of work an activity entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Client meeting. Default when the source does not say.
    #[default]
    Meeting,
    /// Proposal work.
    Proposal,
    /// Development work.
    Development,
    /// Documentation work.
    Documentation,
    /// Email correspondence.
    Email,
}

impl ActionType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Proposal => "proposal",
            Self::Development => "development",
            Self::Documentation => "documentation",
            Self::Email => "email",
        }
    }
}

impl TryFrom<&str> for ActionType {
    type Error = ParseActionTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "meeting" => Ok(Self::Meeting),
            "proposal" => Ok(Self::Proposal),
            "development" => Ok(Self::Development),
            "documentation" => Ok(Self::Documentation),
            "email" => Ok(Self::Email),
            _ => Err(ParseActionTypeError(value.to_owned())),
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin of an activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivitySource {
    /// Entered by a person.
    Manual,
    /// Derived by the ingestion worker.
    Ai,
}

impl ActivitySource {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Ai => "ai",
        }
    }
}

impl TryFrom<&str> for ActivitySource {
    type Error = ParseActivitySourceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "manual" => Ok(Self::Manual),
            "ai" => Ok(Self::Ai),
            _ => Err(ParseActivitySourceError(value.to_owned())),
        }
    }
}

impl fmt::Display for ActivitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insert payload for an activity entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    /// Client the entry belongs to.
    pub client_id: ClientId,
    /// Kind of work recorded.
    pub action_type: ActionType,
    /// Free-text content.
    pub content: String,
    /// Origin of the entry.
    pub source: ActivitySource,
    /// Date the work is logged against.
    pub logged_on: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewActivity {
    /// Creates an insert payload logged against the clock's current date.
    ///
    /// # Errors
    ///
    /// Returns [`CrmDomainError::EmptyActivityContent`] when the content is
    /// blank.
    pub fn new(
        client_id: ClientId,
        action_type: ActionType,
        content: impl Into<String>,
        source: ActivitySource,
        clock: &impl Clock,
    ) -> Result<Self, CrmDomainError> {
        let text = content.into();
        if text.trim().is_empty() {
            return Err(CrmDomainError::EmptyActivityContent);
        }
        let timestamp = clock.utc();
        Ok(Self {
            client_id,
            action_type,
            content: text,
            source,
            logged_on: timestamp.date_naive(),
            created_at: timestamp,
        })
    }
}

/// A stored activity log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    id: ActivityId,
    client_id: ClientId,
    action_type: ActionType,
    content: String,
    source: ActivitySource,
    logged_on: NaiveDate,
    created_at: DateTime<Utc>,
}

impl Activity {
    /// Materializes an entry from an insert payload and a store-allocated
    /// id.
    #[must_use]
    pub fn from_new(id: ActivityId, new_activity: NewActivity) -> Self {
        Self {
            id,
            client_id: new_activity.client_id,
            action_type: new_activity.action_type,
            content: new_activity.content,
            source: new_activity.source,
            logged_on: new_activity.logged_on,
            created_at: new_activity.created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityId {
        self.id
    }

    /// Returns the owning client identifier.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the kind of work recorded.
    #[must_use]
    pub const fn action_type(&self) -> ActionType {
        self.action_type
    }

    /// Returns the free-text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the origin of the entry.
    #[must_use]
    pub const fn source(&self) -> ActivitySource {
        self.source
    }

    /// Returns the date the work is logged against.
    #[must_use]
    pub const fn logged_on(&self) -> NaiveDate {
        self.logged_on
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
