//! Qualification record consulted by stage gate rules.

use super::DealId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six canonical qualification fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationField {
    /// Quantified benefit the client expects.
    Metrics,
    /// Person with final budget authority.
    EconomicBuyer,
    /// Criteria the client evaluates vendors on.
    DecisionCriteria,
    /// The client's internal purchasing process.
    DecisionProcess,
    /// The concrete pain driving the purchase.
    IdentifiedPain,
    /// Internal advocate at the client.
    Champion,
}

impl QualificationField {
    /// All fields in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Metrics,
        Self::EconomicBuyer,
        Self::DecisionCriteria,
        Self::DecisionProcess,
        Self::IdentifiedPain,
        Self::Champion,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Metrics => "metrics",
            Self::EconomicBuyer => "economic_buyer",
            Self::DecisionCriteria => "decision_criteria",
            Self::DecisionProcess => "decision_process",
            Self::IdentifiedPain => "identified_pain",
            Self::Champion => "champion",
        }
    }
}

impl fmt::Display for QualificationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-deal qualification sheet: a flat field → text mapping.
///
/// Fields left `None` or holding only whitespace count as incomplete for
/// gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationRecord {
    deal_id: DealId,
    metrics: Option<String>,
    economic_buyer: Option<String>,
    decision_criteria: Option<String>,
    decision_process: Option<String>,
    identified_pain: Option<String>,
    champion: Option<String>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted qualification record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedQualificationData {
    /// Deal the sheet belongs to.
    pub deal_id: DealId,
    /// Persisted metrics field.
    pub metrics: Option<String>,
    /// Persisted economic buyer field.
    pub economic_buyer: Option<String>,
    /// Persisted decision criteria field.
    pub decision_criteria: Option<String>,
    /// Persisted decision process field.
    pub decision_process: Option<String>,
    /// Persisted identified pain field.
    pub identified_pain: Option<String>,
    /// Persisted champion field.
    pub champion: Option<String>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl QualificationRecord {
    /// Creates an empty record for a deal.
    #[must_use]
    pub fn new(deal_id: DealId, clock: &impl Clock) -> Self {
        Self {
            deal_id,
            metrics: None,
            economic_buyer: None,
            decision_criteria: None,
            decision_process: None,
            identified_pain: None,
            champion: None,
            updated_at: clock.utc(),
        }
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedQualificationData) -> Self {
        Self {
            deal_id: data.deal_id,
            metrics: data.metrics,
            economic_buyer: data.economic_buyer,
            decision_criteria: data.decision_criteria,
            decision_process: data.decision_process,
            identified_pain: data.identified_pain,
            champion: data.champion,
            updated_at: data.updated_at,
        }
    }

    /// Returns the deal this record belongs to.
    #[must_use]
    pub const fn deal_id(&self) -> DealId {
        self.deal_id
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the raw value of a field, if set.
    #[must_use]
    pub fn value(&self, field: QualificationField) -> Option<&str> {
        match field {
            QualificationField::Metrics => self.metrics.as_deref(),
            QualificationField::EconomicBuyer => self.economic_buyer.as_deref(),
            QualificationField::DecisionCriteria => self.decision_criteria.as_deref(),
            QualificationField::DecisionProcess => self.decision_process.as_deref(),
            QualificationField::IdentifiedPain => self.identified_pain.as_deref(),
            QualificationField::Champion => self.champion.as_deref(),
        }
    }

    /// Returns whether a field holds non-blank content.
    #[must_use]
    pub fn is_filled(&self, field: QualificationField) -> bool {
        self.value(field)
            .is_some_and(|text| !text.trim().is_empty())
    }

    /// Sets a field, stamping the update timestamp.
    pub fn set(&mut self, field: QualificationField, text: impl Into<String>, clock: &impl Clock) {
        let value = Some(text.into());
        match field {
            QualificationField::Metrics => self.metrics = value,
            QualificationField::EconomicBuyer => self.economic_buyer = value,
            QualificationField::DecisionCriteria => self.decision_criteria = value,
            QualificationField::DecisionProcess => self.decision_process = value,
            QualificationField::IdentifiedPain => self.identified_pain = value,
            QualificationField::Champion => self.champion = value,
        }
        self.updated_at = clock.utc();
    }

    /// Builder form of [`QualificationRecord::set`].
    #[must_use]
    pub fn with(mut self, field: QualificationField, text: impl Into<String>, clock: &impl Clock) -> Self {
        self.set(field, text, clock);
        self
    }
}
