//! Gate rule configuration for stage transitions.
//!
//! Rules arrive from an external JSON document keyed by target stage code.
//! A stage with no configured rule gates nothing.

use super::{DealStage, QualificationField};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// One required qualification field with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GateRequirement {
    field: QualificationField,
    label: String,
}

impl GateRequirement {
    /// Creates a requirement pairing a field with a display label.
    #[must_use]
    pub fn new(field: QualificationField, label: impl Into<String>) -> Self {
        Self {
            field,
            label: label.into(),
        }
    }

    /// Returns the required qualification field.
    #[must_use]
    pub const fn field(&self) -> QualificationField {
        self.field
    }

    /// Returns the configured display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Ordered requirement list for one target stage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GateRule {
    requirements: Vec<GateRequirement>,
}

impl GateRule {
    /// Creates a rule from an ordered requirement list.
    #[must_use]
    pub fn new(requirements: impl IntoIterator<Item = GateRequirement>) -> Self {
        Self {
            requirements: requirements.into_iter().collect(),
        }
    }

    /// Returns the requirements in configured order.
    #[must_use]
    pub fn requirements(&self) -> &[GateRequirement] {
        &self.requirements
    }
}

/// Gate rules keyed by target stage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GateRuleSet {
    rules: HashMap<DealStage, GateRule>,
}

impl GateRuleSet {
    /// Creates a rule set that gates nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds or replaces the rule for a target stage.
    #[must_use]
    pub fn with_rule(mut self, target: DealStage, rule: GateRule) -> Self {
        self.rules.insert(target, rule);
        self
    }

    /// Returns the rule configured for a target stage, if any.
    #[must_use]
    pub fn rule_for(&self, target: DealStage) -> Option<&GateRule> {
        self.rules.get(&target)
    }

    /// Parses a rule set from its external JSON document form.
    ///
    /// The document maps stage codes to ordered requirement lists:
    ///
    /// ```json
    /// {
    ///   "L7": [
    ///     { "field": "metrics", "label": "Metrics" },
    ///     { "field": "champion", "label": "Champion" }
    ///   ]
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`GateConfigError::Document`] when the document is not valid
    /// JSON in the expected shape, or [`GateConfigError::UnknownStage`] for
    /// an unrecognized stage code key.
    pub fn from_json(document: &str) -> Result<Self, GateConfigError> {
        let raw: HashMap<String, Vec<GateRequirement>> =
            serde_json::from_str(document).map_err(|err| GateConfigError::Document(err.to_string()))?;

        let mut rules = HashMap::with_capacity(raw.len());
        for (code, requirements) in raw {
            let stage = DealStage::try_from(code.as_str())
                .map_err(|_| GateConfigError::UnknownStage(code))?;
            rules.insert(stage, GateRule::new(requirements));
        }
        Ok(Self { rules })
    }
}

/// Errors raised while loading gate rule configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateConfigError {
    /// The rule document could not be parsed.
    #[error("malformed gate rule document: {0}")]
    Document(String),

    /// A rule is keyed by an unrecognized stage code.
    #[error("gate rule references unknown stage: {0}")]
    UnknownStage(String),
}
