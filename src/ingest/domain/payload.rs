//! Structured payload produced by the text-parsing collaborator.

use super::ParseError;
use crate::crm::domain::ActionType;
use crate::pipeline::domain::DealStage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured fields extracted from one free-form note.
///
/// The company name is the only required field; everything else is
/// best-effort. A payload with no usable company name cannot be
/// constructed — that condition is a parse failure, not an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedActivity {
    company_name: String,
    #[serde(default)]
    action_type: Option<ActionType>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    deal_name: Option<String>,
    #[serde(default)]
    deal_stage: Option<DealStage>,
}

impl ParsedActivity {
    /// Creates a payload from the extracted company name.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingCompanyName`] when the name is blank.
    pub fn new(company_name: impl Into<String>) -> Result<Self, ParseError> {
        let raw = company_name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ParseError::MissingCompanyName);
        }
        Ok(Self {
            company_name: trimmed.to_owned(),
            action_type: None,
            content: None,
            deal_name: None,
            deal_stage: None,
        })
    }

    /// Sets the extracted action type.
    #[must_use]
    pub const fn with_action_type(mut self, action_type: ActionType) -> Self {
        self.action_type = Some(action_type);
        self
    }

    /// Sets the extracted log content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the extracted deal reference.
    #[must_use]
    pub fn with_deal(mut self, name: impl Into<String>, stage: DealStage) -> Self {
        self.deal_name = Some(name.into());
        self.deal_stage = Some(stage);
        self
    }

    /// Maps a collaborator's JSON output into a validated payload.
    ///
    /// Unrecognized action types are dropped rather than rejected; the
    /// worker falls back to its default. A deal reference is only honored
    /// when both the name and a valid stage code are present.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Malformed`] when the output is not a JSON
    /// object or names an unknown stage, and
    /// [`ParseError::MissingCompanyName`] when no usable company name is
    /// present.
    pub fn from_json(value: &Value) -> Result<Self, ParseError> {
        let object = value
            .as_object()
            .ok_or_else(|| ParseError::Malformed("expected a JSON object".to_owned()))?;

        let company_name = object
            .get("company_name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let mut payload = Self::new(company_name)?;

        if let Some(action) = object.get("action_type").and_then(Value::as_str)
            && let Ok(parsed) = ActionType::try_from(action)
        {
            payload = payload.with_action_type(parsed);
        }

        if let Some(content) = object.get("content").and_then(Value::as_str) {
            payload = payload.with_content(content);
        }

        let deal_name = object.get("deal_name").and_then(Value::as_str);
        let deal_stage = object.get("deal_stage").and_then(Value::as_str);
        if let (Some(name), Some(code)) = (deal_name, deal_stage) {
            let stage = DealStage::try_from(code)
                .map_err(|err| ParseError::Malformed(err.to_string()))?;
            payload = payload.with_deal(name, stage);
        }

        Ok(payload)
    }

    /// Returns the extracted company name.
    #[must_use]
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Returns the extracted action type, if any.
    #[must_use]
    pub const fn action_type(&self) -> Option<ActionType> {
        self.action_type
    }

    /// Returns the extracted log content, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns the deal reference when both name and stage were extracted.
    #[must_use]
    pub fn deal_ref(&self) -> Option<(&str, DealStage)> {
        match (self.deal_name.as_deref(), self.deal_stage) {
            (Some(name), Some(stage)) => Some((name, stage)),
            _ => None,
        }
    }
}
