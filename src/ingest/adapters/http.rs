//! HTTP adapter for the text-parsing collaborator.
//!
//! The collaborator is an opaque service that accepts raw text and
//! answers with a JSON object; which model sits behind it is not this
//! crate's concern.

use crate::ingest::{
    domain::{ParseError, ParsedActivity},
    ports::ActivityParser,
};
use async_trait::async_trait;
use serde_json::{Value, json};

/// Parser backed by an HTTP text-understanding endpoint.
#[derive(Debug, Clone)]
pub struct HttpActivityParser {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpActivityParser {
    /// Creates a parser posting to the given endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    /// Sets a bearer credential for the endpoint.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[async_trait]
impl ActivityParser for HttpActivityParser {
    async fn parse(&self, raw_text: &str) -> Result<ParsedActivity, ParseError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "text": raw_text }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| ParseError::Collaborator(err.to_string()))?;
        let value: Value = response
            .json()
            .await
            .map_err(|err| ParseError::Collaborator(err.to_string()))?;

        ParsedActivity::from_json(&value)
    }
}
