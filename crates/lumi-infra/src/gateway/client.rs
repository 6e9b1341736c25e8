//! GatewayClient -- concrete responder and suggester over HTTP.
//!
//! Implements [`CompanionResponder`] and [`ExpressiveSuggester`] against the
//! gateway's JSON endpoints. One attempt per call; every failure is mapped
//! to the boundary's fixed fallback (the in-character apology for replies,
//! empty suggestions otherwise) so callers never see an error.

use std::time::Duration;

use tracing::warn;

use lumi_core::responder::{CompanionResponder, ExpressiveSuggester, FALLBACK_REPLY};
use lumi_types::chat::ExpressiveSuggestions;
use lumi_types::error::GatewayError;
use lumi_types::model::ModelId;
use lumi_types::persona::Persona;

use super::types::{RespondRequest, RespondResponse, SuggestRequest};

/// HTTP client for the generative gateway.
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    /// Create a new gateway client.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn try_respond(&self, request: &RespondRequest<'_>) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(self.url("/v1/persona/respond"))
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        let body: RespondResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Deserialization(e.to_string()))?;

        Ok(body.response)
    }

    async fn try_suggest(
        &self,
        request: &SuggestRequest<'_>,
    ) -> Result<ExpressiveSuggestions, GatewayError> {
        let response = self
            .client
            .post(self.url("/v1/expressive/suggest"))
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::Deserialization(e.to_string()))
    }
}

impl CompanionResponder for GatewayClient {
    async fn respond(
        &self,
        persona: &Persona,
        transcript: &str,
        user_input: &str,
        model: ModelId,
        attachment_url: Option<&str>,
    ) -> String {
        let model_name = model.to_string();
        let request = RespondRequest {
            mode: persona.display_name(),
            story_memory: transcript,
            user_input,
            model: &model_name,
            attachment_url,
        };

        match self.try_respond(&request).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(persona = %persona, error = %err, "reply generation failed; substituting fallback");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

impl ExpressiveSuggester for GatewayClient {
    async fn suggest(&self, emotional_state: &str) -> ExpressiveSuggestions {
        let request = SuggestRequest { emotional_state };

        match self.try_suggest(&request).await {
            Ok(suggestions) => suggestions,
            Err(err) => {
                warn!(error = %err, "expressive suggestion failed; returning empty");
                ExpressiveSuggestions::default()
            }
        }
    }
}
