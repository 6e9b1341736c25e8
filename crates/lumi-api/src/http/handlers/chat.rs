//! Chat turn endpoint.
//!
//! POST /api/v1/personas/{persona}/chat
//!
//! Runs one full turn: load (or greet) the persona's conversation, append
//! the user message, evaluate the trial gate, invoke the responder unless
//! blocked, append the reply, persist. The response carries everything the
//! caller needs to render the turn: reply text, gate state, remaining
//! trial messages, and expressive suggestions.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use lumi_core::greeting::GreetingSource;
use lumi_core::session::SessionService;
use lumi_types::chat::Attachment;
use lumi_types::model::ModelId;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

use super::super::persona_from_path;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user message to send.
    pub message: String,
    /// Model name; configured default when absent.
    pub model: Option<String>,
    /// Display name selecting the custom persona variant.
    pub custom_name: Option<String>,
    /// Optional file attachment on the user message.
    pub attachment: Option<Attachment>,
}

/// Response body for the chat endpoint.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub blocked: bool,
    pub upgrade_required: bool,
    pub warning_remaining: Option<u32>,
    pub remaining_messages: Option<u32>,
    pub emoji_suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_suggestion: Option<String>,
}

/// POST /api/v1/personas/{persona}/chat -- run one conversation turn.
pub async fn send_message(
    State(state): State<AppState>,
    Path(persona_label): Path<String>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatResponse>>, AppError> {
    if body.message.trim().is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    let persona = persona_from_path(&persona_label, body.custom_name.as_deref());

    let model: ModelId = match &body.model {
        Some(raw) => raw.parse().map_err(AppError::Validation)?,
        None => state.config.default_model.parse().unwrap_or_default(),
    };

    let gate = state.trial_gate().await?;
    let mut session = SessionService::start(
        state.history_store(),
        state.gateway(),
        state.gateway(),
        gate,
        persona,
        model,
        GreetingSource::Random,
    )
    .await;

    let outcome = session.send(body.message.trim(), body.attachment).await;

    Ok(Json(ApiResponse::success(ChatResponse {
        reply: outcome.reply,
        blocked: outcome.blocked,
        upgrade_required: outcome.upgrade_required,
        warning_remaining: outcome.warning_remaining,
        remaining_messages: outcome.remaining_messages,
        emoji_suggestions: outcome.suggestions.emoji_suggestions,
        image_suggestion: outcome.suggestions.image_suggestion,
    })))
}
