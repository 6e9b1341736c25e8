//! Stored-conversation endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use lumi_core::session::key::SessionKey;
use lumi_core::session::store::HistoryStore;
use lumi_types::chat::Message;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

use super::super::persona_from_path;

/// Query parameters selecting the custom persona variant.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub custom_name: Option<String>,
}

/// Response body for the history endpoint.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub key: String,
    pub messages: Vec<Message>,
}

/// GET /api/v1/personas/{persona}/history -- stored conversation, as-is.
///
/// Returns an empty list when nothing is stored; greeting synthesis only
/// happens when a chat session starts.
pub async fn get_history(
    State(state): State<AppState>,
    Path(persona_label): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<HistoryResponse>>, AppError> {
    let persona = persona_from_path(&persona_label, query.custom_name.as_deref());
    let key = SessionKey::for_persona(&persona);
    let messages = state.history_store().load(&key).await?.unwrap_or_default();

    Ok(Json(ApiResponse::success(HistoryResponse {
        key: key.as_str().to_string(),
        messages,
    })))
}

/// DELETE /api/v1/personas/{persona}/history -- clear stored conversation.
pub async fn delete_history(
    State(state): State<AppState>,
    Path(persona_label): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let persona = persona_from_path(&persona_label, query.custom_name.as_deref());
    let key = SessionKey::for_persona(&persona);
    state.history_store().clear(&key).await?;

    Ok(Json(ApiResponse::success(serde_json::json!({
        "cleared": key.as_str(),
    }))))
}
