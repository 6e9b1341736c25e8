//! Account endpoint.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use lumi_core::account::AccountStore;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Response body for the account endpoint.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub status: String,
    pub trial_message_limit: u32,
}

/// GET /api/v1/account -- subscription state and profile.
pub async fn get_account(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AccountResponse>>, AppError> {
    let account = state.account_store().get().await?;

    Ok(Json(ApiResponse::success(AccountResponse {
        email: account.email,
        display_name: account.display_name,
        status: account.status.to_string(),
        trial_message_limit: state.config.trial_message_limit,
    })))
}
