//! Billing endpoints: checkout URL construction and the upgrade webhook.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::info;

use lumi_core::account::AccountStore;
use lumi_infra::checkout::checkout_url;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for the checkout endpoint.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Response body for the checkout endpoint.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub checkout_url: String,
}

/// POST /api/v1/billing/checkout -- store the profile and return the
/// external checkout redirect URL.
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<ApiResponse<CheckoutResponse>>, AppError> {
    if body.email.is_some() || body.display_name.is_some() {
        state
            .account_store()
            .set_profile(body.email.as_deref(), body.display_name.as_deref())
            .await?;
    }

    let url = checkout_url(
        &state.config.checkout_url,
        body.email.as_deref(),
        body.display_name.as_deref(),
    )?;

    Ok(Json(ApiResponse::success(CheckoutResponse {
        checkout_url: url.to_string(),
    })))
}

/// POST /api/v1/billing/webhook -- upgrade-completed confirmation.
///
/// Marks the account subscribed. Sessions started afterwards begin in the
/// Subscribed state; the payment collaborator owns everything before this
/// signal.
pub async fn upgrade_webhook(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    state.account_store().set_subscribed(true).await?;
    info!("upgrade webhook received; account marked subscribed");

    Ok(Json(ApiResponse::success(serde_json::json!({
        "status": "subscribed",
    }))))
}
