//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Conversation
        .route(
            "/personas/{persona}/chat",
            post(handlers::chat::send_message),
        )
        .route(
            "/personas/{persona}/history",
            get(handlers::history::get_history).delete(handlers::history::delete_history),
        )
        // Account + billing
        .route("/account", get(handlers::account::get_account))
        .route("/billing/checkout", post(handlers::billing::create_checkout))
        .route("/billing/webhook", post(handlers::billing::upgrade_webhook))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
