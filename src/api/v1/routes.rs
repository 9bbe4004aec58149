/*
 * Responsibility
 * - URL layout of v1
 * - The gate is applied once in app.rs, around everything (not per route)
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::{accounts::me, health::health};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/accounts/me", get(me))
}
