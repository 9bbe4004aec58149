/*
 * Responsibility
 * - Versioned APIs + the unversioned root/fallback handlers
 */
use axum::Json;
use serde_json::{Value, json};

use crate::api::v1::extractors::MaybeIdentity;
use crate::error::AppError;

pub mod v1;

/// GET /
///
/// Public banner. `account_id` is added when the caller presented a valid token.
pub async fn root(MaybeIdentity(identity): MaybeIdentity) -> Json<Value> {
    let mut body = json!({"message": "EdocumentAPI up at /api/v1"});
    if let Some(account_id) = identity.as_ref().and_then(|id| id.account_id()) {
        body["account_id"] = json!(account_id);
    }
    Json(body)
}

pub async fn not_found() -> AppError {
    AppError::not_found("route")
}
