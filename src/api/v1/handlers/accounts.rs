/*
 * Responsibility
 * - GET /api/v1/accounts/me: the caller as resolved by the gate
 * - Authentication policy (401) is decided here, not in the gate
 */
use axum::Json;
use serde::Serialize;

use crate::api::v1::extractors::RequireIdentity;
use crate::services::auth::IdentityPayload;

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub account_id: Option<String>,
    pub claims: IdentityPayload,
}

pub async fn me(RequireIdentity(identity): RequireIdentity) -> Json<AccountResponse> {
    Json(AccountResponse {
        account_id: identity.account_id().map(str::to_owned),
        claims: identity,
    })
}
