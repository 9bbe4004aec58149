//! Identity Resolver: `Authorization: Bearer <token>` → `Option<IdentityPayload>`.
//!
//! Every failure (missing/malformed header, other scheme, rejected token, timeout) ends
//! as `None`. Nothing here rejects the request.

use std::time::Duration;

use axum::http::{HeaderMap, header};
use tracing::debug;

use crate::services::auth::{IdentityPayload, TokenVerifier};

const BEARER: &str = "Bearer";

/// Split an Authorization value into `(scheme, credential)` on the first whitespace run.
pub fn parse_authorization(value: &str) -> Option<(&str, &str)> {
    let (scheme, credential) = value
        .trim()
        .split_once(|c: char| c.is_ascii_whitespace())?;
    let credential = credential.trim();

    if scheme.is_empty() || credential.is_empty() {
        return None;
    }
    Some((scheme, credential))
}

/// Bearer credential of the request, if the header is well-formed.
///
/// The scheme must be exactly `bearer` in any casing, and the credential a single token.
pub fn bearer_credential(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, credential) = parse_authorization(value)?;

    if !scheme.eq_ignore_ascii_case(BEARER) {
        return None;
    }
    if credential.contains(|c: char| c.is_ascii_whitespace()) {
        return None;
    }
    Some(credential)
}

/// Resolve the caller identity; the verifier call is bounded by `timeout`.
pub async fn resolve_identity(
    headers: &HeaderMap,
    verifier: &dyn TokenVerifier,
    timeout: Duration,
) -> Option<IdentityPayload> {
    let credential = bearer_credential(headers)?;

    match tokio::time::timeout(timeout, verifier.verify(credential)).await {
        Ok(Ok(payload)) => Some(payload),
        Ok(Err(err)) => {
            debug!(error = %err, "bearer token not verified");
            None
        }
        Err(_) => {
            debug!(?timeout, "bearer token verification timed out");
            None
        }
    }
}
