use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::IdentityPayload;

use super::RequestIdentity;

fn identity_of(parts: &Parts) -> Option<IdentityPayload> {
    parts
        .extensions
        .get::<RequestIdentity>()
        .and_then(|ctx| ctx.payload().cloned())
}

/// Identity if the caller presented a valid bearer token, `None` otherwise.
/// Never rejects; also `None` when the gate is not installed.
pub struct MaybeIdentity(pub Option<IdentityPayload>);

impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeIdentity(identity_of(parts)))
    }
}

/// For handlers that need an authenticated caller: 401 when there is no identity.
pub struct RequireIdentity(pub IdentityPayload);

impl<S> FromRequestParts<S> for RequireIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        identity_of(parts)
            .map(RequireIdentity)
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;
    use serde_json::{Value, json};

    use super::*;

    fn parts_with(identity: Option<RequestIdentity>) -> Parts {
        let mut req = Request::builder().uri("/").body(()).unwrap();
        if let Some(identity) = identity {
            req.extensions_mut().insert(identity);
        }
        req.into_parts().0
    }

    fn payload() -> IdentityPayload {
        let Value::Object(claims) = json!({"sub": "acct-9"}) else {
            unreachable!()
        };
        IdentityPayload::new(claims)
    }

    #[tokio::test]
    async fn maybe_identity_reads_slot() {
        let mut parts = parts_with(Some(RequestIdentity(Some(payload()))));
        let MaybeIdentity(identity) = MaybeIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(identity, Some(payload()));

        let mut parts = parts_with(None);
        let MaybeIdentity(identity) = MaybeIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(identity, None);
    }

    #[tokio::test]
    async fn require_identity_rejects_absent_identity() {
        let mut parts = parts_with(Some(RequestIdentity(None)));
        let result = RequireIdentity::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));

        let mut parts = parts_with(Some(RequestIdentity(Some(payload()))));
        let RequireIdentity(identity) = RequireIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(identity.account_id(), Some("acct-9"));
    }
}
