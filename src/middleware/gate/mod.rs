//! Request gate: Transport Guard, then Identity Resolver, before any route handler.
//!
//! ```text
//! PRE_CHECK --transport ok--> (resolve identity) --> ADMITTED
//!     \--transport mismatch--> REJECTED (403)
//! ```
//!
//! The resolved identity (possibly `None`) is handed to downstream handlers through the
//! `RequestIdentity` request extension.

pub mod identity;
pub mod transport;

use std::time::Duration;

use axum::{
    Router,
    extract::{Request, State},
    http::HeaderMap,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::v1::extractors::RequestIdentity;
use crate::config::Config;
use crate::error::TransportRejected;
use crate::services::auth::{IdentityPayload, TokenVerifier};
use crate::state::AppState;

pub use identity::{bearer_credential, parse_authorization, resolve_identity};
pub use transport::{check_transport, request_scheme};

/// Knobs the gate needs. Kept apart from `Config` so the gate stays testable on its own.
#[derive(Debug, Clone)]
pub struct GatePolicy {
    pub approved_scheme: String,
    // Honor X-Forwarded-* (TLS terminated by a reverse proxy).
    pub trust_forwarded_proto: bool,
    pub verifier_timeout: Duration,
}

impl GatePolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            approved_scheme: config.approved_scheme.clone(),
            trust_forwarded_proto: config.trust_forwarded_proto,
            verifier_timeout: config.verifier_timeout,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Rejected(TransportRejected),
    Admitted(Option<IdentityPayload>),
}

/// Run both checks for one request. The verifier is only reached on the admitted edge.
pub async fn evaluate(
    policy: &GatePolicy,
    verifier: &dyn TokenVerifier,
    headers: &HeaderMap,
) -> GateDecision {
    let scheme = request_scheme(headers, policy.trust_forwarded_proto);
    if !check_transport(&scheme, &policy.approved_scheme) {
        debug!(%scheme, approved = %policy.approved_scheme, "transport rejected");
        return GateDecision::Rejected(TransportRejected);
    }

    let identity = resolve_identity(headers, verifier, policy.verifier_timeout).await;
    debug!(identified = identity.is_some(), "request admitted");

    GateDecision::Admitted(identity)
}

/// Put the gate in front of every route of `router` (fallback included).
///
/// ```ignore
/// let router = Router::new().nest("/api/v1", api::v1::routes()).fallback(api::not_found);
/// let router = middleware::gate::apply(router, state.clone()).with_state(state);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, gate_middleware))
}

async fn gate_middleware(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let decision = evaluate(&state.gate, state.verifier.as_ref(), req.headers()).await;

    match decision {
        GateDecision::Rejected(rejection) => rejection.into_response(),
        GateDecision::Admitted(identity) => {
            // handed to the identity extractors via request extensions
            req.extensions_mut().insert(RequestIdentity(identity));
            next.run(req).await
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::http::{HeaderValue, header};
    use serde_json::Map;

    use super::*;
    use crate::services::auth::VerifyError;

    #[derive(Default)]
    struct CountingVerifier {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TokenVerifier for CountingVerifier {
        async fn verify(&self, _token: &str) -> Result<IdentityPayload, VerifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(IdentityPayload::new(Map::new()))
        }
    }

    fn policy() -> GatePolicy {
        GatePolicy {
            approved_scheme: "https".into(),
            trust_forwarded_proto: true,
            verifier_timeout: Duration::from_secs(1),
        }
    }

    fn headers(proto: &'static str, auth: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-proto", HeaderValue::from_static(proto));
        if let Some(auth) = auth {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_static(auth));
        }
        headers
    }

    #[tokio::test]
    async fn rejected_before_identity_resolution() {
        let verifier = CountingVerifier::default();

        let decision = evaluate(&policy(), &verifier, &headers("http", Some("Bearer t"))).await;

        assert_eq!(decision, GateDecision::Rejected(TransportRejected));
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn admitted_with_identity() {
        let verifier = CountingVerifier::default();

        let decision = evaluate(&policy(), &verifier, &headers("HTTPS", Some("Bearer t"))).await;

        assert_eq!(
            decision,
            GateDecision::Admitted(Some(IdentityPayload::new(Map::new())))
        );
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn admitted_without_identity() {
        let verifier = CountingVerifier::default();

        let decision = evaluate(&policy(), &verifier, &headers("https", None)).await;

        assert_eq!(decision, GateDecision::Admitted(None));
    }

    #[test]
    fn policy_follows_config() {
        let config = Config::from_lookup(|key| match key {
            "ACCESS_JWT_SECRET" => Some("s".into()),
            "SECURE_SCHEME" => Some("http".into()),
            "VERIFIER_TIMEOUT_MS" => Some("250".into()),
            _ => None,
        })
        .unwrap();

        let policy = GatePolicy::from_config(&config);

        assert_eq!(policy.approved_scheme, "http");
        assert_eq!(policy.verifier_timeout, Duration::from_millis(250));
        assert!(policy.trust_forwarded_proto);
    }
}
