//! `TokenVerifier` capability: token string in, identity payload (or failure) out.
//!
//! The gate only depends on this trait. Production wires a [`JwtVerifier`](super::JwtVerifier);
//! tests substitute a fake without any key material.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

/// Decoded claims of a verified token.
///
/// Opaque to the gate: it is attached to the request as-is and interpreted by handlers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IdentityPayload {
    claims: Map<String, Value>,
}

impl IdentityPayload {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self { claims }
    }

    /// Account identifier (`sub` claim).
    pub fn account_id(&self) -> Option<&str> {
        self.claims.get("sub").and_then(Value::as_str)
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("missing or empty '{0}' claim")]
    MissingClaim(&'static str),
}

/// Resolves a bearer credential into an identity.
///
/// Implementations must accept arbitrary attacker-supplied strings and must not
/// mutate any token state while verifying.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<IdentityPayload, VerifyError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn account_id_reads_sub_claim() {
        let Value::Object(claims) = json!({"sub": "acct-42", "role": "admin"}) else {
            unreachable!()
        };
        let payload = IdentityPayload::new(claims);

        assert_eq!(payload.account_id(), Some("acct-42"));
        assert_eq!(payload.claim("role"), Some(&json!("admin")));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"sub": "acct-42", "role": "admin"})
        );
    }

    #[test]
    fn non_string_sub_is_not_an_account_id() {
        let Value::Object(claims) = json!({"sub": 7}) else {
            unreachable!()
        };
        assert_eq!(IdentityPayload::new(claims).account_id(), None);
    }
}
