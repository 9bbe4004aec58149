use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};

use super::verifier::{IdentityPayload, TokenVerifier, VerifyError};

/// Claim checks on top of the signature (issuer/audience are skipped when `None`).
#[derive(Debug, Clone, Default)]
pub struct JwtSettings {
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub leeway_seconds: u64,
}

/// Access-token verifier backed by `jsonwebtoken`.
///
/// - EdDSA (Ed25519 public key PEM) or HS256 (shared secret)
/// - `exp` is always required; `sub` must be present and non-empty
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtVerifier {
    pub fn from_ed_pem(public_key_pem: &str, settings: &JwtSettings) -> Result<Self, VerifyError> {
        let decoding_key = DecodingKey::from_ed_pem(public_key_pem.as_bytes())?;

        Ok(Self::with_key(decoding_key, Algorithm::EdDSA, settings))
    }

    pub fn from_secret(secret: &[u8], settings: &JwtSettings) -> Self {
        Self::with_key(DecodingKey::from_secret(secret), Algorithm::HS256, settings)
    }

    fn with_key(decoding_key: DecodingKey, alg: Algorithm, settings: &JwtSettings) -> Self {
        let mut validation = Validation::new(alg);
        validation.leeway = settings.leeway_seconds;

        if let Some(issuer) = settings.issuer.as_deref() {
            validation.set_issuer(&[issuer]);
        }

        // Without a configured audience, a token carrying `aud` would otherwise be refused.
        match settings.audience.as_deref() {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify signature + registered claims and return the full claim set.
    pub fn verify_claims(&self, token: &str) -> Result<IdentityPayload, VerifyError> {
        let data = jsonwebtoken::decode::<Map<String, Value>>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;

        let sub_ok = data
            .claims
            .get("sub")
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty());
        if !sub_ok {
            return Err(VerifyError::MissingClaim("sub"));
        }

        Ok(IdentityPayload::new(data.claims))
    }
}

#[async_trait]
impl TokenVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Result<IdentityPayload, VerifyError> {
        self.verify_claims(token)
    }
}
