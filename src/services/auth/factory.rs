/// Factory: build the `TokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::{Config, TokenKey};
use crate::services::auth::{JwtSettings, JwtVerifier, TokenVerifier, VerifyError};

pub fn build_token_verifier(config: &Config) -> Result<Arc<dyn TokenVerifier>, VerifyError> {
    let settings = JwtSettings {
        issuer: config.auth_issuer.clone(),
        audience: config.auth_audience.clone(),
        leeway_seconds: config.access_token_leeway_seconds,
    };

    let verifier = match &config.token_key {
        TokenKey::EdPublicPem(pem) => JwtVerifier::from_ed_pem(pem, &settings)?,
        TokenKey::Secret(secret) => JwtVerifier::from_secret(secret.as_bytes(), &settings),
    };

    tracing::debug!(?verifier, "token verifier ready");

    Ok(Arc::new(verifier))
}
