/*
 * Responsibility
 * - Load environment variables (.env included) into a typed Config
 * - Validate values (fail startup when something required is missing)
 * - Provide the gate knobs (approved scheme, verifier timeout) to app.rs
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where the access-token verification key comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum TokenKey {
    /// Ed25519 public key (PEM), tokens signed with EdDSA.
    EdPublicPem(String),
    /// Shared secret, tokens signed with HS256.
    Secret(String),
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        match self {
            TokenKey::EdPublicPem(_) => f.write_str("EdPublicPem(..)"),
            TokenKey::Secret(_) => f.write_str("Secret(..)"),
        }
    }
}

/// Process configuration.
///
/// The listener binds plain HTTP on `0.0.0.0` and expects TLS to be terminated by a
/// reverse proxy that overwrites `X-Forwarded-*`/`Forwarded`. With
/// `trust_forwarded_proto` (the default), a client able to reach the listener directly
/// can claim `https` through those headers; keep the port private to the proxy.
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub approved_scheme: String,
    pub trust_forwarded_proto: bool,
    pub verifier_timeout: Duration,

    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,
    pub hsts_max_age_seconds: u64,

    pub token_key: TokenKey,
    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,
    pub access_token_leeway_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a Config from an arbitrary key lookup (env vars in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let approved_scheme = lookup("SECURE_SCHEME")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "https".to_string());
        if approved_scheme.is_empty() {
            return Err(ConfigError::Invalid("SECURE_SCHEME"));
        }

        let trust_forwarded_proto = match lookup("TRUST_FORWARDED_PROTO") {
            None => true,
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid("TRUST_FORWARDED_PROTO"))?,
        };

        // Without proxy headers every request counts as `http`, so an `https` gate would
        // answer 403 to everything. Refused in production.
        if app_env.is_production()
            && !trust_forwarded_proto
            && approved_scheme.eq_ignore_ascii_case("https")
        {
            return Err(ConfigError::Invalid("TRUST_FORWARDED_PROTO"));
        }

        let verifier_timeout =
            Duration::from_millis(parse_or(&lookup, "VERIFIER_TIMEOUT_MS", 2000)?);
        let request_timeout =
            Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECONDS", 30)?);
        let request_body_limit_bytes = parse_or(&lookup, "REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let hsts_max_age_seconds = parse_or(&lookup, "HSTS_MAX_AGE_SECONDS", 31_536_000)?;

        // PEM wins over the shared secret when both are present.
        let token_key = match (
            non_empty(lookup("ACCESS_JWT_PUBLIC_KEY_PEM")),
            non_empty(lookup("ACCESS_JWT_SECRET")),
        ) {
            (Some(pem), _) => TokenKey::EdPublicPem(pem.replace("\\n", "\n")),
            (None, Some(secret)) => TokenKey::Secret(secret),
            (None, None) => return Err(ConfigError::Missing("ACCESS_JWT_PUBLIC_KEY_PEM")),
        };

        let auth_issuer = non_empty(lookup("AUTH_ISSUER"));
        let auth_audience = non_empty(lookup("AUTH_AUDIENCE"));

        let access_token_leeway_seconds = parse_or(&lookup, "ACCESS_TOKEN_LEEWAY_SECONDS", 60)?;

        Ok(Self {
            addr,
            app_env,
            approved_scheme,
            trust_forwarded_proto,
            verifier_timeout,
            request_timeout,
            request_body_limit_bytes,
            hsts_max_age_seconds,
            token_key,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
