//! Transport Guard: the request must have arrived over the approved scheme.
//!
//! The listener itself speaks plain HTTP; TLS is terminated in front of it. The effective
//! scheme therefore comes from the proxy headers (when trusted), never from the request
//! target, which is client-controlled in absolute-form.

use axum::http::HeaderMap;

const LISTENER_SCHEME: &str = "http";

/// `true` iff both schemes are equal ignoring ASCII case.
pub fn check_transport(request_scheme: &str, approved_scheme: &str) -> bool {
    request_scheme.eq_ignore_ascii_case(approved_scheme)
}

/// Effective scheme of the request as seen by the client.
///
/// With `trust_forwarded`, proxy headers are consulted in Rack 2.2's order, skipping
/// values that are not one of `http`, `https`, `ws`, `wss`:
/// 1. `X-Forwarded-Ssl: on` → `https`
/// 2. `Forwarded: ...;proto=<scheme>` (RFC 7239, last element carrying `proto`)
/// 3. `X-Forwarded-Scheme`
/// 4. `X-Forwarded-Proto` (first allowed entry of a comma-separated list)
///
/// Otherwise (or when none applies) the listener scheme, `http`.
///
/// Trusting these headers assumes every client reaches the listener through a proxy that
/// overwrites them; a directly connected client could claim `https` itself.
pub fn request_scheme(headers: &HeaderMap, trust_forwarded: bool) -> String {
    if trust_forwarded {
        if let Some(scheme) = forwarded_scheme(headers) {
            return scheme;
        }
    }
    LISTENER_SCHEME.to_string()
}

const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "ws", "wss"];

fn allowed_scheme(value: &str) -> Option<String> {
    let value = value.trim().trim_matches('"');
    ALLOWED_SCHEMES
        .iter()
        .any(|s| s.eq_ignore_ascii_case(value))
        .then(|| value.to_string())
}

fn forwarded_scheme(headers: &HeaderMap) -> Option<String> {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if header_str("x-forwarded-ssl").is_some_and(|v| v.eq_ignore_ascii_case("on")) {
        return Some("https".to_string());
    }

    if let Some(scheme) = header_str("forwarded").and_then(forwarded_proto) {
        return Some(scheme);
    }

    if let Some(scheme) = header_str("x-forwarded-scheme").and_then(allowed_scheme) {
        return Some(scheme);
    }

    header_str("x-forwarded-proto").and_then(|v| v.split(',').find_map(allowed_scheme))
}

/// `proto` of the last `Forwarded` element that carries one.
fn forwarded_proto(value: &str) -> Option<String> {
    value
        .split(',')
        .filter_map(|element| {
            element.split(';').find_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                key.trim().eq_ignore_ascii_case("proto").then_some(value)
            })
        })
        .last()
        .and_then(allowed_scheme)
}
