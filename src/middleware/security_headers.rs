//! Response headers that back up the transport requirement in browsers.
//!
//! - `Strict-Transport-Security` only when the approved scheme is `https`
//!   (advertising HSTS from a plain-HTTP deployment would lock clients out)
//! - MIME sniffing and framing protection on every response

use axum::Router;
use axum::http::header::{self, HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::Config;

pub fn apply(router: Router, config: &Config) -> Router {
    let router = router
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ));

    match hsts_value(config) {
        Some(value) => router.layer(SetResponseHeaderLayer::if_not_present(
            header::STRICT_TRANSPORT_SECURITY,
            value,
        )),
        None => router,
    }
}

fn hsts_value(config: &Config) -> Option<HeaderValue> {
    if !config.approved_scheme.eq_ignore_ascii_case("https") {
        return None;
    }
    HeaderValue::from_str(&format!("max-age={}", config.hsts_max_age_seconds)).ok()
}
