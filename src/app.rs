/*
 * Responsibility
 * - Config loading → service construction → Router assembly
 * - Middleware order: http (outermost) → security headers → gate → routes
 * - axum::serve() with graceful shutdown
 */
use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware::{self, gate::GatePolicy},
    services::auth::build_token_verifier,
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,api_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    tracing::info!(
        "starting API in {:?} mode on {} (approved scheme: {})",
        config.app_env,
        config.addr,
        config.approved_scheme
    );

    let verifier = build_token_verifier(&config)?;
    let state = AppState::new(GatePolicy::from_config(&config), verifier);

    let app = build_app(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Routes behind the gate. No HTTP-level layers; tests drive this directly.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(api::root))
        .nest("/api/v1", api::v1::routes())
        .fallback(api::not_found);

    middleware::gate::apply(router, state.clone()).with_state(state)
}

/// The full service as served: gate + routes wrapped in the HTTP-level layers.
pub fn build_app(state: AppState, config: &Config) -> Router {
    let router = build_router(state);
    let router = middleware::security_headers::apply(router, config);
    middleware::http::apply(router, config)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
