use crate::{cors, handlers, state};
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub async fn health() -> &'static str {
    "ok"
}

/// Build the main Axum router.
///
/// - `/health` is always available for probes.
/// - The two report paths accept POST only; the whole surface sits
///   behind the body-size guard and the CORS layer.
pub fn build_router(state: Arc<state::AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/alert", post(handlers::ingest_alert))
        .route("/security-alert", post(handlers::ingest_alert))
        .route("/csp-report", post(handlers::ingest_csp_report))
        .fallback(handlers::fallback)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::from_fn(cors::cors_middleware))
        .with_state(state)
}
