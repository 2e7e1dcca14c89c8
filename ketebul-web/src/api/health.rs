//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use ketebul_common::config::StoreBackend;
use ketebul_common::RecordKind;
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Store the pages read from
    pub content_backend: StoreBackend,
    /// Collections served from the config file instead of the store
    pub local_collections: Vec<RecordKind>,
}

/// GET /health
///
/// Answers without touching the content store, so a store outage never
/// marks the site itself unhealthy.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let local_collections = [RecordKind::Gallery, RecordKind::Team, RecordKind::Event]
        .into_iter()
        .filter(|kind| state.local.records(*kind).is_some())
        .collect();

    Json(HealthResponse {
        status: "ok",
        module: "ketebul-web",
        version: env!("CARGO_PKG_VERSION"),
        content_backend: state.client.backend(),
        local_collections,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
