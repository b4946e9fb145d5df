//! Health and API root endpoints.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::state::AppState;

pub const SERVICE_NAME: &str = "hubdir-api";

#[derive(OpenApi)]
#[openapi(paths(get_health, get_root), components(schemas(HealthResponse, RootResponse)))]
pub struct HealthApi;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    /// RFC 3339 UTC time of the check.
    pub timestamp: String,
    pub service: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub docs: &'static str,
    pub health: &'static str,
}

/// Register `/` and `/api/health`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_root))
        .route("/api/health", get(get_health))
}

/// Heartbeat endpoint. Does not touch the store.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse)
    )
)]
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        service: SERVICE_NAME,
    })
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "API metadata", body = RootResponse)
    )
)]
pub async fn get_root(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.to_string(),
        docs: "/api/docs",
        health: "/api/health",
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn health_response_is_healthy() {
        let Json(body) = get_health().await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.service, "hubdir-api");
    }

    #[tokio::test]
    async fn health_timestamp_is_rfc3339() {
        let Json(body) = get_health().await;
        assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
    }
}
