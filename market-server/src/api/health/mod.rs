//! Health Check Routes

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use shared::ApiResponse;

#[derive(Debug, Serialize)]
struct HealthInfo {
    status: &'static str,
    version: &'static str,
}

/// GET /api/health - 存活检查
async fn health() -> Json<ApiResponse<HealthInfo>> {
    Json(ApiResponse::ok(HealthInfo {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}
