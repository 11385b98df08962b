use crate::state::AppState;
use axum::{routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}

/// Service description
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses((status = 200, description = "Service name, version and endpoint map"))
)]
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Aptoide Scraper API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "scrape": "/aptoide?package_name=<package_id>",
            "docs": "/docs",
            "openapi": "/api-docs/openapi.json",
            "health": "/health"
        },
        "example": "curl 'http://localhost:8000/aptoide?package_name=com.whatsapp'"
    }))
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "aptoide-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339()
    }))
}
