/// Welcome banner and health check
///
/// # Endpoints
///
/// ```text
/// GET /
/// GET /health
/// ```
///
/// # Health response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "store": "postgres",
///   "database": "connected",
///   "timestamp": "2024-11-01T12:00:00Z"
/// }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,

    pub version: String,

    /// Store backend name
    pub store: String,

    /// "connected" or "disconnected"
    pub database: String,

    pub timestamp: DateTime<Utc>,
}

pub async fn welcome() -> &'static str {
    "Welcome to the Project Management API"
}

/// Reports whether the store answers
///
/// Always 200; a failing store shows up as `"degraded"`.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = &state.services.store;

    let connected = match store.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Store health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store.backend().to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        timestamp: Utc::now(),
    })
}
