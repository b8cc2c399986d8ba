use axum::Json;

use immo_core::models::api::HealthStatus;

/// Liveness probe. Does not touch the upstream space.
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}
