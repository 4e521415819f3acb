use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Instant;

static STARTED_AT: OnceLock<Instant> = OnceLock::new();

/// Mark process start for the uptime figure. Later calls are ignored.
pub fn record_start_time() {
    STARTED_AT.get_or_init(Instant::now);
}

/// Liveness report. There are no downstream stores to probe, so a
/// responding process is a healthy one.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub uptime_seconds: u64,
    pub version: String,
}

impl HealthResponse {
    fn current() -> Self {
        Self {
            status: "ok".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            uptime_seconds: STARTED_AT.get().map_or(0, |t| t.elapsed().as_secs()),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Process is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::current())
}
