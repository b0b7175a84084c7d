//! Liveness and readiness probes

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{error::AppResult, AppState};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    fn new(status: &'static str) -> Json<Self> {
        Json(Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
        })
    }
}

/// Process is up
pub async fn health_check() -> Json<HealthResponse> {
    HealthResponse::new("healthy")
}

/// Record store answers; a failed ping goes through the error page like any
/// store failure
pub async fn readiness_check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    state.services.catalog.ping().await?;
    Ok(HealthResponse::new("ready"))
}
