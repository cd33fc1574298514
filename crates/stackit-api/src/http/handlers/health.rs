//! Liveness and store health checks (no auth, no envelope).

use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

const DB_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /db-status - Round-trip `SELECT 1` against the store.
pub async fn db_status(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.db_pool.ping(DB_PROBE_TIMEOUT).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            tracing::error!(error = %e, "store ping failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error" })),
            )
        }
    }
}
