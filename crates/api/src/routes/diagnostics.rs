//! Health and connectivity checks.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::state::AppState;

/// Collection names included in the diagnostics report.
const MAX_REPORTED_COLLECTIONS: usize = 10;

/// Characters of a store error included in the diagnostics report.
const MAX_ERROR_CHARS: usize = 50;

/// Body of `GET /test`.
#[derive(Debug, Serialize)]
pub struct Diagnostics {
    pub backend: &'static str,
    pub database: String,
    pub database_url: &'static str,
    pub database_name: &'static str,
    pub connection_status: &'static str,
    pub collections: Vec<String>,
}

const fn set_flag(set: bool) -> &'static str {
    if set { "✅ Set" } else { "❌ Not Set" }
}

/// Report backend and store status.
///
/// Never fails: store errors are folded into the report.
pub async fn test_connection(State(state): State<AppState>) -> Json<Diagnostics> {
    let config = state.config();
    let mut report = Diagnostics {
        backend: "✅ Running",
        database: "⚠️  Available but not initialized".to_string(),
        database_url: set_flag(config.database_url_set),
        database_name: set_flag(config.database_name_set),
        connection_status: "Not Connected",
        collections: Vec::new(),
    };

    let Some(store) = state.store() else {
        return Json(report);
    };

    report.database = "✅ Available".to_string();
    report.connection_status = "Connected";

    match store.list_collections().await {
        Ok(mut names) => {
            names.truncate(MAX_REPORTED_COLLECTIONS);
            report.database = "✅ Connected & Working".to_string();
            report.collections = names;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Listing collections failed");
            let detail: String = e.to_string().chars().take(MAX_ERROR_CHARS).collect();
            report.database = format!("⚠️  Connected but Error: {detail}");
        }
    }

    Json(report)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if no store is configured or it does not
/// answer a ping.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    let Some(store) = state.store() else {
        return StatusCode::SERVICE_UNAVAILABLE;
    };

    match store.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
