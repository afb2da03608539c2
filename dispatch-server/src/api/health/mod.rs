//! Health check routes
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /health | GET | none |

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::core::ServerState;

/// Public router (no auth)
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Number of tracked issues
    issues: usize,
    /// Configured advisory providers (0 means rules + fallback only)
    advisory_providers: usize,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let issues = state
        .store()
        .snapshot()
        .await
        .map(|s| s.len())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        issues,
        advisory_providers: state.issues().advisory_provider_count(),
    })
}
