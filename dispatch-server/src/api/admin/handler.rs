//! Admin dashboard handler

use axum::{extract::State, Json};

use shared::response::{AdminStatsResponse, ApiResponse};

use crate::core::ServerState;
use crate::utils::{ok, AppResult};

/// City-wide totals plus per-department breakdown.
pub async fn stats(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<AdminStatsResponse>>> {
    Ok(ok(state.issues().admin_stats().await?))
}
