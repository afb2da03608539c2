//! Contractor job board handler

use axum::{extract::State, Extension, Json};

use shared::response::{ApiResponse, ContractorJobsResponse};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ok, AppResult};

/// Available / active / history views plus cumulative earnings, computed
/// from the latest snapshot against the session's operating profile.
pub async fn jobs(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<ContractorJobsResponse>>> {
    let profile = user.contractor_profile()?;
    Ok(ok(state.issues().contractor_jobs(profile).await?))
}
