//! Issue handlers
//!
//! Thin wrappers over [`IssueService`]: extract identity and body, call
//! the service, wrap the result in the response envelope.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};

use shared::models::{Issue, Role};
use shared::request::{AdviceRequest, CreateIssueRequest, DispatchRequest, ReviewRequest};
use shared::response::{ApiResponse, MyReportsResponse};
use shared::AdvisoryRecord;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::issues::ResolveActor;
use crate::utils::{ok, ok_with_message, AppError, AppResult};

/// Pre-submission advisory. Public; never fails.
pub async fn advice(
    State(state): State<ServerState>,
    Json(req): Json<AdviceRequest>,
) -> Json<ApiResponse<AdvisoryRecord>> {
    ok(state.issues().advice(req).await)
}

pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateIssueRequest>,
) -> AppResult<Json<ApiResponse<Issue>>> {
    let issue = state
        .issues()
        .create_report(&user.reporter(), req)
        .await?;
    Ok(ok_with_message(issue, "Issue reported"))
}

pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Issue>>>> {
    let snapshot = state.issues().list().await?;
    Ok(ok(snapshot.as_ref().clone()))
}

pub async fn my_reports(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<MyReportsResponse>>> {
    Ok(ok(state.issues().my_reports(&user.reporter()).await?))
}

pub async fn dispatch(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<DispatchRequest>,
) -> AppResult<Json<ApiResponse<Issue>>> {
    Ok(ok(state.issues().dispatch(&id, req).await?))
}

pub async fn claim(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Issue>>> {
    let profile = user.contractor_profile()?;
    Ok(ok(state.issues().claim(profile, &id).await?))
}

pub async fn resolve(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Issue>>> {
    let actor = match user.role {
        Role::Admin => ResolveActor::Admin,
        Role::Contractor => ResolveActor::Contractor {
            display_name: user.contractor_profile()?.display_name.clone(),
        },
        Role::Citizen => return Err(AppError::forbidden("citizens cannot resolve issues")),
    };
    Ok(ok(state.issues().resolve(&actor, &id).await?))
}

pub async fn reopen(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Issue>>> {
    Ok(ok(state.issues().reopen(&id).await?))
}

pub async fn review(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<Json<ApiResponse<Issue>>> {
    let issue = state.issues().review(&user.reporter(), &id, req).await?;
    Ok(ok_with_message(issue, "Thanks for your feedback"))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.issues().delete(&id).await?;
    Ok(ok_with_message((), "Issue deleted"))
}

/// Full collection as CSV for the dashboard download button.
pub async fn export_csv(State(state): State<ServerState>) -> AppResult<impl IntoResponse> {
    let csv = state.issues().export_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"issues.csv\"",
            ),
        ],
        csv,
    ))
}
