//! Authentication middleware
//!
//! Validates the `Authorization: Bearer <token>` header and injects
//! [`CurrentUser`] into request extensions for downstream handlers.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Paths under `/api/` that do not require a session
fn is_public_api_route(path: &str) -> bool {
    path == "/api/auth/login" || path == "/api/advice"
}

/// Require a valid session on every `/api/` route except the public ones.
///
/// Skipped for:
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths (`/health` and unknown routes 404 normally)
/// - login and the pre-submission advice endpoint
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    if !path.starts_with("/api/") || is_public_api_route(path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("invalid authorization header"))?,
        None => {
            tracing::warn!(uri = %req.uri(), "request without credentials");
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt().validate_token(token) {
        Ok(claims) => {
            req.extensions_mut().insert(CurrentUser::from(claims));
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(uri = %req.uri(), error = %e, "token rejected");
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("invalid token")),
            }
        }
    }
}

/// Admin role guard, layered onto admin-only routes.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        tracing::warn!(user = %user.id, role = ?user.role, "admin route denied");
        return Err(AppError::forbidden("admin access required"));
    }
    Ok(next.run(req).await)
}
