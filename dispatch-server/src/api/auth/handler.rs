//! Authentication handlers
//!
//! Exchanges a role selection plus its credentials for a session token.
//! Citizen identity arrives pre-verified from the external OAuth popup;
//! the admin presents a PIN; contractors present email + trade + PIN and
//! must appear in the approved-contractor directory.

use std::time::Duration;

use axum::{extract::State, Extension, Json};

use shared::models::Role;
use shared::request::LoginRequest;
use shared::response::{ApiResponse, LoginResponse};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ok, AppError, AppResult};

/// Fixed delay on credential checks to blunt timing probes
const AUTH_FIXED_DELAY_MS: u64 = 500;

pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let response = match req {
        LoginRequest::Citizen {
            uid,
            email,
            display_name,
        } => {
            if uid.trim().is_empty() || email.trim().is_empty() {
                return Err(AppError::validation("uid and email are required"));
            }
            let display_name = display_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| email.clone());
            let token = state
                .jwt()
                .generate_token(&uid, &email, &display_name, Role::Citizen, None)
                .map_err(|e| AppError::internal(e.to_string()))?;
            tracing::info!(uid = %uid, "citizen signed in");
            LoginResponse {
                token,
                role: Role::Citizen,
                display_name,
                contractor: None,
            }
        }

        LoginRequest::Admin { pin } => {
            tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;
            if pin != state.config.admin_pin {
                tracing::warn!("admin login failed - wrong PIN");
                return Err(AppError::invalid_credentials());
            }
            let token = state
                .jwt()
                .generate_token("admin", "admin@dispatch", "Administrator", Role::Admin, None)
                .map_err(|e| AppError::internal(e.to_string()))?;
            tracing::info!("admin signed in");
            LoginResponse {
                token,
                role: Role::Admin,
                display_name: "Administrator".to_string(),
                contractor: None,
            }
        }

        LoginRequest::Contractor {
            email,
            trade,
            pin,
            operating_state,
            operating_city,
            display_name: _,
        } => {
            if operating_state.trim().is_empty() || operating_city.trim().is_empty() {
                return Err(AppError::validation("operating state and city are required"));
            }

            let record = state.directory().lookup(&email);
            // Fixed delay before acting on the lookup result, so unknown
            // emails are indistinguishable from wrong PINs
            tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

            let record = match record {
                Some(r) if r.pin == pin && r.trade == trade => r,
                _ => {
                    tracing::warn!(email = %email, "contractor login failed");
                    return Err(AppError::invalid_credentials());
                }
            };

            let profile = record.profile(&operating_state, &operating_city);
            let token = state
                .jwt()
                .generate_token(
                    &record.email,
                    &record.email,
                    &record.display_name,
                    Role::Contractor,
                    Some(profile.clone()),
                )
                .map_err(|e| AppError::internal(e.to_string()))?;
            tracing::info!(email = %record.email, trade = %record.trade, "contractor signed in");
            LoginResponse {
                token,
                role: Role::Contractor,
                display_name: record.display_name,
                contractor: Some(profile),
            }
        }
    };

    Ok(ok(response))
}

/// Echo back the session identity from the validated token.
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<ApiResponse<LoginResponse>> {
    ok(LoginResponse {
        // The client already holds the token; not re-issued here
        token: String::new(),
        role: user.role,
        display_name: user.display_name,
        contractor: user.contractor,
    })
}
