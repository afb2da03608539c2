//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - session issuance
//! - [`issues`] - report lifecycle, advisory, live stream, CSV export
//! - [`contractor`] - contractor job board
//! - [`admin`] - dashboard aggregates

pub mod admin;
pub mod auth;
pub mod contractor;
pub mod health;
pub mod issues;

use axum::Router;

use crate::core::ServerState;

/// Build the application router (without state).
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(auth::router())
        .merge(health::router())
        .merge(issues::router())
        .merge(contractor::router())
        .merge(admin::router())
}
