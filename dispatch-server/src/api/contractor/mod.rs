//! Contractor routes
//!
//! | Path | Method | Who |
//! |------|--------|-----|
//! | /api/contractor/jobs | GET | contractor |

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/contractor/jobs", get(handler::jobs))
}
