//! Admin dashboard routes
//!
//! | Path | Method | Who |
//! |------|--------|-----|
//! | /api/admin/stats | GET | admin |

mod handler;

use axum::{middleware, routing::get, Router};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/stats", get(handler::stats))
        .route_layer(middleware::from_fn(require_admin))
}
