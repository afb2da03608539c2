//! Issue routes
//!
//! | Path | Method | Who |
//! |------|--------|-----|
//! | /api/advice | POST | public |
//! | /api/issues | POST | citizen |
//! | /api/issues | GET | any session |
//! | /api/issues/stream | GET | any session (SSE) |
//! | /api/issues/export | GET | admin (CSV) |
//! | /api/issues/{id}/dispatch | POST | admin |
//! | /api/issues/{id}/claim | POST | contractor |
//! | /api/issues/{id}/resolve | POST | contractor/admin |
//! | /api/issues/{id}/reopen | POST | admin |
//! | /api/issues/{id}/review | POST | reporter |
//! | /api/issues/{id} | DELETE | admin |
//! | /api/reports/mine | GET | citizen |

mod handler;
mod stream;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let admin_routes = Router::new()
        .route("/api/issues/export", get(handler::export_csv))
        .route("/api/issues/{id}/dispatch", post(handler::dispatch))
        .route("/api/issues/{id}/reopen", post(handler::reopen))
        .route("/api/issues/{id}", delete(handler::delete))
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/api/advice", post(handler::advice))
        .route("/api/issues", post(handler::create).get(handler::list))
        .route("/api/issues/stream", get(stream::snapshots))
        .route("/api/issues/{id}/claim", post(handler::claim))
        .route("/api/issues/{id}/resolve", post(handler::resolve))
        .route("/api/issues/{id}/review", post(handler::review))
        .route("/api/reports/mine", get(handler::my_reports))
        .merge(admin_routes)
}
