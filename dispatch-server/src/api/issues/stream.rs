//! Live snapshot stream
//!
//! SSE endpoint delivering the full ordered collection on every change.
//! Clients recompute their derived views from each snapshot; there are no
//! diff events. A slow consumer that lags the broadcast channel simply
//! misses intermediate snapshots and picks up again at the next one.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast;

use crate::core::ServerState;
use crate::store::IssueSnapshot;
use crate::utils::AppResult;

fn snapshot_event(snapshot: &IssueSnapshot) -> Option<Event> {
    match Event::default().event("snapshot").json_data(snapshot.as_ref()) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::error!(error = %e, "snapshot serialization failed");
            None
        }
    }
}

pub async fn snapshots(
    State(state): State<ServerState>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let rx = state.store().subscribe();
    let current = state.store().snapshot().await?;

    // Current state first, then one event per subsequent change
    let initial = stream::iter(snapshot_event(&current).map(Ok));
    let updates = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(snapshot) => {
                    if let Some(event) = snapshot_event(&snapshot) {
                        return Some((Ok(event), rx));
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "snapshot subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    Ok(Sse::new(initial.chain(updates)).keep_alive(KeepAlive::default()))
}
