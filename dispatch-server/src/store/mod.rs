//! Issue Store Adapter
//!
//! Thin interface to a subscription-capable document collection holding the
//! shared `issues` set. The production collection is a remotely hosted,
//! externally managed store; this module specifies its contract and ships
//! an embedded implementation used by the server and the tests.
//!
//! Contract highlights:
//! - the subscription delivers the **full ordered collection** on every
//!   change, newest first — derived views recompute from the latest
//!   snapshot, no diffs;
//! - `update` performs a field-level merge, never a replace;
//! - `update_if_status` is the conditional write used by the claim path so
//!   the second of two racing contractors fails instead of silently
//!   overwriting the first.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use shared::models::{Issue, IssuePatch, IssueStatus};
use tokio::sync::broadcast;

pub use memory::MemoryIssueStore;

/// Full ordered collection, shared cheaply across subscribers
pub type IssueSnapshot = Arc<Vec<Issue>>;

/// Store-level errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("issue {0} not found")]
    NotFound(String),

    /// Conditional update failed: the record's status moved underneath us
    #[error("issue {id} is {actual}, expected {expected}")]
    StatusConflict {
        id: String,
        expected: IssueStatus,
        actual: IssueStatus,
    },

    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for crate::utils::AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => crate::utils::AppError::not_found(format!("issue {id}")),
            StoreError::StatusConflict { .. } => crate::utils::AppError::conflict(e.to_string()),
            StoreError::Backend(msg) => crate::utils::AppError::store(msg),
        }
    }
}

/// Subscription-capable document collection of issues
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Persist a new issue; the store assigns `id` and `createdAt` and
    /// returns the stored document.
    async fn create(&self, issue: Issue) -> Result<Issue, StoreError>;

    /// Full collection ordered by `createdAt` descending.
    async fn snapshot(&self) -> Result<IssueSnapshot, StoreError>;

    /// Subscribe to full-snapshot broadcasts (one per change).
    fn subscribe(&self) -> broadcast::Receiver<IssueSnapshot>;

    /// Fetch a single document.
    async fn get(&self, id: &str) -> Result<Issue, StoreError>;

    /// Field-level merge; untouched fields persist across transitions.
    async fn update(&self, id: &str, patch: IssuePatch) -> Result<Issue, StoreError>;

    /// Merge only if the record's status still equals `expected`;
    /// otherwise fail with [`StoreError::StatusConflict`].
    async fn update_if_status(
        &self,
        id: &str,
        expected: IssueStatus,
        patch: IssuePatch,
    ) -> Result<Issue, StoreError>;

    /// Remove a document permanently.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
