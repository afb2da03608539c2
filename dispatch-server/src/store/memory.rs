//! Embedded in-memory issue store
//!
//! Backs the server in standalone deployments and every test. Holds the
//! collection behind an async RwLock and rebroadcasts the full ordered
//! snapshot after each mutation, which is exactly the delivery shape the
//! remote collection's subscription provides.

use std::sync::Arc;

use async_trait::async_trait;
use shared::models::{Issue, IssuePatch, IssueStatus};
use shared::util::now_millis;
use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

use super::{IssueSnapshot, IssueStore, StoreError};

/// Capacity of the snapshot broadcast channel
const CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug)]
pub struct MemoryIssueStore {
    /// Collection ordered by `created_at` descending (newest first)
    issues: RwLock<Vec<Issue>>,
    snapshot_tx: broadcast::Sender<IssueSnapshot>,
}

impl MemoryIssueStore {
    pub fn new() -> Self {
        let (snapshot_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            issues: RwLock::new(Vec::new()),
            snapshot_tx,
        }
    }

    /// Publish the current collection to all subscribers.
    ///
    /// Send errors only mean "no subscribers right now" and are ignored.
    fn publish(&self, issues: &[Issue]) {
        let _ = self.snapshot_tx.send(Arc::new(issues.to_vec()));
    }

    fn position(issues: &[Issue], id: &str) -> Result<usize, StoreError> {
        issues
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

impl Default for MemoryIssueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IssueStore for MemoryIssueStore {
    async fn create(&self, mut issue: Issue) -> Result<Issue, StoreError> {
        issue.id = Uuid::new_v4().to_string();
        issue.created_at = now_millis();

        let mut issues = self.issues.write().await;
        // created_at is monotonic here, so the front keeps newest-first order
        issues.insert(0, issue.clone());
        self.publish(&issues);
        Ok(issue)
    }

    async fn snapshot(&self) -> Result<IssueSnapshot, StoreError> {
        let issues = self.issues.read().await;
        Ok(Arc::new(issues.clone()))
    }

    fn subscribe(&self) -> broadcast::Receiver<IssueSnapshot> {
        self.snapshot_tx.subscribe()
    }

    async fn get(&self, id: &str) -> Result<Issue, StoreError> {
        let issues = self.issues.read().await;
        let pos = Self::position(&issues, id)?;
        Ok(issues[pos].clone())
    }

    async fn update(&self, id: &str, patch: IssuePatch) -> Result<Issue, StoreError> {
        let mut issues = self.issues.write().await;
        let pos = Self::position(&issues, id)?;
        patch.apply(&mut issues[pos]);
        let updated = issues[pos].clone();
        self.publish(&issues);
        Ok(updated)
    }

    async fn update_if_status(
        &self,
        id: &str,
        expected: IssueStatus,
        patch: IssuePatch,
    ) -> Result<Issue, StoreError> {
        let mut issues = self.issues.write().await;
        let pos = Self::position(&issues, id)?;
        let actual = issues[pos].status;
        if actual != expected {
            return Err(StoreError::StatusConflict {
                id: id.to_string(),
                expected,
                actual,
            });
        }
        patch.apply(&mut issues[pos]);
        let updated = issues[pos].clone();
        self.publish(&issues);
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut issues = self.issues.write().await;
        let pos = Self::position(&issues, id)?;
        issues.remove(pos);
        self.publish(&issues);
        Ok(())
    }
}
