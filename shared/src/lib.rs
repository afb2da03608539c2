//! Shared types for CivicFix Dispatch
//!
//! Common domain types used across the workspace: the issue document and
//! its lifecycle status, the embedded advisory record, contractor trades,
//! session roles, and the request/response DTOs of the HTTP API.

pub mod models;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    AdvisoryRecord, ContractorProfile, Issue, IssuePatch, IssueStatus, Location, Role, Severity,
    Trade,
};
