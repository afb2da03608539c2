//! Domain models
//!
//! - [`Issue`] — the reported civic issue document and its lifecycle state
//! - [`AdvisoryRecord`] — AI-derived guidance attached at report time
//! - [`Trade`] — contractor specialization taxonomy
//! - [`Role`] — session role (citizen / admin / contractor)

pub mod advisory;
pub mod contractor;
pub mod issue;
pub mod role;

pub use advisory::{AdvisoryRecord, AiAnalysis, Severity};
pub use contractor::{ContractorProfile, Trade};
pub use issue::{Category, GeoPoint, Issue, IssuePatch, IssueStatus, Location};
pub use role::Role;
