//! API Response types
//!
//! Standardized response structures for the dispatch API

use serde::{Deserialize, Serialize};

use crate::models::{ContractorProfile, Issue, Role, Trade};

/// Standard API response code
pub const API_CODE_SUCCESS: &str = "E0000";

/// Unified API response structure
///
/// All API responses follow this format:
/// ```json
/// {
///     "code": "E0000",
///     "message": "Success",
///     "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code (E0000 = success, others = error codes)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            code: API_CODE_SUCCESS.to_string(),
            message: "Success".to_string(),
            data: Some(data),
        }
    }

    /// Create an error response
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }
}

/// Session token + the profile the client renders
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contractor: Option<ContractorProfile>,
}

/// Contractor dashboard: three disjoint views plus cumulative earnings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorJobsResponse {
    pub available: Vec<Issue>,
    pub active: Vec<Issue>,
    pub history: Vec<Issue>,
    pub total_earnings: f64,
}

/// Citizen "My Reports" view with aggregate counts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyReportsResponse {
    pub reports: Vec<Issue>,
    pub total: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

/// Per-department rollup for the admin command view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStats {
    pub trade: Trade,
    pub total: usize,
    pub resolved: usize,
    pub earnings: f64,
}

/// Admin dashboard aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsResponse {
    pub total: usize,
    /// Everything not yet Resolved
    pub pending: usize,
    pub resolved: usize,
    pub departments: Vec<DepartmentStats>,
}
