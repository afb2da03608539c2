//! Request DTOs for the dispatch API

use serde::{Deserialize, Serialize};

use crate::models::{Category, Trade};

/// Inline image payload forwarded to the multimodal advisory provider.
///
/// The photo itself is hosted externally; this carries the bytes only for
/// the duration of the advisory call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    /// e.g. "image/jpeg"
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

/// Session exchange: a role selection plus the credentials that role needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum LoginRequest {
    /// Citizen identity comes from the external OAuth popup; the core
    /// consumes uid/email/displayName as-is.
    #[serde(rename_all = "camelCase")]
    Citizen {
        uid: String,
        email: String,
        #[serde(default)]
        display_name: Option<String>,
    },
    Admin {
        pin: String,
    },
    #[serde(rename_all = "camelCase")]
    Contractor {
        email: String,
        trade: Trade,
        pin: String,
        operating_state: String,
        operating_city: String,
        #[serde(default)]
        display_name: Option<String>,
    },
}

/// Citizen report submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueRequest {
    pub category: Category,
    pub title: String,
    pub description: String,
    pub state: String,
    pub city: String,
    pub pincode: String,
    pub address_detail: String,
    /// URL of the externally hosted photo
    #[serde(default)]
    pub image_url: Option<String>,
    /// Optional inline copy of the photo for the advisory call
    #[serde(default)]
    pub image: Option<ImagePayload>,
}

/// Standalone advisory request ("Ask AI" before submitting)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub description: String,
    #[serde(default)]
    pub image: Option<ImagePayload>,
}

/// Admin dispatch: Open → Accepted with trade and budget.
///
/// `price` stays optional on the wire so that a missing price is rejected
/// by validation, before any store write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    pub assigned_to: Trade,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Citizen rating + review after resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub review: String,
}
