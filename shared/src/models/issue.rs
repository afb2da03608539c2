//! Issue Model

use serde::{Deserialize, Serialize};

use super::advisory::AiAnalysis;
use super::contractor::Trade;

/// Issue lifecycle status
///
/// Closed enumeration; the wire format uses the display strings
/// ("Open", "Accepted", "In Progress", "Resolved") but parsing is
/// case-insensitive because historical documents carry `"OPEN"` and
/// friends. Normalization happens once, at the store boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "String", into = "String")]
pub enum IssueStatus {
    #[default]
    Open,
    Accepted,
    InProgress,
    Resolved,
}

impl IssueStatus {
    /// Canonical wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Open => "Open",
            IssueStatus::Accepted => "Accepted",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Resolved => "Resolved",
        }
    }

    /// Case-insensitive parse ("OPEN", "in progress", "Resolved" all work)
    pub fn parse(s: &str) -> Result<Self, UnknownStatus> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(IssueStatus::Open),
            "accepted" => Ok(IssueStatus::Accepted),
            "in progress" | "inprogress" | "in_progress" => Ok(IssueStatus::InProgress),
            "resolved" => Ok(IssueStatus::Resolved),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IssueStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueStatus::parse(s)
    }
}

impl TryFrom<String> for IssueStatus {
    type Error = UnknownStatus;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        IssueStatus::parse(&s)
    }
}

impl From<IssueStatus> for String {
    fn from(s: IssueStatus) -> Self {
        s.as_str().to_string()
    }
}

/// Unknown status string encountered while normalizing store data
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown issue status: {0:?}")]
pub struct UnknownStatus(pub String);

/// Reporter-chosen issue category (fixed taxonomy, immutable after creation)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Category {
    #[serde(rename = "Water Leakage")]
    WaterLeakage,
    Potholes,
    Garbage,
    #[serde(rename = "Street Light")]
    StreetLight,
    Manhole,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::WaterLeakage => "Water Leakage",
            Category::Potholes => "Potholes",
            Category::Garbage => "Garbage",
            Category::StreetLight => "Street Light",
            Category::Manhole => "Manhole",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fallback geocoordinate; attached at report time, not guaranteed accurate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Structured address plus a denormalized display string
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub state: String,
    pub city: String,
    pub pincode: String,
    pub address_detail: String,
    /// `"{addressDetail}, {city}, {state} - {pincode}"`
    pub location_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoPoint>,
}

impl Location {
    /// Build a location with the denormalized display string derived
    /// from the structured parts.
    pub fn new(state: &str, city: &str, pincode: &str, address_detail: &str) -> Self {
        Self {
            state: state.to_string(),
            city: city.to_string(),
            pincode: pincode.to_string(),
            address_detail: address_detail.to_string(),
            location_text: format!("{address_detail}, {city}, {state} - {pincode}"),
            geo: None,
        }
    }
}

/// Issue document (shared, mutable; lives until explicit admin delete)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Opaque unique identifier, assigned by the store on creation
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(flatten)]
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub status: IssueStatus,
    /// Trade/department the admin dispatched the job to; unset while Open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Trade>,
    /// Job budget, set by admin at dispatch time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contractor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contractor_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contractor_id: Option<String>,
    /// Citizen rating (1..=5), set at most once after resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(default)]
    pub is_reviewed: bool,
    /// Advisory output embedded at creation; never re-derived on update
    pub ai_analysis: AiAnalysis,
    /// Store-assigned creation timestamp (millis); sort key, newest first
    pub created_at: i64,
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
}

/// Field-level merge applied by `update`; `None` fields are left untouched.
///
/// Transitions are append-only merges, never full replacement — reopening a
/// Resolved issue keeps its contractor stamp and price.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssuePatch {
    pub status: Option<IssueStatus>,
    pub assigned_to: Option<Trade>,
    pub price: Option<f64>,
    pub contractor_name: Option<String>,
    pub contractor_rating: Option<f64>,
    pub contractor_id: Option<String>,
    pub rating: Option<u8>,
    pub review: Option<String>,
    pub is_reviewed: Option<bool>,
}

impl IssuePatch {
    /// Merge this patch into an issue, field by field.
    pub fn apply(&self, issue: &mut Issue) {
        if let Some(status) = self.status {
            issue.status = status;
        }
        if let Some(trade) = self.assigned_to {
            issue.assigned_to = Some(trade);
        }
        if let Some(price) = self.price {
            issue.price = Some(price);
        }
        if let Some(name) = &self.contractor_name {
            issue.contractor_name = Some(name.clone());
        }
        if let Some(rating) = self.contractor_rating {
            issue.contractor_rating = Some(rating);
        }
        if let Some(id) = &self.contractor_id {
            issue.contractor_id = Some(id.clone());
        }
        if let Some(rating) = self.rating {
            issue.rating = Some(rating);
        }
        if let Some(review) = &self.review {
            issue.review = Some(review.clone());
        }
        if let Some(reviewed) = self.is_reviewed {
            issue.is_reviewed = reviewed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::advisory::Severity;

    fn sample_issue() -> Issue {
        Issue {
            id: "issue-1".to_string(),
            title: "Leaking pipe".to_string(),
            description: "Water everywhere".to_string(),
            category: Category::WaterLeakage,
            location: Location::new("Maharashtra", "Pune", "411001", "Main Gate"),
            image_url: None,
            status: IssueStatus::Open,
            assigned_to: None,
            price: None,
            contractor_name: None,
            contractor_rating: None,
            contractor_id: None,
            rating: None,
            review: None,
            is_reviewed: false,
            ai_analysis: AiAnalysis {
                category: "Water Leakage".to_string(),
                severity: Severity::High,
                summary: "Water everywhere".to_string(),
                estimated_time: Some("2-4 Hours".to_string()),
                impact_scope: 70,
            },
            created_at: 1_700_000_000_000,
            user_id: "uid-1".to_string(),
            user_email: "citizen@example.com".to_string(),
            user_name: "Citizen".to_string(),
        }
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(IssueStatus::parse("OPEN").unwrap(), IssueStatus::Open);
        assert_eq!(
            IssueStatus::parse("in progress").unwrap(),
            IssueStatus::InProgress
        );
        assert_eq!(
            IssueStatus::parse(" Resolved ").unwrap(),
            IssueStatus::Resolved
        );
        assert!(IssueStatus::parse("closed").is_err());
    }

    #[test]
    fn status_round_trips_through_json() {
        let json = serde_json::to_string(&IssueStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: IssueStatus = serde_json::from_str("\"IN PROGRESS\"").unwrap();
        assert_eq!(back, IssueStatus::InProgress);
    }

    #[test]
    fn patch_merges_without_clearing_other_fields() {
        let mut issue = sample_issue();
        issue.contractor_name = Some("FixIt Crew".to_string());
        issue.price = Some(1500.0);
        issue.status = IssueStatus::Resolved;

        let reopen = IssuePatch {
            status: Some(IssueStatus::Open),
            ..Default::default()
        };
        reopen.apply(&mut issue);

        assert_eq!(issue.status, IssueStatus::Open);
        assert_eq!(issue.contractor_name.as_deref(), Some("FixIt Crew"));
        assert_eq!(issue.price, Some(1500.0));
    }

    #[test]
    fn issue_serializes_location_flat() {
        let issue = sample_issue();
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["city"], "Pune");
        assert_eq!(value["locationText"], "Main Gate, Pune, Maharashtra - 411001");
        assert_eq!(value["status"], "Open");
        assert!(value.get("assignedTo").is_none());
    }
}
