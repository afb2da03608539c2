//! Advisory Record Model

use serde::{Deserialize, Serialize};

/// Advisory severity band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured advisory produced per report by the advisory engine.
///
/// Ephemeral — computed once at report time and embedded into the issue as
/// [`AiAnalysis`]; never independently persisted or re-derived.
///
/// All seven fields are required: a provider response missing any key is
/// treated as shape-invalid and the engine falls through to the next stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryRecord {
    pub severity: Severity,
    /// Free-text label; may differ from the reporter-chosen category
    pub category: String,
    /// Free-text duration estimate, e.g. "2-4 Hours / 1 Day"
    pub estimated_time: String,
    /// Urgency score, 1..=100
    pub impact_scope: u8,
    pub precautions: Vec<String>,
    pub diy_fixes: Vec<String>,
    /// One-sentence description
    pub summary: String,
}

/// Subset of the advisory embedded on the issue document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub category: String,
    pub severity: Severity,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub impact_scope: u8,
}

impl From<AdvisoryRecord> for AiAnalysis {
    fn from(record: AdvisoryRecord) -> Self {
        Self {
            category: record.category,
            severity: record.severity,
            summary: record.summary,
            estimated_time: Some(record.estimated_time),
            impact_scope: record.impact_scope,
        }
    }
}
