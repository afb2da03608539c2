//! Advisory provider strategy interface
//!
//! Every stage of the fallback chain conforms to one trait and is iterated
//! until the first success. Failures never escape the engine; they only
//! select the next stage.

use async_trait::async_trait;
use shared::models::AdvisoryRecord;
use shared::request::ImagePayload;

/// Everything a provider may be given about the report
#[derive(Debug, Clone, Default)]
pub struct AdvisoryInput {
    pub title: Option<String>,
    pub description: String,
    pub image: Option<ImagePayload>,
}

impl AdvisoryInput {
    /// Title and description joined for text-only analysis.
    pub fn combined_text(&self) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => {
                format!("{} {}", title.trim(), self.description)
            }
            _ => self.description.clone(),
        }
    }
}

/// Why a provider stage failed (all variants fall through to the next stage)
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned HTTP {0}")]
    Status(u16),

    /// Response arrived but did not contain a usable AdvisoryRecord
    /// (empty candidates, JSON parse failure, missing required keys)
    #[error("unusable response: {0}")]
    Shape(String),

    #[error("stage timed out")]
    Timeout,
}

/// One stage of the advisory chain
#[async_trait]
pub trait AdvisoryProvider: Send + Sync {
    /// Stable stage name for logs
    fn name(&self) -> &'static str;

    /// Attempt to produce a full advisory record. Never retried in place;
    /// any error moves the engine to the next stage.
    async fn attempt(&self, input: &AdvisoryInput) -> Result<AdvisoryRecord, ProviderError>;
}

/// Prompt shared by the remote providers: requests a raw JSON object in the
/// exact AdvisoryRecord shape.
pub fn build_prompt(input: &AdvisoryInput) -> String {
    format!(
        r#"You are an expert Civil Engineer and Public Safety Officer.

User Report: "{report}"

Task: Analyze this specific issue and provide highly relevant, unique, and actionable advice.
- If it is a pothole, talk about asphalt, cones, or vehicle damage.
- If it is electrical, talk about voltage, insulation, and fire safety.
- If it is water, talk about contamination, pressure, or flooding.
- AVOID generic advice like "stay calm" or "call police" unless it is a life-threatening emergency.

Return ONLY a raw JSON object (no markdown) with these exact fields:
{{
  "category": "Short issue label, e.g. Water Leakage / Potholes / Street Light",
  "summary": "One sentence describing the issue",
  "precautions": ["Specific tip 1", "Specific tip 2", "Specific tip 3"],
  "diyFixes": ["Temporary fix 1", "Temporary fix 2", "Temporary fix 3"],
  "severity": "Low" | "Medium" | "High" | "Critical",
  "estimatedTime": "e.g. 2-4 Hours / 1 Day",
  "impactScope": (Integer between 1-100 representing urgency)
}}"#,
        report = input.combined_text()
    )
}

/// Strip markdown code fences some models wrap around their JSON.
pub fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a provider's text payload into a strict AdvisoryRecord.
pub fn parse_record(raw: &str) -> Result<AdvisoryRecord, ProviderError> {
    let cleaned = strip_fences(raw);
    serde_json::from_str::<AdvisoryRecord>(&cleaned)
        .map_err(|e| ProviderError::Shape(format!("invalid advisory JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_text_joins_title_and_description() {
        let input = AdvisoryInput {
            title: Some("Burst pipe".to_string()),
            description: "water everywhere".to_string(),
            image: None,
        };
        assert_eq!(input.combined_text(), "Burst pipe water everywhere");

        let untitled = AdvisoryInput {
            title: None,
            description: "water everywhere".to_string(),
            image: None,
        };
        assert_eq!(untitled.combined_text(), "water everywhere");
    }

    #[test]
    fn parse_record_strips_markdown_fences() {
        let fenced = r#"```json
{
  "category": "Potholes",
  "summary": "Deep pothole",
  "precautions": ["Cone it off"],
  "diyFixes": ["Fill with gravel"],
  "severity": "High",
  "estimatedTime": "1 Day",
  "impactScope": 60
}
```"#;
        let record = parse_record(fenced).unwrap();
        assert_eq!(record.category, "Potholes");
        assert_eq!(record.impact_scope, 60);
    }

    #[test]
    fn parse_record_rejects_missing_keys() {
        let partial = r#"{"severity": "High", "category": "Potholes"}"#;
        assert!(matches!(
            parse_record(partial),
            Err(ProviderError::Shape(_))
        ));
    }
}
