//! Advisory Engine — ordered fallback chain
//!
//! ```text
//! get_advice(input)
//!     │
//!     ├─▶ primary multimodal provider   (skipped unless credential set)
//!     ├─▶ secondary text-only provider  (skipped unless credential set)
//!     ├─▶ local keyword rules           (first match wins)
//!     └─▶ static fallback               (always succeeds)
//! ```
//!
//! The chain is awaited sequentially; stages never run in parallel (a
//! later stage costs quota the earlier stage already paid for). Each
//! remote stage is bounded by a per-call timeout so a network partition
//! cannot stall report submission. `get_advice` never fails: the caller
//! always receives a structurally complete record.

use std::time::Duration;

use shared::models::{AdvisoryRecord, Severity};

use super::provider::{AdvisoryInput, AdvisoryProvider, ProviderError};
use super::rules;
use crate::core::Config;

pub struct AdvisoryEngine {
    providers: Vec<Box<dyn AdvisoryProvider>>,
    stage_timeout: Duration,
}

impl AdvisoryEngine {
    /// Build the chain from configuration. Providers without a configured
    /// credential are not instantiated at all, so the chain silently
    /// shrinks to rules + fallback when no keys are present.
    pub fn from_config(config: &Config) -> Self {
        let client = reqwest::Client::new();
        let mut providers: Vec<Box<dyn AdvisoryProvider>> = Vec::new();

        if let Some(key) = &config.gemini_api_key {
            providers.push(Box::new(super::GeminiProvider::new(
                client.clone(),
                key.clone(),
                config.gemini_model.clone(),
            )));
        }
        if let Some(key) = &config.openrouter_api_key {
            providers.push(Box::new(super::OpenRouterProvider::new(
                client.clone(),
                key.clone(),
                config.openrouter_model.clone(),
            )));
        }

        Self::new(providers, Duration::from_millis(config.advisory_timeout_ms))
    }

    pub fn new(providers: Vec<Box<dyn AdvisoryProvider>>, stage_timeout: Duration) -> Self {
        Self {
            providers,
            stage_timeout,
        }
    }

    /// Number of configured remote providers.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Produce an advisory record for a report. Infallible by contract.
    pub async fn get_advice(&self, input: &AdvisoryInput) -> AdvisoryRecord {
        for provider in &self.providers {
            match tokio::time::timeout(self.stage_timeout, provider.attempt(input)).await {
                Ok(Ok(mut record)) => {
                    record.impact_scope = record.impact_scope.clamp(1, 100);
                    tracing::info!(provider = provider.name(), "advisory stage succeeded");
                    return record;
                }
                Ok(Err(e)) => {
                    tracing::warn!(
                        provider = provider.name(),
                        error = %e,
                        "advisory stage failed, falling through"
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        provider = provider.name(),
                        error = %ProviderError::Timeout,
                        "advisory stage failed, falling through"
                    );
                }
            }
        }

        // Rules only ever see text; an attached image is not consulted here.
        if let Some(record) = rules::match_text(&input.combined_text()) {
            return record;
        }

        static_fallback()
    }
}

/// Last-resort record when every stage failed or nothing matched
pub fn static_fallback() -> AdvisoryRecord {
    AdvisoryRecord {
        severity: Severity::Medium,
        category: "Unidentified Issue".to_string(),
        estimated_time: "24-48 Hours".to_string(),
        impact_scope: 45,
        precautions: vec![
            "Secure the perimeter to prevent public access.".to_string(),
            "Do not touch any exposed wires or stagnant water.".to_string(),
            "Document the hazard distance with photos from a safe spot.".to_string(),
        ],
        diy_fixes: vec![
            "Place bright markers or red cloth to warn passersby.".to_string(),
            "Divert pedestrian traffic to a safer alternative route.".to_string(),
            "Report exact coordinates to the municipal helpline.".to_string(),
        ],
        summary: "Reported issue could not be categorized automatically.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Provider double that fails or succeeds on demand
    struct ScriptedProvider {
        outcome: Result<AdvisoryRecord, &'static str>,
    }

    #[async_trait]
    impl AdvisoryProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn attempt(&self, _input: &AdvisoryInput) -> Result<AdvisoryRecord, ProviderError> {
            match &self.outcome {
                Ok(record) => Ok(record.clone()),
                Err(msg) => Err(ProviderError::Shape(msg.to_string())),
            }
        }
    }

    fn engine_without_providers() -> AdvisoryEngine {
        AdvisoryEngine::new(Vec::new(), Duration::from_millis(100))
    }

    fn text_input(description: &str) -> AdvisoryInput {
        AdvisoryInput {
            title: None,
            description: description.to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn water_report_matches_local_rule_with_no_providers() {
        let engine = engine_without_providers();
        let record = engine
            .get_advice(&text_input("water pipe burst near my house"))
            .await;
        assert_eq!(record.category, "Water Leakage");
        assert_eq!(record.severity, Severity::High);
    }

    #[tokio::test]
    async fn unmatched_report_falls_back_to_static_record() {
        let engine = engine_without_providers();
        let record = engine
            .get_advice(&text_input("there's a random loud noise"))
            .await;
        assert_eq!(record.severity, Severity::Medium);
        assert_eq!(record.category, "Unidentified Issue");
    }

    #[tokio::test]
    async fn empty_input_still_yields_a_complete_record() {
        let engine = engine_without_providers();
        let record = engine.get_advice(&AdvisoryInput::default()).await;
        assert!(!record.category.is_empty());
        assert!(!record.summary.is_empty());
        assert!(!record.estimated_time.is_empty());
        assert!(!record.precautions.is_empty());
        assert!(!record.diy_fixes.is_empty());
        assert!((1..=100).contains(&record.impact_scope));
    }

    #[tokio::test]
    async fn failing_provider_falls_through_to_rules() {
        let engine = AdvisoryEngine::new(
            vec![Box::new(ScriptedProvider {
                outcome: Err("malformed JSON"),
            })],
            Duration::from_millis(100),
        );
        let record = engine
            .get_advice(&text_input("garbage piling up at the corner"))
            .await;
        assert_eq!(record.category, "Garbage");
    }

    #[tokio::test]
    async fn first_successful_provider_short_circuits() {
        let remote = AdvisoryRecord {
            severity: Severity::Low,
            category: "Remote Verdict".to_string(),
            estimated_time: "1 Hour".to_string(),
            impact_scope: 10,
            precautions: vec!["p".to_string()],
            diy_fixes: vec!["f".to_string()],
            summary: "from provider".to_string(),
        };
        let engine = AdvisoryEngine::new(
            vec![
                Box::new(ScriptedProvider {
                    outcome: Ok(remote.clone()),
                }),
                Box::new(ScriptedProvider {
                    outcome: Err("should not be reached"),
                }),
            ],
            Duration::from_millis(100),
        );
        // Even though rules would match "water", the provider wins.
        let record = engine.get_advice(&text_input("water leak")).await;
        assert_eq!(record, remote);
    }

    #[tokio::test]
    async fn out_of_range_impact_scope_is_clamped() {
        let mut remote = static_fallback();
        remote.impact_scope = 0;
        let engine = AdvisoryEngine::new(
            vec![Box::new(ScriptedProvider {
                outcome: Ok(remote),
            })],
            Duration::from_millis(100),
        );
        let record = engine.get_advice(&text_input("anything")).await;
        assert_eq!(record.impact_scope, 1);
    }
}
