//! Model response value object

use crate::core::provider::Provider;
use serde::{Deserialize, Serialize};

/// Response from a single provider in a consensus round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// The provider that served this response
    pub provider: Provider,
    /// Model identifier reported by the provider
    pub model_id: String,
    /// The response content
    pub text: String,
    /// Wall-clock time of the provider call
    pub latency_ms: u64,
    /// Heuristic quality estimate in `[0, 1]`
    pub quality_score: f64,
}

impl ModelResponse {
    /// Creates an unscored response.
    pub fn new(
        provider: Provider,
        model_id: impl Into<String>,
        text: impl Into<String>,
        latency_ms: u64,
    ) -> Self {
        Self {
            provider,
            model_id: model_id.into(),
            text: text.into(),
            latency_ms,
            quality_score: 0.0,
        }
    }

    /// Sets the quality score, clamped to `[0, 1]`.
    pub fn with_quality_score(mut self, score: f64) -> Self {
        self.quality_score = score.clamp(0.0, 1.0);
        self
    }

    /// Whether this response meets `threshold`.
    pub fn passes(&self, threshold: f64) -> bool {
        self.quality_score >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_score_is_clamped() {
        let response = ModelResponse::new(Provider::Gemini, "gemini-2.5-pro", "text", 12)
            .with_quality_score(1.7);
        assert_eq!(response.quality_score, 1.0);
    }

    #[test]
    fn test_passes_threshold_inclusive() {
        let response =
            ModelResponse::new(Provider::OpenAi, "gpt-4.1", "text", 5).with_quality_score(0.7);
        assert!(response.passes(0.7));
        assert!(!response.passes(0.71));
    }
}
