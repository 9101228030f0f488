//! Per-call consensus configuration

use crate::core::provider::Provider;
use serde::{Deserialize, Serialize};

/// Default minimum quality a response needs to survive filtering.
pub const DEFAULT_QUALITY_THRESHOLD: f64 = 0.6;

/// Which providers take part in a consensus round and how the round is judged.
///
/// `enabled_providers` is an ordered set: duplicates are removed on
/// construction, keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    enabled_providers: Vec<Provider>,
    pub synthesis_provider: Provider,
    pub quality_threshold: f64,
    pub use_reasoning: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled_providers: Provider::ALL.to_vec(),
            synthesis_provider: Provider::default(),
            quality_threshold: DEFAULT_QUALITY_THRESHOLD,
            use_reasoning: false,
        }
    }
}

impl ProviderConfig {
    pub fn new(enabled_providers: impl IntoIterator<Item = Provider>) -> Self {
        Self {
            enabled_providers: dedupe(enabled_providers),
            ..Self::default()
        }
    }

    pub fn with_synthesis_provider(mut self, provider: Provider) -> Self {
        self.synthesis_provider = provider;
        self
    }

    /// Clamped to `[0, 1]`.
    pub fn with_quality_threshold(mut self, threshold: f64) -> Self {
        self.quality_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_reasoning(mut self, use_reasoning: bool) -> Self {
        self.use_reasoning = use_reasoning;
        self
    }

    pub fn enabled_providers(&self) -> &[Provider] {
        &self.enabled_providers
    }

    /// Position of `provider` in the enabled order, used to sort survivors.
    pub fn position(&self, provider: Provider) -> Option<usize> {
        self.enabled_providers.iter().position(|p| *p == provider)
    }
}

fn dedupe(providers: impl IntoIterator<Item = Provider>) -> Vec<Provider> {
    let mut seen = Vec::new();
    for provider in providers {
        if !seen.contains(&provider) {
            seen.push(provider);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_all_providers() {
        let config = ProviderConfig::default();
        assert_eq!(config.enabled_providers(), &Provider::ALL);
        assert_eq!(config.synthesis_provider, Provider::Anthropic);
        assert!(!config.use_reasoning);
    }

    #[test]
    fn test_duplicates_removed_keeping_first() {
        let config = ProviderConfig::new([
            Provider::Gemini,
            Provider::Anthropic,
            Provider::Gemini,
            Provider::Anthropic,
        ]);
        assert_eq!(
            config.enabled_providers(),
            &[Provider::Gemini, Provider::Anthropic]
        );
        assert_eq!(config.position(Provider::Anthropic), Some(1));
        assert_eq!(config.position(Provider::OpenAi), None);
    }

    #[test]
    fn test_threshold_is_clamped() {
        let config = ProviderConfig::default().with_quality_threshold(1.4);
        assert_eq!(config.quality_threshold, 1.0);
    }
}
