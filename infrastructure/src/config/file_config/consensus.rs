//! Consensus configuration from TOML (`[consensus]` section)

use chorus_domain::{ConfigIssue, ConfigIssueCode, Provider, ProviderConfig};
use serde::{Deserialize, Serialize};

/// Raw consensus settings; provider names are parsed on use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsensusConfig {
    /// Providers queried in each round, in reporting order
    pub providers: Vec<String>,
    /// Provider that reconciles the survivors
    pub synthesis_provider: String,
    /// Minimum quality a response needs to be kept
    pub quality_threshold: f64,
    /// Ground with the full reasoning loop instead of a single research call
    pub use_reasoning: bool,
}

impl Default for FileConsensusConfig {
    fn default() -> Self {
        let defaults = ProviderConfig::default();
        Self {
            providers: defaults
                .enabled_providers()
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            synthesis_provider: defaults.synthesis_provider.as_str().to_string(),
            quality_threshold: defaults.quality_threshold,
            use_reasoning: defaults.use_reasoning,
        }
    }
}

impl FileConsensusConfig {
    /// Parse into a [`ProviderConfig`], skipping unparsable names.
    ///
    /// Returns the usable config together with every issue found.
    pub fn to_provider_config(&self) -> (ProviderConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let providers: Vec<Provider> = self
            .providers
            .iter()
            .filter_map(|name| match name.parse::<Provider>() {
                Ok(p) => Some(p),
                Err(e) => {
                    issues.push(ConfigIssue::warning(
                        ConfigIssueCode::UnknownProvider,
                        format!("consensus.providers: {}", e),
                    ));
                    None
                }
            })
            .collect();

        if providers.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyProviderList,
                "consensus.providers: no usable providers configured",
            ));
        }

        let synthesis_provider = match self.synthesis_provider.parse::<Provider>() {
            Ok(p) => p,
            Err(e) => {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownProvider,
                    format!(
                        "consensus.synthesis_provider: {}, using {}",
                        e,
                        Provider::default()
                    ),
                ));
                Provider::default()
            }
        };

        if !(0.0..=1.0).contains(&self.quality_threshold) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ThresholdOutOfRange,
                format!(
                    "consensus.quality_threshold: {} is outside [0, 1] and will be clamped",
                    self.quality_threshold
                ),
            ));
        }

        let config = ProviderConfig::new(providers)
            .with_synthesis_provider(synthesis_provider)
            .with_quality_threshold(self.quality_threshold)
            .with_reasoning(self.use_reasoning);

        (config, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parses_cleanly() {
        let (config, issues) = FileConsensusConfig::default().to_provider_config();
        assert!(issues.is_empty());
        assert_eq!(config, ProviderConfig::default());
    }

    #[test]
    fn test_unknown_provider_is_skipped() {
        let raw = FileConsensusConfig {
            providers: vec!["claude".to_string(), "mistral".to_string(), "c".to_string()],
            ..Default::default()
        };
        let (config, issues) = raw.to_provider_config();
        assert_eq!(
            config.enabled_providers(),
            &[Provider::Anthropic, Provider::Gemini]
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::UnknownProvider);
    }

    #[test]
    fn test_empty_provider_list_is_an_error() {
        let raw = FileConsensusConfig {
            providers: vec![],
            ..Default::default()
        };
        let (_, issues) = raw.to_provider_config();
        assert!(issues.iter().any(|i| i.is_error()));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let raw = FileConsensusConfig {
            quality_threshold: 1.5,
            ..Default::default()
        };
        let (config, issues) = raw.to_provider_config();
        assert_eq!(config.quality_threshold, 1.0);
        assert_eq!(issues[0].code, ConfigIssueCode::ThresholdOutOfRange);
    }
}
