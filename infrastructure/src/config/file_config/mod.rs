//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod consensus;
mod fallback;
mod output;
mod providers;
mod research;

pub use consensus::FileConsensusConfig;
pub use fallback::FileFallbackConfig;
pub use output::FileOutputConfig;
pub use providers::{FileAnthropicConfig, FileGeminiConfig, FileOpenAiConfig, FileProvidersConfig};
pub use research::FileResearchConfig;

use chorus_domain::{ConfigIssue, ConfigIssueCode, Provider, ReasoningConfig};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider API settings
    pub providers: FileProvidersConfig,
    /// Research service settings
    pub research: FileResearchConfig,
    /// Fallback chain budgets
    pub fallback: FileFallbackConfig,
    /// Reasoning loop limits
    pub reasoning: ReasoningConfig,
    /// Consensus defaults
    pub consensus: FileConsensusConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration against the process environment.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.validate_with_env(|name| std::env::var(name).ok())
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks consensus provider names and threshold, the reasoning
    /// threshold, and that every credential variable is set.
    pub fn validate_with_env<F>(&self, lookup: F) -> Vec<ConfigIssue>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut issues = Vec::new();

        // 1. Consensus section
        issues.extend(self.consensus.to_provider_config().1);

        // 2. Reasoning threshold
        if !(0.0..=1.0).contains(&self.reasoning.completeness_threshold) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ThresholdOutOfRange,
                format!(
                    "reasoning.completeness_threshold: {} is outside [0, 1]",
                    self.reasoning.completeness_threshold
                ),
            ));
        }

        // 3. Credentials
        let is_set = |name: &str| lookup(name).is_some_and(|v| !v.trim().is_empty());
        for provider in Provider::ALL {
            let env_var = self.providers.api_key_env(provider);
            if !is_set(env_var) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::MissingCredential,
                    format!(
                        "{} is not set; calls to {} will fail until you export it",
                        env_var, provider
                    ),
                ));
            }
        }
        if !is_set(&self.research.api_key_env) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingCredential,
                format!(
                    "{} is not set; research grounding will fail until you export it",
                    self.research.api_key_env
                ),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_domain::OutputFormat;

    fn all_keys_set(_: &str) -> Option<String> {
        Some("key".to_string())
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[providers.openai]
model = "gpt-4o"
max_tokens = 2048

[research]
model = "sonar-pro"

[fallback]
primary_timeout_secs = 10

[reasoning]
max_iterations = 5
completeness_threshold = 0.9

[consensus]
providers = ["anthropic", "gemini"]
synthesis_provider = "gemini"
quality_threshold = 0.7

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.openai.model, "gpt-4o");
        assert_eq!(config.providers.openai.max_tokens, 2048);
        assert_eq!(config.research.model, "sonar-pro");
        assert_eq!(config.fallback.primary_timeout_secs, 10);
        assert_eq!(config.fallback.fallback_timeout_secs, 30);
        assert_eq!(config.reasoning.max_iterations, 5);
        assert_eq!(config.reasoning.timeout_ms, 30_000);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);

        let (consensus, issues) = config.consensus.to_provider_config();
        assert!(issues.is_empty());
        assert_eq!(
            consensus.enabled_providers(),
            &[Provider::Anthropic, Provider::Gemini]
        );
        assert_eq!(consensus.synthesis_provider, Provider::Gemini);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_default_config_is_valid_with_keys() {
        assert!(FileConfig::default().validate_with_env(all_keys_set).is_empty());
    }

    #[test]
    fn test_missing_credentials_are_warnings_with_hint() {
        let issues = FileConfig::default().validate_with_env(|name| {
            (name != "OPENAI_API_KEY").then(|| "key".to_string())
        });
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::MissingCredential);
        assert!(!issues[0].is_error());
        assert!(issues[0].message.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let issues = FileConfig::default().validate_with_env(|name| {
            Some(if name == "PERPLEXITY_API_KEY" { "  " } else { "key" }.to_string())
        });
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("research"));
    }

    #[test]
    fn test_reasoning_threshold_out_of_range() {
        let mut config = FileConfig::default();
        config.reasoning.completeness_threshold = 1.2;
        let issues = config.validate_with_env(all_keys_set);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::ThresholdOutOfRange);
    }
}
