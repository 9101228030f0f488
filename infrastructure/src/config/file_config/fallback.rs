//! Fallback configuration from TOML (`[fallback]` section)

use chorus_application::FallbackPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw fallback budgets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFallbackConfig {
    pub primary_timeout_secs: u64,
    pub fallback_timeout_secs: u64,
    pub max_tokens: u32,
    pub simplified_prompt_chars: usize,
    pub simplified_max_tokens: u32,
}

impl Default for FileFallbackConfig {
    fn default() -> Self {
        let policy = FallbackPolicy::default();
        Self {
            primary_timeout_secs: policy.primary_timeout.as_secs(),
            fallback_timeout_secs: policy.fallback_timeout.as_secs(),
            max_tokens: policy.max_tokens,
            simplified_prompt_chars: policy.simplified_prompt_chars,
            simplified_max_tokens: policy.simplified_max_tokens,
        }
    }
}

impl FileFallbackConfig {
    pub fn to_policy(&self) -> FallbackPolicy {
        FallbackPolicy::default()
            .with_primary_timeout(Duration::from_secs(self.primary_timeout_secs))
            .with_fallback_timeout(Duration::from_secs(self.fallback_timeout_secs))
            .with_max_tokens(self.max_tokens)
            .with_simplified_prompt_chars(self.simplified_prompt_chars)
            .with_simplified_max_tokens(self.simplified_max_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_policy_default() {
        assert_eq!(FileFallbackConfig::default().to_policy(), FallbackPolicy::default());
    }

    #[test]
    fn test_override_timeouts() {
        let config: FileFallbackConfig =
            toml::from_str("primary_timeout_secs = 5\nsimplified_prompt_chars = 500").unwrap();
        let policy = config.to_policy();
        assert_eq!(policy.primary_timeout, Duration::from_secs(5));
        assert_eq!(policy.fallback_timeout, Duration::from_secs(30));
        assert_eq!(policy.simplified_prompt_chars, 500);
    }
}
