//! Research service configuration from TOML (`[research]` section)

use serde::{Deserialize, Serialize};

/// Perplexity research API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResearchConfig {
    /// Environment variable name for the API key (default: "PERPLEXITY_API_KEY").
    pub api_key_env: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for FileResearchConfig {
    fn default() -> Self {
        Self {
            api_key_env: "PERPLEXITY_API_KEY".to_string(),
            base_url: "https://api.perplexity.ai".to_string(),
            model: "sonar".to_string(),
            timeout_secs: 60,
        }
    }
}
