//! Provider configuration from TOML (`[providers]` section)

use chorus_domain::{Model, Provider};
use serde::{Deserialize, Serialize};

/// Default whole-request HTTP timeout for provider calls.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Anthropic API provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    /// Model used when a request does not name one.
    pub model: String,
    /// Upper bound on max tokens per response.
    pub max_tokens: u32,
    /// Anthropic API version header.
    pub api_version: String,
    pub timeout_secs: u64,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        Self {
            api_key_env: Provider::Anthropic.default_api_key_env().to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            model: Provider::Anthropic.default_model().to_string(),
            max_tokens: 8192,
            api_version: "2023-06-01".to_string(),
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

/// OpenAI API provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Base URL for the OpenAI API (can be overridden for compatible gateways).
    pub base_url: String,
    /// Model used when a request does not name one.
    pub model: String,
    /// Upper bound on max tokens per response.
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: Provider::OpenAi.default_api_key_env().to_string(),
            base_url: "https://api.openai.com".to_string(),
            model: Provider::OpenAi.default_model().to_string(),
            max_tokens: 8192,
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

/// Google Gemini API provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Base URL for the Generative Language API.
    pub base_url: String,
    /// Model used when a request does not name one.
    pub model: String,
    /// Upper bound on max output tokens per response.
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: Provider::Gemini.default_api_key_env().to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: Provider::Gemini.default_model().to_string(),
            max_tokens: 8192,
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Anthropic API settings.
    pub anthropic: FileAnthropicConfig,
    /// OpenAI API settings.
    pub openai: FileOpenAiConfig,
    /// Gemini API settings.
    pub gemini: FileGeminiConfig,
}

impl FileProvidersConfig {
    /// Environment variable holding the key for `provider`.
    pub fn api_key_env(&self, provider: Provider) -> &str {
        match provider {
            Provider::Anthropic => &self.anthropic.api_key_env,
            Provider::OpenAi => &self.openai.api_key_env,
            Provider::Gemini => &self.gemini.api_key_env,
        }
    }

    /// Configured default model for `provider`.
    pub fn model(&self, provider: Provider) -> Model {
        let name = match provider {
            Provider::Anthropic => &self.anthropic.model,
            Provider::OpenAi => &self.openai.model,
            Provider::Gemini => &self.gemini.model,
        };
        Model::from(name.as_str())
    }
}
