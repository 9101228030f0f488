//! Model value object representing an LLM model

use super::provider::Provider;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// LLM models known to chorus (Value Object)
///
/// Unknown identifiers are kept verbatim as [`Model::Custom`] so callers can
/// address models released after this list was written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Claude models
    ClaudeOpus41,
    ClaudeSonnet45,
    ClaudeHaiku45,
    // GPT models
    Gpt5,
    Gpt41,
    Gpt41Mini,
    Gpt4o,
    // Gemini models
    Gemini25Pro,
    Gemini25Flash,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::ClaudeOpus41 => "claude-opus-4-1",
            Model::ClaudeSonnet45 => "claude-sonnet-4-5",
            Model::ClaudeHaiku45 => "claude-haiku-4-5",
            Model::Gpt5 => "gpt-5",
            Model::Gpt41 => "gpt-4.1",
            Model::Gpt41Mini => "gpt-4.1-mini",
            Model::Gpt4o => "gpt-4o",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Custom(s) => s,
        }
    }

    /// Provider family this model belongs to, if it can be inferred.
    ///
    /// Custom identifiers are matched on their prefix (`claude`, `gpt`/`o1`/`o3`,
    /// `gemini`).
    pub fn provider(&self) -> Option<Provider> {
        match self {
            Model::ClaudeOpus41 | Model::ClaudeSonnet45 | Model::ClaudeHaiku45 => {
                Some(Provider::Anthropic)
            }
            Model::Gpt5 | Model::Gpt41 | Model::Gpt41Mini | Model::Gpt4o => Some(Provider::OpenAi),
            Model::Gemini25Pro | Model::Gemini25Flash => Some(Provider::Gemini),
            Model::Custom(s) => {
                let id = s.to_lowercase();
                if id.starts_with("claude") {
                    Some(Provider::Anthropic)
                } else if id.starts_with("gpt") || id.starts_with("o1") || id.starts_with("o3") {
                    Some(Provider::OpenAi)
                } else if id.starts_with("gemini") {
                    Some(Provider::Gemini)
                } else {
                    None
                }
            }
        }
    }

    pub fn is_claude(&self) -> bool {
        self.provider() == Some(Provider::Anthropic)
    }

    pub fn is_gpt(&self) -> bool {
        self.provider() == Some(Provider::OpenAi)
    }

    pub fn is_gemini(&self) -> bool {
        self.provider() == Some(Provider::Gemini)
    }
}

impl Default for Model {
    fn default() -> Self {
        Provider::default().default_model()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.trim() {
            "claude-opus-4-1" => Model::ClaudeOpus41,
            "claude-sonnet-4-5" => Model::ClaudeSonnet45,
            "claude-haiku-4-5" => Model::ClaudeHaiku45,
            "gpt-5" => Model::Gpt5,
            "gpt-4.1" => Model::Gpt41,
            "gpt-4.1-mini" => Model::Gpt41Mini,
            "gpt-4o" => Model::Gpt4o,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            other => Model::Custom(other.to_string()),
        }
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from(s))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}
