//! Provider value object representing a text-generation service

use super::error::DomainError;
use super::model::Model;
use serde::{Deserialize, Serialize};

/// Text-generation providers known to chorus (Value Object)
///
/// The set is fixed at compile time. The declaration order is the canonical
/// priority order used when building fallback chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Provider A: Anthropic Claude
    Anthropic,
    /// Provider B: OpenAI GPT
    #[serde(rename = "openai")]
    OpenAi,
    /// Provider C: Google Gemini
    Gemini,
}

impl Provider {
    /// All providers in canonical priority order.
    pub const ALL: [Provider; 3] = [Provider::Anthropic, Provider::OpenAi, Provider::Gemini];

    /// Canonical lowercase name used in config files and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
        }
    }

    /// Model used when a caller does not ask for a specific one.
    pub fn default_model(&self) -> Model {
        match self {
            Provider::Anthropic => Model::ClaudeSonnet45,
            Provider::OpenAi => Model::Gpt41,
            Provider::Gemini => Model::Gemini25Pro,
        }
    }

    /// Environment variable holding this provider's API key by default.
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }

    /// Every provider except `self`, in canonical order.
    pub fn others(&self) -> impl Iterator<Item = Provider> + '_ {
        Self::ALL.into_iter().filter(move |p| p != self)
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::Anthropic
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" | "claude" | "a" => Ok(Provider::Anthropic),
            "openai" | "gpt" | "b" => Ok(Provider::OpenAi),
            "gemini" | "google" | "c" => Ok(Provider::Gemini),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}
