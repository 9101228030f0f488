//! Provider gateway port
//!
//! Defines the interface for requesting one completion from a text-generation
//! provider. Adapters for each vendor API live in the infrastructure layer.

use async_trait::async_trait;
use chorus_domain::{Model, Provider};
use thiserror::Error;

/// Default output budget for a completion.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Errors that can occur during a provider call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Timeout")]
    Timeout,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Missing credential for {provider}: set {env_var}")]
    MissingCredential { provider: Provider, env_var: String },

    #[error("Provider not configured: {0}")]
    NotConfigured(Provider),
}

impl ProviderError {
    /// Short machine-readable kind, used in event logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Auth(_) => "auth",
            ProviderError::RateLimited(_) => "rate_limited",
            ProviderError::Timeout => "timeout",
            ProviderError::MalformedResponse(_) => "malformed_response",
            ProviderError::Http { .. } => "http",
            ProviderError::Request(_) => "request",
            ProviderError::MissingCredential { .. } => "missing_credential",
            ProviderError::NotConfigured(_) => "not_configured",
        }
    }
}

/// One completion request.
///
/// `model: None` lets the adapter use the provider's configured default model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: Option<Model>,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            model: None,
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            temperature: chorus_domain::generation::request::DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_model(mut self, model: Option<Model>) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Text returned by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    /// Model identifier as reported by the provider
    pub model_id: String,
}

impl Completion {
    pub fn new(text: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_id: model_id.into(),
        }
    }
}

/// Gateway for text-generation providers
///
/// This port defines how the application layer talks to providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ProviderGateway: Send + Sync {
    /// Request one completion from `provider`.
    async fn complete(
        &self,
        provider: Provider,
        request: &CompletionRequest,
    ) -> Result<Completion, ProviderError>;

    /// Providers this gateway can dispatch to.
    fn providers(&self) -> Vec<Provider> {
        Provider::ALL.to_vec()
    }
}
