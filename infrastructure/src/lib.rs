//! Infrastructure layer for chorus
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP provider and research clients,
//! configuration file loading, and the JSONL event log.

pub mod config;
pub mod logging;
pub mod providers;
pub mod research;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileConfig, FileConsensusConfig, FileFallbackConfig,
    FileOutputConfig, FileProvidersConfig, FileResearchConfig,
};
pub use logging::JsonlEventLogger;
pub use providers::{
    ProviderAdapter, anthropic::AnthropicAdapter, credentials::ApiKeySource,
    gemini::GeminiAdapter, openai::OpenAiAdapter, routing::RoutingGateway,
};
pub use research::PerplexityResearch;
