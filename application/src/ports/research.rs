//! Research provider port
//!
//! A web-grounded research service answers a query with text and citations.

use async_trait::async_trait;
use chorus_domain::ResearchResponse;
use thiserror::Error;

/// Errors that can occur during a research call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResearchError {
    #[error("Missing research credential: set {env_var}")]
    MissingCredential { env_var: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Timeout")]
    Timeout,

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request failed: {0}")]
    Request(String),
}

/// Port for the research service
#[async_trait]
pub trait ResearchProvider: Send + Sync {
    async fn research(&self, query: &str) -> Result<ResearchResponse, ResearchError>;
}
