//! Text-generation provider adapters
//!
//! One adapter per vendor HTTP API, combined behind [`routing::RoutingGateway`]
//! which implements the application's `ProviderGateway` port.

pub mod anthropic;
pub mod credentials;
pub(crate) mod http;
pub mod gemini;
pub mod openai;
pub mod routing;

use async_trait::async_trait;
use chorus_application::{Completion, CompletionRequest, ProviderError};
use chorus_domain::{Model, Provider};

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn provider(&self) -> Provider;

    /// Model used when a request leaves `model` unset.
    fn default_model(&self) -> &Model;

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError>;
}
