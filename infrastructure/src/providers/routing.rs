use super::anthropic::AnthropicAdapter;
use super::gemini::GeminiAdapter;
use super::openai::OpenAiAdapter;
use super::ProviderAdapter;
use crate::config::FileProvidersConfig;
use async_trait::async_trait;
use chorus_application::{Completion, CompletionRequest, ProviderError, ProviderGateway};
use chorus_domain::Provider;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Dispatches completions to the adapter registered for each provider.
pub struct RoutingGateway {
    adapters: HashMap<Provider, Arc<dyn ProviderAdapter>>,
}

impl RoutingGateway {
    /// Build a gateway from adapters; a later adapter for the same provider
    /// replaces an earlier one.
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        let adapters = adapters
            .into_iter()
            .map(|adapter| (adapter.provider(), adapter))
            .collect();
        Self { adapters }
    }

    /// All three HTTP adapters, configured from the `[providers]` section.
    pub fn from_config(config: &FileProvidersConfig) -> Self {
        Self::new(vec![
            Arc::new(AnthropicAdapter::new(&config.anthropic)),
            Arc::new(OpenAiAdapter::new(&config.openai)),
            Arc::new(GeminiAdapter::new(&config.gemini)),
        ])
    }

    fn resolve(&self, provider: Provider) -> Result<&dyn ProviderAdapter, ProviderError> {
        self.adapters
            .get(&provider)
            .map(|adapter| adapter.as_ref())
            .ok_or(ProviderError::NotConfigured(provider))
    }
}

#[async_trait]
impl ProviderGateway for RoutingGateway {
    async fn complete(
        &self,
        provider: Provider,
        request: &CompletionRequest,
    ) -> Result<Completion, ProviderError> {
        let adapter = self.resolve(provider)?;
        debug!(
            provider = %provider,
            model = %request.model.as_ref().unwrap_or(adapter.default_model()),
            "Dispatching completion"
        );
        adapter.complete(request).await
    }

    fn providers(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.adapters.contains_key(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_domain::Model;

    // -- Mock ProviderAdapter --------------------------------------------------

    struct MockAdapter {
        provider: Provider,
        model: Model,
    }

    impl MockAdapter {
        fn new(provider: Provider) -> Arc<dyn ProviderAdapter> {
            Arc::new(Self {
                provider,
                model: provider.default_model(),
            })
        }
    }

    #[async_trait]
    impl ProviderAdapter for MockAdapter {
        fn provider(&self) -> Provider {
            self.provider
        }

        fn default_model(&self) -> &Model {
            &self.model
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<Completion, ProviderError> {
            let model = request.model.as_ref().unwrap_or(&self.model);
            Ok(Completion::new(
                format!("{} says {}", self.provider, request.user_prompt),
                model.to_string(),
            ))
        }
    }

    #[tokio::test]
    async fn dispatches_to_matching_adapter() {
        let gw = RoutingGateway::new(vec![
            MockAdapter::new(Provider::Anthropic),
            MockAdapter::new(Provider::Gemini),
        ]);

        let completion = gw
            .complete(Provider::Gemini, &CompletionRequest::new("", "hi"))
            .await
            .unwrap();
        assert_eq!(completion.text, "gemini says hi");
        assert_eq!(completion.model_id, Provider::Gemini.default_model().to_string());
    }

    #[tokio::test]
    async fn explicit_model_is_passed_through() {
        let gw = RoutingGateway::new(vec![MockAdapter::new(Provider::Anthropic)]);
        let request =
            CompletionRequest::new("", "hi").with_model(Some(Model::from("claude-haiku-4-5")));

        let completion = gw.complete(Provider::Anthropic, &request).await.unwrap();
        assert_eq!(completion.model_id, "claude-haiku-4-5");
    }

    #[tokio::test]
    async fn missing_adapter_is_not_configured() {
        let gw = RoutingGateway::new(vec![MockAdapter::new(Provider::Anthropic)]);

        let err = gw
            .complete(Provider::OpenAi, &CompletionRequest::new("", "hi"))
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::NotConfigured(Provider::OpenAi));
    }

    #[test]
    fn providers_lists_registered_in_canonical_order() {
        let gw = RoutingGateway::new(vec![
            MockAdapter::new(Provider::Gemini),
            MockAdapter::new(Provider::Anthropic),
        ]);
        assert_eq!(gw.providers(), vec![Provider::Anthropic, Provider::Gemini]);
    }

    #[test]
    fn from_config_registers_all_providers() {
        let gw = RoutingGateway::from_config(&FileProvidersConfig::default());
        assert_eq!(gw.providers(), Provider::ALL.to_vec());
    }
}
