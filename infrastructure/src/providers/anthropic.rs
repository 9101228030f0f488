//! Anthropic Messages API adapter

use super::ProviderAdapter;
use super::credentials::ApiKeySource;
use super::http::{build_client, send_json};
use crate::config::FileAnthropicConfig;
use async_trait::async_trait;
use chorus_application::{Completion, CompletionRequest, ProviderError};
use chorus_domain::{Model, Provider};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Anthropic caps sampling temperature at 1.0.
const MAX_TEMPERATURE: f32 = 1.0;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

pub struct AnthropicAdapter {
    client: reqwest::Client,
    api_key: ApiKeySource,
    base_url: String,
    api_version: String,
    default_model: Model,
    max_tokens: u32,
}

impl AnthropicAdapter {
    pub fn new(config: &FileAnthropicConfig) -> Self {
        Self {
            client: build_client(Duration::from_secs(config.timeout_secs)),
            api_key: ApiKeySource::from_env(&config.api_key_env),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            default_model: Model::from(config.model.as_str()),
            max_tokens: config.max_tokens,
        }
    }

    pub fn with_api_key(mut self, api_key: ApiKeySource) -> Self {
        self.api_key = api_key;
        self
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    fn default_model(&self) -> &Model {
        &self.default_model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        let key = self
            .api_key
            .resolve()
            .ok_or_else(|| ProviderError::MissingCredential {
                provider: Provider::Anthropic,
                env_var: self.api_key.env_var().to_string(),
            })?;

        let model = request.model.as_ref().unwrap_or(&self.default_model);
        let body = MessagesRequest {
            model: model.as_str(),
            max_tokens: request.max_tokens.min(self.max_tokens),
            temperature: request.temperature.clamp(0.0, MAX_TEMPERATURE),
            system: &request.system_prompt,
            messages: [Message {
                role: "user",
                content: &request.user_prompt,
            }],
        };

        debug!(model = %model, "Anthropic messages request");
        let response: MessagesResponse = send_json(
            self.client
                .post(format!("{}/v1/messages", self.base_url))
                .header("x-api-key", key)
                .header("anthropic-version", &self.api_version)
                .json(&body),
        )
        .await?;

        let text: String = response
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            return Err(ProviderError::MalformedResponse(
                "no text content in response".to_string(),
            ));
        }

        Ok(Completion::new(
            text,
            response.model.unwrap_or_else(|| model.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(server: &MockServer) -> AnthropicAdapter {
        let config = FileAnthropicConfig {
            base_url: server.uri(),
            max_tokens: 2048,
            ..Default::default()
        };
        AnthropicAdapter::new(&config).with_api_key(ApiKeySource::fixed("test-key"))
    }

    #[tokio::test]
    async fn test_complete_concatenates_text_blocks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(serde_json::json!({
                "system": "Be brief",
                "max_tokens": 2048,
                "temperature": 1.0,
                "messages": [{"role": "user", "content": "Hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "claude-sonnet-4-5-20250929",
                "content": [
                    {"type": "text", "text": "Hi "},
                    {"type": "tool_use", "id": "x"},
                    {"type": "text", "text": "there"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = CompletionRequest::new("Be brief", "Hello")
            .with_temperature(1.4)
            .with_max_tokens(4096);
        let completion = adapter(&server).complete(&request).await.unwrap();

        assert_eq!(completion.text, "Hi there");
        assert_eq!(completion.model_id, "claude-sonnet-4-5-20250929");
    }

    #[tokio::test]
    async fn test_empty_content_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"content": []})),
            )
            .mount(&server)
            .await;

        let err = adapter(&server)
            .complete(&CompletionRequest::new("", "Hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .mount(&server)
            .await;

        let err = adapter(&server)
            .complete(&CompletionRequest::new("", "Hello"))
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::Auth("invalid x-api-key".to_string()));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let server = MockServer::start().await;
        let config = FileAnthropicConfig {
            base_url: server.uri(),
            api_key_env: "CHORUS_TEST_UNSET_ANTHROPIC_KEY".to_string(),
            ..Default::default()
        };

        let err = AnthropicAdapter::new(&config)
            .complete(&CompletionRequest::new("", "Hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::MissingCredential { .. }));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}
