//! OpenAI Chat Completions API adapter

use super::ProviderAdapter;
use super::credentials::ApiKeySource;
use super::http::{build_client, send_json};
use crate::config::FileOpenAiConfig;
use async_trait::async_trait;
use chorus_application::{Completion, CompletionRequest, ProviderError};
use chorus_domain::{Model, Provider};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_key: ApiKeySource,
    base_url: String,
    default_model: Model,
    max_tokens: u32,
}

impl OpenAiAdapter {
    pub fn new(config: &FileOpenAiConfig) -> Self {
        Self {
            client: build_client(Duration::from_secs(config.timeout_secs)),
            api_key: ApiKeySource::from_env(&config.api_key_env),
            base_url: config.base_url.trim_end_matches('/').to_string(),
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
impl ProviderAdapter for OpenAiAdapter {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    fn default_model(&self) -> &Model {
        &self.default_model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        let key = self
            .api_key
            .resolve()
            .ok_or_else(|| ProviderError::MissingCredential {
                provider: Provider::OpenAi,
                env_var: self.api_key.env_var().to_string(),
            })?;

        let model = request.model.as_ref().unwrap_or(&self.default_model);
        let mut messages = Vec::with_capacity(2);
        if !request.system_prompt.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: &request.system_prompt,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.user_prompt,
        });

        let body = ChatRequest {
            model: model.as_str(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens.min(self.max_tokens),
        };

        debug!(model = %model, "OpenAI chat completion request");
        let response: ChatResponse = send_json(
            self.client
                .post(format!("{}/v1/chat/completions", self.base_url))
                .bearer_auth(key)
                .json(&body),
        )
        .await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("no message content in response".to_string())
            })?;

        Ok(Completion::new(
            text,
            response.model.unwrap_or_else(|| model.to_string()),
        ))
    }
}
