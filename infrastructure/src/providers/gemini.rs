//! Gemini generateContent API adapter

use super::ProviderAdapter;
use super::credentials::ApiKeySource;
use super::http::{build_client, send_json};
use crate::config::FileGeminiConfig;
use async_trait::async_trait;
use chorus_application::{Completion, CompletionRequest, ProviderError};
use chorus_domain::{Model, Provider};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

pub struct GeminiAdapter {
    client: reqwest::Client,
    api_key: ApiKeySource,
    base_url: String,
    default_model: Model,
    max_tokens: u32,
}

impl GeminiAdapter {
    pub fn new(config: &FileGeminiConfig) -> Self {
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
impl ProviderAdapter for GeminiAdapter {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn default_model(&self) -> &Model {
        &self.default_model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        let key = self
            .api_key
            .resolve()
            .ok_or_else(|| ProviderError::MissingCredential {
                provider: Provider::Gemini,
                env_var: self.api_key.env_var().to_string(),
            })?;

        let model = request.model.as_ref().unwrap_or(&self.default_model);
        let system_instruction = (!request.system_prompt.is_empty()).then(|| Content {
            role: None,
            parts: [Part {
                text: &request.system_prompt,
            }],
        });
        let body = GenerateRequest {
            system_instruction,
            contents: [Content {
                role: Some("user"),
                parts: [Part {
                    text: &request.user_prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens.min(self.max_tokens),
            },
        };

        debug!(model = %model, "Gemini generateContent request");
        let response: GenerateResponse = send_json(
            self.client
                .post(format!(
                    "{}/v1beta/models/{}:generateContent",
                    self.base_url, model
                ))
                .header("x-goog-api-key", key)
                .json(&body),
        )
        .await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::MalformedResponse(
                "no candidate text in response".to_string(),
            ));
        }

        Ok(Completion::new(
            text,
            response.model_version.unwrap_or_else(|| model.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(server: &MockServer) -> GeminiAdapter {
        let config = FileGeminiConfig {
            base_url: server.uri(),
            model: "gemini-2.5-flash".to_string(),
            max_tokens: 1000,
            ..Default::default()
        };
        GeminiAdapter::new(&config).with_api_key(ApiKeySource::fixed("g-key"))
    }

    #[tokio::test]
    async fn test_complete_joins_candidate_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "g-key"))
            .and(body_partial_json(serde_json::json!({
                "systemInstruction": {"parts": [{"text": "Be brief"}]},
                "contents": [{"role": "user", "parts": [{"text": "Hello"}]}],
                "generationConfig": {"maxOutputTokens": 1000}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "Hel"}, {"text": "lo!"}]}}],
                "modelVersion": "gemini-2.5-flash-001"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let completion = adapter(&server)
            .complete(&CompletionRequest::new("Be brief", "Hello"))
            .await
            .unwrap();

        assert_eq!(completion.text, "Hello!");
        assert_eq!(completion.model_id, "gemini-2.5-flash-001");
    }

    #[tokio::test]
    async fn test_blocked_candidate_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"finishReason": "SAFETY"}]
            })))
            .mount(&server)
            .await;

        let err = adapter(&server)
            .complete(&CompletionRequest::new("", "Hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_server_error_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = adapter(&server)
            .complete(&CompletionRequest::new("", "Hello"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProviderError::Http {
                status: 503,
                message: "overloaded".to_string()
            }
        );
    }
}
