//! Perplexity web-grounded research adapter

use crate::config::FileResearchConfig;
use crate::providers::credentials::ApiKeySource;
use crate::providers::http::{build_client, send_json};
use async_trait::async_trait;
use chorus_application::{ResearchError, ResearchProvider};
use chorus_domain::ResearchResponse;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    model: &'a str,
    messages: [SearchMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct SearchMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    choices: Vec<SearchChoice>,
    #[serde(default)]
    citations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchChoice {
    message: SearchChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct SearchChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Research provider backed by Perplexity's chat completions endpoint.
pub struct PerplexityResearch {
    client: reqwest::Client,
    api_key: ApiKeySource,
    base_url: String,
    model: String,
}

impl PerplexityResearch {
    pub fn new(config: &FileResearchConfig) -> Self {
        Self {
            client: build_client(Duration::from_secs(config.timeout_secs)),
            api_key: ApiKeySource::from_env(&config.api_key_env),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    pub fn with_api_key(mut self, api_key: ApiKeySource) -> Self {
        self.api_key = api_key;
        self
    }
}

#[async_trait]
impl ResearchProvider for PerplexityResearch {
    async fn research(&self, query: &str) -> Result<ResearchResponse, ResearchError> {
        let key = self
            .api_key
            .resolve()
            .ok_or_else(|| ResearchError::MissingCredential {
                env_var: self.api_key.env_var().to_string(),
            })?;

        let body = SearchRequest {
            model: &self.model,
            messages: [SearchMessage {
                role: "user",
                content: query,
            }],
        };

        debug!(model = %self.model, "Perplexity research request");
        let response: SearchResponse = send_json(
            self.client
                .post(format!("{}/chat/completions", self.base_url))
                .bearer_auth(key)
                .json(&body),
        )
        .await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ResearchError::MalformedResponse("no choices in response".to_string()))?;
        if text.trim().is_empty() {
            return Err(ResearchError::MalformedResponse(
                "empty research content".to_string(),
            ));
        }

        Ok(ResearchResponse::new(text).with_citations(response.citations))
    }
}
