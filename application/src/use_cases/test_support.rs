//! Hand-written port doubles shared by the use case tests.

use crate::ports::provider_gateway::{
    Completion, CompletionRequest, ProviderError, ProviderGateway,
};
use crate::ports::research::{ResearchError, ResearchProvider};
use async_trait::async_trait;
use chorus_domain::{PromptTemplate, Provider, ResearchResponse};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Text(String),
    Error(ProviderError),
    Delayed(Duration, String),
}

/// Gateway returning a fixed reply per provider and recording every call.
///
/// Calls whose system prompt is the consensus synthesis prompt use the
/// synthesis reply when one is set.
pub(crate) struct MockGateway {
    replies: HashMap<Provider, Reply>,
    synthesis: Option<Reply>,
    calls: Mutex<Vec<(Provider, CompletionRequest)>>,
}

impl MockGateway {
    pub(crate) fn new() -> Self {
        Self {
            replies: HashMap::new(),
            synthesis: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_reply(mut self, provider: Provider, reply: Reply) -> Self {
        self.replies.insert(provider, reply);
        self
    }

    pub(crate) fn with_text(self, provider: Provider, text: &str) -> Self {
        self.with_reply(provider, Reply::Text(text.to_string()))
    }

    pub(crate) fn with_error(self, provider: Provider, error: ProviderError) -> Self {
        self.with_reply(provider, Reply::Error(error))
    }

    pub(crate) fn with_synthesis(mut self, reply: Reply) -> Self {
        self.synthesis = Some(reply);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(Provider, CompletionRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn synthesis_call_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|(_, r)| r.system_prompt == PromptTemplate::synthesis_system())
            .count()
    }
}

#[async_trait]
impl ProviderGateway for MockGateway {
    async fn complete(
        &self,
        provider: Provider,
        request: &CompletionRequest,
    ) -> Result<Completion, ProviderError> {
        self.calls.lock().unwrap().push((provider, request.clone()));

        let reply = if request.system_prompt == PromptTemplate::synthesis_system() {
            self.synthesis
                .clone()
                .or_else(|| self.replies.get(&provider).cloned())
        } else {
            self.replies.get(&provider).cloned()
        };

        match reply {
            Some(Reply::Text(text)) => Ok(Completion::new(text, format!("{}-mock", provider))),
            Some(Reply::Error(e)) => Err(e),
            Some(Reply::Delayed(delay, text)) => {
                tokio::time::sleep(delay).await;
                Ok(Completion::new(text, format!("{}-mock", provider)))
            }
            None => Err(ProviderError::NotConfigured(provider)),
        }
    }

    /// Only providers with a scripted reply count as registered.
    fn providers(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.replies.contains_key(p))
            .collect()
    }
}

/// Research service echoing each query, optionally failing on one call.
pub(crate) struct MockResearch {
    fail_on_call: Option<usize>,
    delay: Option<Duration>,
    queries: Mutex<Vec<String>>,
}

impl MockResearch {
    pub(crate) fn new() -> Self {
        Self {
            fail_on_call: None,
            delay: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Fail the call with this zero-based index.
    pub(crate) fn failing_on(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResearchProvider for MockResearch {
    async fn research(&self, query: &str) -> Result<ResearchResponse, ResearchError> {
        let index = {
            let mut queries = self.queries.lock().unwrap();
            queries.push(query.to_string());
            queries.len() - 1
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_on_call == Some(index) {
            return Err(ResearchError::Http {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }

        Ok(ResearchResponse::new(format!("Findings for: {}", query))
            .with_citations(vec![format!("https://example.com/{}", index)]))
    }
}
