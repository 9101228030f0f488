//! Generate With Fallback use case
//!
//! Serves a single-provider generation request, walking the fallback chain
//! until a step produces text. Never fails: when every step is exhausted the
//! caller receives a locally built placeholder.

use crate::config::FallbackPolicy;
use crate::ports::event_logger::{EventLogger, LogEvent, NoEventLogger};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::provider_gateway::{CompletionRequest, ProviderError, ProviderGateway};
use chorus_domain::core::string::truncate_chars;
use chorus_domain::{
    FallbackChain, FallbackStep, GenerationRequest, Model, PromptTemplate, Provider, ServedBy,
    placeholder_content,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Input for the GenerateWithFallback use case
#[derive(Debug, Clone)]
pub struct FallbackRequest {
    /// Model requested for the primary step
    pub model: Model,
    pub request: GenerationRequest,
}

impl FallbackRequest {
    pub fn new(model: Model, request: GenerationRequest) -> Self {
        Self { model, request }
    }

    /// Primary provider: the request's hint, else the model's family, else the default.
    pub fn primary_provider(&self) -> Provider {
        self.request
            .provider_hint()
            .or_else(|| self.model.provider())
            .unwrap_or_default()
    }
}

/// One failed step of the chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub step: FallbackStep,
    pub error: String,
    pub elapsed_ms: u64,
}

/// Result of a fallback generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub content: String,
    /// Name of whoever served the content, `"placeholder"` on exhaustion
    pub provider: String,
    /// Model identifier reported by the serving provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// True unless the primary step succeeded
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Failed steps before the outcome, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attempts: Vec<AttemptRecord>,
}

impl GenerationOutcome {
    pub fn is_placeholder(&self) -> bool {
        self.provider == ServedBy::Placeholder.as_str()
    }
}

/// Use case for generating text with provider fallback
#[derive(Clone)]
pub struct GenerateWithFallbackUseCase {
    gateway: Arc<dyn ProviderGateway>,
    policy: FallbackPolicy,
    event_logger: Arc<dyn EventLogger>,
}

impl GenerateWithFallbackUseCase {
    pub fn new(gateway: Arc<dyn ProviderGateway>) -> Self {
        Self {
            gateway,
            policy: FallbackPolicy::default(),
            event_logger: Arc::new(NoEventLogger),
        }
    }

    pub fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_event_logger(mut self, logger: Arc<dyn EventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: FallbackRequest) -> GenerationOutcome {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: FallbackRequest,
        progress: &dyn ProgressNotifier,
    ) -> GenerationOutcome {
        let primary = input.primary_provider();
        let chain = FallbackChain::for_primary(primary);
        info!(
            "Generating with {} (model {}), {} steps available",
            primary,
            input.model,
            chain.len()
        );

        let mut attempts = Vec::new();

        for (index, step) in chain.steps().iter().enumerate() {
            let request = self.completion_request(&input, primary, index, step);
            let budget = self.policy.timeout_for(index);
            let started = Instant::now();

            debug!("Fallback step {}: {} (timeout {:?})", index, step, budget);
            let result =
                match tokio::time::timeout(budget, self.gateway.complete(step.provider(), &request))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(ProviderError::Timeout),
                };
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match result {
                Ok(completion) => {
                    progress.on_fallback_attempt(step, true);
                    let fallback = index != 0;
                    if fallback {
                        info!("Served by fallback step {} after {} failures", step, index);
                    }
                    self.event_logger.log(LogEvent::new(
                        "generation_complete",
                        serde_json::json!({
                            "step": step.to_string(),
                            "model_id": completion.model_id,
                            "fallback": fallback,
                            "elapsed_ms": elapsed_ms,
                        }),
                    ));
                    return GenerationOutcome {
                        content: completion.text,
                        provider: ServedBy::Provider(step.provider()).to_string(),
                        model_id: Some(completion.model_id),
                        fallback,
                        message: fallback.then(|| {
                            format!(
                                "Primary provider {} was unavailable; served by {}.",
                                primary, step
                            )
                        }),
                        attempts,
                    };
                }
                Err(e) => {
                    warn!("Fallback step {} failed: {}", step, e);
                    progress.on_fallback_attempt(step, false);
                    self.event_logger.log(LogEvent::new(
                        "fallback_attempt",
                        serde_json::json!({
                            "step": step.to_string(),
                            "error_kind": e.kind(),
                            "error": e.to_string(),
                            "elapsed_ms": elapsed_ms,
                        }),
                    ));
                    attempts.push(AttemptRecord {
                        step: *step,
                        error: e.to_string(),
                        elapsed_ms,
                    });
                }
            }
        }

        warn!(
            "All {} fallback steps failed, returning placeholder",
            attempts.len()
        );
        self.event_logger.log(LogEvent::new(
            "fallback_exhausted",
            serde_json::json!({
                "primary": primary.as_str(),
                "attempts": attempts.len(),
            }),
        ));

        GenerationOutcome {
            content: placeholder_content(input.request.query()),
            provider: ServedBy::Placeholder.to_string(),
            model_id: None,
            fallback: true,
            message: Some(
                "All providers failed to respond; returned placeholder content.".to_string(),
            ),
            attempts,
        }
    }

    /// Build the provider request for one step.
    ///
    /// The requested model is only sent to its own family; other providers
    /// fall back to their configured default model.
    fn completion_request(
        &self,
        input: &FallbackRequest,
        primary: Provider,
        index: usize,
        step: &FallbackStep,
    ) -> CompletionRequest {
        let request = &input.request;
        let system_prompt = if request.system_instruction().trim().is_empty() {
            PromptTemplate::default_system()
        } else {
            request.system_instruction()
        };

        let model_fits_primary = input
            .model
            .provider()
            .is_none_or(|family| family == primary);
        let model = (step.provider() == primary && model_fits_primary).then(|| input.model.clone());

        if step.is_simplified() {
            let prompt = truncate_chars(request.query(), self.policy.simplified_prompt_chars);
            debug!(
                "Simplified step {} keeps {} of {} prompt characters",
                index,
                prompt.chars().count(),
                request.query().chars().count()
            );
            CompletionRequest::new(system_prompt, prompt)
                .with_model(model)
                .with_temperature(request.temperature())
                .with_max_tokens(self.policy.simplified_max_tokens)
        } else {
            CompletionRequest::new(system_prompt, request.query())
                .with_model(model)
                .with_temperature(request.temperature())
                .with_max_tokens(self.policy.max_tokens)
        }
    }
}
