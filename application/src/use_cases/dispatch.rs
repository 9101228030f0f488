//! Dispatch Request use case
//!
//! Entry point that routes a request and hands it to the fallback generator
//! (single mode) or the consensus engine (consensus mode).

use crate::config::FallbackPolicy;
use crate::ports::event_logger::{EventLogger, NoEventLogger};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::provider_gateway::ProviderGateway;
use crate::ports::research::ResearchProvider;
use crate::use_cases::generate_with_fallback::{
    FallbackRequest, GenerateWithFallbackUseCase, GenerationOutcome,
};
use crate::use_cases::run_consensus::{ConsensusError, ConsensusInput, RunConsensusUseCase};
use crate::use_cases::run_reasoning::{ReasoningError, ReasoningInput, RunReasoningUseCase};
use chorus_domain::{
    ConsensusResult, GenerationRequest, PromptTemplate, ProviderConfig, ReasoningConfig,
    ReasoningResult, RouteDecision, RouteOverrides, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while dispatching a request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Reasoning(#[from] ReasoningError),

    #[error(transparent)]
    Consensus(#[from] ConsensusError),
}

/// How a dispatched request is answered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// One provider, with fallback
    #[default]
    Single,
    /// Every enabled provider, then synthesis
    Consensus,
}

/// Input for the DispatchRequest use case
#[derive(Debug, Clone)]
pub struct DispatchInput {
    pub query: String,
    /// Business context for routing and research grounding
    pub context: String,
    pub system_prompt: String,
    pub overrides: RouteOverrides,
    pub mode: DispatchMode,
}

impl DispatchInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context: String::new(),
            system_prompt: String::new(),
            overrides: RouteOverrides::default(),
            mode: DispatchMode::default(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_overrides(mut self, overrides: RouteOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }
}

/// What the dispatched request produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DispatchResult {
    Single {
        #[serde(skip_serializing_if = "Option::is_none")]
        grounding: Option<ReasoningResult>,
        outcome: GenerationOutcome,
    },
    Consensus(ConsensusResult),
}

/// Output of the DispatchRequest use case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchOutput {
    pub decision: RouteDecision,
    pub result: DispatchResult,
}

/// Use case for routing and answering a request
#[derive(Clone)]
pub struct DispatchRequestUseCase {
    gateway: Arc<dyn ProviderGateway>,
    research: Arc<dyn ResearchProvider>,
    fallback_policy: FallbackPolicy,
    reasoning_config: ReasoningConfig,
    consensus_config: ProviderConfig,
    event_logger: Arc<dyn EventLogger>,
}

impl DispatchRequestUseCase {
    pub fn new(gateway: Arc<dyn ProviderGateway>, research: Arc<dyn ResearchProvider>) -> Self {
        Self {
            gateway,
            research,
            fallback_policy: FallbackPolicy::default(),
            reasoning_config: ReasoningConfig::default(),
            consensus_config: ProviderConfig::default(),
            event_logger: Arc::new(NoEventLogger),
        }
    }

    pub fn with_fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.fallback_policy = policy;
        self
    }

    pub fn with_reasoning_config(mut self, config: ReasoningConfig) -> Self {
        self.reasoning_config = config;
        self
    }

    pub fn with_consensus_config(mut self, config: ProviderConfig) -> Self {
        self.consensus_config = config;
        self
    }

    pub fn with_event_logger(mut self, logger: Arc<dyn EventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: DispatchInput) -> Result<DispatchOutput, DispatchError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: DispatchInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<DispatchOutput, DispatchError> {
        let decision = Router::classify(&input.query, &input.context, &input.overrides);
        info!(
            "Routed to {} ({}), reasoning {}: {}",
            decision.provider, decision.model, decision.use_reasoning, decision.rationale
        );

        let result = match input.mode {
            DispatchMode::Single => self.single(&input, &decision, progress).await?,
            DispatchMode::Consensus => {
                let config = self
                    .consensus_config
                    .clone()
                    .with_reasoning(decision.use_reasoning);
                let consensus = RunConsensusUseCase::new(
                    Arc::clone(&self.gateway),
                    Arc::clone(&self.research),
                )
                .with_reasoning_config(self.reasoning_config)
                .with_query_timeout(self.fallback_policy.fallback_timeout)
                .with_event_logger(Arc::clone(&self.event_logger));

                let input = ConsensusInput::new(input.query.clone(), config)
                    .with_research_context(input.context.clone())
                    .with_system_prompt(input.system_prompt.clone());
                DispatchResult::Consensus(consensus.execute_with_progress(input, progress).await?)
            }
        };

        Ok(DispatchOutput { decision, result })
    }

    async fn single(
        &self,
        input: &DispatchInput,
        decision: &RouteDecision,
        progress: &dyn ProgressNotifier,
    ) -> Result<DispatchResult, DispatchError> {
        let grounding = if decision.use_reasoning && !input.context.trim().is_empty() {
            let reasoning = RunReasoningUseCase::new(Arc::clone(&self.research))
                .with_event_logger(Arc::clone(&self.event_logger));
            let reasoning_input = ReasoningInput::new(input.query.clone(), input.context.clone())
                .with_config(self.reasoning_config);
            Some(
                reasoning
                    .execute_with_progress(reasoning_input, progress)
                    .await?,
            )
        } else {
            None
        };

        let system_prompt = match &grounding {
            Some(result) => {
                PromptTemplate::grounded_system(&input.system_prompt, &result.synthesized_text)
            }
            None => input.system_prompt.clone(),
        };

        let generator = GenerateWithFallbackUseCase::new(Arc::clone(&self.gateway))
            .with_policy(self.fallback_policy.clone())
            .with_event_logger(Arc::clone(&self.event_logger));
        let request = FallbackRequest::new(
            decision.model.clone(),
            GenerationRequest::new(input.query.clone(), system_prompt)
                .with_provider_hint(decision.provider),
        );
        let outcome = generator.execute_with_progress(request, progress).await;

        Ok(DispatchResult::Single { grounding, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MockGateway, MockResearch, Reply};
    use chorus_domain::Provider;
    use chorus_domain::prompt::RESEARCH_CONTEXT_START;

    #[tokio::test]
    async fn test_single_mode_routes_creative_to_openai_without_research() {
        let gateway = Arc::new(MockGateway::new().with_text(Provider::OpenAi, "Fresh tagline"));
        let research = Arc::new(MockResearch::new());
        let use_case = DispatchRequestUseCase::new(gateway.clone(), research.clone());

        let output = use_case
            .execute(DispatchInput::new("Write a tagline for our running shoe").with_context("creative"))
            .await
            .unwrap();

        assert_eq!(output.decision.provider, Provider::OpenAi);
        assert!(research.queries().is_empty());
        match output.result {
            DispatchResult::Single { grounding, outcome } => {
                assert!(grounding.is_none());
                assert_eq!(outcome.content, "Fresh tagline");
                assert_eq!(outcome.provider, "openai");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_single_mode_grounds_research_requests() {
        let gateway = Arc::new(MockGateway::new().with_text(Provider::Anthropic, "Grounded answer"));
        let research = Arc::new(MockResearch::new());
        let use_case = DispatchRequestUseCase::new(gateway.clone(), research.clone());

        let output = use_case
            .execute(
                DispatchInput::new("Analyze competitor pricing for wireless earbuds")
                    .with_context("competitive analysis"),
            )
            .await
            .unwrap();

        assert!(output.decision.use_reasoning);
        assert_eq!(research.queries().len(), 3);
        assert!(gateway.calls()[0].1.system_prompt.contains(RESEARCH_CONTEXT_START));
        match output.result {
            DispatchResult::Single { grounding, .. } => {
                assert_eq!(grounding.map(|g| g.query_count), Some(3));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_manual_override_skips_keyword_routing() {
        let gateway = Arc::new(MockGateway::new().with_text(Provider::Gemini, "from C"));
        let research = Arc::new(MockResearch::new());
        let use_case = DispatchRequestUseCase::new(gateway.clone(), research.clone());

        let output = use_case
            .execute(
                DispatchInput::new("Research competitor pricing")
                    .with_context("competitive analysis")
                    .with_overrides(RouteOverrides::none().with_provider(Provider::Gemini)),
            )
            .await
            .unwrap();

        assert_eq!(output.decision.provider, Provider::Gemini);
        assert!(!output.decision.use_reasoning);
        assert!(research.queries().is_empty());
        assert_eq!(gateway.calls()[0].0, Provider::Gemini);
    }

    #[tokio::test]
    async fn test_consensus_mode_uses_routing_reasoning_flag() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_text(Provider::Anthropic, "short")
                .with_text(Provider::OpenAi, "short")
                .with_text(Provider::Gemini, "short")
                .with_synthesis(Reply::Text("unused".to_string())),
        );
        let research = Arc::new(MockResearch::new());
        let use_case = DispatchRequestUseCase::new(gateway.clone(), research.clone())
            .with_consensus_config(ProviderConfig::default().with_quality_threshold(0.9));

        let output = use_case
            .execute(
                DispatchInput::new("Analyze competitor pricing")
                    .with_context("competitive analysis")
                    .with_mode(DispatchMode::Consensus),
            )
            .await
            .unwrap();

        // Research route turns reasoning on, so grounding runs the full loop
        assert_eq!(research.queries().len(), 3);
        match output.result {
            DispatchResult::Consensus(result) => {
                assert!(result.responses.is_empty());
                assert_eq!(gateway.synthesis_call_count(), 0);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_grounding_failure_propagates() {
        let gateway = Arc::new(MockGateway::new().with_text(Provider::Anthropic, "unused"));
        let research = Arc::new(MockResearch::new().failing_on(0));
        let use_case = DispatchRequestUseCase::new(gateway.clone(), research);

        let err = use_case
            .execute(DispatchInput::new("Research the market").with_context("competitive"))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::Reasoning(_)));
        assert_eq!(gateway.call_count(), 0);
    }
}
