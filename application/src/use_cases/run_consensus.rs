//! Run Consensus use case
//!
//! Orchestrates a consensus round:
//! 1. optional research grounding appended to the system prompt
//! 2. every enabled provider answers concurrently (settle-all)
//! 3. responses are scored and weak ones dropped
//! 4. survivors are reconciled by the synthesis provider

use crate::ports::event_logger::{EventLogger, LogEvent, NoEventLogger};
use crate::ports::progress::{ConsensusPhase, NoProgress, ProgressNotifier};
use crate::ports::provider_gateway::{CompletionRequest, ProviderError, ProviderGateway};
use crate::ports::research::ResearchProvider;
use crate::use_cases::run_reasoning::{ReasoningError, ReasoningInput, RunReasoningUseCase};
use chorus_domain::prompt::NO_QUALITY_RESPONSES;
use chorus_domain::{
    ConfidenceLevel, ConsensusResult, ModelResponse, PromptTemplate, Provider, ProviderConfig,
    ReasoningConfig, consensus_score, quality_score, shares_query_keyword,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Default per-provider timeout for consensus queries.
const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur during a consensus round
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsensusError {
    #[error("No providers enabled")]
    NoProviders,

    #[error("Research grounding failed: {0}")]
    Grounding(#[from] ReasoningError),
}

/// Input for the RunConsensus use case
#[derive(Debug, Clone)]
pub struct ConsensusInput {
    pub query: String,
    /// Business context; non-empty enables research grounding
    pub research_context: String,
    pub system_prompt: String,
    pub config: ProviderConfig,
}

impl ConsensusInput {
    pub fn new(query: impl Into<String>, config: ProviderConfig) -> Self {
        Self {
            query: query.into(),
            research_context: String::new(),
            system_prompt: String::new(),
            config,
        }
    }

    pub fn with_research_context(mut self, context: impl Into<String>) -> Self {
        self.research_context = context.into();
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }
}

/// Use case for running a multi-provider consensus round
#[derive(Clone)]
pub struct RunConsensusUseCase {
    gateway: Arc<dyn ProviderGateway>,
    research: Arc<dyn ResearchProvider>,
    reasoning_config: ReasoningConfig,
    query_timeout: Duration,
    event_logger: Arc<dyn EventLogger>,
}

impl RunConsensusUseCase {
    pub fn new(gateway: Arc<dyn ProviderGateway>, research: Arc<dyn ResearchProvider>) -> Self {
        Self {
            gateway,
            research,
            reasoning_config: ReasoningConfig::default(),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            event_logger: Arc::new(NoEventLogger),
        }
    }

    pub fn with_reasoning_config(mut self, config: ReasoningConfig) -> Self {
        self.reasoning_config = config;
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_event_logger(mut self, logger: Arc<dyn EventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: ConsensusInput) -> Result<ConsensusResult, ConsensusError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: ConsensusInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ConsensusResult, ConsensusError> {
        if input.config.enabled_providers().is_empty() {
            return Err(ConsensusError::NoProviders);
        }

        let started = Instant::now();
        info!(
            "Starting consensus with {} providers",
            input.config.enabled_providers().len()
        );

        // Phase 1: Grounding (optional)
        let system_prompt = self.phase_grounding(&input, progress).await?;

        // Phase 2: Query
        let responses = self.phase_query(&input, &system_prompt, progress).await;
        let answered = responses.len();

        let mut survivors: Vec<ModelResponse> = responses
            .into_iter()
            .filter(|r| {
                let keep = r.passes(input.config.quality_threshold);
                if !keep {
                    debug!(
                        "Dropping {} response, quality {:.2} < {:.2}",
                        r.provider, r.quality_score, input.config.quality_threshold
                    );
                }
                keep
            })
            .collect();
        survivors.sort_by_key(|r| input.config.position(r.provider));

        let texts: Vec<&str> = survivors.iter().map(|r| r.text.as_str()).collect();
        let score = consensus_score(&texts);
        let on_topic = shares_query_keyword(&input.query, &texts);
        let confidence = ConfidenceLevel::from_score(score, survivors.len(), on_topic);

        // Phase 3: Synthesis
        let (synthesized_text, synthesis_provider, message) = match survivors.len() {
            0 => {
                warn!(
                    "No quality responses ({} answered, threshold {:.2})",
                    answered, input.config.quality_threshold
                );
                (
                    NO_QUALITY_RESPONSES.to_string(),
                    None,
                    Some(format!(
                        "{} of {} providers answered; none met the quality threshold of {:.2}.",
                        answered,
                        input.config.enabled_providers().len(),
                        input.config.quality_threshold
                    )),
                )
            }
            1 => {
                debug!("Single survivor, skipping synthesis");
                (survivors[0].text.clone(), None, None)
            }
            _ => {
                self.phase_synthesis(&input, &survivors, progress)
                    .await
            }
        };

        let result = ConsensusResult {
            synthesized_text,
            responses: survivors,
            consensus_score: score,
            confidence_level: confidence,
            elapsed_ms: started.elapsed().as_millis() as u64,
            synthesis_provider,
            message,
        };

        info!(
            "Consensus finished: {} survivors, score {:.2}, confidence {}",
            result.responses.len(),
            result.consensus_score,
            result.confidence_level
        );

        Ok(result)
    }

    /// Phase 1: Ground the system prompt with research
    async fn phase_grounding(
        &self,
        input: &ConsensusInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, ConsensusError> {
        if input.research_context.trim().is_empty() {
            return Ok(system_or_default(&input.system_prompt).to_string());
        }

        info!("Phase 1: Grounding");
        progress.on_phase_start(ConsensusPhase::Grounding, 1);

        let grounding = if input.config.use_reasoning {
            let reasoning = RunReasoningUseCase::new(Arc::clone(&self.research))
                .with_event_logger(Arc::clone(&self.event_logger));
            let result = reasoning
                .execute_with_progress(
                    ReasoningInput::new(&input.query, &input.research_context)
                        .with_config(self.reasoning_config),
                    progress,
                )
                .await;
            result.map(|r| r.synthesized_text)
        } else {
            let query = format!("{} ({})", input.query, input.research_context);
            progress.on_research_query(0, &query);
            self.research
                .research(&query)
                .await
                .map(|r| r.text)
                .map_err(ReasoningError::from)
        };

        let grounding = match grounding {
            Ok(text) => text,
            Err(e) => {
                warn!("Grounding failed: {}", e);
                progress.on_phase_complete(ConsensusPhase::Grounding);
                return Err(e.into());
            }
        };

        progress.on_phase_complete(ConsensusPhase::Grounding);
        Ok(PromptTemplate::grounded_system(&input.system_prompt, &grounding))
    }

    /// Phase 2: Query all enabled providers in parallel
    async fn phase_query(
        &self,
        input: &ConsensusInput,
        system_prompt: &str,
        progress: &dyn ProgressNotifier,
    ) -> Vec<ModelResponse> {
        info!("Phase 2: Query");
        let providers = input.config.enabled_providers();
        progress.on_phase_start(ConsensusPhase::Query, providers.len());

        let available = self.gateway.providers();
        let mut join_set = JoinSet::new();

        for &provider in providers {
            if !available.contains(&provider) {
                // Settles as a failure without reaching the gateway
                join_set.spawn(async move {
                    (provider, Err(ProviderError::NotConfigured(provider)), 0)
                });
                continue;
            }

            let gateway = Arc::clone(&self.gateway);
            let request = CompletionRequest::new(system_prompt, &input.query);
            let timeout = self.query_timeout;

            join_set.spawn(async move {
                let started = Instant::now();
                let result =
                    match tokio::time::timeout(timeout, gateway.complete(provider, &request)).await
                    {
                        Ok(result) => result,
                        Err(_) => Err(ProviderError::Timeout),
                    };
                (provider, result, started.elapsed().as_millis() as u64)
            });
        }

        let mut responses = Vec::new();

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((provider, Ok(completion), latency_ms)) => {
                    let quality = quality_score(&input.query, &completion.text);
                    info!(
                        "Provider {} responded in {} ms (quality {:.2})",
                        provider, latency_ms, quality
                    );
                    progress.on_task_complete(ConsensusPhase::Query, provider, true);
                    self.event_logger.log(LogEvent::new(
                        "consensus_response",
                        serde_json::json!({
                            "provider": provider.as_str(),
                            "model_id": completion.model_id,
                            "latency_ms": latency_ms,
                            "quality_score": quality,
                            "bytes": completion.text.len(),
                        }),
                    ));
                    responses.push(
                        ModelResponse::new(provider, completion.model_id, completion.text, latency_ms)
                            .with_quality_score(quality),
                    );
                }
                Ok((provider, Err(e), _)) => {
                    warn!("Provider {} failed: {}", provider, e);
                    progress.on_task_complete(ConsensusPhase::Query, provider, false);
                    self.event_logger.log(LogEvent::new(
                        "consensus_response",
                        serde_json::json!({
                            "provider": provider.as_str(),
                            "error_kind": e.kind(),
                            "error": e.to_string(),
                        }),
                    ));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        progress.on_phase_complete(ConsensusPhase::Query);
        responses
    }

    /// Phase 3: Reconcile two or more survivors
    ///
    /// A failed synthesis call degrades to the best-scoring survivor.
    async fn phase_synthesis(
        &self,
        input: &ConsensusInput,
        survivors: &[ModelResponse],
        progress: &dyn ProgressNotifier,
    ) -> (String, Option<Provider>, Option<String>) {
        info!("Phase 3: Synthesis");
        progress.on_phase_start(ConsensusPhase::Synthesis, 1);

        let synthesizer = input.config.synthesis_provider;
        let quoted: Vec<(String, String)> = survivors
            .iter()
            .map(|r| (r.provider.to_string(), r.text.clone()))
            .collect();
        let request = CompletionRequest::new(
            PromptTemplate::synthesis_system(),
            PromptTemplate::synthesis_prompt(&input.query, &quoted),
        );

        let result =
            match tokio::time::timeout(self.query_timeout, self.gateway.complete(synthesizer, &request))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout),
            };

        let outcome = match result {
            Ok(completion) => {
                progress.on_task_complete(ConsensusPhase::Synthesis, synthesizer, true);
                self.event_logger.log(LogEvent::new(
                    "consensus_synthesis",
                    serde_json::json!({
                        "provider": synthesizer.as_str(),
                        "model_id": completion.model_id,
                        "survivors": survivors.len(),
                    }),
                ));
                (completion.text, Some(synthesizer), None)
            }
            Err(e) => {
                warn!("Synthesis by {} failed: {}", synthesizer, e);
                progress.on_task_complete(ConsensusPhase::Synthesis, synthesizer, false);
                self.event_logger.log(LogEvent::new(
                    "consensus_synthesis",
                    serde_json::json!({
                        "provider": synthesizer.as_str(),
                        "error_kind": e.kind(),
                        "error": e.to_string(),
                    }),
                ));
                let best = best_response(survivors);
                let text = best.map(|r| r.text.clone()).unwrap_or_default();
                let source = best.map(|r| r.provider.to_string()).unwrap_or_default();
                (
                    text,
                    None,
                    Some(format!(
                        "Synthesis by {} failed ({}); showing the highest-quality response from {}.",
                        synthesizer, e, source
                    )),
                )
            }
        };

        progress.on_phase_complete(ConsensusPhase::Synthesis);
        outcome
    }
}

fn system_or_default(system_prompt: &str) -> &str {
    if system_prompt.trim().is_empty() {
        PromptTemplate::default_system()
    } else {
        system_prompt
    }
}

/// Highest quality score; ties keep the earlier response.
fn best_response(responses: &[ModelResponse]) -> Option<&ModelResponse> {
    responses.iter().reduce(|best, r| {
        if r.quality_score > best.quality_score {
            r
        } else {
            best
        }
    })
}
