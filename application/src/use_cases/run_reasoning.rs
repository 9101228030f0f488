//! Run Reasoning use case
//!
//! Iterative research loop: an initial research query, then follow-up
//! queries for the aspects the pattern still has to cover, until the
//! completeness target, the iteration cap or the time budget is reached.

use crate::ports::event_logger::{EventLogger, LogEvent, NoEventLogger};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::research::{ResearchError, ResearchProvider};
use chorus_domain::{
    CompletenessTracker, ReasoningConfig, ReasoningResult, ResearchPattern, ResearchResponse,
    extract_entities, synthesize,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info};

/// Errors that can occur during a reasoning session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReasoningError {
    #[error("Research failed: {0}")]
    Research(#[from] ResearchError),
}

/// Input for the RunReasoning use case
#[derive(Debug, Clone)]
pub struct ReasoningInput {
    pub query: String,
    /// Free-text business context, classified into a research pattern
    pub context_type: String,
    pub config: ReasoningConfig,
}

impl ReasoningInput {
    pub fn new(query: impl Into<String>, context_type: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context_type: context_type.into(),
            config: ReasoningConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReasoningConfig) -> Self {
        self.config = config;
        self
    }
}

/// Use case for running the research loop
#[derive(Clone)]
pub struct RunReasoningUseCase {
    research: Arc<dyn ResearchProvider>,
    event_logger: Arc<dyn EventLogger>,
}

impl RunReasoningUseCase {
    pub fn new(research: Arc<dyn ResearchProvider>) -> Self {
        Self {
            research,
            event_logger: Arc::new(NoEventLogger),
        }
    }

    pub fn with_event_logger(mut self, logger: Arc<dyn EventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: ReasoningInput) -> Result<ReasoningResult, ReasoningError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: ReasoningInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ReasoningResult, ReasoningError> {
        let started = Instant::now();
        let config = input.config;
        let budget = Duration::from_millis(config.timeout_ms);
        let pattern = ResearchPattern::classify(&input.context_type);
        let entities = extract_entities(&input.query);

        info!(
            "Starting reasoning: pattern {}, entities '{}'",
            pattern, entities
        );

        let mut tracker = CompletenessTracker::new();
        let initial = self.query(0, &input.query, progress).await?;
        tracker.record_initial(input.query.clone(), initial);

        while tracker.completeness() < config.completeness_threshold
            && started.elapsed() < budget
            && tracker.follow_up_count() < config.max_iterations
        {
            let Some(aspect) = pattern.next_uncovered_aspect(tracker.queries()) else {
                debug!("All {} aspects covered", pattern);
                break;
            };

            let iteration = tracker.paths().len();
            let follow_up = pattern.follow_up_query(&entities, aspect);
            let response = self.query(iteration, &follow_up, progress).await?;
            tracker.record_follow_up(follow_up, aspect, response);

            debug!(
                "Iteration {} covered '{}', completeness {:.2}",
                iteration,
                aspect,
                tracker.completeness()
            );
        }

        if tracker.overshoot() {
            debug!("Completeness contributions exceeded 1.0, clamped");
        }

        let completeness_score = tracker.completeness();
        let paths = tracker.into_paths();
        let elapsed_ms = started.elapsed().as_millis() as u64;

        info!(
            "Reasoning finished: {} queries, completeness {:.2}, {} ms",
            paths.len(),
            completeness_score,
            elapsed_ms
        );

        Ok(ReasoningResult {
            synthesized_text: synthesize(&paths),
            query_count: paths.len(),
            paths,
            completeness_score,
            elapsed_ms,
        })
    }

    async fn query(
        &self,
        iteration: usize,
        query: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<ResearchResponse, ReasoningError> {
        progress.on_research_query(iteration, query);
        let response = self.research.research(query).await?;
        self.event_logger.log(LogEvent::new(
            "research_query",
            serde_json::json!({
                "iteration": iteration,
                "query": query,
                "bytes": response.text.len(),
                "citations": response.citations.len(),
            }),
        ));
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockResearch;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn unbounded() -> ReasoningConfig {
        ReasoningConfig::default()
            .with_completeness_threshold(2.0)
            .with_max_iterations(10)
    }

    #[tokio::test]
    async fn test_default_config_stops_at_threshold() {
        let research = Arc::new(MockResearch::new());
        let use_case = RunReasoningUseCase::new(research.clone());

        let result = use_case
            .execute(ReasoningInput::new(
                "Analyze competitor pricing for wireless earbuds",
                "competitive analysis",
            ))
            .await
            .unwrap();

        // 0.4 -> 0.7 -> 1.0 crosses 0.85 after two follow-ups
        assert_eq!(result.query_count, 3);
        assert!(approx(result.completeness_score, 1.0));
        assert_eq!(research.queries().len(), 3);
        assert!(research.queries()[1].contains("pricing strategy"));
        assert!(research.queries()[2].contains("market positioning"));
    }

    #[tokio::test]
    async fn test_completeness_is_sum_of_contributions() {
        for max in 0..=2 {
            let research = Arc::new(MockResearch::new());
            let use_case = RunReasoningUseCase::new(research);
            let config = unbounded().with_max_iterations(max);

            let result = use_case
                .execute(ReasoningInput::new("Brand health", "competitive").with_config(config))
                .await
                .unwrap();

            let follow_ups = result.paths.len() - 1;
            assert_eq!(follow_ups, max);
            assert!(approx(
                result.completeness_score,
                (0.4 + 0.3 * follow_ups as f64).min(1.0)
            ));
        }
    }

    #[tokio::test]
    async fn test_never_exceeds_max_iterations() {
        let research = Arc::new(MockResearch::new());
        let use_case = RunReasoningUseCase::new(research.clone());
        let config = unbounded().with_max_iterations(1);

        let result = use_case
            .execute(ReasoningInput::new("Q", "competitive analysis").with_config(config))
            .await
            .unwrap();

        assert_eq!(result.paths.len(), 2);
        assert_eq!(research.queries().len(), 2);
    }

    #[tokio::test]
    async fn test_two_aspect_pattern_stops_after_two_follow_ups() {
        let research = Arc::new(MockResearch::new());
        let use_case = RunReasoningUseCase::new(research.clone());

        let result = use_case
            .execute(
                ReasoningInput::new("Plan Nike spring messaging", "content strategy")
                    .with_config(unbounded()),
            )
            .await
            .unwrap();

        assert_eq!(result.paths.len(), 3);
        assert!(result.paths.len() - 1 <= 2);
    }

    #[tokio::test]
    async fn test_paths_are_ordered_with_rationales() {
        let research = Arc::new(MockResearch::new());
        let use_case = RunReasoningUseCase::new(research);

        let result = use_case
            .execute(ReasoningInput::new("Sony earbuds", "competitor").with_config(unbounded()))
            .await
            .unwrap();

        let iterations: Vec<_> = result.paths.iter().map(|p| p.iteration).collect();
        assert_eq!(iterations, vec![0, 1, 2, 3, 4]);
        assert_eq!(result.paths[0].rationale, "Initial research query");
        assert_eq!(result.paths[1].rationale, "Explore pricing strategy");
        assert_eq!(result.paths[0].relevance_score, 1.0);
        assert_eq!(result.paths[1].relevance_score, 0.9);
        assert!(result.synthesized_text.contains("## Primary Research Findings"));
        assert!(result.synthesized_text.contains("## Explore customer sentiment"));
        assert!(result.synthesized_text.contains("Sources:"));
    }

    #[tokio::test]
    async fn test_research_failure_is_a_hard_error() {
        let research = Arc::new(MockResearch::new().failing_on(1));
        let use_case = RunReasoningUseCase::new(research.clone());

        let err = use_case
            .execute(ReasoningInput::new("Q", "competitive"))
            .await
            .unwrap_err();

        assert!(matches!(err, ReasoningError::Research(_)));
        assert_eq!(research.queries().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_checked_between_iterations() {
        let research = Arc::new(MockResearch::new().with_delay(Duration::from_millis(600)));
        let use_case = RunReasoningUseCase::new(research.clone());
        let config = unbounded().with_timeout_ms(1_000);

        let result = use_case
            .execute(ReasoningInput::new("Q", "competitive").with_config(config))
            .await
            .unwrap();

        // 600ms < 1000ms allows one follow-up; 1200ms stops the loop
        assert_eq!(result.paths.len(), 2);
        assert!(result.elapsed_ms >= 1_000);
    }
}
