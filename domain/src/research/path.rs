//! Research paths, reasoning configuration and completeness tracking

use serde::{Deserialize, Serialize};

/// Relevance recorded for the initial research query.
pub const INITIAL_RELEVANCE: f64 = 1.0;
/// Completeness contributed by the initial research query.
pub const INITIAL_CONTRIBUTION: f64 = 0.4;
/// Relevance recorded for each follow-up query.
pub const FOLLOW_UP_RELEVANCE: f64 = 0.9;
/// Completeness contributed by each follow-up query.
pub const FOLLOW_UP_CONTRIBUTION: f64 = 0.3;

/// Upper bound of the completeness score.
const MAX_COMPLETENESS: f64 = 1.0;

/// Output of one call to a web-grounded research service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResponse {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<String>,
}

impl ResearchResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
        }
    }

    pub fn with_citations(mut self, citations: Vec<String>) -> Self {
        self.citations = citations;
        self
    }
}

/// One research query and its findings within a reasoning session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchPath {
    /// 0 for the initial query, then 1, 2, ... for follow-ups
    pub iteration: usize,
    pub query: String,
    /// Why this query was issued
    pub rationale: String,
    pub results: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<String>,
    pub relevance_score: f64,
    pub completeness_contribution: f64,
}

/// Limits for one reasoning session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasoningConfig {
    /// Maximum number of follow-up queries after the initial one
    pub max_iterations: usize,
    /// Stop once the completeness score reaches this value
    pub completeness_threshold: f64,
    /// Loop-wide wall-clock budget, checked between iterations
    pub timeout_ms: u64,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            completeness_threshold: 0.85,
            timeout_ms: 30_000,
        }
    }
}

impl ReasoningConfig {
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_completeness_threshold(mut self, threshold: f64) -> Self {
        self.completeness_threshold = threshold;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Terminal output of one reasoning session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningResult {
    pub synthesized_text: String,
    pub paths: Vec<ResearchPath>,
    pub completeness_score: f64,
    pub query_count: usize,
    pub elapsed_ms: u64,
}

/// Append-only record of a session's research paths.
///
/// Iterations are assigned by the tracker, so they are strictly increasing.
/// The completeness score is the running sum of contributions, clamped to
/// `1.0`.
#[derive(Debug, Clone, Default)]
pub struct CompletenessTracker {
    paths: Vec<ResearchPath>,
    raw_score: f64,
}

impl CompletenessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the initial query as iteration 0.
    pub fn record_initial(&mut self, query: impl Into<String>, response: ResearchResponse) {
        self.push(
            query.into(),
            "Initial research query".to_string(),
            response,
            INITIAL_RELEVANCE,
            INITIAL_CONTRIBUTION,
        );
    }

    /// Record a follow-up query covering `aspect`.
    pub fn record_follow_up(
        &mut self,
        query: impl Into<String>,
        aspect: &str,
        response: ResearchResponse,
    ) {
        self.push(
            query.into(),
            format!("Explore {}", aspect),
            response,
            FOLLOW_UP_RELEVANCE,
            FOLLOW_UP_CONTRIBUTION,
        );
    }

    fn push(
        &mut self,
        query: String,
        rationale: String,
        response: ResearchResponse,
        relevance_score: f64,
        completeness_contribution: f64,
    ) {
        let iteration = self.paths.len();
        self.raw_score += completeness_contribution;
        self.paths.push(ResearchPath {
            iteration,
            query,
            rationale,
            results: response.text,
            citations: response.citations,
            relevance_score,
            completeness_contribution,
        });
    }

    /// Running completeness, never above `1.0`.
    pub fn completeness(&self) -> f64 {
        self.raw_score.min(MAX_COMPLETENESS)
    }

    /// Whether the unclamped sum has passed `1.0`.
    pub fn overshoot(&self) -> bool {
        self.raw_score > MAX_COMPLETENESS
    }

    /// Number of follow-ups recorded so far.
    pub fn follow_up_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    pub fn paths(&self) -> &[ResearchPath] {
        &self.paths
    }

    pub fn queries(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|p| p.query.as_str())
    }

    pub fn into_paths(self) -> Vec<ResearchPath> {
        self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_config() {
        let config = ReasoningConfig::default();
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.completeness_threshold, 0.85);
        assert_eq!(config.timeout_ms, 30_000);
    }

    #[test]
    fn test_tracker_assigns_increasing_iterations() {
        let mut tracker = CompletenessTracker::new();
        tracker.record_initial("q0", ResearchResponse::new("r0"));
        tracker.record_follow_up("q1", "pricing strategy", ResearchResponse::new("r1"));
        tracker.record_follow_up("q2", "market positioning", ResearchResponse::new("r2"));

        let iterations: Vec<_> = tracker.paths().iter().map(|p| p.iteration).collect();
        assert_eq!(iterations, vec![0, 1, 2]);
        assert_eq!(tracker.follow_up_count(), 2);
        assert_eq!(tracker.paths()[1].rationale, "Explore pricing strategy");
    }

    #[test]
    fn test_completeness_accumulates_fixed_contributions() {
        let mut tracker = CompletenessTracker::new();
        tracker.record_initial("q0", ResearchResponse::new("r0"));
        assert!(approx(tracker.completeness(), 0.4));

        tracker.record_follow_up("q1", "a", ResearchResponse::new("r1"));
        assert!(approx(tracker.completeness(), 0.7));
        assert!(!tracker.overshoot());
    }

    #[test]
    fn test_completeness_is_clamped() {
        let mut tracker = CompletenessTracker::new();
        tracker.record_initial("q0", ResearchResponse::new("r0"));
        for i in 0..3 {
            tracker.record_follow_up(format!("q{}", i + 1), "a", ResearchResponse::new("r"));
        }
        assert!(approx(tracker.completeness(), 1.0));
        assert!(tracker.overshoot());
    }

    #[test]
    fn test_citations_are_carried_into_path() {
        let mut tracker = CompletenessTracker::new();
        tracker.record_initial(
            "q0",
            ResearchResponse::new("r0").with_citations(vec!["https://example.com".to_string()]),
        );
        assert_eq!(tracker.paths()[0].citations, vec!["https://example.com"]);
    }
}
