//! Progress notification port
//!
//! Defines the interface for reporting progress while research and consensus run.

use chorus_domain::{FallbackStep, Provider};
use std::fmt;

/// Stages of a consensus round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsensusPhase {
    /// Research grounding before providers are queried
    Grounding,
    /// Concurrent provider queries
    Query,
    /// Reconciling surviving responses
    Synthesis,
}

impl ConsensusPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusPhase::Grounding => "Grounding",
            ConsensusPhase::Query => "Query",
            ConsensusPhase::Synthesis => "Synthesis",
        }
    }
}

impl fmt::Display for ConsensusPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback for progress updates
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console spinners, logs, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: ConsensusPhase, total_tasks: usize);

    /// Called when a task completes within a phase
    fn on_task_complete(&self, phase: ConsensusPhase, provider: Provider, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: ConsensusPhase);

    /// Called before each research query; iteration 0 is the initial query.
    fn on_research_query(&self, _iteration: usize, _query: &str) {}

    /// Called after each fallback step.
    fn on_fallback_attempt(&self, _step: &FallbackStep, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: ConsensusPhase, _total_tasks: usize) {}
    fn on_task_complete(&self, _phase: ConsensusPhase, _provider: Provider, _success: bool) {}
    fn on_phase_complete(&self, _phase: ConsensusPhase) {}
}
