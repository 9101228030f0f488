//! Consensus result entity

use super::confidence::ConfidenceLevel;
use super::response::ModelResponse;
use crate::core::provider::Provider;
use serde::{Deserialize, Serialize};

/// Outcome of one consensus round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    /// Final answer: synthesis, a lone survivor's text, or an explanation
    pub synthesized_text: String,
    /// Responses that passed the quality filter, in enabled-provider order
    pub responses: Vec<ModelResponse>,
    pub consensus_score: f64,
    pub confidence_level: ConfidenceLevel,
    pub elapsed_ms: u64,
    /// Set only when a synthesis call succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesis_provider: Option<Provider>,
    /// Explains degraded outcomes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConsensusResult {
    pub fn survivor_count(&self) -> usize {
        self.responses.len()
    }

    pub fn is_degraded(&self) -> bool {
        self.message.is_some()
    }
}
