//! Confidence level derived from agreement between providers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Agreement score at or above which two or more survivors count as `High`.
pub const HIGH_CONFIDENCE_SCORE: f64 = 0.7;

/// How much a consensus result can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// Derive confidence from the agreement score and the number of surviving responses.
    ///
    /// A single survivor has nothing to agree with and is capped at `Medium`.
    /// Two or more survivors below [`HIGH_CONFIDENCE_SCORE`] still reach
    /// `Medium` when they all address the query (`on_topic`), since
    /// independently worded answers share few keywords.
    pub fn from_score(score: f64, survivors: usize, on_topic: bool) -> Self {
        match survivors {
            0 => ConfidenceLevel::Low,
            1 => ConfidenceLevel::Medium,
            _ if score >= HIGH_CONFIDENCE_SCORE => ConfidenceLevel::High,
            _ if on_topic => ConfidenceLevel::Medium,
            _ => ConfidenceLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
