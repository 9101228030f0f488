//! Fallback policy: time and token budgets for the fallback chain.

use crate::ports::provider_gateway::DEFAULT_MAX_TOKENS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Budgets applied to each step of a fallback chain.
///
/// The primary step gets a shorter timeout than later steps, and the final
/// simplified step retries with a truncated prompt and a smaller token budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackPolicy {
    /// Timeout for the first step of the chain.
    pub primary_timeout: Duration,
    /// Timeout for every later step.
    pub fallback_timeout: Duration,
    /// Output budget for full-prompt steps.
    pub max_tokens: u32,
    /// Characters of the user prompt kept by the simplified step.
    pub simplified_prompt_chars: usize,
    /// Output budget for the simplified step.
    pub simplified_max_tokens: u32,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            primary_timeout: Duration::from_secs(15),
            fallback_timeout: Duration::from_secs(30),
            max_tokens: DEFAULT_MAX_TOKENS,
            simplified_prompt_chars: 2000,
            simplified_max_tokens: 1000,
        }
    }
}

impl FallbackPolicy {
    // ==================== Builder Methods ====================

    pub fn with_primary_timeout(mut self, timeout: Duration) -> Self {
        self.primary_timeout = timeout;
        self
    }

    pub fn with_fallback_timeout(mut self, timeout: Duration) -> Self {
        self.fallback_timeout = timeout;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_simplified_prompt_chars(mut self, chars: usize) -> Self {
        self.simplified_prompt_chars = chars;
        self
    }

    pub fn with_simplified_max_tokens(mut self, max_tokens: u32) -> Self {
        self.simplified_max_tokens = max_tokens;
        self
    }

    // ==================== Queries ====================

    /// Timeout for the step at `index` in the chain.
    pub fn timeout_for(&self, index: usize) -> Duration {
        if index == 0 {
            self.primary_timeout
        } else {
            self.fallback_timeout
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = FallbackPolicy::default();
        assert_eq!(policy.primary_timeout, Duration::from_secs(15));
        assert_eq!(policy.fallback_timeout, Duration::from_secs(30));
        assert_eq!(policy.max_tokens, 4096);
        assert_eq!(policy.simplified_prompt_chars, 2000);
        assert_eq!(policy.simplified_max_tokens, 1000);
    }

    #[test]
    fn test_timeout_for_step() {
        let policy = FallbackPolicy::default()
            .with_primary_timeout(Duration::from_secs(1))
            .with_fallback_timeout(Duration::from_secs(2));
        assert_eq!(policy.timeout_for(0), Duration::from_secs(1));
        assert_eq!(policy.timeout_for(1), Duration::from_secs(2));
        assert_eq!(policy.timeout_for(3), Duration::from_secs(2));
    }
}
