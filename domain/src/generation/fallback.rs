//! Provider fallback chain

use crate::core::provider::Provider;
use crate::core::string::truncate_chars;
use serde::{Deserialize, Serialize};

/// One strategy in a fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "provider", rename_all = "snake_case")]
pub enum FallbackStep {
    /// Call the provider with the full prompt and normal token budget.
    Provider(Provider),
    /// Call the provider again with a truncated prompt and a smaller budget.
    Simplified(Provider),
}

impl FallbackStep {
    pub fn provider(&self) -> Provider {
        match self {
            FallbackStep::Provider(p) | FallbackStep::Simplified(p) => *p,
        }
    }

    pub fn is_simplified(&self) -> bool {
        matches!(self, FallbackStep::Simplified(_))
    }
}

impl std::fmt::Display for FallbackStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackStep::Provider(p) => write!(f, "{}", p),
            FallbackStep::Simplified(p) => write!(f, "{} (simplified)", p),
        }
    }
}

/// Ordered list of strategies tried until one succeeds.
///
/// # Example
///
/// ```
/// use chorus_domain::{FallbackChain, FallbackStep, Provider};
///
/// let chain = FallbackChain::for_primary(Provider::OpenAi);
/// assert_eq!(
///     chain.steps(),
///     &[
///         FallbackStep::Provider(Provider::OpenAi),
///         FallbackStep::Provider(Provider::Anthropic),
///         FallbackStep::Provider(Provider::Gemini),
///         FallbackStep::Simplified(Provider::OpenAi),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain {
    steps: Vec<FallbackStep>,
}

impl FallbackChain {
    /// Primary first, then the remaining providers in canonical order, then a
    /// simplified retry of the primary.
    pub fn for_primary(primary: Provider) -> Self {
        let mut steps = vec![FallbackStep::Provider(primary)];
        steps.extend(primary.others().map(FallbackStep::Provider));
        steps.push(FallbackStep::Simplified(primary));
        Self { steps }
    }

    pub fn steps(&self) -> &[FallbackStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// What actually produced the text returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServedBy {
    Provider(Provider),
    /// Local placeholder; no provider call succeeded.
    Placeholder,
}

impl ServedBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServedBy::Provider(p) => p.as_str(),
            ServedBy::Placeholder => "placeholder",
        }
    }
}

impl std::fmt::Display for ServedBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maximum characters of the user prompt echoed into the placeholder.
const PLACEHOLDER_ECHO_CHARS: usize = 120;

/// Deterministic text returned when every fallback step failed.
///
/// Built locally with no external call so the caller always receives
/// well-formed content.
pub fn placeholder_content(user_prompt: &str) -> String {
    let topic = truncate_chars(user_prompt.trim(), PLACEHOLDER_ECHO_CHARS);
    let topic = if topic.is_empty() { "your request" } else { topic };
    format!(
        "Content generation is temporarily unavailable.\n\n\
         We could not reach any text-generation provider for: \"{}\".\n\
         Please try again in a few minutes, or check the provider credentials \
         and network connectivity.",
        topic
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_for_each_primary_has_four_steps() {
        for primary in Provider::ALL {
            let chain = FallbackChain::for_primary(primary);
            assert_eq!(chain.len(), 4);
            assert_eq!(chain.steps()[0], FallbackStep::Provider(primary));
            assert_eq!(chain.steps()[3], FallbackStep::Simplified(primary));
        }
    }

    #[test]
    fn test_chain_visits_every_provider_once_before_simplified() {
        let chain = FallbackChain::for_primary(Provider::Gemini);
        let providers: Vec<_> = chain.steps()[..3].iter().map(|s| s.provider()).collect();
        assert_eq!(
            providers,
            vec![Provider::Gemini, Provider::Anthropic, Provider::OpenAi]
        );
    }

    #[test]
    fn test_placeholder_is_deterministic() {
        let a = placeholder_content("Write a launch email");
        let b = placeholder_content("Write a launch email");
        assert_eq!(a, b);
        assert!(a.contains("Write a launch email"));
    }

    #[test]
    fn test_placeholder_for_empty_prompt() {
        assert!(placeholder_content("   ").contains("your request"));
    }

    #[test]
    fn test_served_by_names() {
        assert_eq!(ServedBy::Provider(Provider::OpenAi).as_str(), "openai");
        assert_eq!(ServedBy::Placeholder.to_string(), "placeholder");
        assert_eq!(
            FallbackStep::Simplified(Provider::Anthropic).to_string(),
            "anthropic (simplified)"
        );
    }
}
