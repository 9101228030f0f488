//! Ordered keyword table for automatic routing

use crate::core::provider::Provider;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad kind of work a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteCategory {
    /// Research and competitive analysis
    Research,
    /// Creative writing and content generation
    Creative,
    /// Technical or analytical work
    Technical,
    /// Nothing matched
    General,
}

impl RouteCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteCategory::Research => "research",
            RouteCategory::Creative => "creative",
            RouteCategory::Technical => "technical",
            RouteCategory::General => "general",
        }
    }
}

impl fmt::Display for RouteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the routing table
#[derive(Debug, Clone, Copy)]
pub struct RoutingRule {
    pub category: RouteCategory,
    pub keywords: &'static [&'static str],
    pub provider: Provider,
    pub use_reasoning: bool,
}

impl RoutingRule {
    /// First keyword contained in `haystack` (already lowercased).
    pub fn matched_keyword(&self, haystack: &str) -> Option<&'static str> {
        self.keywords.iter().copied().find(|k| haystack.contains(k))
    }
}

/// Rules in priority order; the first match wins.
pub const ROUTING_RULES: &[RoutingRule] = &[
    RoutingRule {
        category: RouteCategory::Research,
        keywords: &[
            "research",
            "competitive",
            "competitor",
            "competition",
            "market share",
            "landscape",
            "benchmark",
        ],
        provider: Provider::Anthropic,
        use_reasoning: true,
    },
    RoutingRule {
        category: RouteCategory::Creative,
        keywords: &[
            "creative",
            "content",
            "write",
            "copywriting",
            "slogan",
            "tagline",
            "headline",
            "story",
            "blog",
        ],
        provider: Provider::OpenAi,
        use_reasoning: false,
    },
    RoutingRule {
        category: RouteCategory::Technical,
        keywords: &[
            "technical",
            "analytical",
            "analysis",
            "calculate",
            "algorithm",
            "code",
            "data",
            "statistics",
        ],
        provider: Provider::Gemini,
        use_reasoning: false,
    },
];

/// Route taken when no rule matches.
pub const DEFAULT_RULE: RoutingRule = RoutingRule {
    category: RouteCategory::General,
    keywords: &[],
    provider: Provider::Anthropic,
    use_reasoning: true,
};
