//! Router: query + context + overrides → route decision

use super::rule::{DEFAULT_RULE, ROUTING_RULES, RouteCategory};
use crate::core::model::Model;
use crate::core::provider::Provider;
use serde::{Deserialize, Serialize};

/// Manual choices that take precedence over keyword classification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteOverrides {
    pub provider: Option<Provider>,
    pub model: Option<Model>,
    pub force_reasoning: bool,
}

impl RouteOverrides {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_force_reasoning(mut self, force: bool) -> Self {
        self.force_reasoning = force;
        self
    }

    /// Provider pinned by the caller, directly or through a model of a known family.
    pub fn manual_provider(&self) -> Option<Provider> {
        self.provider
            .or_else(|| self.model.as_ref().and_then(Model::provider))
    }
}

/// Where a request goes and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDecision {
    pub provider: Provider,
    pub model: Model,
    pub use_reasoning: bool,
    pub category: RouteCategory,
    /// Human-readable explanation of the rule that fired
    pub rationale: String,
}

/// Stateless request classifier.
///
/// Rules, first match wins:
/// 1. a manual provider (or a manual model of a known family) wins outright
/// 2. `force_reasoning` forces reasoning on
/// 3. the ordered keyword table in [`ROUTING_RULES`]
/// 4. the default route: Anthropic with reasoning
///
/// # Example
///
/// ```
/// use chorus_domain::{Provider, RouteOverrides, Router};
///
/// let decision = Router::classify(
///     "Write a playful tagline",
///     "",
///     &RouteOverrides::none().with_provider(Provider::Gemini),
/// );
/// assert_eq!(decision.provider, Provider::Gemini);
/// assert!(!decision.use_reasoning);
/// ```
pub struct Router;

impl Router {
    pub fn classify(query: &str, context: &str, overrides: &RouteOverrides) -> RouteDecision {
        if let Some(provider) = overrides.manual_provider() {
            let model = overrides
                .model
                .clone()
                .unwrap_or_else(|| provider.default_model());
            return RouteDecision {
                provider,
                model,
                use_reasoning: overrides.force_reasoning,
                category: RouteCategory::General,
                rationale: format!("manual override: {}", provider),
            };
        }

        let haystack = format!("{} {}", query, context).to_lowercase();
        let (rule, rationale) = ROUTING_RULES
            .iter()
            .find_map(|rule| {
                rule.matched_keyword(&haystack).map(|keyword| {
                    (
                        rule,
                        format!("{} request (matched '{}')", rule.category, keyword),
                    )
                })
            })
            .unwrap_or((&DEFAULT_RULE, "no rule matched, default route".to_string()));

        let model = overrides
            .model
            .clone()
            .unwrap_or_else(|| rule.provider.default_model());

        RouteDecision {
            provider: rule.provider,
            model,
            use_reasoning: rule.use_reasoning || overrides.force_reasoning,
            category: rule.category,
            rationale,
        }
    }
}
