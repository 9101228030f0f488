//! Research patterns: context classification and follow-up aspects

use serde::{Deserialize, Serialize};

/// Domain pattern a research session is classified into.
///
/// Each pattern carries an ordered list of follow-up aspects. The reasoning
/// loop covers them greedily, first uncovered aspect first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchPattern {
    CompetitiveAnalysis,
    CampaignPerformance,
    AudienceInsights,
    ContentStrategy,
    General,
}

/// Classification table: first pattern with a matching keyword wins.
const CLASSIFICATION_RULES: &[(ResearchPattern, &[&str])] = &[
    (
        ResearchPattern::CompetitiveAnalysis,
        &[
            "competitor",
            "competitive",
            "competition",
            "pricing",
            "market share",
            "rival",
        ],
    ),
    (
        ResearchPattern::CampaignPerformance,
        &[
            "campaign",
            "performance",
            "roi",
            "return on investment",
            "conversion",
            "metrics",
            "kpi",
        ],
    ),
    (
        ResearchPattern::AudienceInsights,
        &[
            "audience",
            "demographic",
            "persona",
            "customer segment",
            "target market",
        ],
    ),
    (
        ResearchPattern::ContentStrategy,
        &["content", "creative", "messaging", "copy", "brand voice"],
    ),
];

impl ResearchPattern {
    /// Classify a free-form research context type.
    ///
    /// Matching is case-insensitive and anchored at a word start, so `roi`
    /// matches "ROI" but not "heroic" while "competitor" still matches
    /// "competitors". Anything unmatched is [`ResearchPattern::General`].
    pub fn classify(context_type: &str) -> Self {
        let lower = context_type.to_lowercase();
        CLASSIFICATION_RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| matches_word_start(&lower, k)))
            .map(|(pattern, _)| *pattern)
            .unwrap_or(ResearchPattern::General)
    }

    /// Follow-up aspects in priority order.
    pub fn aspects(&self) -> &'static [&'static str] {
        match self {
            ResearchPattern::CompetitiveAnalysis => &[
                "pricing strategy",
                "market positioning",
                "customer sentiment",
                "product differentiation",
            ],
            ResearchPattern::CampaignPerformance => &[
                "performance metrics",
                "industry benchmarks",
                "channel effectiveness",
            ],
            ResearchPattern::AudienceInsights => &[
                "audience demographics",
                "behavioral patterns",
                "engagement preferences",
            ],
            ResearchPattern::ContentStrategy => &["content trends", "execution detail"],
            ResearchPattern::General => &[
                "key facts",
                "recent developments",
                "expert perspectives",
            ],
        }
    }

    /// First aspect not yet referenced by any prior query.
    ///
    /// An aspect counts as referenced when it appears (case-insensitively) as
    /// a substring of a prior query.
    pub fn next_uncovered_aspect<'a, I>(&self, prior_queries: I) -> Option<&'static str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let prior: Vec<String> = prior_queries.into_iter().map(str::to_lowercase).collect();
        self.aspects()
            .iter()
            .find(|aspect| !prior.iter().any(|q| q.contains(*aspect)))
            .copied()
    }

    /// Phrase a follow-up query for `aspect` about `entities`.
    pub fn follow_up_query(&self, entities: &str, aspect: &str) -> String {
        match self {
            ResearchPattern::CompetitiveAnalysis => format!(
                "How does {} compare with its main competitors on {}? Include recent data.",
                entities, aspect
            ),
            ResearchPattern::CampaignPerformance => format!(
                "What {} are available for {} marketing campaigns, with concrete figures?",
                aspect, entities
            ),
            ResearchPattern::AudienceInsights => format!(
                "What does current research say about the {} of {} customers?",
                aspect, entities
            ),
            ResearchPattern::ContentStrategy => format!(
                "What {} should {} consider for upcoming content, with examples?",
                aspect, entities
            ),
            ResearchPattern::General => {
                format!("What are the {} about {}?", aspect, entities)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchPattern::CompetitiveAnalysis => "competitive_analysis",
            ResearchPattern::CampaignPerformance => "campaign_performance",
            ResearchPattern::AudienceInsights => "audience_insights",
            ResearchPattern::ContentStrategy => "content_strategy",
            ResearchPattern::General => "general",
        }
    }
}

fn matches_word_start(text: &str, keyword: &str) -> bool {
    text.match_indices(keyword).any(|(start, _)| {
        text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

impl std::fmt::Display for ResearchPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_keyword() {
        assert_eq!(
            ResearchPattern::classify("Competitive landscape review"),
            ResearchPattern::CompetitiveAnalysis
        );
        assert_eq!(
            ResearchPattern::classify("Q3 campaign results"),
            ResearchPattern::CampaignPerformance
        );
        assert_eq!(
            ResearchPattern::classify("persona deep dive"),
            ResearchPattern::AudienceInsights
        );
        assert_eq!(
            ResearchPattern::classify("brand voice guide"),
            ResearchPattern::ContentStrategy
        );
        assert_eq!(ResearchPattern::classify("weather"), ResearchPattern::General);
    }

    #[test]
    fn test_classify_roi_at_word_start() {
        assert_eq!(
            ResearchPattern::classify("Q4 ROI review"),
            ResearchPattern::CampaignPerformance
        );
        assert_eq!(
            ResearchPattern::classify("return on investment"),
            ResearchPattern::CampaignPerformance
        );
        assert_eq!(ResearchPattern::classify("heroic android"), ResearchPattern::General);
        assert_eq!(
            ResearchPattern::classify("top competitors"),
            ResearchPattern::CompetitiveAnalysis
        );
    }

    #[test]
    fn test_classify_first_rule_wins() {
        // "pricing" (competitive) is checked before "campaign" (performance)
        assert_eq!(
            ResearchPattern::classify("campaign pricing"),
            ResearchPattern::CompetitiveAnalysis
        );
    }

    #[test]
    fn test_next_uncovered_aspect_skips_referenced() {
        let pattern = ResearchPattern::CompetitiveAnalysis;
        let prior = ["What is the Pricing Strategy of Sony?"];
        assert_eq!(
            pattern.next_uncovered_aspect(prior),
            Some("market positioning")
        );
    }

    #[test]
    fn test_next_uncovered_aspect_none_when_all_covered() {
        let pattern = ResearchPattern::ContentStrategy;
        let prior = ["content trends", "execution detail"];
        assert_eq!(pattern.next_uncovered_aspect(prior), None);
    }

    #[test]
    fn test_follow_up_query_contains_aspect_verbatim() {
        for pattern in [
            ResearchPattern::CompetitiveAnalysis,
            ResearchPattern::CampaignPerformance,
            ResearchPattern::AudienceInsights,
            ResearchPattern::ContentStrategy,
            ResearchPattern::General,
        ] {
            for aspect in pattern.aspects() {
                let query = pattern.follow_up_query("Acme", aspect);
                assert!(query.contains(aspect), "{} missing from {}", aspect, query);
                assert!(query.contains("Acme"));
            }
        }
    }
}
