//! Quality and agreement heuristics for consensus responses

use crate::core::string::{keywords, word_count};
use std::collections::HashSet;

/// Score every response starts from.
const BASE_SCORE: f64 = 0.5;
/// Bonus for a response whose length is in the useful range.
const LENGTH_BONUS: f64 = 0.2;
/// Maximum bonus for covering the query's keywords.
const KEYWORD_BONUS: f64 = 0.3;
/// Inclusive word-count range that earns [`LENGTH_BONUS`].
const USEFUL_WORD_RANGE: std::ops::RangeInclusive<usize> = 50..=1000;

/// Heuristic quality of `response` as an answer to `query`, in `[0, 1]`.
///
/// `0.5` base, `+0.2` when the word count is within `[50, 1000]`, plus up to
/// `0.3` proportional to the share of query keywords (words longer than three
/// characters) that literally appear in the response.
///
/// # Example
///
/// ```
/// use chorus_domain::consensus::quality_score;
///
/// // Too short and no shared keywords: base score only.
/// let score = quality_score("wireless earbuds pricing", "Sure, here is an answer for you today.");
/// assert_eq!(score, 0.5);
/// ```
pub fn quality_score(query: &str, response: &str) -> f64 {
    let mut score = BASE_SCORE;

    if USEFUL_WORD_RANGE.contains(&word_count(response)) {
        score += LENGTH_BONUS;
    }

    let query_keywords: HashSet<String> = keywords(query).into_iter().collect();
    if !query_keywords.is_empty() {
        let lower = response.to_lowercase();
        let matched = query_keywords
            .iter()
            .filter(|k| lower.contains(k.as_str()))
            .count();
        score += KEYWORD_BONUS * matched as f64 / query_keywords.len() as f64;
    }

    score.clamp(0.0, 1.0)
}

/// Keyword overlap of two texts in `[0, 1]`.
///
/// Overlap coefficient of the keyword sets: shared keywords divided by the
/// size of the smaller set. Returns `0.0` when either text has no keywords.
pub fn keyword_overlap(a: &str, b: &str) -> f64 {
    let a: HashSet<String> = keywords(a).into_iter().collect();
    let b: HashSet<String> = keywords(b).into_iter().collect();
    let smaller = a.len().min(b.len());
    if smaller == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / smaller as f64
}

/// Mean pairwise keyword overlap across `texts`.
///
/// A single text agrees with itself (`1.0`); no texts yield `0.0`.
pub fn consensus_score<S: AsRef<str>>(texts: &[S]) -> f64 {
    match texts.len() {
        0 => 0.0,
        1 => 1.0,
        n => {
            let mut total = 0.0;
            let mut pairs = 0usize;
            for i in 0..n {
                for j in (i + 1)..n {
                    total += keyword_overlap(texts[i].as_ref(), texts[j].as_ref());
                    pairs += 1;
                }
            }
            total / pairs as f64
        }
    }
}

/// Whether at least one query keyword appears in every text.
///
/// Uses the same literal, lowercased containment as [`quality_score`]. A
/// query without keywords, or no texts at all, is never on topic.
pub fn shares_query_keyword<S: AsRef<str>>(query: &str, texts: &[S]) -> bool {
    if texts.is_empty() {
        return false;
    }
    let lowered: Vec<String> = texts.iter().map(|t| t.as_ref().to_lowercase()).collect();
    keywords(query)
        .iter()
        .any(|k| lowered.iter().all(|t| t.contains(k.as_str())))
}
