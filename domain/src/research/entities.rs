//! Named-entity heuristics for phrasing follow-up research queries

/// Brand names recognized directly, in display form.
const KNOWN_BRANDS: &[&str] = &[
    "Adidas",
    "Amazon",
    "Apple",
    "Bose",
    "Coca-Cola",
    "Google",
    "Jabra",
    "Meta",
    "Microsoft",
    "Netflix",
    "Nike",
    "Pepsi",
    "Samsung",
    "Sennheiser",
    "Sony",
    "Spotify",
    "Starbucks",
    "Tesla",
];

/// Capitalized words that are not entities on their own.
const STOP_WORDS: &[&str] = &[
    "A", "An", "And", "Analyze", "Compare", "Create", "Describe", "Explain", "For", "How", "I",
    "In", "Is", "Of", "On", "Our", "The", "This", "We", "What", "When", "Where", "Which", "Who",
    "Why", "Write",
];

/// Used when the query names no recognizable entity.
pub const ENTITY_PLACEHOLDER: &str = "the brand";

/// Maximum capitalized words kept by the fallback heuristic.
const MAX_CAPITALIZED: usize = 3;

/// Extract the entities a query is about, joined for use in a sentence.
///
/// Rules, first that yields anything wins:
/// 1. known brand names (case-insensitive, whole word)
/// 2. capitalized words, skipping the sentence-initial word and stop words
/// 3. [`ENTITY_PLACEHOLDER`]
pub fn extract_entities(query: &str) -> String {
    let words: Vec<&str> = query
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '-'))
        .filter(|w| !w.is_empty())
        .collect();

    let brands: Vec<&str> = KNOWN_BRANDS
        .iter()
        .filter(|brand| words.iter().any(|w| w.eq_ignore_ascii_case(brand)))
        .copied()
        .collect();
    if !brands.is_empty() {
        return join_entities(&brands);
    }

    let mut capitalized: Vec<&str> = Vec::new();
    for word in words.iter().skip(1) {
        let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
        if starts_upper && !STOP_WORDS.contains(word) && !capitalized.contains(word) {
            capitalized.push(*word);
        }
        if capitalized.len() == MAX_CAPITALIZED {
            break;
        }
    }
    if !capitalized.is_empty() {
        return join_entities(&capitalized);
    }

    ENTITY_PLACEHOLDER.to_string()
}

fn join_entities(entities: &[&str]) -> String {
    match entities {
        [] => String::new(),
        [one] => (*one).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
