//! String utilities for the domain layer.

/// Truncate a string to at most `max_chars` characters.
///
/// Counts `char`s rather than bytes so multi-byte text is never split inside
/// a code point. The cut may land mid-word.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Split text into lowercase words longer than three characters.
///
/// Leading and trailing punctuation is stripped from each word. This is the
/// keyword notion shared by quality scoring and consensus overlap.
pub fn keywords(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| w.chars().count() > 3)
        .collect()
}

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello world", 8), "hello wo");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("日本語テスト", 3), "日本語");
        assert_eq!(truncate_chars("👋🌍🎉", 2), "👋🌍");
    }

    #[test]
    fn test_keywords_strip_punctuation_and_short_words() {
        let words = keywords("Analyze competitor pricing, for wireless earbuds!");
        assert_eq!(
            words,
            vec!["analyze", "competitor", "pricing", "wireless", "earbuds"]
        );
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("  one two\nthree  "), 3);
        assert_eq!(word_count(""), 0);
    }
}
