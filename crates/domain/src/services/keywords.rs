//! Keyword extraction for submitted feedback text.

use std::collections::HashSet;

use lazy_static::lazy_static;

/// Number of keywords returned.
const TOP_KEYWORDS: usize = 10;

/// Tokens this short carry no signal.
const MIN_TOKEN_LENGTH: usize = 4;

lazy_static! {
    static ref STOP_WORDS: HashSet<&'static str> = [
        "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has",
        "had", "do", "does", "did", "will", "would", "could", "should", "may", "might", "must",
        "shall", "can", "need", "dare", "ought", "used", "to", "of", "in", "for", "on", "with",
        "at", "by", "from", "up", "about", "into", "over", "after", "beneath", "under", "above",
        "and", "but", "or", "nor", "so", "yet", "both", "either", "neither", "not", "only",
        "own", "same", "than", "too", "very", "just", "that", "this", "these", "those", "i",
        "me", "my", "we", "our", "you", "your", "he", "him", "his", "she", "her", "it", "its",
        "they", "them", "their", "what", "which", "who", "whom", "when", "where", "why", "how",
    ]
    .into_iter()
    .collect();
}

/// Extracts the top 10 keywords from `text` by descending frequency.
///
/// Lowercases, strips punctuation, tokenizes on whitespace, and drops
/// stop-words and tokens shorter than four characters. Ties break in
/// first-seen order, which keeps the output deterministic.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || c == '_' {
                c
            } else {
                ' '
            }
        })
        .collect();

    // Counts kept in first-seen order so the later stable sort preserves
    // insertion order among equal frequencies.
    let mut counts: Vec<(String, usize)> = Vec::new();
    for token in cleaned.split_whitespace() {
        if token.len() < MIN_TOKEN_LENGTH || STOP_WORDS.contains(token) {
            continue;
        }
        match counts.iter_mut().find(|(word, _)| word == token) {
            Some((_, count)) => *count += 1,
            None => counts.push((token.to_string(), 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(TOP_KEYWORDS)
        .map(|(word, _)| word)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_extraction() {
        let keywords =
            extract_keywords("The parking lot lighting is broken. Parking feels unsafe at night.");
        assert_eq!(keywords[0], "parking"); // appears twice
        assert!(keywords.contains(&"lighting".to_string()));
        assert!(keywords.contains(&"unsafe".to_string()));
    }

    #[test]
    fn test_stop_words_dropped() {
        let keywords = extract_keywords("this is the that which were being have with from");
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_short_tokens_dropped() {
        let keywords = extract_keywords("app bug fix the lab cat ran off");
        // All remaining tokens are three characters or fewer.
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_punctuation_stripped() {
        let keywords = extract_keywords("broken!!! broken? (broken) printer...");
        assert_eq!(keywords, vec!["broken".to_string(), "printer".to_string()]);
    }

    #[test]
    fn test_lowercasing() {
        let keywords = extract_keywords("Cafeteria CAFETERIA cafeteria menu");
        assert_eq!(keywords[0], "cafeteria");
        assert_eq!(keywords.len(), 2);
    }

    #[test]
    fn test_top_ten_cap() {
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima";
        let keywords = extract_keywords(text);
        assert_eq!(keywords.len(), 10);
    }

    #[test]
    fn test_tie_break_first_seen_order() {
        // zebra/apple tie at two, mango/banana tie at one; each tie keeps
        // first-seen order.
        let keywords = extract_keywords("zebra apple mango zebra apple banana");
        assert_eq!(
            keywords,
            vec![
                "zebra".to_string(),
                "apple".to_string(),
                "mango".to_string(),
                "banana".to_string()
            ]
        );
    }

    #[test]
    fn test_frequency_wins_over_position() {
        let keywords = extract_keywords("first second second second");
        assert_eq!(keywords[0], "second");
        assert_eq!(keywords[1], "first");
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   \n\t  ").is_empty());
    }
}
