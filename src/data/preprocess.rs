//! Review preprocessing: text cleanup and derived-field computation.

use crate::data::Review;
use crate::sentiment::SentimentScorer;
use crate::text::TextProcessor;
use log::{debug, info};
use regex::Regex;
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").unwrap());
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());
static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// Frequent contraction typos normalized before tokenization.
const SPELLING_FIXES: &[(&str, &str)] = &[
    ("dont", "don't"),
    ("cant", "can't"),
    ("wont", "won't"),
    ("isnt", "isn't"),
    ("doesnt", "doesn't"),
    ("didnt", "didn't"),
    ("wasnt", "wasn't"),
];

const MAX_DERIVED_KEYWORDS: usize = 5;

/// Fill every review's derived fields in place and return the corpus.
pub fn preprocess_reviews(mut reviews: Vec<Review>) -> Vec<Review> {
    info!("Preprocessing {} reviews...", reviews.len());
    let processor = TextProcessor::new();
    let scorer = SentimentScorer::new();

    for review in &mut reviews {
        let combined = format!("{} {}", review.title, review.body);
        review.text = clean_text(&combined);
        review.char_length = review.text.chars().count();
        review.word_count = review.text.split_whitespace().count();
        review.sentiment_score = scorer.score(&review.text).polarity;
        review.keywords = processor.top_keywords(&review.text, MAX_DERIVED_KEYWORDS);
    }

    debug!("Preprocessing complete");
    reviews
}

/// Lowercase, fix common contraction typos, strip URLs and e-mail
/// addresses, keep sentence punctuation, normalize whitespace.
pub fn clean_text(text: &str) -> String {
    let mut text = text.to_lowercase();

    for (wrong, correct) in SPELLING_FIXES {
        // Whole-word replacement only.
        let pattern = format!(r"\b{}\b", wrong);
        if let Ok(re) = Regex::new(&pattern) {
            text = re.replace_all(&text, *correct).into_owned();
        }
    }

    let text = URL_REGEX.replace_all(&text, " ");
    let text = EMAIL_REGEX.replace_all(&text, " ");

    let text: String = text
        .chars()
        .filter(|c| {
            c.is_alphanumeric()
                || c.is_whitespace()
                || matches!(c, '.' | '!' | '?' | ',' | '\'' | '-')
        })
        .collect();

    WHITESPACE_REGEX.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Review;

    #[test]
    fn test_clean_text() {
        let cleaned = clean_text("GREAT vacuum!! see https://example.com or me@ex.com :)");
        assert_eq!(cleaned, "great vacuum!! see or");
    }

    #[test]
    fn test_spelling_fixes_whole_words_only() {
        assert_eq!(clean_text("I dont mind"), "i don't mind");
        // "dont" inside a longer word stays untouched
        assert_eq!(clean_text("montdont ok"), "montdont ok");
    }

    #[test]
    fn test_derived_fields() {
        let reviews = vec![Review::new(
            "alice",
            "Great vacuum",
            "Really easy to use, love it",
            None,
        )];
        let processed = preprocess_reviews(reviews);
        let review = &processed[0];

        assert_eq!(review.text, "great vacuum really easy to use, love it");
        assert_eq!(review.word_count, 8);
        assert!(review.sentiment_score > 0.0);
        assert!(review.keywords.contains(&"easy".to_string()));
    }
}
