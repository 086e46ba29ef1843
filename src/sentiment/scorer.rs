use crate::sentiment::lexicon::ReviewLexicon;
use crate::text::Tokenizer;
use serde::{Deserialize, Serialize};

/// Five-level sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
}

impl SentimentLabel {
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity >= 0.6 {
            SentimentLabel::VeryPositive
        } else if polarity >= 0.1 {
            SentimentLabel::Positive
        } else if polarity <= -0.6 {
            SentimentLabel::VeryNegative
        } else if polarity <= -0.1 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::VeryPositive => "very positive",
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
            SentimentLabel::VeryNegative => "very negative",
        }
    }
}

/// Scored text: polarity in [-1, 1] plus label and confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentScore {
    pub polarity: f64,
    pub label: SentimentLabel,
    pub confidence: f64,
}

/// Lexicon-based polarity scorer with a negation window.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    tokenizer: Tokenizer,
    lexicon: ReviewLexicon,
    negation_window: usize,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            lexicon: ReviewLexicon::new(),
            negation_window: 3,
        }
    }

    pub fn with_lexicon(mut self, lexicon: ReviewLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn score(&self, text: &str) -> SentimentScore {
        let tokens = self.tokenizer.tokenize(text);

        let mut total = 0.0;
        let mut scored_words = 0usize;
        let mut current_modifier = 1.0;
        let mut negation_active = false;
        let mut words_since_negation = 0usize;

        for token in &tokens {
            if self.lexicon.is_negation(token) {
                negation_active = true;
                words_since_negation = 0;
                continue;
            }

            if let Some(modifier) = self.lexicon.modifier(token) {
                current_modifier = modifier;
                continue;
            }

            if let Some(base) = self.lexicon.score(token) {
                let mut value = base * current_modifier;
                if negation_active && words_since_negation < self.negation_window {
                    // Inverted with damping: "not great" is mildly negative,
                    // not the mirror image of "great".
                    value = -value * 0.8;
                }
                total += value;
                scored_words += 1;
                current_modifier = 1.0;
            }

            if negation_active {
                words_since_negation += 1;
                if words_since_negation >= self.negation_window {
                    negation_active = false;
                }
            }
        }

        let polarity = if scored_words > 0 {
            (total / scored_words as f64).clamp(-1.0, 1.0)
        } else {
            0.0
        };

        SentimentScore {
            polarity,
            label: SentimentLabel::from_polarity(polarity),
            confidence: confidence(scored_words, tokens.len()),
        }
    }

    pub fn score_batch(&self, texts: &[String]) -> Vec<SentimentScore> {
        texts.iter().map(|t| self.score(t)).collect()
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn confidence(scored_words: usize, total_words: usize) -> f64 {
    if total_words == 0 {
        return 0.0;
    }
    let ratio = scored_words as f64 / total_words as f64;
    let word_bonus = (scored_words as f64).min(5.0) / 5.0;
    (ratio * 0.5 + word_bonus * 0.5).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        let scorer = SentimentScorer::new();
        let result = scorer.score("Excellent vacuum, absolutely love it");
        assert_eq!(result.label, SentimentLabel::VeryPositive);
        assert!(result.polarity > 0.5);
    }

    #[test]
    fn test_negative_text() {
        let scorer = SentimentScorer::new();
        let result = scorer.score("Terrible quality, broke after a week, total waste");
        assert!(result.polarity < -0.5);
    }

    #[test]
    fn test_neutral_text() {
        let scorer = SentimentScorer::new();
        let result = scorer.score("arrived on tuesday in a cardboard box");
        assert_eq!(result.polarity, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let scorer = SentimentScorer::new();
        let plain = scorer.score("this is great");
        let negated = scorer.score("this is not great");
        assert!(plain.polarity > 0.0);
        assert!(negated.polarity < 0.0);
    }

    #[test]
    fn test_modifier_intensifies() {
        let scorer = SentimentScorer::new();
        let plain = scorer.score("good vacuum");
        let intensified = scorer.score("very good vacuum");
        assert!(intensified.polarity > plain.polarity);
    }

    #[test]
    fn test_label_boundaries() {
        assert_eq!(SentimentLabel::from_polarity(0.6), SentimentLabel::VeryPositive);
        assert_eq!(SentimentLabel::from_polarity(0.1), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_polarity(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(-0.1), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_polarity(-0.6), SentimentLabel::VeryNegative);
    }
}
