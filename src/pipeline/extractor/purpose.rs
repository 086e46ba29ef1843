//! Usage-purpose extraction: what users are trying to accomplish.
//!
//! Purpose vocabulary splits into action verbs and outcome nouns per
//! purpose, so the taxonomy's sub-level is (action, outcome).

use crate::analysis::{AnalysisResult, CategoryKey, Dimension, Taxonomy};
use crate::pipeline::extractor::{CategoryExtractor, classify_phrase, trigger_positions};
use crate::text::ParsedSentence;

pub struct PurposeExtractor {
    taxonomy: Taxonomy,
}

impl PurposeExtractor {
    pub fn new() -> Self {
        let taxonomy = Taxonomy::new(&[
            (
                "maintenance",
                &[
                    ("action", &["maintain", "keep", "preserve", "protect"][..]),
                    ("outcome", &["maintenance", "upkeep", "care", "condition"][..]),
                ][..],
            ),
            (
                "improvement",
                &[
                    ("action", &["improve", "enhance", "upgrade", "optimize", "boost"][..]),
                    (
                        "outcome",
                        &["improvement", "enhancement", "performance", "efficiency"][..],
                    ),
                ][..],
            ),
            (
                "problem-solving",
                &[
                    ("action", &["solve", "fix", "resolve", "address", "handle"][..]),
                    (
                        "outcome",
                        &["problem", "issue", "challenge", "difficulty", "concern"][..],
                    ),
                ][..],
            ),
            (
                "convenience",
                &[
                    ("action", &["save", "simplify", "facilitate", "help", "assist"][..]),
                    (
                        "outcome",
                        &["time", "effort", "convenience", "ease", "simplicity"][..],
                    ),
                ][..],
            ),
        ]);
        Self { taxonomy }
    }
}

impl CategoryExtractor for PurposeExtractor {
    fn dimension(&self) -> Dimension {
        Dimension::Purpose
    }

    fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    // Purpose phrases are sparser than experience vocabulary; a higher
    // floor keeps incidental verb hits out.
    fn min_distinct_phrases(&self) -> usize {
        3
    }

    /// Verb triggers take their object span ("saves so much time"); noun
    /// triggers take their modifier window ("daily upkeep").
    fn extract(&self, sentence: &ParsedSentence) -> Vec<(CategoryKey, String)> {
        let mut phrases = Vec::new();

        for idx in trigger_positions(sentence, &self.taxonomy) {
            let token = match sentence.token(idx) {
                Some(t) => t,
                None => continue,
            };
            let Some((key, _)) = classify_phrase(&self.taxonomy, token) else {
                continue;
            };

            let phrase = if key.sub == "action" {
                let span = sentence.trailing_span(idx, 3);
                if span.split_whitespace().count() < 2 {
                    continue;
                }
                span
            } else {
                sentence.descriptor_window(idx)
            };

            phrases.push((key, phrase));
        }

        phrases
    }

    fn augment(&self, result: &mut AnalysisResult) {
        for (key, record) in result.categories.iter_mut() {
            if record.percentage > 40.0 {
                record.insights.push(format!(
                    "{} is a primary motivation for users, indicating strong alignment with \
                     core user needs",
                    key.main.replace('-', " ")
                ));
            }

            if let Some(sentiment) = &record.sentiment {
                let scored = sentiment.positive + sentiment.negative + sentiment.neutral;
                if scored == 0 {
                    continue;
                }
                let pos_rate = sentiment.positive as f64 / scored as f64 * 100.0;
                if pos_rate > 70.0 {
                    record.insights.push(format!(
                        "Users are highly satisfied with the product's ability to meet their {} \
                         needs",
                        key.main.replace('-', " ")
                    ));
                } else if pos_rate < 30.0 {
                    record.insights.push(format!(
                        "There may be opportunities to better address user needs related to {}",
                        key.main.replace('-', " ")
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Tokenizer;

    fn parse(s: &str) -> ParsedSentence {
        ParsedSentence::parse(&Tokenizer::new(), s)
    }

    #[test]
    fn test_action_verb_takes_object_span() {
        let extractor = PurposeExtractor::new();
        let hits = extractor.extract(&parse("it saves so much time every day"));

        let (key, phrase) = hits
            .iter()
            .find(|(key, _)| key.main == "convenience")
            .unwrap();
        assert_eq!(key.sub, "action");
        assert!(phrase.starts_with("save"));
    }

    #[test]
    fn test_outcome_noun_takes_descriptor_window() {
        let extractor = PurposeExtractor::new();
        let hits = extractor.extract(&parse("bought it to fix a recurring problem"));
        assert!(hits.iter().any(|(key, _)| key.main == "problem-solving"));
    }

    #[test]
    fn test_bare_verb_without_object_skipped() {
        let extractor = PurposeExtractor::new();
        let hits = extractor.extract(&parse("fix"));
        assert!(hits.is_empty());
    }
}
