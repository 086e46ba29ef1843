//! Purchase-motivation extraction: why the reviewer bought the product.
//!
//! Only purchase-related sentences are considered, which keeps generic
//! praise from polluting the motivation categories.

use crate::analysis::{AnalysisResult, CategoryKey, Dimension, Taxonomy};
use crate::pipeline::extractor::{CategoryExtractor, classify_phrase, trigger_positions};
use crate::text::ParsedSentence;

const PURCHASE_VERBS: &[&str] = &[
    "buy", "bought", "purchase", "order", "choose", "select", "decide", "acquire", "invest",
    "spend",
];

/// Connectives that introduce a reason clause.
const REASON_MARKERS: &[&str] = &["because", "since", "as", "for", "to"];

const REASON_SPAN: usize = 6;

pub struct MotivationExtractor {
    taxonomy: Taxonomy,
}

impl MotivationExtractor {
    pub fn new() -> Self {
        let taxonomy = Taxonomy::new(&[
            (
                "problem-solving",
                &[
                    (
                        "pain_points",
                        &[
                            "solve", "fix", "address", "resolve", "problem", "issue", "challenge",
                            "difficulty",
                        ][..],
                    ),
                    (
                        "needs",
                        &["need", "require", "necessary", "essential", "must-have", "crucial"][..],
                    ),
                ][..],
            ),
            (
                "value",
                &[
                    (
                        "price",
                        &[
                            "price", "cost", "affordable", "expensive", "worth", "budget", "deal",
                            "discount",
                        ][..],
                    ),
                    (
                        "features",
                        &[
                            "feature",
                            "function",
                            "capability",
                            "option",
                            "specification",
                            "technology",
                            "innovation",
                        ][..],
                    ),
                    (
                        "quality",
                        &[
                            "quality",
                            "premium",
                            "high-end",
                            "professional",
                            "durable",
                            "well-made",
                        ][..],
                    ),
                ][..],
            ),
            (
                "influence",
                &[
                    (
                        "recommendations",
                        &[
                            "recommend",
                            "recommended",
                            "suggestion",
                            "advice",
                            "review",
                            "rating",
                            "feedback",
                        ][..],
                    ),
                    (
                        "comparison",
                        &[
                            "compare",
                            "alternative",
                            "competitor",
                            "better",
                            "best",
                            "difference",
                            "versus",
                        ][..],
                    ),
                    (
                        "brand",
                        &["brand", "reputation", "trust", "popular", "well-known", "famous"][..],
                    ),
                ][..],
            ),
            (
                "timing",
                &[
                    (
                        "urgency",
                        &["urgent", "immediately", "asap", "right away", "quickly"][..],
                    ),
                    (
                        "opportunity",
                        &["sale", "promotion", "offer", "limited time", "seasonal", "prime day"][..],
                    ),
                ][..],
            ),
        ]);
        Self { taxonomy }
    }
}

impl CategoryExtractor for MotivationExtractor {
    fn dimension(&self) -> Dimension {
        Dimension::Motivation
    }

    fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    fn extract(&self, sentence: &ParsedSentence) -> Vec<(CategoryKey, String)> {
        if !sentence.has_any_lemma(PURCHASE_VERBS) {
            return Vec::new();
        }

        let mut phrases = Vec::new();

        // Reason clauses: "bought it because the old one kept breaking".
        for idx in 0..sentence.len() {
            let Some(token) = sentence.token(idx) else {
                continue;
            };
            if REASON_MARKERS.contains(&token) && idx + 1 < sentence.len() {
                let clause = sentence.trailing_span(idx + 1, REASON_SPAN);
                if clause.split_whitespace().count() < 2 {
                    continue;
                }
                if let Some(hit) = classify_phrase(&self.taxonomy, &clause) {
                    phrases.push(hit);
                }
            }
        }

        // Direct motivation vocabulary with its modifier window.
        for idx in trigger_positions(sentence, &self.taxonomy) {
            let phrase = sentence.descriptor_window(idx);
            if let Some(hit) = classify_phrase(&self.taxonomy, &phrase) {
                if !phrases.iter().any(|(k, p)| k == &hit.0 && p == &hit.1) {
                    phrases.push(hit);
                }
            }
        }

        phrases
    }

    fn augment(&self, result: &mut AnalysisResult) {
        for (key, record) in result.categories.iter_mut() {
            let insight = match key.main.as_str() {
                "problem-solving" if record.percentage > 30.0 => format!(
                    "Users primarily purchase the product to address {}, highlighting key pain \
                     points in the market",
                    key.sub.replace('_', " ")
                ),
                "value" if record.percentage > 25.0 => format!(
                    "Product {} is a crucial factor in purchase decisions",
                    key.sub
                ),
                "influence" if record.percentage > 20.0 => format!(
                    "{} play a significant role in influencing purchase decisions",
                    key.sub.replace('_', " ")
                ),
                "timing" if record.percentage > 15.0 => format!(
                    "{} is a key trigger for purchase decisions",
                    key.sub.replace('_', " ")
                ),
                _ => continue,
            };
            record.insights.push(insight);
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
    fn test_purchase_gate() {
        let extractor = MotivationExtractor::new();

        // Price vocabulary, but no purchase verb: ignored.
        let ungated = extractor.extract(&parse("the price seems fair"));
        assert!(ungated.is_empty());

        let gated = extractor.extract(&parse("i bought it because the price was fair"));
        assert!(
            gated
                .iter()
                .any(|(key, _)| key == &CategoryKey::new("value", "price"))
        );
    }

    #[test]
    fn test_reason_clause() {
        let extractor = MotivationExtractor::new();
        let hits = extractor.extract(&parse(
            "we ordered this to fix a constant dust problem in the hallway",
        ));
        assert!(hits.iter().any(|(key, _)| key.main == "problem-solving"));
    }

    #[test]
    fn test_recommendation_influence() {
        let extractor = MotivationExtractor::new();
        let hits = extractor.extract(&parse("bought it after a friend recommended it"));
        assert!(
            hits.iter()
                .any(|(key, _)| key == &CategoryKey::new("influence", "recommendations"))
        );
    }
}
