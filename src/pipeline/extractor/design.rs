//! Design-expectation extraction: looks, ergonomics, interaction and
//! physical dimensions.

use crate::analysis::{AnalysisResult, CategoryKey, Dimension, Taxonomy};
use crate::pipeline::extractor::{CategoryExtractor, classify_phrase, trigger_positions};
use crate::text::ParsedSentence;

/// Verbs whose complements describe the product's design ("fits well",
/// "looks cheap").
const DESIGN_VERBS: &[&str] = &["look", "feel", "fit", "work", "handle"];

pub struct DesignExtractor {
    taxonomy: Taxonomy,
}

impl DesignExtractor {
    pub fn new() -> Self {
        let taxonomy = Taxonomy::new(&[
            (
                "aesthetics",
                &[
                    (
                        "appearance",
                        &[
                            "look",
                            "design",
                            "style",
                            "appearance",
                            "aesthetic",
                            "beautiful",
                            "attractive",
                            "sleek",
                            "modern",
                            "elegant",
                        ][..],
                    ),
                    (
                        "color",
                        &[
                            "color", "colour", "finish", "texture", "pattern", "shade", "metallic",
                            "matte", "glossy",
                        ][..],
                    ),
                    (
                        "materials",
                        &["material", "plastic", "metal", "glass", "build", "construction"][..],
                    ),
                ][..],
            ),
            (
                "ergonomics",
                &[
                    (
                        "comfort",
                        &[
                            "comfort",
                            "comfortable",
                            "ergonomic",
                            "grip",
                            "hold",
                            "weight",
                            "balance",
                        ][..],
                    ),
                    (
                        "accessibility",
                        &["access", "reach", "accessible", "user-friendly", "intuitive"][..],
                    ),
                    (
                        "safety",
                        &["safe", "safety", "secure", "protection", "stable", "hazard"][..],
                    ),
                ][..],
            ),
            (
                "interaction",
                &[
                    (
                        "controls",
                        &[
                            "button",
                            "switch",
                            "control",
                            "interface",
                            "touchscreen",
                            "display",
                            "panel",
                            "dial",
                        ][..],
                    ),
                    (
                        "feedback",
                        &[
                            "feedback",
                            "response",
                            "indicator",
                            "signal",
                            "light",
                            "sound",
                            "vibration",
                            "notification",
                        ][..],
                    ),
                    (
                        "layout",
                        &["layout", "arrangement", "position", "placement", "setup"][..],
                    ),
                ][..],
            ),
            (
                "dimensions",
                &[
                    (
                        "size",
                        &["size", "dimension", "large", "small", "compact", "tiny", "footprint"][..],
                    ),
                    (
                        "portability",
                        &["portable", "carry", "transport", "lightweight", "heavy", "bulky"][..],
                    ),
                    (
                        "storage",
                        &["store", "storage", "space-saving", "fold", "collapse", "capacity"][..],
                    ),
                ][..],
            ),
        ]);
        Self { taxonomy }
    }
}

impl CategoryExtractor for DesignExtractor {
    fn dimension(&self) -> Dimension {
        Dimension::Design
    }

    fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Descriptor windows around design vocabulary plus design-verb
    /// complements.
    fn extract(&self, sentence: &ParsedSentence) -> Vec<(CategoryKey, String)> {
        let mut phrases = Vec::new();

        for idx in trigger_positions(sentence, &self.taxonomy) {
            let phrase = sentence.descriptor_window(idx);
            if let Some(hit) = classify_phrase(&self.taxonomy, &phrase) {
                phrases.push(hit);
            }
        }

        for idx in sentence.lemma_positions(DESIGN_VERBS) {
            let phrase = sentence.trailing_span(idx, 3);
            if phrase.split_whitespace().count() < 2 {
                continue;
            }
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
            if record.percentage <= 15.0 {
                continue;
            }
            let insight = match key.main.as_str() {
                "aesthetics" => {
                    let favorable = record
                        .sentiment
                        .as_ref()
                        .map(|s| s.positive > s.negative)
                        .unwrap_or(false);
                    if favorable {
                        format!(
                            "Users appreciate the product's {}, indicating successful design \
                             choices",
                            key.sub
                        )
                    } else {
                        format!(
                            "The product's {} could be improved to better meet user expectations",
                            key.sub
                        )
                    }
                }
                "ergonomics" => format!(
                    "{} is a significant factor in user experience and satisfaction",
                    capitalize(&key.sub)
                ),
                "interaction" => format!(
                    "User interaction through {} plays a key role in product usability",
                    key.sub
                ),
                "dimensions" => format!(
                    "Product {} is an important consideration for users in their usage context",
                    key.sub
                ),
                _ => continue,
            };
            record.insights.push(insight);
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
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
    fn test_aesthetics_descriptor() {
        let extractor = DesignExtractor::new();
        let hits = extractor.extract(&parse("the sleek modern design caught my eye"));
        assert!(
            hits.iter()
                .any(|(key, _)| key == &CategoryKey::new("aesthetics", "appearance"))
        );
    }

    #[test]
    fn test_design_verb_complement() {
        let extractor = DesignExtractor::new();
        let hits = extractor.extract(&parse("it fits perfectly in small spaces"));
        assert!(
            hits.iter()
                .any(|(key, _)| key == &CategoryKey::new("dimensions", "size"))
        );
    }

    #[test]
    fn test_portability() {
        let extractor = DesignExtractor::new();
        let hits = extractor.extract(&parse("lightweight enough to carry upstairs"));
        assert!(
            hits.iter()
                .any(|(key, _)| key == &CategoryKey::new("dimensions", "portability"))
        );
    }
}
