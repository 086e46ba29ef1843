//! User-profile extraction: who the reviewer is and how they use the
//! product.

use crate::analysis::{AnalysisResult, CategoryKey, Dimension, Taxonomy};
use crate::pipeline::extractor::{CategoryExtractor, classify_phrase, trigger_positions};
use crate::text::ParsedSentence;

const USAGE_VERBS: &[&str] = &["use", "utilize", "operate", "run", "work"];

pub struct UserExtractor {
    taxonomy: Taxonomy,
}

impl UserExtractor {
    pub fn new() -> Self {
        let taxonomy = Taxonomy::new(&[
            (
                "user-type",
                &[
                    (
                        "professional",
                        &[
                            "professional",
                            "expert",
                            "experienced",
                            "advanced",
                            "tech-savvy",
                            "power user",
                            "specialist",
                            "pro",
                        ][..],
                    ),
                    (
                        "casual",
                        &[
                            "casual", "regular", "normal", "average", "typical", "everyday",
                            "occasional", "basic",
                        ][..],
                    ),
                    (
                        "beginner",
                        &[
                            "beginner",
                            "new",
                            "novice",
                            "first-time",
                            "starter",
                            "learning",
                            "starting out",
                            "inexperienced",
                        ][..],
                    ),
                ][..],
            ),
            (
                "usage-pattern",
                &[
                    (
                        "frequent",
                        &[
                            "daily",
                            "frequently",
                            "regularly",
                            "often",
                            "always",
                            "heavy use",
                            "constant",
                            "intensive",
                        ][..],
                    ),
                    (
                        "moderate",
                        &[
                            "weekly",
                            "occasionally",
                            "sometimes",
                            "moderate",
                            "periodic",
                            "routine",
                        ][..],
                    ),
                    (
                        "infrequent",
                        &[
                            "rarely",
                            "seldom",
                            "light use",
                            "sporadic",
                            "infrequent",
                            "once in a while",
                        ][..],
                    ),
                ][..],
            ),
            (
                "tech-comfort",
                &[
                    (
                        "tech_savvy",
                        &[
                            "technical",
                            "technology",
                            "gadget",
                            "digital",
                            "smart",
                            "connected",
                            "automated",
                        ][..],
                    ),
                    (
                        "tech_neutral",
                        &["comfortable", "familiar", "understand", "manage", "handle"][..],
                    ),
                    (
                        "tech_cautious",
                        &[
                            "cautious",
                            "careful",
                            "hesitant",
                            "traditional",
                            "simple",
                            "straightforward",
                        ][..],
                    ),
                ][..],
            ),
        ]);
        Self { taxonomy }
    }
}

impl CategoryExtractor for UserExtractor {
    fn dimension(&self) -> Dimension {
        Dimension::User
    }

    fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    fn extract(&self, sentence: &ParsedSentence) -> Vec<(CategoryKey, String)> {
        let mut phrases = Vec::new();

        // Self-descriptions only: sentences without a first-person pronoun
        // usually describe the product, not the user.
        if sentence.has_first_person() {
            for idx in trigger_positions(sentence, &self.taxonomy) {
                let phrase = sentence.descriptor_window(idx);
                if let Some(hit) = classify_phrase(&self.taxonomy, &phrase) {
                    phrases.push(hit);
                }
            }
        }

        // Usage-habit verb phrases ("use it daily") carry pattern signal
        // regardless of person.
        for idx in sentence.lemma_positions(USAGE_VERBS) {
            let phrase = sentence.trailing_span(idx, 4);
            if phrase.split_whitespace().count() < 2 {
                continue;
            }
            if let Some(hit) = classify_phrase(&self.taxonomy, &phrase) {
                phrases.push(hit);
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
                "user-type" => format!(
                    "A significant portion of users identify as {} users, suggesting the need \
                     for appropriate feature complexity",
                    key.sub
                ),
                "usage-pattern" => format!(
                    "The product sees {} usage patterns, indicating specific reliability \
                     requirements",
                    key.sub
                ),
                "tech-comfort" => format!(
                    "Users demonstrate {} comfort levels with technology",
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
    fn test_first_person_gate() {
        let extractor = UserExtractor::new();

        let gated = extractor.extract(&parse("i am a complete beginner with gadgets"));
        assert!(
            gated
                .iter()
                .any(|(key, _)| key == &CategoryKey::new("user-type", "beginner"))
        );

        // Same descriptor without first person: no user-type hit.
        let ungated = extractor.extract(&parse("the beginner mode is limited"));
        assert!(
            !ungated
                .iter()
                .any(|(key, _)| key == &CategoryKey::new("user-type", "beginner"))
        );
    }

    #[test]
    fn test_usage_verb_phrase() {
        let extractor = UserExtractor::new();
        let hits = extractor.extract(&parse("we use it daily in the kitchen"));
        assert!(
            hits.iter()
                .any(|(key, _)| key == &CategoryKey::new("usage-pattern", "frequent"))
        );
    }
}
