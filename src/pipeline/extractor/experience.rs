//! User-experience extraction: satisfaction, usability, performance and
//! reported issues.

use crate::analysis::{AnalysisResult, CategoryKey, Dimension, Taxonomy};
use crate::pipeline::extractor::{CategoryExtractor, classify_phrase, trigger_positions};
use crate::text::{ParsedSentence, is_stop_word};

pub struct ExperienceExtractor {
    taxonomy: Taxonomy,
}

impl ExperienceExtractor {
    pub fn new() -> Self {
        let taxonomy = Taxonomy::new(&[
            (
                "satisfaction",
                &[
                    (
                        "positive",
                        &[
                            "excellent",
                            "great",
                            "amazing",
                            "love",
                            "perfect",
                            "fantastic",
                            "wonderful",
                            "satisfied",
                            "happy",
                            "impressed",
                            "awesome",
                        ][..],
                    ),
                    (
                        "negative",
                        &[
                            "disappointed",
                            "poor",
                            "bad",
                            "terrible",
                            "worst",
                            "frustrated",
                            "annoying",
                            "unhappy",
                            "dissatisfied",
                            "regret",
                        ][..],
                    ),
                ][..],
            ),
            (
                "usability",
                &[
                    (
                        "ease_of_use",
                        &[
                            "easy",
                            "simple",
                            "intuitive",
                            "straightforward",
                            "user-friendly",
                            "convenient",
                            "effortless",
                        ][..],
                    ),
                    (
                        "learning_curve",
                        &[
                            "learn",
                            "understand",
                            "figure out",
                            "manual",
                            "instructions",
                            "tutorial",
                            "guidance",
                        ][..],
                    ),
                    (
                        "control",
                        &[
                            "control", "adjust", "customize", "settings", "options", "flexible",
                            "versatile",
                        ][..],
                    ),
                ][..],
            ),
            (
                "performance",
                &[
                    (
                        "reliability",
                        &[
                            "reliable",
                            "stable",
                            "consistent",
                            "dependable",
                            "trustworthy",
                            "solid",
                            "sturdy",
                        ][..],
                    ),
                    (
                        "efficiency",
                        &["fast", "quick", "efficient", "powerful", "effective", "speed"][..],
                    ),
                    (
                        "quality",
                        &["quality", "well-made", "durable", "robust", "premium", "high-end"][..],
                    ),
                ][..],
            ),
            (
                "issues",
                &[
                    (
                        "technical",
                        &["error", "bug", "crash", "malfunction", "broken", "defect", "problem"][..],
                    ),
                    (
                        "design",
                        &[
                            "awkward",
                            "bulky",
                            "heavy",
                            "noisy",
                            "loud",
                            "uncomfortable",
                            "inconvenient",
                        ][..],
                    ),
                    (
                        "support",
                        &[
                            "support",
                            "service",
                            "warranty",
                            "customer service",
                            "help",
                            "assistance",
                        ][..],
                    ),
                ][..],
            ),
        ]);
        Self { taxonomy }
    }
}

impl CategoryExtractor for ExperienceExtractor {
    fn dimension(&self) -> Dimension {
        Dimension::Experience
    }

    fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    // Experience vocabulary is the densest of the eight dimensions, so the
    // de-noising floor is higher.
    fn min_distinct_phrases(&self) -> usize {
        3
    }

    /// Descriptor windows around experience vocabulary, plus adjacent
    /// content-word compounds ("easy setup", "terrible battery").
    fn extract(&self, sentence: &ParsedSentence) -> Vec<(CategoryKey, String)> {
        let mut phrases = Vec::new();

        for idx in trigger_positions(sentence, &self.taxonomy) {
            let phrase = sentence.descriptor_window(idx);
            if let Some(hit) = classify_phrase(&self.taxonomy, &phrase) {
                phrases.push(hit);
            }

            // Compound with the following content word, when present.
            if let (Some(token), Some(next)) = (sentence.token(idx), sentence.token(idx + 1)) {
                if !is_stop_word(next) {
                    let compound = format!("{token} {next}");
                    if let Some(hit) = classify_phrase(&self.taxonomy, &compound) {
                        if !phrases.iter().any(|(k, p)| k == &hit.0 && p == &hit.1) {
                            phrases.push(hit);
                        }
                    }
                }
            }
        }

        phrases
    }

    fn augment(&self, result: &mut AnalysisResult) {
        for (key, record) in result.categories.iter_mut() {
            let insight = match key.main.as_str() {
                "satisfaction" if record.percentage > 30.0 => {
                    if key.sub == "positive" {
                        "Users express high overall satisfaction with the product".to_string()
                    } else {
                        "There are significant user satisfaction concerns to address".to_string()
                    }
                }
                "usability" if record.percentage > 20.0 => format!(
                    "Users frequently mention {}, indicating its importance in the user \
                     experience",
                    key.sub.replace('_', " ")
                ),
                "performance" if record.percentage > 25.0 => format!(
                    "Product {} is a key factor in user experience",
                    key.sub
                ),
                "issues" if record.percentage > 15.0 => format!(
                    "Users report notable {} issues that need attention",
                    key.sub
                ),
                _ => continue,
            };
            record.insights.push(insight);
        }
    }
}
