//! Usage-scenario extraction: the situations and conditions the product
//! is used in.

use crate::analysis::{AnalysisResult, CategoryKey, Dimension, Taxonomy};
use crate::pipeline::extractor::{CategoryExtractor, classify_phrase, trigger_positions};
use crate::text::ParsedSentence;

/// Prepositions and connectives that open a scenario span.
const SCENE_MARKERS: &[&str] = &["in", "at", "during", "while", "when"];

const PREP_SPAN: usize = 5;

pub struct ScenarioExtractor {
    taxonomy: Taxonomy,
}

impl ScenarioExtractor {
    pub fn new() -> Self {
        let taxonomy = Taxonomy::new(&[
            (
                "activity",
                &[
                    (
                        "daily_routine",
                        &[
                            "cleaning", "cooking", "working", "studying", "exercise", "relaxing",
                            "entertainment", "chores",
                        ][..],
                    ),
                    (
                        "special_occasion",
                        &[
                            "party",
                            "gathering",
                            "event",
                            "holiday",
                            "celebration",
                            "occasion",
                            "guest",
                        ][..],
                    ),
                    (
                        "emergency",
                        &["emergency", "urgent", "immediate", "unexpected", "sudden", "crisis"][..],
                    ),
                ][..],
            ),
            (
                "environment",
                &[
                    (
                        "indoor",
                        &["home", "office", "room", "indoor", "inside", "house", "apartment"][..],
                    ),
                    (
                        "outdoor",
                        &[
                            "outdoor", "outside", "garden", "yard", "patio", "balcony", "terrace",
                        ][..],
                    ),
                    (
                        "public",
                        &["public", "shared", "common", "community", "social"][..],
                    ),
                ][..],
            ),
            (
                "condition",
                &[
                    (
                        "weather",
                        &["rain", "sunny", "hot", "cold", "wet", "dry", "weather", "humid"][..],
                    ),
                    (
                        "noise",
                        &["quiet", "noisy", "loud", "silent", "peaceful", "noise"][..],
                    ),
                    (
                        "lighting",
                        &["bright", "dark", "dim", "shadow", "sunlight", "lighting"][..],
                    ),
                ][..],
            ),
        ]);
        Self { taxonomy }
    }
}

impl CategoryExtractor for ScenarioExtractor {
    fn dimension(&self) -> Dimension {
        Dimension::Scenario
    }

    fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Prepositional spans ("while cooking dinner for guests") plus
    /// descriptor windows around scenario vocabulary.
    fn extract(&self, sentence: &ParsedSentence) -> Vec<(CategoryKey, String)> {
        let mut phrases = Vec::new();

        for idx in 0..sentence.len() {
            let Some(token) = sentence.token(idx) else {
                continue;
            };
            if SCENE_MARKERS.contains(&token) {
                let span = sentence.trailing_span(idx, PREP_SPAN);
                if span.split_whitespace().count() < 2 {
                    continue;
                }
                if let Some(hit) = classify_phrase(&self.taxonomy, &span) {
                    phrases.push(hit);
                }
            }
        }

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
            if record.percentage <= 15.0 {
                continue;
            }
            let insight = match key.main.as_str() {
                "activity" => format!(
                    "The product is frequently used during {} activities, suggesting specific \
                     use case optimization",
                    key.sub.replace('_', " ")
                ),
                "environment" => format!(
                    "{} environments represent a key usage context, indicating important design \
                     considerations",
                    capitalize(&key.sub)
                ),
                "condition" => format!(
                    "{} conditions significantly impact product usage, requiring specific \
                     optimizations",
                    capitalize(&key.sub)
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
