//! Usage-location extraction: the spaces and environments the product
//! lives in.

use crate::analysis::{AnalysisResult, CategoryKey, Dimension, Taxonomy};
use crate::pipeline::extractor::{CategoryExtractor, classify_phrase, trigger_positions};
use crate::text::ParsedSentence;

pub struct LocationExtractor {
    taxonomy: Taxonomy,
}

impl LocationExtractor {
    pub fn new() -> Self {
        let taxonomy = Taxonomy::new(&[
            (
                "indoor",
                &[
                    (
                        "living_areas",
                        &[
                            "living room",
                            "bedroom",
                            "dining room",
                            "kitchen",
                            "bathroom",
                            "hallway",
                            "corridor",
                            "study",
                        ][..],
                    ),
                    (
                        "storage_areas",
                        &[
                            "closet",
                            "storage room",
                            "garage",
                            "basement",
                            "attic",
                            "cabinet",
                            "drawer",
                        ][..],
                    ),
                    (
                        "functional_areas",
                        &[
                            "laundry room",
                            "utility room",
                            "workshop",
                            "gym",
                            "entertainment room",
                        ][..],
                    ),
                ][..],
            ),
            (
                "outdoor",
                &[
                    (
                        "immediate",
                        &[
                            "balcony", "patio", "deck", "porch", "terrace", "garden", "yard",
                            "driveway",
                        ][..],
                    ),
                    (
                        "extended",
                        &["pool", "outdoor kitchen", "playground", "walkway"][..],
                    ),
                ][..],
            ),
            (
                "environment",
                &[
                    (
                        "residential",
                        &[
                            "house",
                            "apartment",
                            "condo",
                            "flat",
                            "studio",
                            "home",
                            "residence",
                            "living space",
                        ][..],
                    ),
                    (
                        "commercial",
                        &[
                            "office",
                            "shop",
                            "store",
                            "business",
                            "workplace",
                            "commercial space",
                        ][..],
                    ),
                ][..],
            ),
        ]);
        Self { taxonomy }
    }
}

impl CategoryExtractor for LocationExtractor {
    fn dimension(&self) -> Dimension {
        Dimension::Location
    }

    fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Noun-ish triggers expand into a modifier window; multi-word place
    /// names ("living room") are caught by classifying the window itself.
    fn extract(&self, sentence: &ParsedSentence) -> Vec<(CategoryKey, String)> {
        let mut phrases = Vec::new();

        for idx in trigger_positions(sentence, &self.taxonomy) {
            let phrase = sentence.descriptor_window(idx);
            if let Some(hit) = classify_phrase(&self.taxonomy, &phrase) {
                phrases.push(hit);
            }
        }

        // Two-token place names have no single-token trigger; scan
        // adjacent pairs, but only accept hits on a multi-word keyword
        // (single-word triggers are already covered above).
        for idx in 0..sentence.len().saturating_sub(1) {
            let pair = sentence.trailing_span(idx, 2);
            if let Some((key, phrase)) = classify_phrase(&self.taxonomy, &pair) {
                let multi_word_hit = self
                    .taxonomy
                    .keywords_for(&key)
                    .is_some_and(|kws| kws.iter().any(|kw| kw.contains(' ') && phrase.contains(kw.as_str())));
                if multi_word_hit {
                    phrases.push((key, phrase));
                }
            }
        }

        phrases
    }

    fn augment(&self, result: &mut AnalysisResult) {
        for (key, record) in result.categories.iter_mut() {
            if record.percentage > 30.0 {
                record.insights.push(format!(
                    "{} represents a key usage environment, suggesting importance of optimizing \
                     for this space",
                    key.display_name()
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
                        "Users report particularly positive experiences when using the product \
                         in {} settings",
                        key.display_name()
                    ));
                } else if pos_rate < 30.0 {
                    record.insights.push(format!(
                        "Users face some challenges when using the product in {} environments",
                        key.display_name()
                    ));
                }
            }
        }
    }
}
