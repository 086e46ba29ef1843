//! Usage-timing extraction: when, how often and for how long the product
//! is used.

use crate::analysis::{AnalysisResult, CategoryKey, Dimension, Taxonomy};
use crate::pipeline::extractor::{CategoryExtractor, classify_phrase, trigger_positions};
use crate::text::ParsedSentence;

const CONTEXT_WINDOW: usize = 3;

pub struct TimingExtractor {
    taxonomy: Taxonomy,
}

impl TimingExtractor {
    pub fn new() -> Self {
        let taxonomy = Taxonomy::new(&[
            (
                "time-of-day",
                &[
                    (
                        "morning",
                        &["morning", "dawn", "breakfast", "early", "sunrise"][..],
                    ),
                    ("afternoon", &["afternoon", "lunch", "noon", "midday"][..]),
                    ("evening", &["evening", "dinner", "sunset", "dusk"][..]),
                    ("night", &["night", "midnight", "late", "bedtime", "sleep"][..]),
                ][..],
            ),
            (
                "frequency",
                &[
                    ("daily", &["daily", "everyday", "routine"][..]),
                    ("weekly", &["weekly", "weekend", "weekday"][..]),
                    ("monthly", &["monthly", "month"][..]),
                    (
                        "as_needed",
                        &["needed", "necessary", "occasionally", "sometimes"][..],
                    ),
                ][..],
            ),
            (
                "duration",
                &[
                    ("quick", &["quick", "brief", "short", "minute", "instant"][..]),
                    ("medium", &["hour", "while", "session"][..]),
                    ("long", &["long", "extended", "hours", "throughout"][..]),
                ][..],
            ),
        ]);
        Self { taxonomy }
    }
}

impl CategoryExtractor for TimingExtractor {
    fn dimension(&self) -> Dimension {
        Dimension::Timing
    }

    fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// The trigger token decides the category; the stored phrase is its
    /// surrounding context window, which keeps enough of the sentence to
    /// stay distinctive.
    fn extract(&self, sentence: &ParsedSentence) -> Vec<(CategoryKey, String)> {
        trigger_positions(sentence, &self.taxonomy)
            .into_iter()
            .filter_map(|idx| {
                let token = sentence.token(idx)?;
                let (key, _) = classify_phrase(&self.taxonomy, token)?;
                Some((key, sentence.context_window(idx, CONTEXT_WINDOW)))
            })
            .collect()
    }

    fn augment(&self, result: &mut AnalysisResult) {
        for (key, record) in result.categories.iter_mut() {
            let insight = match key.main.as_str() {
                "time-of-day" if record.percentage > 30.0 => format!(
                    "Product usage is particularly high during {}, suggesting strong temporal \
                     usage patterns",
                    key.sub
                ),
                "frequency" if record.percentage > 40.0 => format!(
                    "Users tend to use the product {}, indicating established usage habits",
                    key.sub.replace('_', " ")
                ),
                "duration" if record.percentage > 30.0 => format!(
                    "Usage sessions are typically {}, which should inform product optimization",
                    key.sub
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
    fn test_context_window_phrase() {
        let extractor = TimingExtractor::new();
        let hits = extractor.extract(&parse("i run it every morning before work"));

        let (key, phrase) = hits
            .iter()
            .find(|(key, _)| key == &CategoryKey::new("time-of-day", "morning"))
            .unwrap();
        assert_eq!(key.main, "time-of-day");
        assert!(phrase.contains("every morning before"));
    }

    #[test]
    fn test_frequency_and_duration() {
        let extractor = TimingExtractor::new();
        let hits = extractor.extract(&parse("a quick daily clean keeps the floors fresh"));
        assert!(
            hits.iter()
                .any(|(key, _)| key == &CategoryKey::new("frequency", "daily"))
        );
        assert!(
            hits.iter()
                .any(|(key, _)| key == &CategoryKey::new("duration", "quick"))
        );
    }
}
