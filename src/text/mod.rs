mod lemma;
mod sentence;
mod stopwords;
mod tokenizer;

pub use lemma::lemma;
pub use sentence::{ParsedSentence, split_sentences};
pub use stopwords::is_stop_word;
pub use tokenizer::Tokenizer;

/// Shared text-processing facade used by the loader and every extractor.
#[derive(Debug, Clone, Default)]
pub struct TextProcessor {
    tokenizer: Tokenizer,
}

impl TextProcessor {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    /// Split a review text into parsed sentences ready for extraction.
    pub fn parse_sentences(&self, text: &str) -> Vec<ParsedSentence> {
        split_sentences(text)
            .into_iter()
            .map(|s| ParsedSentence::parse(&self.tokenizer, s))
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// True when the text contains at least one of the keywords.
    ///
    /// Single-word keywords match on lemma-normalized tokens; multi-word
    /// keywords match by containment on the cleaned text.
    pub fn matches_any_keyword(&self, text: &str, keywords: &[String]) -> bool {
        !self.matched_keywords(text, keywords).is_empty()
    }

    /// The subset of `keywords` found in `text`, in keyword order.
    pub fn matched_keywords(&self, text: &str, keywords: &[String]) -> Vec<String> {
        let tokens = self.tokenizer.tokenize(text);
        let token_lemmas: std::collections::HashSet<String> =
            tokens.iter().map(|t| lemma(t)).collect();
        let joined = tokens.join(" ");

        keywords
            .iter()
            .filter(|kw| {
                let kw_lower = kw.to_lowercase();
                if kw_lower.contains(' ') {
                    joined.contains(&kw_lower)
                } else {
                    token_lemmas.contains(&lemma(&kw_lower))
                }
            })
            .cloned()
            .collect()
    }

    /// Most frequent non-stop-word tokens, used for the derived
    /// keyword column on loaded reviews.
    pub fn top_keywords(&self, text: &str, limit: usize) -> Vec<String> {
        let mut counts: std::collections::HashMap<String, usize> =
            std::collections::HashMap::new();
        for token in self.tokenizer.tokenize(text) {
            if token.len() < 3 || is_stop_word(&token) {
                continue;
            }
            *counts.entry(token).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked.into_iter().map(|(word, _)| word).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_keyword_matches_lemma() {
        let processor = TextProcessor::new();
        let keywords = vec!["crash".to_string()];
        assert!(processor.matches_any_keyword("the app keeps crashing", &keywords));
    }

    #[test]
    fn test_multi_word_keyword_matches_by_containment() {
        let processor = TextProcessor::new();
        let keywords = vec!["living room".to_string()];
        assert!(processor.matches_any_keyword("I keep it in the living room", &keywords));
        assert!(!processor.matches_any_keyword("I keep it in the bedroom", &keywords));
    }

    #[test]
    fn test_top_keywords_skips_stop_words() {
        let processor = TextProcessor::new();
        let top = processor.top_keywords("the vacuum vacuum is quiet and the vacuum works", 2);
        assert_eq!(top[0], "vacuum");
        assert!(!top.contains(&"the".to_string()));
    }
}
