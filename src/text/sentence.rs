use crate::text::lemma::lemma;
use crate::text::stopwords::is_stop_word;
use crate::text::tokenizer::Tokenizer;
use std::collections::HashSet;
use std::sync::LazyLock;

static FIRST_PERSON: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ["i", "we", "my", "our", "me", "us"].into_iter().collect());

/// Split text into sentences on terminal punctuation runs.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(|c| c == '.' || c == '!' || c == '?')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// A tokenized sentence with the positional helpers the dimension
/// extractors build phrases from.
#[derive(Debug, Clone)]
pub struct ParsedSentence {
    tokens: Vec<String>,
    lemmas: Vec<String>,
}

impl ParsedSentence {
    pub fn parse(tokenizer: &Tokenizer, sentence: &str) -> Self {
        let tokens = tokenizer.tokenize(sentence);
        let lemmas = tokens.iter().map(|t| lemma(t)).collect();
        Self { tokens, lemmas }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn token(&self, idx: usize) -> Option<&str> {
        self.tokens.get(idx).map(String::as_str)
    }

    pub fn lemma_at(&self, idx: usize) -> Option<&str> {
        self.lemmas.get(idx).map(String::as_str)
    }

    /// Sentences with a first-person pronoun are likelier to be
    /// self-descriptions than product descriptions.
    pub fn has_first_person(&self) -> bool {
        self.tokens.iter().any(|t| FIRST_PERSON.contains(t.as_str()))
    }

    /// True when any token's lemma is in the given set.
    pub fn has_any_lemma(&self, lemmas: &[&str]) -> bool {
        let wanted: HashSet<String> = lemmas.iter().map(|l| lemma(l)).collect();
        self.lemmas.iter().any(|l| wanted.contains(l))
    }

    /// Positions of tokens whose lemma matches any of the given words.
    pub fn lemma_positions(&self, words: &[&str]) -> Vec<usize> {
        let wanted: HashSet<String> = words.iter().map(|w| lemma(w)).collect();
        self.lemmas
            .iter()
            .enumerate()
            .filter(|(_, l)| wanted.contains(*l))
            .map(|(i, _)| i)
            .collect()
    }

    /// Tokens within `window` positions either side of `idx`, joined.
    pub fn context_window(&self, idx: usize, window: usize) -> String {
        let start = idx.saturating_sub(window);
        let end = (idx + window + 1).min(self.tokens.len());
        self.tokens[start..end].join(" ")
    }

    /// A compact descriptive phrase around `idx`: up to two adjacent
    /// non-stop-word tokens on each side of the trigger.
    pub fn descriptor_window(&self, idx: usize) -> String {
        let mut parts: Vec<&str> = Vec::new();

        let mut before: Vec<&str> = Vec::new();
        for i in (idx.saturating_sub(2)..idx).rev() {
            if is_stop_word(&self.tokens[i]) {
                break;
            }
            before.push(&self.tokens[i]);
            if before.len() == 2 {
                break;
            }
        }
        before.reverse();
        parts.extend(before);

        parts.push(&self.tokens[idx]);

        for i in idx + 1..(idx + 3).min(self.tokens.len()) {
            if is_stop_word(&self.tokens[i]) {
                break;
            }
            parts.push(&self.tokens[i]);
        }

        parts.join(" ")
    }

    /// Tokens from `idx` forward, capped at `max_len`.
    pub fn trailing_span(&self, idx: usize, max_len: usize) -> String {
        let end = (idx + max_len).min(self.tokens.len());
        self.tokens[idx..end].join(" ")
    }
}
