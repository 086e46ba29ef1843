use regex::Regex;
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s]+").unwrap());
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.\-]+@[\w.\-]+\.\w+").unwrap());

/// Word tokenizer with URL/e-mail stripping and length bounds.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    min_word_length: usize,
    max_word_length: usize,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            // Length 1 kept so first-person "i" survives tokenization.
            min_word_length: 1,
            max_word_length: 50,
        }
    }

    pub fn with_min_length(mut self, len: usize) -> Self {
        self.min_word_length = len;
        self
    }

    pub fn with_max_length(mut self, len: usize) -> Self {
        self.max_word_length = len;
        self
    }

    /// Lowercased word tokens in order of appearance.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let stripped = URL_REGEX.replace_all(text, " ");
        let stripped = EMAIL_REGEX.replace_all(&stripped, " ");

        stripped
            .split_whitespace()
            .filter_map(|word| {
                let cleaned = clean_word(word);
                if cleaned.is_empty()
                    || cleaned.len() < self.min_word_length
                    || cleaned.len() > self.max_word_length
                {
                    None
                } else {
                    Some(cleaned.to_lowercase())
                }
            })
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '\'')
        .collect::<String>()
        .trim_matches(|c| c == '-' || c == '\'')
        .to_string()
}
