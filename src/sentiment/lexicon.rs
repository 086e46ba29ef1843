//! Embedded sentiment lexicon for product-review vocabulary.

use std::collections::HashMap;

/// Weighted sentiment vocabulary with intensity modifiers and negations.
#[derive(Debug, Clone)]
pub struct ReviewLexicon {
    scored: HashMap<String, f64>,
    modifiers: HashMap<String, f64>,
    negations: Vec<String>,
}

impl ReviewLexicon {
    pub fn new() -> Self {
        let mut scored = HashMap::new();

        // Strongly positive (0.7 - 1.0)
        let strong_positive = [
            ("excellent", 0.9),
            ("amazing", 0.9),
            ("fantastic", 0.9),
            ("wonderful", 0.85),
            ("perfect", 0.9),
            ("love", 0.8),
            ("loved", 0.8),
            ("awesome", 0.8),
            ("best", 0.8),
            ("incredible", 0.85),
            ("outstanding", 0.85),
            ("impressed", 0.7),
            ("flawless", 0.85),
            ("delighted", 0.8),
        ];

        // Moderately positive (0.3 - 0.6)
        let moderate_positive = [
            ("great", 0.6),
            ("good", 0.5),
            ("nice", 0.45),
            ("happy", 0.5),
            ("satisfied", 0.55),
            ("solid", 0.4),
            ("sturdy", 0.4),
            ("reliable", 0.5),
            ("durable", 0.45),
            ("easy", 0.5),
            ("simple", 0.4),
            ("convenient", 0.5),
            ("quiet", 0.4),
            ("fast", 0.4),
            ("quick", 0.35),
            ("efficient", 0.5),
            ("comfortable", 0.5),
            ("recommend", 0.55),
            ("worth", 0.45),
            ("value", 0.35),
            ("works", 0.3),
            ("helpful", 0.45),
            ("intuitive", 0.5),
            ("sleek", 0.4),
            ("smooth", 0.4),
        ];

        // Strongly negative (-0.7 to -1.0)
        let strong_negative = [
            ("terrible", -0.85),
            ("horrible", -0.85),
            ("awful", -0.8),
            ("worst", -0.85),
            ("useless", -0.8),
            ("garbage", -0.85),
            ("junk", -0.8),
            ("hate", -0.75),
            ("regret", -0.7),
            ("broken", -0.7),
            ("defective", -0.75),
            ("dangerous", -0.75),
            ("scam", -0.9),
            ("waste", -0.7),
        ];

        // Moderately negative (-0.3 to -0.6)
        let moderate_negative = [
            ("bad", -0.5),
            ("poor", -0.55),
            ("disappointed", -0.6),
            ("disappointing", -0.6),
            ("frustrating", -0.55),
            ("frustrated", -0.55),
            ("annoying", -0.5),
            ("difficult", -0.45),
            ("hard", -0.35),
            ("flimsy", -0.5),
            ("cheap", -0.4),
            ("noisy", -0.4),
            ("loud", -0.35),
            ("slow", -0.4),
            ("weak", -0.4),
            ("expensive", -0.35),
            ("unreliable", -0.55),
            ("uncomfortable", -0.5),
            ("confusing", -0.45),
            ("problem", -0.4),
            ("issue", -0.35),
            ("fail", -0.5),
            ("failed", -0.55),
            ("return", -0.3),
            ("returned", -0.4),
            ("bulky", -0.35),
            ("heavy", -0.3),
        ];

        for (word, score) in strong_positive
            .iter()
            .chain(moderate_positive.iter())
            .chain(strong_negative.iter())
            .chain(moderate_negative.iter())
        {
            scored.insert((*word).to_string(), *score);
        }

        let mut modifiers = HashMap::new();
        let modifier_words = [
            ("very", 1.5),
            ("really", 1.4),
            ("extremely", 1.8),
            ("incredibly", 1.7),
            ("super", 1.5),
            ("absolutely", 1.6),
            ("totally", 1.4),
            ("highly", 1.4),
            ("quite", 1.2),
            ("pretty", 1.1),
            ("somewhat", 0.8),
            ("slightly", 0.7),
            ("barely", 0.6),
            ("little", 0.8),
            ("fairly", 1.1),
        ];
        for (word, multiplier) in modifier_words {
            modifiers.insert(word.to_string(), multiplier);
        }

        let negations = [
            "not", "no", "never", "neither", "nobody", "nothing", "nowhere", "don't", "dont",
            "doesn't", "doesnt", "didn't", "didnt", "can't", "cant", "couldn't", "couldnt",
            "won't", "wont", "wouldn't", "wouldnt", "shouldn't", "shouldnt", "isn't", "isnt",
            "aren't", "arent", "wasn't", "wasnt", "weren't", "werent", "hardly",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        Self {
            scored,
            modifiers,
            negations,
        }
    }

    /// Score of a word in [-1, 1], if it carries sentiment.
    pub fn score(&self, word: &str) -> Option<f64> {
        self.scored.get(&word.to_lowercase()).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(&word.to_lowercase())
    }

    pub fn modifier(&self, word: &str) -> Option<f64> {
        self.modifiers.get(&word.to_lowercase()).copied()
    }

    /// Extend the lexicon with a custom term.
    pub fn add_word(&mut self, word: &str, score: f64) {
        self.scored.insert(word.to_lowercase(), score);
    }
}

impl Default for ReviewLexicon {
    fn default() -> Self {
        Self::new()
    }
}
