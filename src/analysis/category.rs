use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One analytical axis of the review corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    User,
    Timing,
    Location,
    Purpose,
    Scenario,
    Motivation,
    Experience,
    Design,
}

impl Dimension {
    pub fn all() -> [Dimension; 8] {
        [
            Dimension::User,
            Dimension::Timing,
            Dimension::Location,
            Dimension::Purpose,
            Dimension::Scenario,
            Dimension::Motivation,
            Dimension::Experience,
            Dimension::Design,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::User => "user",
            Dimension::Timing => "timing",
            Dimension::Location => "location",
            Dimension::Purpose => "purpose",
            Dimension::Scenario => "scenario",
            Dimension::Motivation => "motivation",
            Dimension::Experience => "experience",
            Dimension::Design => "design",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Dimension::User => "User Profile",
            Dimension::Timing => "Usage Timing",
            Dimension::Location => "Usage Location",
            Dimension::Purpose => "Usage Purpose",
            Dimension::Scenario => "Usage Scenario",
            Dimension::Motivation => "Purchase Motivation",
            Dimension::Experience => "User Experience",
            Dimension::Design => "Design Expectations",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured main/sub category identifier.
///
/// The canonical string form is `main_sub`. Parsing splits on the FIRST
/// underscore: main-category names must not contain `_`, sub-category
/// names may. Serialized as the canonical string so it can key JSON maps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryKey {
    pub main: String,
    pub sub: String,
}

impl CategoryKey {
    pub fn new(main: impl Into<String>, sub: impl Into<String>) -> Self {
        let main = main.into();
        debug_assert!(
            !main.contains('_'),
            "main category names must not contain underscores: {main}"
        );
        Self {
            main,
            sub: sub.into(),
        }
    }

    /// Human-readable form for report prose ("time of day / morning").
    pub fn display_name(&self) -> String {
        format!(
            "{} / {}",
            self.main.replace('-', " "),
            self.sub.replace(['-', '_'], " ")
        )
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.main, self.sub)
    }
}

impl FromStr for CategoryKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('_') {
            Some((main, sub)) if !main.is_empty() && !sub.is_empty() => Ok(CategoryKey {
                main: main.to_string(),
                sub: sub.to_string(),
            }),
            _ => Err(format!("invalid category key: {s:?}")),
        }
    }
}

impl Serialize for CategoryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CategoryKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = CategoryKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a main_sub category key")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<CategoryKey, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(KeyVisitor)
    }
}

/// One taxonomy leaf: a sub-category and its trigger keywords.
#[derive(Debug, Clone)]
pub struct TaxonomyLeaf {
    pub key: CategoryKey,
    pub keywords: Vec<String>,
}

/// Static two-level keyword classification for one dimension.
///
/// Declaration order is the documented tie-break: when a phrase matches
/// several leaves, the first declared leaf wins.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    leaves: Vec<TaxonomyLeaf>,
}

impl Taxonomy {
    pub fn new(groups: &[(&str, &[(&str, &[&str])])]) -> Self {
        let mut leaves = Vec::new();
        for (main, subs) in groups {
            for (sub, keywords) in subs.iter() {
                leaves.push(TaxonomyLeaf {
                    key: CategoryKey::new(*main, *sub),
                    keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
                });
            }
        }
        Self { leaves }
    }

    pub fn leaves(&self) -> &[TaxonomyLeaf] {
        &self.leaves
    }

    /// First leaf (in declaration order) with a keyword contained in the
    /// phrase.
    pub fn classify(&self, phrase: &str) -> Option<&CategoryKey> {
        let phrase = phrase.to_lowercase();
        self.leaves
            .iter()
            .find(|leaf| leaf.keywords.iter().any(|kw| phrase.contains(kw.as_str())))
            .map(|leaf| &leaf.key)
    }

    /// The keyword list of the leaf identified by `key`.
    pub fn keywords_for(&self, key: &CategoryKey) -> Option<&[String]> {
        self.leaves
            .iter()
            .find(|leaf| &leaf.key == key)
            .map(|leaf| leaf.keywords.as_slice())
    }

    /// All trigger keywords across leaves, with their leaf keys, in
    /// declaration order.
    pub fn keyword_entries(&self) -> impl Iterator<Item = (&CategoryKey, &str)> {
        self.leaves
            .iter()
            .flat_map(|leaf| leaf.keywords.iter().map(move |kw| (&leaf.key, kw.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_taxonomy() -> Taxonomy {
        Taxonomy::new(&[
            (
                "usability",
                &[
                    ("ease_of_use", &["easy", "simple"][..]),
                    ("control", &["adjust", "settings"][..]),
                ][..],
            ),
            ("performance", &[("speed", &["fast", "quick"][..])][..]),
        ])
    }

    #[test]
    fn test_category_key_round_trip() {
        let key = CategoryKey::new("usability", "ease_of_use");
        assert_eq!(key.to_string(), "usability_ease_of_use");

        let parsed: CategoryKey = "usability_ease_of_use".parse().unwrap();
        assert_eq!(parsed.main, "usability");
        assert_eq!(parsed.sub, "ease_of_use");
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_category_key_rejects_malformed() {
        assert!("nounderscores".parse::<CategoryKey>().is_err());
        assert!("_leading".parse::<CategoryKey>().is_err());
        assert!("".parse::<CategoryKey>().is_err());
    }

    #[test]
    fn test_category_key_serde_as_string() {
        let key = CategoryKey::new("time", "morning");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"time_morning\"");
        let back: CategoryKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_classify_first_declared_leaf_wins() {
        let taxonomy = Taxonomy::new(&[(
            "quality",
            &[
                ("build", &["solid", "sturdy"][..]),
                ("materials", &["sturdy", "metal"][..]),
            ][..],
        )]);

        // "sturdy" appears in both leaves; declaration order decides.
        let key = taxonomy.classify("very sturdy handle").unwrap();
        assert_eq!(key.sub, "build");
    }

    #[test]
    fn test_classify_no_match() {
        let taxonomy = sample_taxonomy();
        assert!(taxonomy.classify("bright purple color").is_none());
    }

    #[test]
    fn test_keywords_for() {
        let taxonomy = sample_taxonomy();
        let key = CategoryKey::new("performance", "speed");
        assert_eq!(taxonomy.keywords_for(&key).unwrap(), &["fast", "quick"]);
    }
}
