use serde::Deserialize;
use thiserror::Error;

use slipsort_core::Category;

use crate::normalize::NormalizedText;

/// Entity phrases below this confidence are ignored as scoring evidence.
const MIN_ENTITY_CONFIDENCE: f32 = 0.5;

#[derive(Debug, Error)]
pub enum EntityError {
    #[error("Entity service error: {0}")]
    Service(String),
    #[error("Entity service unavailable")]
    Unavailable,
}

/// One labeled phrase from an external entity / key-phrase recognizer.
#[derive(Debug, Clone)]
pub struct EntityPhrase {
    pub label: String,
    pub text: String,
    pub confidence: f32,
}

/// Optional external capability that surfaces organizational and
/// commercial entities in the receipt text. Failure is recoverable by
/// design: the classifier falls back to keyword scoring alone.
pub trait EntityRecognizer: Send + Sync {
    fn classify_entities(&self, text: &str) -> Result<Vec<EntityPhrase>, EntityError>;
}

/// Default no-op capability; keyword scoring carries the full weight.
pub struct NoopEntities;

impl EntityRecognizer for NoopEntities {
    fn classify_entities(&self, _text: &str) -> Result<Vec<EntityPhrase>, EntityError> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Failed to parse rules TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Unknown category in rules: '{0}'")]
    UnknownCategory(String),
}

/// Ordered table of category triggers. Order is significant: scoring
/// ties resolve to the earlier entry.
pub struct KeywordTable {
    entries: Vec<(Category, Vec<String>)>,
}

impl KeywordTable {
    /// Build from an explicit entry list; triggers are lowercased.
    pub fn new(entries: Vec<(Category, Vec<String>)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(c, triggers)| (c, triggers.into_iter().map(|t| t.to_lowercase()).collect()))
            .collect();
        Self { entries }
    }

    /// Load a trigger table from TOML:
    ///
    /// ```toml
    /// [[category]]
    /// name = "Restaurant"
    /// triggers = ["restaurant", "cafe", "diner"]
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, RulesError> {
        #[derive(Deserialize)]
        struct RulesFile {
            #[serde(rename = "category")]
            categories: Vec<RuleEntry>,
        }
        #[derive(Deserialize)]
        struct RuleEntry {
            name: String,
            triggers: Vec<String>,
        }

        let file: RulesFile = toml::from_str(content)?;
        let entries = file
            .categories
            .into_iter()
            .map(|e| {
                e.name
                    .parse::<Category>()
                    .map_err(|_| RulesError::UnknownCategory(e.name.clone()))
                    .map(|c| (c, e.triggers))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(entries))
    }

    /// Assign a category by trigger scoring. The score is the number of
    /// distinct triggers present as substrings of the haystack (the
    /// lowercased text plus any extra evidence phrases). The strictly
    /// highest score wins; an all-zero round yields `Other`.
    pub fn classify(&self, text: &NormalizedText, extra_phrases: &[String]) -> Category {
        let mut haystack = text.lower().to_string();
        for phrase in extra_phrases {
            haystack.push(' ');
            haystack.push_str(&phrase.to_lowercase());
        }

        let mut best: Option<(Category, usize)> = None;
        for (category, triggers) in &self.entries {
            let score = triggers
                .iter()
                .filter(|t| !t.is_empty() && haystack.contains(t.as_str()))
                .count();
            if score > 0 && best.map_or(true, |(_, s)| score > s) {
                best = Some((*category, score));
            }
        }
        best.map(|(c, _)| c).unwrap_or(Category::Other)
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }
        KeywordTable::new(vec![
            (
                Category::Restaurant,
                words(&[
                    "restaurant", "cafe", "diner", "dining", "bar", "grill", "pizza",
                    "burger", "sushi", "food", "meal",
                ]),
            ),
            (Category::Parking, words(&["parking", "garage", "meter", "valet"])),
            (
                Category::Gas,
                words(&["gas", "gas station", "fuel", "petrol", "shell", "chevron", "exxon", "bp"]),
            ),
            (
                Category::Grocery,
                words(&[
                    "grocery", "supermarket", "market", "food", "walmart", "target",
                    "kroger", "safeway",
                ]),
            ),
            (
                Category::Retail,
                words(&["store", "shop", "retail", "clothing", "electronics", "amazon", "best buy"]),
            ),
            (
                Category::Transportation,
                words(&["uber", "lyft", "taxi", "transport", "bus", "train", "subway"]),
            ),
            (
                Category::Entertainment,
                words(&["movie", "theater", "cinema", "concert", "show", "ticket", "amusement"]),
            ),
            (
                Category::Healthcare,
                words(&[
                    "pharmacy", "drug", "medical", "doctor", "hospital", "clinic", "cvs",
                    "walgreens",
                ]),
            ),
            (
                Category::Utilities,
                words(&["electric", "water", "gas", "internet", "phone", "utility", "bill"]),
            ),
            (Category::Other, Vec::new()),
        ])
    }
}

/// Classify with the optional entity capability merged in. A capability
/// failure logs a warning and degrades to keyword-only scoring — it
/// never aborts the record.
pub fn classify_with<E: EntityRecognizer>(
    table: &KeywordTable,
    text: &NormalizedText,
    entities: &E,
) -> Category {
    let extra: Vec<String> = match entities.classify_entities(text.text()) {
        Ok(phrases) => phrases
            .into_iter()
            .filter(|p| p.confidence >= MIN_ENTITY_CONFIDENCE)
            .map(|p| p.text)
            .collect(),
        Err(e) => {
            tracing::warn!("Entity classification failed, scoring keywords only: {e}");
            Vec::new()
        }
    };
    table.classify(text, &extra)
}
