use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{
    combiner::{combine, raw_combined, DifficultyScore},
    label::DifficultyLabel,
    rarity::LetterRarity,
    structure::StructuralComplexity,
    Analyzer, SubScore,
};
use crate::language::{detector, normalize, Language};

/// Where the resolved language came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LanguageSource {
    Tagged,
    Detected,
}

/// Everything the engine computed for one phrase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub language: Language,
    pub language_source: LanguageSource,
    pub normalized: String,
    pub letters: usize,
    pub rarity: SubScore,
    pub structure: SubScore,
    pub raw: f64,
    pub score: DifficultyScore,
    pub label: DifficultyLabel,
}

/// One item of a batch; both fields may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseInput {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "lang", alias = "language_tag")]
    pub language: Option<String>,
}

impl PhraseInput {
    pub fn new(text: impl Into<String>, language: Option<&str>) -> Self {
        Self {
            text: Some(text.into()),
            language: language.map(str::to_string),
        }
    }
}

/// Result for one batch item, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredPhrase {
    pub text: Option<String>,
    pub language: Language,
    pub score: DifficultyScore,
    pub label: DifficultyLabel,
}

/// Pick the tagged language when the tag is recognized, otherwise detect it.
pub fn resolve_language(text: Option<&str>, tag: Option<&str>) -> (Language, LanguageSource) {
    match tag.and_then(Language::from_tag) {
        Some(language) => (language, LanguageSource::Tagged),
        None => (detect_language(text), LanguageSource::Detected),
    }
}

/// Classify `text`; missing text is the default language.
pub fn detect_language(text: Option<&str>) -> Language {
    text.map(detector::detect).unwrap_or(Language::DEFAULT)
}

/// Score a phrase in `1..=100`. Never fails; empty or letterless input scores 1.
pub fn score(text: Option<&str>, tag: Option<&str>) -> DifficultyScore {
    score_with_breakdown(text, tag).score
}

pub fn score_with_breakdown(text: Option<&str>, tag: Option<&str>) -> ScoreBreakdown {
    let (language, language_source) = resolve_language(text, tag);
    let normalized = normalize(text.unwrap_or_default(), language);

    if normalized.is_empty() {
        return ScoreBreakdown {
            language,
            language_source,
            normalized: String::new(),
            letters: 0,
            rarity: SubScore::MIN,
            structure: SubScore::MIN,
            raw: 0.0,
            score: DifficultyScore::MIN,
            label: DifficultyScore::MIN.label(),
        };
    }

    let table = language.frequencies();
    let rarity = LetterRarity.analyze(&normalized, table);
    let structure = StructuralComplexity.analyze(&normalized, table);
    let score = combine(rarity, structure);

    trace!(
        %language,
        letters = normalized.len(),
        rarity = rarity.value(),
        structure = structure.value(),
        score = score.value(),
        "scored phrase"
    );

    ScoreBreakdown {
        language,
        language_source,
        letters: normalized.len(),
        normalized: normalized.into_string(),
        rarity,
        structure,
        raw: raw_combined(rarity, structure),
        score,
        label: score.label(),
    }
}

/// Map any integer to its label; out-of-range values are clamped first.
pub fn label(score: i64) -> DifficultyLabel {
    DifficultyScore::new(score).label()
}

/// Score each item on its own. Output has one entry per input, same order.
pub fn score_batch(items: &[PhraseInput]) -> Vec<ScoredPhrase> {
    items
        .iter()
        .map(|item| {
            let breakdown = score_with_breakdown(item.text.as_deref(), item.language.as_deref());
            ScoredPhrase {
                text: item.text.clone(),
                language: breakdown.language,
                score: breakdown.score,
                label: breakdown.label,
            }
        })
        .collect()
}
