pub mod combiner;
pub mod engine;
pub mod label;
pub mod rarity;
pub mod structure;

use serde::Serialize;

use crate::language::{FrequencyTable, NormalizedText};

pub use combiner::{combine, DifficultyScore};
pub use engine::{
    detect_language, label, score, score_batch, score_with_breakdown, LanguageSource,
    PhraseInput, ScoreBreakdown, ScoredPhrase,
};
pub use label::DifficultyLabel;
pub use rarity::LetterRarity;
pub use structure::StructuralComplexity;

/// Output of a single analyzer, always within `[SubScore::MIN, SubScore::MAX]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct SubScore(f64);

impl SubScore {
    pub const MIN: SubScore = SubScore(0.0);
    pub const MAX: SubScore = SubScore(100.0);

    /// Clamp `value` into range; NaN collapses to the minimum.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::MIN;
        }
        SubScore(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Trait for the independent sub-score strategies fed into the combiner
pub trait Analyzer {
    /// Score `text`; empty text must produce `SubScore::MIN`
    fn analyze(&self, text: &NormalizedText, table: &FrequencyTable) -> SubScore;
}
