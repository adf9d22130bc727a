use itertools::Itertools;

use super::{Analyzer, SubScore};
use crate::language::{FrequencyTable, NormalizedText};

/// Letter count at which the length factor reaches ~63% of its ceiling
pub const LENGTH_SCALE: f64 = 6.0;
/// Floor of the diversity multiplier, reached by a single repeated letter
pub const DIVERSITY_BASE: f64 = 0.4;
pub const DIVERSITY_WEIGHT: f64 = 0.6;

/// Scores how hard the arrangement is, regardless of which letters are used.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralComplexity;

impl Analyzer for StructuralComplexity {
    fn analyze(&self, text: &NormalizedText, _table: &FrequencyTable) -> SubScore {
        structure_score(text)
    }
}

/// Distinct letters over total letters, in `(0, 1]`; 0 for empty text.
pub fn diversity(text: &NormalizedText) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    text.letters().unique().count() as f64 / text.len() as f64
}

/// Saturating growth in `[0, 1)` so very long phrases can't run away.
pub fn length_factor(letters: usize) -> f64 {
    1.0 - (-(letters as f64) / LENGTH_SCALE).exp()
}

pub fn structure_score(text: &NormalizedText) -> SubScore {
    if text.is_empty() {
        return SubScore::MIN;
    }
    let spread = DIVERSITY_BASE + DIVERSITY_WEIGHT * diversity(text);
    SubScore::new(100.0 * length_factor(text.len()) * spread)
}
