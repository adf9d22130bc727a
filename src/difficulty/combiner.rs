use serde::{Deserialize, Serialize};
use std::fmt;

use super::{label::DifficultyLabel, SubScore};

/// Share of the structural sub-score that rarity can add on top of the base
pub const RARITY_WEIGHT: f64 = 0.3;
/// Share of the structural sub-score kept even when every letter is common
pub const STRUCTURE_WEIGHT: f64 = 0.7;

/// Final difficulty, always within `1..=100`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", from = "i64")]
pub struct DifficultyScore(u8);

impl DifficultyScore {
    pub const MIN: DifficultyScore = DifficultyScore(1);
    pub const MAX: DifficultyScore = DifficultyScore(100);

    /// Clamp an arbitrary integer into range.
    pub fn new(value: i64) -> Self {
        DifficultyScore(value.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    /// Round half away from zero, then clamp. Non-finite input maps to `MIN`.
    pub fn from_raw(raw: f64) -> Self {
        if !raw.is_finite() {
            return Self::MIN;
        }
        Self::new(raw.round() as i64)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> DifficultyLabel {
        DifficultyLabel::for_score(self)
    }
}

impl Default for DifficultyScore {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<i64> for DifficultyScore {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<DifficultyScore> for u8 {
    fn from(score: DifficultyScore) -> Self {
        score.0
    }
}

impl fmt::Display for DifficultyScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structure scaled by a rarity-weighted multiplier, before rounding and clamping.
///
/// Rarity only amplifies structure, so a single repeated letter (low structure)
/// can never outscore the same number of distinct letters, however rare it is.
pub fn raw_combined(rarity: SubScore, structure: SubScore) -> f64 {
    let multiplier = STRUCTURE_WEIGHT + RARITY_WEIGHT * rarity.value() / SubScore::MAX.value();
    structure.value() * multiplier
}

pub fn combine(rarity: SubScore, structure: SubScore) -> DifficultyScore {
    DifficultyScore::from_raw(raw_combined(rarity, structure))
}
