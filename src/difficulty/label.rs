use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::combiner::DifficultyScore;

/// Qualitative difficulty bands, ordered easiest first
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
pub enum DifficultyLabel {
    #[serde(rename = "Very Easy")]
    #[strum(serialize = "Very Easy")]
    VeryEasy,
    Easy,
    Medium,
    Hard,
    #[serde(rename = "Very Hard")]
    #[strum(serialize = "Very Hard")]
    VeryHard,
}

/// Inclusive upper bound of each band; the first band starts at `DifficultyScore::MIN`
const BANDS: [(u8, DifficultyLabel); 5] = [
    (20, DifficultyLabel::VeryEasy),
    (40, DifficultyLabel::Easy),
    (60, DifficultyLabel::Medium),
    (80, DifficultyLabel::Hard),
    (100, DifficultyLabel::VeryHard),
];

impl DifficultyLabel {
    pub const ALL: [DifficultyLabel; 5] = [
        DifficultyLabel::VeryEasy,
        DifficultyLabel::Easy,
        DifficultyLabel::Medium,
        DifficultyLabel::Hard,
        DifficultyLabel::VeryHard,
    ];

    pub fn for_score(score: DifficultyScore) -> Self {
        let value = score.value();
        BANDS
            .iter()
            .find(|(upper, _)| value <= *upper)
            .map(|(_, label)| *label)
            .unwrap_or(DifficultyLabel::VeryHard)
    }

    /// Scores that map to this label
    pub fn range(self) -> RangeInclusive<u8> {
        let index = BANDS
            .iter()
            .position(|(_, label)| *label == self)
            .unwrap_or(BANDS.len() - 1);
        let lower = match index {
            0 => DifficultyScore::MIN.value(),
            i => BANDS[i - 1].0 + 1,
        };
        lower..=BANDS[index].0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_of(value: i64) -> DifficultyLabel {
        DifficultyLabel::for_score(DifficultyScore::new(value))
    }

    #[test]
    fn test_reference_points() {
        assert_eq!(label_of(10), DifficultyLabel::VeryEasy);
        assert_eq!(label_of(50), DifficultyLabel::Medium);
        assert_eq!(label_of(90), DifficultyLabel::VeryHard);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(label_of(1), DifficultyLabel::VeryEasy);
        assert_eq!(label_of(20), DifficultyLabel::VeryEasy);
        assert_eq!(label_of(21), DifficultyLabel::Easy);
        assert_eq!(label_of(40), DifficultyLabel::Easy);
        assert_eq!(label_of(41), DifficultyLabel::Medium);
        assert_eq!(label_of(61), DifficultyLabel::Hard);
        assert_eq!(label_of(80), DifficultyLabel::Hard);
        assert_eq!(label_of(81), DifficultyLabel::VeryHard);
        assert_eq!(label_of(100), DifficultyLabel::VeryHard);
    }

    #[test]
    fn test_monotonic_and_exhaustive() {
        let mut previous = DifficultyLabel::VeryEasy;
        for value in 1..=100 {
            let label = label_of(value);
            assert!(label >= previous, "label dropped at {value}");
            assert!(label.range().contains(&(value as u8)));
            previous = label;
        }
    }

    #[test]
    fn test_ranges_tile_the_score_space() {
        let covered: usize = DifficultyLabel::ALL
            .iter()
            .map(|label| label.range().count())
            .sum();
        assert_eq!(covered, 100);
        assert_eq!(DifficultyLabel::VeryEasy.range(), 1..=20);
        assert_eq!(DifficultyLabel::VeryHard.range(), 81..=100);
    }

    #[test]
    fn test_display_names() {
        let names: Vec<String> = DifficultyLabel::ALL.iter().map(|l| l.to_string()).collect();
        assert_eq!(names, ["Very Easy", "Easy", "Medium", "Hard", "Very Hard"]);
    }

    #[test]
    fn test_serde_names_match_display() {
        for label in DifficultyLabel::ALL {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{label}\""));
        }
    }
}
