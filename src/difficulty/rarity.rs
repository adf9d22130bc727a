use super::{Analyzer, SubScore};
use crate::language::{FrequencyTable, NormalizedText};

/// Share of the sub-score driven by the average letter
pub const MEAN_WEIGHT: f64 = 0.7;
/// Share driven by the single rarest letter
pub const PEAK_WEIGHT: f64 = 0.3;

/// Inverse-frequency analyzer: phrases built from uncommon letters score higher.
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterRarity;

impl Analyzer for LetterRarity {
    fn analyze(&self, text: &NormalizedText, table: &FrequencyTable) -> SubScore {
        rarity_score(text, table)
    }
}

/// Rarity of one letter in `[0, 1]`: 0 for the most common letter, approaching
/// 1 for the least common. Letters the table doesn't know count as rarest.
pub fn letter_rarity(letter: char, table: &FrequencyTable) -> f64 {
    let peak = table.peak();
    match table.frequency(letter) {
        Some(freq) if peak > 0.0 => (1.0 - freq / peak).clamp(0.0, 1.0),
        _ => 1.0,
    }
}

pub fn rarity_score(text: &NormalizedText, table: &FrequencyTable) -> SubScore {
    if text.is_empty() {
        return SubScore::MIN;
    }

    let (total, peak) = text
        .letters()
        .map(|letter| letter_rarity(letter, table))
        .fold((0.0, 0.0_f64), |(total, peak), rarity| {
            (total + rarity, peak.max(rarity))
        });
    let mean = total / text.len() as f64;

    SubScore::new(100.0 * (MEAN_WEIGHT * mean + PEAK_WEIGHT * peak))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{normalize, Language};

    fn english(text: &str) -> SubScore {
        rarity_score(
            &normalize(text, Language::English),
            Language::English.frequencies(),
        )
    }

    #[test]
    fn test_empty_is_minimum() {
        assert_eq!(english(""), SubScore::MIN);
        assert_eq!(english("123 !?"), SubScore::MIN);
    }

    #[test]
    fn test_most_common_letter_is_zero() {
        let table = Language::English.frequencies();
        assert_eq!(letter_rarity('e', table), 0.0);
        assert_eq!(english("eee"), SubScore::MIN);
    }

    #[test]
    fn test_rare_letters_score_higher() {
        let table = Language::English.frequencies();
        assert!(letter_rarity('z', table) > letter_rarity('q', table));
        assert!(letter_rarity('q', table) > letter_rarity('t', table));
        assert!(english("z") > english("a"));
    }

    #[test]
    fn test_unknown_letter_counts_as_rarest() {
        let table = Language::English.frequencies();
        assert_eq!(letter_rarity('ß', table), 1.0);
    }

    #[test]
    fn test_substituting_rarer_letter_strictly_increases() {
        // same length, one letter swapped for a rarer one each step
        let steps = ["tea", "tez", "jez", "jqz"];
        for pair in steps.windows(2) {
            assert!(
                english(pair[1]) > english(pair[0]),
                "{} should beat {}",
                pair[1],
                pair[0]
            );
        }
    }

    #[test]
    fn test_known_value() {
        // 'a' = 1 - 0.08167 / 0.12702
        let expected = 100.0 * (1.0 - 0.08167 / 0.12702);
        assert!((english("a").value() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_swedish_diacritics_are_scored() {
        let table = Language::Swedish.frequencies();
        let text = normalize("åäö", Language::Swedish);
        let sub = rarity_score(&text, table);
        assert!(sub > SubScore::MIN);
        assert!(letter_rarity('ö', table) > letter_rarity('a', table));
    }

    #[test]
    fn test_analyzer_trait_delegates() {
        let table = Language::English.frequencies();
        let text = normalize("quiz", Language::English);
        assert_eq!(LetterRarity.analyze(&text, table), rarity_score(&text, table));
    }
}
