use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::core::Language;

static LANG_DIR: Dir = include_dir!("src/lang");

static ENGLISH: OnceLock<FrequencyTable> = OnceLock::new();
static SWEDISH: OnceLock<FrequencyTable> = OnceLock::new();

/// On-disk shape of a `src/lang/*.json` table
#[derive(Deserialize, Clone, Debug)]
struct RawTable {
    name: String,
    code: String,
    letters: BTreeMap<String, f64>,
}

/// Relative letter frequencies for one language.
///
/// The key set doubles as the language alphabet: a letter the table does not
/// know is not part of the language as far as normalization is concerned.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyTable {
    pub name: String,
    pub code: String,
    letters: BTreeMap<char, f64>,
    peak: f64,
}

impl FrequencyTable {
    /// Build a table from `(letter, frequency)` pairs. Letters are stored lowercased.
    pub fn from_pairs<I>(name: &str, code: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, f64)>,
    {
        let letters: BTreeMap<char, f64> = pairs
            .into_iter()
            .filter(|(_, freq)| freq.is_finite() && *freq >= 0.0)
            .flat_map(|(letter, freq)| letter.to_lowercase().map(move |lower| (lower, freq)))
            .collect();
        let peak = letters.values().copied().fold(0.0, f64::max);

        Self {
            name: name.to_string(),
            code: code.to_string(),
            letters,
            peak,
        }
    }

    pub fn frequency(&self, letter: char) -> Option<f64> {
        self.letters.get(&letter).copied()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains_key(&letter)
    }

    /// Frequency of the most common letter
    pub fn peak(&self) -> f64 {
        self.peak
    }

    pub fn alphabet(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.letters.values().sum()
    }
}

impl From<RawTable> for FrequencyTable {
    fn from(raw: RawTable) -> Self {
        // Keys are single letters; anything longer is a data error and is skipped
        let pairs = raw.letters.into_iter().filter_map(|(key, freq)| {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) => Some((letter, freq)),
                _ => None,
            }
        });
        FrequencyTable::from_pairs(&raw.name, &raw.code, pairs)
    }
}

/// The immutable table for `language`, parsed on first use.
pub fn table_for(language: Language) -> &'static FrequencyTable {
    let cell = match language {
        Language::English => &ENGLISH,
        Language::Swedish => &SWEDISH,
    };
    cell.get_or_init(|| read_table_from_file(format!("{}.json", language.name())))
}

fn read_table_from_file(file_name: String) -> FrequencyTable {
    let file = LANG_DIR
        .get_file(&file_name)
        .expect("Frequency table not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret frequency table as a string");

    let raw: RawTable = from_str(file_as_str).expect("Unable to deserialize frequency table json");

    raw.into()
}
