use serde::{Deserialize, Serialize};

use super::frequency::{table_for, FrequencyTable};

/// Languages with a frequency table. English is the fallback for everything else.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Swedish,
}

impl Language {
    pub const DEFAULT: Language = Language::English;
    pub const ALL: [Language; 2] = [Language::English, Language::Swedish];

    /// Parse a caller supplied tag. Unknown, empty or garbage tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => Some(Language::English),
            "sv" | "se" | "swe" | "swedish" | "svenska" => Some(Language::Swedish),
            _ => None,
        }
    }

    /// ISO 639-1 code
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Swedish => "sv",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Swedish => "swedish",
        }
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }

    pub fn frequencies(self) -> &'static FrequencyTable {
        table_for(self)
    }
}
