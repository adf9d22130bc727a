use std::fmt;

use super::core::Language;

/// Lowercase letters drawn only from one language's alphabet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NormalizedText {
    text: String,
    letter_count: usize,
}

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of letters, not bytes
    pub fn len(&self) -> usize {
        self.letter_count
    }

    pub fn is_empty(&self) -> bool {
        self.letter_count == 0
    }

    pub fn letters(&self) -> std::str::Chars<'_> {
        self.text.chars()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq<&str> for NormalizedText {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl FromIterator<char> for NormalizedText {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut text = String::new();
        let mut letter_count = 0;
        for letter in iter {
            text.push(letter);
            letter_count += 1;
        }
        Self { text, letter_count }
    }
}

/// Fold `text` to lowercase and keep only letters of `language`'s alphabet.
///
/// Diacritic letters that belong to the alphabet (å, ä, ö for Swedish) are kept
/// as they are; everything else, including other accented letters, is dropped.
pub fn normalize(text: &str, language: Language) -> NormalizedText {
    let table = language.frequencies();
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|letter| table.contains(*letter))
        .collect()
}
