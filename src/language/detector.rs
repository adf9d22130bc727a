use super::core::Language;

/// Guess the language of `text` from the presence of letters the default
/// alphabet lacks. A single such letter is enough; anything without one is
/// reported as the default language.
///
/// This only separates the default language from one other modeled language.
/// Adding a language whose extra letters overlap another's needs a better test.
pub fn detect(text: &str) -> Language {
    text.chars()
        .flat_map(char::to_lowercase)
        .find_map(distinguishing_language)
        .unwrap_or(Language::DEFAULT)
}

/// The first non-default language whose alphabet has `letter` while the default one doesn't.
fn distinguishing_language(letter: char) -> Option<Language> {
    if Language::DEFAULT.frequencies().contains(letter) {
        return None;
    }
    Language::ALL
        .into_iter()
        .filter(|language| !language.is_default())
        .find(|language| language.frequencies().contains(letter))
}

/// Letters that mark `language` as distinct from the default one
pub fn distinguishing_letters(language: Language) -> Vec<char> {
    let default = Language::DEFAULT.frequencies();
    language
        .frequencies()
        .alphabet()
        .filter(|letter| !default.contains(*letter))
        .collect()
}
