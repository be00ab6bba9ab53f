//! Character-level helpers for Turkish Latin text and Arabic-script output.

/// Lowercase a single character using Turkish casing rules.
///
/// `I` folds to dotless `ı` and `İ` folds to plain `i`; every other character
/// goes through Unicode lowercasing. Unicode maps `İ` to `i` + U+0307, which
/// would leave a stray combining dot in lookup keys.
pub fn turkish_lower(c: char) -> impl Iterator<Item = char> {
    let special = match c {
        'I' => Some('ı'),
        'İ' => Some('i'),
        _ => None,
    };
    let rest = match special {
        Some(_) => None,
        None => Some(c.to_lowercase()),
    };
    special.into_iter().chain(rest.into_iter().flatten())
}

/// Case-fold a word for dictionary-key comparison.
pub fn fold_case(s: &str) -> String {
    s.chars().flat_map(turkish_lower).collect()
}

/// Back vowels of Turkish: a, ı, o, u (lowercase only).
pub fn is_back_vowel(c: char) -> bool {
    matches!(c, 'a' | 'ı' | 'o' | 'u')
}

/// Arabic block plus the Arabic Presentation Forms blocks.
pub fn is_arabic_script(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
        || ('\u{FB50}'..='\u{FDFF}').contains(&c)
        || ('\u{FE70}'..='\u{FEFF}').contains(&c)
}
