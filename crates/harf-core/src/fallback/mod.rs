//! Rule-based Latin-to-Ottoman transliteration for words with no dictionary entry.
//!
//! Each letter maps independently through a fixed table. Five letters have a
//! back and a front form, chosen by the word's vowel harmony. A word-initial
//! `a` is written with the vowel-initial marker. There are no digraph,
//! gemination or loanword rules.

mod table;

pub use table::{glyph, Glyph, VOWEL_INITIAL_MARKER};

use serde::Serialize;

use crate::unicode::{fold_case, is_back_vowel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmonyClass {
    Back,
    Front,
}

/// `Back` if the word contains any of a, ı, o, u (case-insensitive).
pub fn harmony_class(word: &str) -> HarmonyClass {
    harmony_of_folded(&fold_case(word))
}

fn harmony_of_folded(folded: &str) -> HarmonyClass {
    if folded.chars().any(is_back_vowel) {
        HarmonyClass::Back
    } else {
        HarmonyClass::Front
    }
}

/// Transliterate a single word into Ottoman script.
///
/// Pure and case-insensitive. Characters outside the table (digits,
/// Arabic script, symbols) are copied through.
pub fn fallback(word: &str) -> String {
    let folded = fold_case(word);
    let harmony = harmony_of_folded(&folded);

    let mut out = String::with_capacity(folded.len() * 2);
    for (i, c) in folded.chars().enumerate() {
        if i == 0 && c == 'a' {
            out.push(VOWEL_INITIAL_MARKER);
            continue;
        }
        match glyph(c) {
            Some(g) => out.push(g.select(harmony)),
            None => out.push(c),
        }
    }
    out
}
