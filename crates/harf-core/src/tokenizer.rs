//! Lossless splitting of free text into word, whitespace and punctuation runs.
//!
//! Concatenating the `text` of every returned token reproduces the input
//! exactly, so the reassembler can rebuild the layout around converted words.

use std::collections::HashSet;

use serde::Serialize;

use crate::unicode::fold_case;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Word,
    Whitespace,
    Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// A word token paired with its case-folded dictionary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateWord<'a> {
    pub token: &'a Token,
    pub key: String,
}

pub fn is_punctuation(c: char) -> bool {
    matches!(c, '.' | ',' | '?' | '!' | ':' | ';' | '(' | ')')
}

fn classify(c: char) -> TokenKind {
    if c.is_whitespace() {
        TokenKind::Whitespace
    } else if is_punctuation(c) {
        TokenKind::Punctuation
    } else {
        TokenKind::Word
    }
}

/// Split `input` into maximal runs of the same [`TokenKind`].
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut start = 0;
    let mut current: Option<TokenKind> = None;

    for (i, c) in input.char_indices() {
        let kind = classify(c);
        match current {
            Some(k) if k == kind => {}
            Some(k) => {
                tokens.push(Token {
                    text: input[start..i].to_string(),
                    kind: k,
                });
                start = i;
                current = Some(kind);
            }
            None => current = Some(kind),
        }
    }

    if let Some(k) = current {
        tokens.push(Token {
            text: input[start..].to_string(),
            kind: k,
        });
    }

    tokens
}

/// Word tokens with their lookup keys, in input order (duplicates kept).
pub fn candidate_words(tokens: &[Token]) -> Vec<CandidateWord<'_>> {
    tokens
        .iter()
        .filter(|t| t.is_word())
        .map(|t| CandidateWord {
            token: t,
            key: fold_case(&t.text),
        })
        .collect()
}

/// Distinct case-folded word keys in first-seen order.
///
/// This is the payload of one batch lookup.
pub fn distinct_keys(tokens: &[Token]) -> Vec<String> {
    let mut seen = HashSet::new();
    candidate_words(tokens)
        .into_iter()
        .filter_map(|cw| {
            if seen.insert(cw.key.clone()) {
                Some(cw.key)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_single_word() {
        let tokens = tokenize("kitap");
        assert_eq!(texts(&tokens), vec!["kitap"]);
        assert_eq!(kinds(&tokens), vec![TokenKind::Word]);
    }

    #[test]
    fn test_sentence() {
        let tokens = tokenize("Ev, kapı ve ana.");
        assert_eq!(
            texts(&tokens),
            vec!["Ev", ",", " ", "kapı", " ", "ve", " ", "ana", "."]
        );
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Word,
                TokenKind::Punctuation,
                TokenKind::Whitespace,
                TokenKind::Word,
                TokenKind::Whitespace,
                TokenKind::Word,
                TokenKind::Whitespace,
                TokenKind::Word,
                TokenKind::Punctuation,
            ]
        );
    }

    #[test]
    fn test_runs_are_merged() {
        let tokens = tokenize("ne?!  \n\tevet...");
        assert_eq!(texts(&tokens), vec!["ne", "?!", "  \n\t", "evet", "..."]);
    }

    #[test]
    fn test_parentheses_and_colons() {
        let tokens = tokenize("(bir):iki;");
        assert_eq!(texts(&tokens), vec!["(", "bir", "):", "iki", ";"]);
    }

    #[test]
    fn test_other_symbols_stay_in_words() {
        let tokens = tokenize("Ahmet'in 1923-yılı");
        assert_eq!(texts(&tokens), vec!["Ahmet'in", " ", "1923-yılı"]);
    }

    #[test]
    fn test_leading_and_trailing_whitespace() {
        let tokens = tokenize("  ev ");
        assert_eq!(texts(&tokens), vec!["  ", "ev", " "]);
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Whitespace, TokenKind::Word, TokenKind::Whitespace]
        );
    }

    #[test]
    fn test_candidate_words_fold_case() {
        let tokens = tokenize("İstanbul IRMAK");
        let words = candidate_words(&tokens);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].key, "istanbul");
        assert_eq!(words[0].token.text, "İstanbul");
        assert_eq!(words[1].key, "ırmak");
    }

    #[test]
    fn test_distinct_keys_dedupes_case_insensitively() {
        let tokens = tokenize("Ev ev EV kapı, ev.");
        assert_eq!(distinct_keys(&tokens), vec!["ev", "kapı"]);
    }

    #[test]
    fn test_distinct_keys_without_words() {
        let tokens = tokenize(" .,; ");
        assert!(distinct_keys(&tokens).is_empty());
    }

    proptest! {
        #[test]
        fn prop_tokenize_is_lossless(input in ".*") {
            let joined: String = tokenize(&input).iter().map(|t| t.text.as_str()).collect();
            prop_assert_eq!(joined, input);
        }

        #[test]
        fn prop_adjacent_tokens_differ_in_kind(input in "[a-zçğıöşü .,?!:;()\t\n]*") {
            let tokens = tokenize(&input);
            for pair in tokens.windows(2) {
                prop_assert_ne!(pair[0].kind, pair[1].kind);
            }
            for t in &tokens {
                prop_assert!(!t.text.is_empty());
            }
        }
    }
}
