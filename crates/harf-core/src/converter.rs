//! Reassembly of converted text from tokens, dictionary hits and fallback output.

use serde::Serialize;
use tracing::{debug, warn};

use crate::dict::{DictionaryClient, DictionaryMapping};
use crate::fallback::fallback;
use crate::tokenizer::{distinct_keys, tokenize, Token, TokenKind};
use crate::unicode::fold_case;

/// Where an output segment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Source {
    DictionaryHit,
    Fallback,
    Passthrough,
}

/// Output for a single input token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub input: String,
    pub output: String,
    pub source: Source,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub segments: Vec<Segment>,
    /// True when the dictionary lookup failed and every word used the fallback.
    pub degraded: bool,
}

impl ConversionResult {
    /// Concatenated output of all segments.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.output.as_str()).collect()
    }

    pub fn count(&self, source: Source) -> usize {
        self.segments.iter().filter(|s| s.source == source).count()
    }
}

fn resolve_token(token: &Token, mapping: &DictionaryMapping) -> Segment {
    let (output, source) = match token.kind {
        TokenKind::Whitespace | TokenKind::Punctuation => {
            (token.text.clone(), Source::Passthrough)
        }
        TokenKind::Word => match mapping.get(&fold_case(&token.text)) {
            Some(script) => (script.to_string(), Source::DictionaryHit),
            None => (fallback(&token.text), Source::Fallback),
        },
    };
    Segment {
        input: token.text.clone(),
        output,
        source,
    }
}

/// Resolve every token: dictionary first, fallback second, passthrough for
/// whitespace and punctuation.
pub fn resolve(tokens: &[Token], mapping: &DictionaryMapping) -> ConversionResult {
    ConversionResult {
        segments: tokens.iter().map(|t| resolve_token(t, mapping)).collect(),
        degraded: false,
    }
}

/// Rebuild the converted string from `tokens`.
pub fn reassemble(tokens: &[Token], mapping: &DictionaryMapping) -> String {
    resolve(tokens, mapping).text()
}

/// Full pipeline: tokenize, one batch lookup, resolve.
///
/// A failed lookup degrades to an all-fallback result; it never fails the
/// conversion.
pub fn convert(input: &str, client: &dyn DictionaryClient) -> ConversionResult {
    let tokens = tokenize(input);
    let words = distinct_keys(&tokens);
    if words.is_empty() {
        return resolve(&tokens, &DictionaryMapping::new());
    }

    match client.batch_lookup(&words) {
        Ok(mapping) => {
            debug!(words = words.len(), hits = mapping.len(), "batch lookup");
            resolve(&tokens, &mapping)
        }
        Err(e) => {
            warn!(error = %e, words = words.len(), "dictionary lookup failed; using fallback");
            let mut result = resolve(&tokens, &DictionaryMapping::new());
            result.degraded = true;
            result
        }
    }
}

/// All-fallback rendering, as if the dictionary were empty.
pub fn convert_fallback_only(input: &str) -> String {
    reassemble(&tokenize(input), &DictionaryMapping::new())
}
