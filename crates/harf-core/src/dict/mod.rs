//! Dictionary boundary consumed by the conversion pipeline.
//!
//! A `DictionaryClient` answers one batch lookup per conversion request.
//! Words absent from the returned mapping fall back to rule-based
//! transliteration; a failed lookup is treated as an empty mapping.

mod mapping;

pub use mapping::DictionaryMapping;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("dictionary transport error: {0}")]
    Transport(String),

    #[error("dictionary lookup timed out")]
    Timeout,

    #[error("malformed dictionary response: {0}")]
    Decode(String),

    #[error("dictionary storage error: {0}")]
    Storage(String),
}

pub trait DictionaryClient: Send + Sync {
    /// Look up the distinct, case-folded words of one conversion request.
    ///
    /// Missing words are simply absent from the result.
    fn batch_lookup(&self, words: &[String]) -> Result<DictionaryMapping, LookupError>;
}

impl<T: DictionaryClient + ?Sized> DictionaryClient for std::sync::Arc<T> {
    fn batch_lookup(&self, words: &[String]) -> Result<DictionaryMapping, LookupError> {
        (**self).batch_lookup(words)
    }
}

/// A client with no entries; every word uses the fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyDictionary;

impl DictionaryClient for EmptyDictionary {
    fn batch_lookup(&self, _words: &[String]) -> Result<DictionaryMapping, LookupError> {
        Ok(DictionaryMapping::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_empty_dictionary() {
        let words = vec!["ev".to_string(), "kapı".to_string()];
        let mapping = EmptyDictionary.batch_lookup(&words).unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_arc_forwarding() {
        let client: Arc<dyn DictionaryClient> = Arc::new(EmptyDictionary);
        assert!(client.batch_lookup(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LookupError::Timeout.to_string(),
            "dictionary lookup timed out"
        );
        assert_eq!(
            LookupError::Transport("refused".into()).to_string(),
            "dictionary transport error: refused"
        );
    }
}
