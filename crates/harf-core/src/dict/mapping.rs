use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::unicode::fold_case;

/// Case-folded word → curated script form.
///
/// Keys are always folded on insertion, so a collaborator that returns
/// `"Kitap"` still matches the token `kitap`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, String>", into = "HashMap<String, String>")]
pub struct DictionaryMapping {
    entries: HashMap<String, String>,
}

impl DictionaryMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: &str, script: impl Into<String>) {
        self.entries.insert(fold_case(word), script.into());
    }

    /// Look up an already case-folded key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for DictionaryMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::new();
        for (k, v) in iter {
            m.insert(k.as_ref(), v);
        }
        m
    }
}

impl From<HashMap<String, String>> for DictionaryMapping {
    fn from(raw: HashMap<String, String>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<DictionaryMapping> for HashMap<String, String> {
    fn from(m: DictionaryMapping) -> Self {
        m.entries
    }
}
