//! In-memory word table with exact, prefix and substring search.
//!
//! Stands in for the hosted dictionary service: it supports single-word
//! create/lookup/search and answers batch lookups for the conversion
//! pipeline. Uses `RwLock` for interior mutability so words can be added
//! while a lookup worker holds a shared reference.


use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dict::{DictionaryClient, DictionaryMapping, LookupError};
use crate::unicode::fold_case;

const MAGIC: &[u8; 4] = b"HRFD";
const VERSION: u8 = 1;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected HRFD)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty {0}")]
    Empty(&'static str),
}

#[derive(Serialize, Deserialize)]
struct WordRecord {
    word: String,
    script: String,
}

/// One dictionary row as returned by search operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordEntry {
    pub word: String,
    pub script: String,
}

/// Trimmed, case-folded key and trimmed script, or `Empty` if either is blank.
fn normalize_row(word: &str, script: &str) -> Result<(String, String), StoreError> {
    let key = fold_case(word.trim());
    let script = script.trim();
    if key.is_empty() {
        return Err(StoreError::Empty("word"));
    }
    if script.is_empty() {
        return Err(StoreError::Empty("script"));
    }
    Ok((key, script.to_string()))
}

#[derive(Default)]
pub struct WordStore {
    entries: RwLock<HashMap<String, String>>,
}

impl WordStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Writers never leave the map half-updated, so a poisoned lock is recovered.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Create a word. Returns `true` if newly added, `false` if the word
    /// already exists (the existing script form is kept).
    pub fn add(&self, word: &str, script: &str) -> Result<bool, StoreError> {
        let (key, script) = normalize_row(word, script)?;
        let mut map = self.write();
        if map.contains_key(&key) {
            return Ok(false);
        }
        map.insert(key, script);
        Ok(true)
    }

    /// Insert or replace a word's script form.
    pub fn upsert(&self, word: &str, script: &str) -> Result<(), StoreError> {
        let (key, script) = normalize_row(word, script)?;
        self.write().insert(key, script);
        Ok(())
    }

    /// Remove a word. Returns `true` if it was present.
    pub fn remove(&self, word: &str) -> bool {
        self.write().remove(&fold_case(word)).is_some()
    }

    /// Exact lookup (case-insensitive).
    pub fn get(&self, word: &str) -> Option<String> {
        self.read().get(&fold_case(word)).cloned()
    }

    /// Words starting with `prefix`, sorted, at most `limit`.
    pub fn search_prefix(&self, prefix: &str, limit: usize) -> Vec<WordEntry> {
        let prefix = fold_case(prefix);
        self.search_by(limit, |w| w.starts_with(&prefix))
    }

    /// Words containing `needle` anywhere, sorted, at most `limit`.
    pub fn search_contains(&self, needle: &str, limit: usize) -> Vec<WordEntry> {
        let needle = fold_case(needle);
        self.search_by(limit, |w| w.contains(&needle))
    }

    fn search_by(&self, limit: usize, pred: impl Fn(&str) -> bool) -> Vec<WordEntry> {
        let map = self.read();
        let mut hits: Vec<WordEntry> = map
            .iter()
            .filter(|(w, _)| pred(w))
            .map(|(w, s)| WordEntry {
                word: w.clone(),
                script: s.clone(),
            })
            .collect();
        hits.sort_by(|a, b| a.word.cmp(&b.word));
        hits.truncate(limit);
        hits
    }

    /// All entries sorted by word.
    pub fn list(&self) -> Vec<WordEntry> {
        self.search_by(usize::MAX, |_| true)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Build a store from a JSON object `{ "word": "script", ... }`.
    ///
    /// Rows are trimmed like `add`; any row with an empty word or script
    /// rejects the whole document.
    pub fn from_json_map(json: &str) -> Result<Self, StoreError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let store = Self::new();
        for (word, script) in raw {
            store.upsert(&word, &script)?;
        }
        Ok(store)
    }

    /// Serialize to bytes (HRFD format).
    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        let records: Vec<WordRecord> = self
            .list()
            .into_iter()
            .map(|e| WordRecord {
                word: e.word,
                script: e.script,
            })
            .collect();

        let body = bincode::serialize(&records).map_err(StoreError::Serialize)?;
        let mut buf = Vec::with_capacity(5 + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    /// Deserialize from bytes (HRFD format).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        if bytes.len() < 5 {
            return Err(StoreError::InvalidHeader);
        }
        if &bytes[0..4] != MAGIC {
            return Err(StoreError::InvalidMagic);
        }
        if bytes[4] != VERSION {
            return Err(StoreError::UnsupportedVersion(bytes[4]));
        }
        let records: Vec<WordRecord> =
            bincode::deserialize(&bytes[5..]).map_err(StoreError::Deserialize)?;

        let map: HashMap<String, String> = records
            .into_iter()
            .map(|r| (fold_case(&r.word), r.script))
            .collect();
        Ok(Self {
            entries: RwLock::new(map),
        })
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Load from file. Returns an empty store if the file does not exist.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        match fs::read(path) {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl DictionaryClient for WordStore {
    fn batch_lookup(&self, words: &[String]) -> Result<DictionaryMapping, LookupError> {
        let map = self.read();
        let mapping: DictionaryMapping = words
            .iter()
            .filter_map(|w| {
                let key = fold_case(w);
                map.get(&key).map(|s| (key, s.clone()))
            })
            .collect();
        debug!(requested = words.len(), hits = mapping.len(), "word store lookup");
        Ok(mapping)
    }
}
