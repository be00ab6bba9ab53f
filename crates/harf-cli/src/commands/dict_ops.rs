use std::fs;
use std::path::Path;

use harf_core::store::{WordEntry, WordStore};

use super::CliError;

pub fn default_store_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    format!("{home}/.local/share/harf/words.hrfd")
}

/// Create a word. Returns `false` if it already existed.
pub fn dict_add(path: &Path, word: &str, script: &str) -> Result<bool, CliError> {
    let store = WordStore::open(path)?;
    let added = store.add(word, script)?;
    if added {
        store.save(path)?;
    }
    Ok(added)
}

pub fn dict_remove(path: &Path, word: &str) -> Result<bool, CliError> {
    let store = WordStore::open(path)?;
    let removed = store.remove(word);
    if removed {
        store.save(path)?;
    }
    Ok(removed)
}

pub fn dict_get(path: &Path, word: &str) -> Result<Option<String>, CliError> {
    Ok(WordStore::open(path)?.get(word))
}

pub fn dict_search(
    path: &Path,
    query: &str,
    contains: bool,
    limit: usize,
) -> Result<Vec<WordEntry>, CliError> {
    let store = WordStore::open(path)?;
    Ok(if contains {
        store.search_contains(query, limit)
    } else {
        store.search_prefix(query, limit)
    })
}

pub fn dict_list(path: &Path) -> Result<Vec<WordEntry>, CliError> {
    Ok(WordStore::open(path)?.list())
}

/// Merge a JSON object `{ word: script }` into the store, replacing
/// existing entries. Returns the number of words imported.
pub fn dict_import(path: &Path, json_file: &Path) -> Result<usize, CliError> {
    let incoming = WordStore::from_json_map(&fs::read_to_string(json_file)?)?;
    let store = WordStore::open(path)?;
    let entries = incoming.list();
    for e in &entries {
        store.upsert(&e.word, &e.script)?;
    }
    store.save(path)?;
    Ok(entries.len())
}

pub fn format_entries(entries: &[WordEntry]) -> String {
    if entries.is_empty() {
        return "(empty)\n".to_string();
    }
    let mut out = String::new();
    for e in entries {
        out.push_str(&format!("{}\t{}\n", e.word, e.script));
    }
    out.push_str("---\n");
    out.push_str(&format!("{} entries\n", entries.len()));
    out
}
