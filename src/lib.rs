//! Latin-to-Ottoman transliteration engine.
//!
//! Re-exports the core pipeline and the live-typing session, and adds the
//! pieces that need real threads or network access: a background lookup
//! worker and an HTTP dictionary client.

pub mod async_worker;
pub mod http_client;
mod trace_init;

use std::path::Path;
use std::sync::Arc;

pub use harf_core;
pub use harf_session;
pub use trace_init::{init_tracing, TraceTarget};

use harf_core::dict::{DictionaryClient, EmptyDictionary};
use harf_core::settings::LookupSettings;
use harf_core::store::{StoreError, WordStore};
use http_client::HttpDictionaryClient;

/// Pick the dictionary a host should use.
///
/// A configured endpoint wins; otherwise a local word-store file if given;
/// otherwise no dictionary (every word uses the fallback).
pub fn open_dictionary(
    settings: &LookupSettings,
    store_path: Option<&Path>,
) -> Result<Arc<dyn DictionaryClient>, StoreError> {
    if let Some(client) = HttpDictionaryClient::from_settings(settings) {
        return Ok(Arc::new(client));
    }
    match store_path {
        Some(path) => Ok(Arc::new(WordStore::open(path)?)),
        None => Ok(Arc::new(EmptyDictionary)),
    }
}
