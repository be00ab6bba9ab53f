pub mod converter;
pub mod dict;
pub mod fallback;
pub mod settings;
pub mod store;
pub mod tokenizer;
pub mod unicode;
