use std::fs;
use std::path::Path;

use harf_core::settings::{self, Settings};

use super::CliError;

pub fn settings_export() -> &'static str {
    settings::default_toml()
}

/// Parse and validate a settings file, or return the defaults without one.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    match path {
        Some(p) => {
            let content = fs::read_to_string(p)?;
            Ok(settings::parse_settings_toml(&content)?)
        }
        None => Ok(settings::parse_settings_toml(settings::default_toml())?),
    }
}

pub fn settings_validate(path: &Path) -> Result<String, CliError> {
    let s = load_settings(Some(path))?;
    Ok(format!(
        "OK: session.debounce_ms={}, lookup.timeout_ms={}, lookup.endpoint={}",
        s.session.debounce_ms,
        s.lookup.timeout_ms,
        s.lookup.endpoint.as_deref().unwrap_or("(none)")
    ))
}
