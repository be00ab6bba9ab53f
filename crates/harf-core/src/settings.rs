//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
///
/// Falls back to built-in defaults if the TOML fails to parse.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).unwrap_or_default()
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub lookup: LookupSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Quiet period after the last edit before a lookup is issued. Default 250.
    pub debounce_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self { debounce_ms: 250 }
    }
}

impl SessionSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    /// Round-trip bound for one batch lookup. Default 3000.
    pub timeout_ms: u64,
    /// Batch-lookup URL of the dictionary service. `None` means no remote
    /// dictionary is configured.
    pub endpoint: Option<String>,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 3000,
            endpoint: None,
        }
    }
}

impl LookupSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
    /// File name of the JSON trace inside the log directory.
    pub file: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "harf_engine=debug,harf_core=debug,harf_session=debug".to_string(),
            file: "harf-trace.jsonl".to_string(),
        }
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(session.debounce_ms);
    check_positive!(lookup.timeout_ms);

    if s.log.filter.trim().is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "log.filter".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if s.log.file.trim().is_empty() || s.log.file.contains(['/', '\\']) {
        return Err(SettingsError::InvalidValue {
            field: "log.file".to_string(),
            reason: "must be a bare file name".to_string(),
        });
    }

    if let Some(endpoint) = &s.lookup.endpoint {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(SettingsError::InvalidValue {
                field: "lookup.endpoint".to_string(),
                reason: "must be an http:// or https:// URL".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.session.debounce_ms, 250);
        assert_eq!(s.session.debounce(), Duration::from_millis(250));
        assert_eq!(s.lookup.timeout_ms, 3000);
        assert!(s.lookup.endpoint.is_none());
    }

    #[test]
    fn log_section() {
        let s = parse_settings_toml("[log]\nfilter = \"harf_core=trace\"\n").unwrap();
        assert_eq!(s.log.filter, "harf_core=trace");
        assert_eq!(s.log.file, "harf-trace.jsonl");

        let err = parse_settings_toml("[log]\nfile = \"../x.jsonl\"\n").unwrap_err();
        match err {
            SettingsError::InvalidValue { field, .. } => assert_eq!(field, "log.file"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(parse_settings_toml("[log]\nfilter = \" \"\n").is_err());
    }

    #[test]
    fn missing_sections_use_defaults() {
        let s = parse_settings_toml("").unwrap();
        assert_eq!(s.session.debounce_ms, 250);
        assert_eq!(s.lookup.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn partial_override() {
        let s = parse_settings_toml(
            r#"
[session]
debounce_ms = 400

[lookup]
endpoint = "https://example.org/batch"
"#,
        )
        .unwrap();
        assert_eq!(s.session.debounce_ms, 400);
        assert_eq!(s.lookup.timeout_ms, 3000);
        assert_eq!(s.lookup.endpoint.as_deref(), Some("https://example.org/batch"));
    }

    #[test]
    fn zero_debounce_rejected() {
        let err = parse_settings_toml("[session]\ndebounce_ms = 0\n").unwrap_err();
        match err {
            SettingsError::InvalidValue { field, .. } => assert_eq!(field, "session.debounce_ms"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_endpoint_rejected() {
        let err = parse_settings_toml("[lookup]\nendpoint = \"ftp://x\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
    }

    #[test]
    fn invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn wrong_type() {
        let err = parse_settings_toml("[session]\ndebounce_ms = \"fast\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn default_toml_accessor() {
        assert_eq!(default_toml(), DEFAULT_SETTINGS_TOML);
    }
}
