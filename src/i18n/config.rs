//! Localization settings read from `config/i18n.yml`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::i18n::locale::Locale;

/// Default translation endpoint (Google Translate, free `gtx` client).
pub const DEFAULT_TRANSLATION_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Localization configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale used when neither the path nor a preference decides.
    pub default_locale: Locale,
    /// Translation client settings.
    pub translation: TranslationSettings,
    /// Bundle keys whose subtrees are never translated (file paths, URLs).
    pub protected_keys: Vec<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::SOURCE,
            translation: TranslationSettings::default(),
            protected_keys: vec!["images".to_string()],
        }
    }
}

/// Settings for the runtime translation client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TranslationSettings {
    /// Translation service URL.
    pub endpoint: String,
    /// Upper bound on a single translation request, in milliseconds.
    pub timeout_ms: u64,
    /// Trimmed strings shorter than this many characters are never sent.
    pub min_length: usize,
    /// Whether a fallback result is memoized like a real translation.
    pub cache_fallbacks: bool,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TRANSLATION_ENDPOINT.to_string(),
            timeout_ms: 3000,
            min_length: 3,
            cache_fallbacks: true,
        }
    }
}

impl TranslationSettings {
    /// What: Request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl I18nConfig {
    /// What: Load configuration from a YAML file.
    ///
    /// Inputs:
    /// - `path`: Path to `i18n.yml`.
    ///
    /// Output:
    /// - Parsed configuration; defaults when the file is missing or invalid.
    ///
    /// Details:
    /// - Unknown keys are ignored; missing keys take their default values.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "i18n config not readable, using defaults");
                return Self::default();
            }
        };
        Self::from_yaml(&contents).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "invalid i18n config, using defaults");
            Self::default()
        })
    }

    /// What: Parse configuration from YAML text.
    ///
    /// # Errors
    /// - Returns `Err` when the YAML is malformed or a value has the wrong type.
    pub fn from_yaml(contents: &str) -> Result<Self, serde_norway::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_norway::from_str(contents)
    }
}
