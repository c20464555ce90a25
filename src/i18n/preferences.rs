//! Persisted language preference: long-lived store and cookie helpers.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::i18n::locale::Locale;

/// Cookie name read by the request router on locale-less paths.
pub const PREFERENCE_COOKIE: &str = "preferred-locale";
/// Lifetime of the preference cookie (one year).
pub const PREFERENCE_COOKIE_MAX_AGE_SECS: u64 = 31_536_000;

/// Errors raised while persisting a preference.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// The preference file or its directory could not be written.
    #[error("failed to write preference file {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The preference could not be encoded.
    #[error("failed to encode preference: {0}")]
    Encode(#[from] serde_norway::Error),
}

/// Read/write access to a stored language preference.
///
/// `load` returns the raw stored value; validating it is the resolver's job,
/// so a corrupted value behaves exactly like a missing one.
pub trait PreferenceStore: Send + Sync {
    /// What: Return the stored preference, if any.
    fn load(&self) -> Option<String>;

    /// What: Persist an explicit language choice.
    ///
    /// # Errors
    /// - Returns `Err` when the backing storage cannot be written.
    fn save(&self, locale: Locale) -> Result<(), PreferenceError>;
}

/// In-process preference store.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    /// Raw stored value.
    value: Mutex<Option<String>>,
}

impl MemoryPreferences {
    /// What: Create a store pre-filled with a raw value (which may be invalid).
    #[must_use]
    pub fn with_value(raw: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(raw.into())),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self) -> Option<String> {
        self.value.lock().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, locale: Locale) -> Result<(), PreferenceError> {
        if let Ok(mut guard) = self.value.lock() {
            *guard = Some(locale.as_str().to_string());
        }
        Ok(())
    }
}

/// On-disk document written by [`FilePreferences`].
#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceFile {
    /// Raw locale tag.
    #[serde(default)]
    preferred_locale: Option<String>,
}

/// Long-lived preference store backed by a small YAML file.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    /// Location of `preferences.yml`.
    path: PathBuf,
}

impl FilePreferences {
    /// What: Store at an explicit path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// What: Store at the default per-user location.
    ///
    /// Details:
    /// - `$XDG_CONFIG_HOME/alamendah/preferences.yml`, or `$HOME/.config/...` when unset.
    #[must_use]
    pub fn default_location() -> Self {
        Self::new(config_base_dir().join("alamendah").join("preferences.yml"))
    }

    /// What: Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferences {
    fn load(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        match serde_norway::from_str::<PreferenceFile>(&contents) {
            Ok(doc) => doc.preferred_locale,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ignoring unreadable preference file"
                );
                None
            }
        }
    }

    fn save(&self, locale: Locale) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| PreferenceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let doc = PreferenceFile {
            preferred_locale: Some(locale.as_str().to_string()),
        };
        let body = serde_norway::to_string(&doc)?;
        fs::write(&self.path, body).map_err(|source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), locale = %locale, "saved language preference");
        Ok(())
    }
}

/// What: Resolve the XDG config base directory.
///
/// Output:
/// - `$XDG_CONFIG_HOME` when set and non-blank, otherwise `$HOME/.config` (or `./.config`).
fn config_base_dir() -> PathBuf {
    if let Ok(p) = env::var("XDG_CONFIG_HOME")
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config")
}

/// What: Build the `Set-Cookie` value that records a language choice.
///
/// Inputs:
/// - `locale`: Chosen locale.
///
/// Output:
/// - e.g. `preferred-locale=en; path=/; max-age=31536000`
#[must_use]
pub fn preference_cookie(locale: Locale) -> String {
    format!("{PREFERENCE_COOKIE}={locale}; path=/; max-age={PREFERENCE_COOKIE_MAX_AGE_SECS}")
}

/// What: Extract a named value from a `Cookie:` request header.
///
/// Inputs:
/// - `header`: Raw header value, e.g. `a=1; preferred-locale=en`.
/// - `name`: Cookie name.
///
/// Output:
/// - The first matching value, trimmed, or `None`.
#[must_use]
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then_some(value.trim())
    })
}

/// What: Read the preferred locale from a `Cookie:` header.
///
/// Output:
/// - `Some(Locale)` only when the cookie exists and holds a supported tag.
#[must_use]
pub fn locale_from_cookie(header: &str) -> Option<Locale> {
    cookie_value(header, PREFERENCE_COOKIE).and_then(Locale::parse)
}
