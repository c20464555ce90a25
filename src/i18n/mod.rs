//! Internationalization (i18n) module for Alamendah.
//!
//! This module provides locale resolution, bilingual record access and the site copy bundle.
//!
//! # Overview
//!
//! - **Locales**: Indonesian (`id`) is the source language; English (`en`) is produced on demand
//! - **Locale Resolution**: URL path segment -> stored preference -> source locale
//! - **Preferences**: A long-lived preference file plus the `preferred-locale` cookie
//! - **Bilingual Fields**: Record fields fall back to the source value when no translation exists
//! - **Bundles**: Site copy lives in `locales/{locale}.yml` as a nested tree keyed by the locale tag
//!
//! ```yaml
//! id:
//!   home:
//!     hero:
//!       title: "Selamat Datang di Desa Wisata Alamendah"
//! ```
//!
//! This becomes accessible as `home.hero.title`.
//!
//! # Configuration
//!
//! `config/i18n.yml` holds the default locale, translation client settings and the
//! bundle keys that are never translated (`images` by default).
//!
//! # Error Handling
//!
//! - Unsupported locale values anywhere are treated as absent
//! - Missing bundle keys return the key itself
//! - All errors are logged but do not crash the application

mod bundle;
mod config;
mod fields;
mod loader;
mod locale;
mod preferences;
mod resolver;

pub use bundle::{TextNode, TranslationMap, replace_placeholders};
pub use config::{DEFAULT_TRANSLATION_ENDPOINT, I18nConfig, TranslationSettings};
pub use fields::BilingualText;
pub use loader::{BundleLoader, LoadError, load_bundle_file, parse_bundle_json, parse_bundle_yaml};
pub use locale::{Locale, LocaleParseError};
pub use preferences::{
    FilePreferences, MemoryPreferences, PREFERENCE_COOKIE, PREFERENCE_COOKIE_MAX_AGE_SECS,
    PreferenceError, PreferenceStore, cookie_value, locale_from_cookie, preference_cookie,
};
pub use resolver::{
    LocaleResolver, LocaleSwitch, locale_from_path, redirect_for, redirect_for_or, resolve_locale,
    resolve_locale_or, strip_locale_prefix,
};

use std::path::PathBuf;

/// Installed data location.
const INSTALLED_DIR: &str = "/usr/share/alamendah";

/// What: Find a config file in development and installed locations.
///
/// Inputs:
/// - `relative_path`: Relative path from config directory (e.g., "i18n.yml")
///
/// Output:
/// - `Some(PathBuf)` pointing to the first existing file found, or `None` if not found
///
/// Details:
/// - Tries locations in order:
///   1. Development location: `CARGO_MANIFEST_DIR/config/{relative_path}`
///   2. Installed location: `/usr/share/alamendah/config/{relative_path}`
pub fn find_config_file(relative_path: &str) -> Option<PathBuf> {
    let dev_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join(relative_path);
    if dev_path.exists() {
        return Some(dev_path);
    }

    let installed_path = PathBuf::from(INSTALLED_DIR)
        .join("config")
        .join(relative_path);
    if installed_path.exists() {
        return Some(installed_path);
    }

    None
}

/// What: Find the locales directory in development and installed locations.
///
/// Output:
/// - `Some(PathBuf)` pointing to the first existing locales directory found, or `None` if not found
///
/// Details:
/// - Tries `CARGO_MANIFEST_DIR/config/locales` first, then `/usr/share/alamendah/locales`.
pub fn find_locales_dir() -> Option<PathBuf> {
    let dev_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("locales");
    if dev_path.is_dir() {
        return Some(dev_path);
    }

    let installed_path = PathBuf::from(INSTALLED_DIR).join("locales");
    if installed_path.is_dir() {
        return Some(installed_path);
    }

    None
}
