//! Command-line locale resolution and language switching.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use alamendah::i18n::{
    FilePreferences, Locale, LocaleResolver, PREFERENCE_COOKIE, cookie_value, redirect_for_or,
    resolve_locale_or, strip_locale_prefix,
};

/// JSON printed by `resolve`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Resolution<'a> {
    /// Request path as given.
    path: &'a str,
    /// Locale the page renders in.
    locale: Locale,
    /// Path without its locale segment.
    route: &'a str,
    /// Redirect target for locale-less page paths.
    redirect: Option<String>,
}

/// JSON printed by `switch`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwitchReport {
    /// Chosen locale.
    locale: Locale,
    /// Where to navigate.
    location: String,
    /// `Set-Cookie` value.
    set_cookie: String,
    /// Preference file written.
    preferences: String,
}

/// What: Open the preference file at `path`, or the per-user default.
fn preference_store(path: Option<&Path>) -> FilePreferences {
    path.map_or_else(FilePreferences::default_location, FilePreferences::new)
}

/// What: Resolve and print the locale for a request path.
///
/// Inputs:
/// - `path`: Request path.
/// - `cookie_header`: Raw `Cookie` header; when given it stands in for the stored preference.
/// - `prefs`: Preference file used when no cookie header is given.
/// - `default`: Configured locale for requests nothing else decides.
///
/// # Errors
/// - Returns `Err` when the report cannot be serialized.
pub fn handle_resolve(
    path: &str,
    cookie_header: Option<&str>,
    prefs: Option<&Path>,
    default: Locale,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let report = resolution(path, cookie_header, prefs, default);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// What: Build the `resolve` report.
fn resolution<'a>(
    path: &'a str,
    cookie_header: Option<&str>,
    prefs: Option<&Path>,
    default: Locale,
) -> Resolution<'a> {
    let locale = match cookie_header {
        Some(header) => resolve_locale_or(path, cookie_value(header, PREFERENCE_COOKIE), default),
        None => LocaleResolver::new(Arc::new(preference_store(prefs)))
            .with_default(default)
            .resolve(path),
    };
    Resolution {
        path,
        locale,
        route: strip_locale_prefix(path),
        redirect: redirect_for_or(path, cookie_header, default),
    }
}

/// What: Persist a language switch and print where to navigate.
///
/// Inputs:
/// - `locale`: Chosen locale.
/// - `current_path`: Path the user is on.
/// - `prefs`: Preference file to write, or `None` for the per-user default.
///
/// # Errors
/// - Returns `Err` when the preference file cannot be written or the report cannot be serialized.
pub fn handle_switch(
    locale: Locale,
    current_path: &str,
    prefs: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let store = Arc::new(preference_store(prefs));
    let preferences = store.path().display().to_string();
    let switch = LocaleResolver::new(store).switch(locale, current_path)?;
    let report = SwitchReport {
        locale: switch.locale,
        location: switch.location,
        set_cookie: switch.cookie,
        preferences,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
