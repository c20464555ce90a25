//! Locale resolution from request path, stored preference and cookie.

use std::sync::Arc;

use crate::i18n::locale::Locale;
use crate::i18n::preferences::{PreferenceError, PreferenceStore, locale_from_cookie, preference_cookie};

/// Path prefixes the request router never rewrites.
const UNLOCALIZED_PREFIXES: [&str; 4] = ["/_next", "/api", "/images", "/favicon.ico"];

/// What: Read a locale from the first segment of a request path.
///
/// Inputs:
/// - `path`: Request path, e.g. `/en/menu`.
///
/// Output:
/// - `Some(Locale)` when the first segment is exactly `id` or `en`.
///
/// Details:
/// - Matches whole segments: `/en` and `/en/menu` carry a locale, `/english` does not.
#[must_use]
pub fn locale_from_path(path: &str) -> Option<Locale> {
    let first = path.strip_prefix('/')?.split(['/', '?', '#']).next()?;
    Locale::ALL.into_iter().find(|l| l.as_str() == first)
}

/// What: Remove a leading locale segment from a path.
///
/// Output:
/// - The remaining path, or `/` when nothing remains; paths without a locale are returned as-is.
#[must_use]
pub fn strip_locale_prefix(path: &str) -> &str {
    let Some(locale) = locale_from_path(path) else {
        return path;
    };
    let rest = &path[1 + locale.as_str().len()..];
    if rest.is_empty() { "/" } else { rest }
}

/// What: Resolve the effective locale for a request.
///
/// Inputs:
/// - `path`: Request path.
/// - `stored`: Raw stored preference, if any.
///
/// Output:
/// - Exactly one supported locale.
///
/// Details:
/// - Priority: locale path segment -> valid stored preference -> source locale.
/// - Unsupported stored values are treated as absent.
#[must_use]
pub fn resolve_locale(path: &str, stored: Option<&str>) -> Locale {
    resolve_locale_or(path, stored, Locale::SOURCE)
}

/// What: [`resolve_locale`] with a configurable last-resort locale.
#[must_use]
pub fn resolve_locale_or(path: &str, stored: Option<&str>, default: Locale) -> Locale {
    if let Some(locale) = locale_from_path(path) {
        return locale;
    }
    match stored {
        Some(raw) => Locale::parse(raw).unwrap_or_else(|| {
            tracing::debug!(stored = raw, "ignoring unsupported stored locale");
            default
        }),
        None => default,
    }
}

/// What: Decide whether a request for `path` must be redirected to a localized URL.
///
/// Inputs:
/// - `path`: Request path.
/// - `cookie_header`: Raw `Cookie:` header, if the request carried one.
///
/// Output:
/// - `Some(target)` such as `/en/menu` when the path lacks a locale segment, `None` otherwise.
///
/// Details:
/// - Framework, API and image paths, and any path containing `.` before its query string,
///   are left alone.
/// - The preferred locale comes from the `preferred-locale` cookie, defaulting to the source locale.
#[must_use]
pub fn redirect_for(path: &str, cookie_header: Option<&str>) -> Option<String> {
    redirect_for_or(path, cookie_header, Locale::SOURCE)
}

/// What: [`redirect_for`] with a configurable locale for requests without a valid cookie.
#[must_use]
pub fn redirect_for_or(path: &str, cookie_header: Option<&str>, default: Locale) -> Option<String> {
    if !is_page_path(path) || locale_from_path(path).is_some() {
        return None;
    }
    let preferred = cookie_header
        .and_then(locale_from_cookie)
        .unwrap_or(default);
    let suffix = if path == "/" { "" } else { path };
    Some(format!("/{preferred}{suffix}"))
}

/// What: Whether the router handles `path` as a localized page.
fn is_page_path(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    if UNLOCALIZED_PREFIXES
        .iter()
        .any(|prefix| path == *prefix || path.starts_with(&format!("{prefix}/")))
    {
        return false;
    }
    !path.contains('.')
}

/// Outcome of an explicit language switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSwitch {
    /// Locale chosen by the user.
    pub locale: Locale,
    /// Path to navigate to, e.g. `/en/contact`.
    pub location: String,
    /// `Set-Cookie` value mirroring the choice for the request router.
    pub cookie: String,
}

/// Locale resolver bound to a persisted preference store.
#[derive(Clone)]
pub struct LocaleResolver {
    /// Long-lived preference storage.
    store: Arc<dyn PreferenceStore>,
    /// Locale used when neither the path nor a preference decides.
    default: Locale,
}

impl std::fmt::Debug for LocaleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleResolver")
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

impl LocaleResolver {
    /// What: Create a resolver reading from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            store,
            default: Locale::SOURCE,
        }
    }

    /// What: Replace the last-resort locale (the source locale unless configured).
    #[must_use]
    pub const fn with_default(mut self, default: Locale) -> Self {
        self.default = default;
        self
    }

    /// What: Locale used when neither the path nor a preference decides.
    #[must_use]
    pub const fn default_locale(&self) -> Locale {
        self.default
    }

    /// What: Resolve the locale for `path` using the stored preference.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Locale {
        let stored = self.store.load();
        let resolved = resolve_locale_or(path, stored.as_deref(), self.default);
        tracing::debug!(path, stored = ?stored, resolved = %resolved, "resolved locale");
        resolved
    }

    /// What: Apply a user language switch.
    ///
    /// Inputs:
    /// - `locale`: Chosen locale.
    /// - `current_path`: Path the user is on.
    ///
    /// Output:
    /// - `LocaleSwitch` with the navigation target and the cookie to set.
    ///
    /// # Errors
    /// - Returns `Err` when the preference store cannot be written.
    pub fn switch(&self, locale: Locale, current_path: &str) -> Result<LocaleSwitch, PreferenceError> {
        self.store.save(locale)?;
        let rest = strip_locale_prefix(current_path);
        let location = if rest == "/" {
            format!("/{locale}")
        } else {
            format!("/{locale}{rest}")
        };
        tracing::info!(locale = %locale, location = %location, "language switched");
        Ok(LocaleSwitch {
            locale,
            location,
            cookie: preference_cookie(locale),
        })
    }
}
