//! Single-string translation with memoization, timeout and fallback.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::i18n::{Locale, TranslationSettings};
use crate::translate::cache::TranslationCache;
use crate::translate::error::{FallbackReason, TranslateError};
use crate::translate::provider::TranslationProvider;
use crate::util::preview;

/// Outcome of translating one string.
///
/// Every variant carries display-ready text; the variant tells a translated
/// result apart from a degraded one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Fresh result from the translation service.
    Translated(String),
    /// Served from the cache without contacting the service.
    Cached(String),
    /// Deliberately left as-is: too short, or the target is the source locale.
    Unchanged(String),
    /// The service failed; this is the original text.
    Fallback {
        /// Original text.
        text: String,
        /// What went wrong.
        reason: FallbackReason,
    },
}

impl Translation {
    /// What: Display text of the outcome.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Translated(t) | Self::Cached(t) | Self::Unchanged(t) => t,
            Self::Fallback { text, .. } => text,
        }
    }

    /// What: Consume the outcome, keeping only its display text.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Translated(t) | Self::Cached(t) | Self::Unchanged(t) => t,
            Self::Fallback { text, .. } => text,
        }
    }

    /// What: Whether the service failed and the original text was used.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// JSON report of a single translation, as returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationReport {
    /// Text that was submitted.
    pub original_text: String,
    /// Display text (equals the original on fallback).
    pub translated_text: String,
    /// Requested locale.
    pub target_lang: Locale,
    /// `false` when the service failed and the original text was returned.
    pub success: bool,
}

impl TranslationReport {
    /// What: Build a report from an outcome.
    #[must_use]
    pub fn new(original: &str, target: Locale, outcome: &Translation) -> Self {
        Self {
            original_text: original.to_string(),
            translated_text: outcome.text().to_string(),
            target_lang: target,
            success: !outcome.is_fallback(),
        }
    }
}

/// Tunables for [`Translator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Upper bound on one provider call.
    pub timeout: Duration,
    /// Trimmed strings shorter than this many characters are returned unchanged.
    pub min_length: usize,
    /// Memoize fallback results so a failing string is not retried.
    pub cache_fallbacks: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        TranslationSettings::default().into()
    }
}

impl From<TranslationSettings> for TranslatorConfig {
    fn from(settings: TranslationSettings) -> Self {
        (&settings).into()
    }
}

impl From<&TranslationSettings> for TranslatorConfig {
    fn from(settings: &TranslationSettings) -> Self {
        Self {
            timeout: settings.timeout(),
            min_length: settings.min_length,
            cache_fallbacks: settings.cache_fallbacks,
        }
    }
}

/// Translation client: cache lookup, bounded provider call, fallback to source text.
#[derive(Clone)]
pub struct Translator {
    /// External service.
    provider: Arc<dyn TranslationProvider>,
    /// Shared memo for the target locale.
    cache: Arc<dyn TranslationCache>,
    /// Tunables.
    config: TranslatorConfig,
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("config", &self.config)
            .field("cached_entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl Translator {
    /// What: Create a client.
    ///
    /// Inputs:
    /// - `provider`: External translation service.
    /// - `cache`: Memo shared by everything translating into the same target locale.
    /// - `config`: Timeout, short-string threshold and fallback caching policy.
    #[must_use]
    pub fn new(
        provider: Arc<dyn TranslationProvider>,
        cache: Arc<dyn TranslationCache>,
        config: TranslatorConfig,
    ) -> Self {
        Self {
            provider,
            cache,
            config,
        }
    }

    /// What: The cache this client reads and writes.
    #[must_use]
    pub fn cache(&self) -> &Arc<dyn TranslationCache> {
        &self.cache
    }

    /// What: Whether `text` is too short to be worth translating.
    #[must_use]
    pub fn is_too_short(&self, text: &str) -> bool {
        text.trim().chars().count() < self.config.min_length
    }

    /// What: Translate one string from the source locale into `target`.
    ///
    /// Inputs:
    /// - `text`: Source-language text.
    /// - `target`: Requested locale.
    ///
    /// Output:
    /// - A [`Translation`]; never an error.
    ///
    /// Details:
    /// - Target equal to the source locale, or text below `min_length`: `Unchanged`, no call.
    /// - Cache hit: `Cached`, no call. A memoized failure: `Fallback` with its reason, no call.
    /// - Otherwise one provider call bounded by `timeout`. Success is stored and returned as
    ///   `Translated`; any failure returns `Fallback` with the original text (the failure is
    ///   memoized only when `cache_fallbacks` is set).
    pub async fn translate(&self, text: &str, target: Locale) -> Translation {
        if target.is_source() || self.is_too_short(text) {
            return Translation::Unchanged(text.to_string());
        }

        if let Some(hit) = self.cache.lookup(text) {
            debug!(text = %preview(text, 40), "translation cache hit");
            return Translation::Cached(hit);
        }
        if let Some(reason) = self.cache.failure(text) {
            debug!(text = %preview(text, 40), ?reason, "memoized translation failure");
            return Translation::Fallback {
                text: text.to_string(),
                reason,
            };
        }

        match self.call_provider(text, target).await {
            Ok(translated) => {
                self.cache.store(text, &translated);
                Translation::Translated(translated)
            }
            Err(err) => {
                warn!(
                    text = %preview(text, 40),
                    locale = %target,
                    error = %err,
                    "translation failed, using original text"
                );
                let reason = FallbackReason::from(&err);
                if self.config.cache_fallbacks {
                    self.cache.record_failure(text, reason);
                }
                Translation::Fallback {
                    text: text.to_string(),
                    reason,
                }
            }
        }
    }

    /// What: One provider call bounded by the configured timeout.
    async fn call_provider(&self, text: &str, target: Locale) -> Result<String, TranslateError> {
        tokio::time::timeout(
            self.config.timeout,
            self.provider.translate(text, Locale::SOURCE, target),
        )
        .await
        .map_err(|_| TranslateError::Timeout(self.config.timeout))?
    }
}
