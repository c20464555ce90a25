//! Process-lifetime translation memo.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::i18n::TextNode;
use crate::translate::error::FallbackReason;

/// Memo of source text -> translated text for one target locale.
///
/// Keys are exact strings (case and whitespace sensitive). Entries are never
/// evicted; the hosting application decides the cache's lifetime by owning it.
/// Failed strings are kept apart from translations so a memoized failure is
/// still reported as one.
pub trait TranslationCache: Send + Sync {
    /// What: Return the memoized translation for `text`, if any.
    fn lookup(&self, text: &str) -> Option<String>;

    /// What: Memoize `translated` for `text`. Last store wins.
    fn store(&self, text: &str, translated: &str);

    /// What: Return the memoized failure for `text`, if any.
    fn failure(&self, text: &str) -> Option<FallbackReason>;

    /// What: Memoize that translating `text` failed with `reason`.
    fn record_failure(&self, text: &str, reason: FallbackReason);

    /// What: Number of memoized entries, translations and failures together.
    fn len(&self) -> usize;

    /// What: Whether nothing has been memoized yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory cache guarded by a mutex; share it through an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryCache {
    /// Source text -> translation.
    entries: Mutex<HashMap<String, String>>,
    /// Source text -> why it could not be translated.
    failures: Mutex<HashMap<String, FallbackReason>>,
}

impl MemoryCache {
    /// What: Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Pre-populate the cache from a source bundle and a hand-written translation of it.
    ///
    /// Inputs:
    /// - `source`: Bundle in the source locale.
    /// - `curated`: Bundle in the target locale with the same key layout.
    ///
    /// Output:
    /// - Number of entries added.
    ///
    /// Details:
    /// - Leaves are paired by dot-notation path; paths missing from either side are ignored.
    /// - Pairs whose curated text equals the source text are skipped so those strings
    ///   still go through the translation service.
    pub fn seed_from_bundles(&self, source: &TextNode, curated: &TextNode) -> usize {
        let curated = curated.flatten();
        let mut added = 0;
        for (path, original) in source.flatten() {
            let Some(translated) = curated.get(&path) else {
                continue;
            };
            if translated.is_empty() || *translated == original {
                continue;
            }
            self.store(&original, translated);
            added += 1;
        }
        tracing::debug!(added, "seeded translation cache from curated bundle");
        added
    }
}

impl TranslationCache for MemoryCache {
    fn lookup(&self, text: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(text).cloned())
    }

    fn store(&self, text: &str, translated: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(text.to_string(), translated.to_string());
        }
    }

    fn failure(&self, text: &str) -> Option<FallbackReason> {
        self.failures
            .lock()
            .ok()
            .and_then(|failures| failures.get(text).copied())
    }

    fn record_failure(&self, text: &str, reason: FallbackReason) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.insert(text.to_string(), reason);
        }
    }

    fn len(&self) -> usize {
        let entries = self.entries.lock().map_or(0, |entries| entries.len());
        let failures = self.failures.lock().map_or(0, |failures| failures.len());
        entries + failures
    }
}
