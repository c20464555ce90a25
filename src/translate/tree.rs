//! Shape-preserving translation of a whole text bundle.

use std::collections::HashSet;
use std::ops::AddAssign;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use tracing::info;

use crate::i18n::{Locale, TextNode};
use crate::translate::client::{Translation, Translator};

/// Per-outcome leaf counts for one bundle translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationStats {
    /// Leaves translated by the service.
    pub translated: usize,
    /// Leaves served from the cache.
    pub cached: usize,
    /// Leaves left as-is on purpose (short text, source target).
    pub unchanged: usize,
    /// Leaves that fell back to source text after a failure.
    pub fallback: usize,
    /// Leaves copied verbatim from protected subtrees.
    pub protected: usize,
}

impl TranslationStats {
    /// What: Total number of leaves visited.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.translated + self.cached + self.unchanged + self.fallback + self.protected
    }

    /// What: Stats for a single leaf outcome.
    const fn for_outcome(outcome: &Translation) -> Self {
        let mut stats = Self {
            translated: 0,
            cached: 0,
            unchanged: 0,
            fallback: 0,
            protected: 0,
        };
        match outcome {
            Translation::Translated(_) => stats.translated = 1,
            Translation::Cached(_) => stats.cached = 1,
            Translation::Unchanged(_) => stats.unchanged = 1,
            Translation::Fallback { .. } => stats.fallback = 1,
        }
        stats
    }
}

impl AddAssign for TranslationStats {
    fn add_assign(&mut self, rhs: Self) {
        self.translated += rhs.translated;
        self.cached += rhs.cached;
        self.unchanged += rhs.unchanged;
        self.fallback += rhs.fallback;
        self.protected += rhs.protected;
    }
}

/// Walks a bundle and translates every leaf outside the protected keys.
#[derive(Debug, Clone)]
pub struct TreeTranslator {
    /// Per-leaf client.
    translator: Translator,
    /// Mapping keys whose subtrees are copied untouched.
    protected_keys: HashSet<String>,
}

impl TreeTranslator {
    /// What: Create a tree translator.
    ///
    /// Inputs:
    /// - `translator`: Client used for each leaf.
    /// - `protected_keys`: Keys (at any depth) whose values hold paths rather than prose.
    #[must_use]
    pub fn new<I, S>(translator: Translator, protected_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            translator,
            protected_keys: protected_keys.into_iter().map(Into::into).collect(),
        }
    }

    /// What: The per-leaf client.
    #[must_use]
    pub const fn translator(&self) -> &Translator {
        &self.translator
    }

    /// What: Translate a bundle into `target`.
    ///
    /// Output:
    /// - A new bundle with exactly the input's shape.
    pub async fn translate_tree(&self, bundle: &TextNode, target: Locale) -> TextNode {
        self.translate_tree_with_stats(bundle, target).await.0
    }

    /// What: Translate a bundle into `target` and report per-leaf outcomes.
    ///
    /// Inputs:
    /// - `bundle`: Source-locale bundle; never modified.
    /// - `target`: Requested locale.
    ///
    /// Output:
    /// - `(translated bundle, stats)`; the bundle always has the input's keys, key order
    ///   and sequence lengths, whatever happened to individual leaves.
    ///
    /// Details:
    /// - The source locale short-circuits to a clone.
    /// - Sibling leaves are awaited together, so a slow leaf only delays its own result.
    pub async fn translate_tree_with_stats(
        &self,
        bundle: &TextNode,
        target: Locale,
    ) -> (TextNode, TranslationStats) {
        if target.is_source() {
            let stats = TranslationStats {
                unchanged: bundle.leaf_count(),
                ..TranslationStats::default()
            };
            return (bundle.clone(), stats);
        }

        let (translated, stats) = self.walk(bundle, target).await;
        info!(
            locale = %target,
            leaves = stats.total(),
            translated = stats.translated,
            cached = stats.cached,
            fallback = stats.fallback,
            protected = stats.protected,
            "translated text bundle"
        );
        (translated, stats)
    }

    /// What: Recursive step of the walk.
    fn walk<'a>(
        &'a self,
        node: &'a TextNode,
        target: Locale,
    ) -> BoxFuture<'a, (TextNode, TranslationStats)> {
        async move {
            match node {
                TextNode::Leaf(text) => {
                    let outcome = self.translator.translate(text, target).await;
                    let stats = TranslationStats::for_outcome(&outcome);
                    (TextNode::Leaf(outcome.into_text()), stats)
                }
                TextNode::Sequence(items) => {
                    let results = join_all(items.iter().map(|item| self.walk(item, target))).await;
                    let mut stats = TranslationStats::default();
                    let items = results
                        .into_iter()
                        .map(|(item, item_stats)| {
                            stats += item_stats;
                            item
                        })
                        .collect();
                    (TextNode::Sequence(items), stats)
                }
                TextNode::Mapping(entries) => {
                    let results = join_all(entries.iter().map(|(key, value)| async move {
                        if self.protected_keys.contains(key) {
                            let stats = TranslationStats {
                                protected: value.leaf_count(),
                                ..TranslationStats::default()
                            };
                            (value.clone(), stats)
                        } else {
                            self.walk(value, target).await
                        }
                    }))
                    .await;
                    let mut stats = TranslationStats::default();
                    let entries = entries
                        .iter()
                        .zip(results)
                        .map(|((key, _), (value, value_stats))| {
                            stats += value_stats;
                            (key.clone(), value)
                        })
                        .collect();
                    (TextNode::Mapping(entries), stats)
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::cache::MemoryCache;
    use crate::translate::client::TranslatorConfig;
    use crate::translate::error::TranslateError;
    use crate::translate::provider::TranslationProvider;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider that upper-cases text and counts calls.
    #[derive(Default)]
    struct UpperProvider {
        calls: AtomicUsize,
    }

    impl TranslationProvider for UpperProvider {
        fn translate<'a>(
            &'a self,
            text: &'a str,
            _source: Locale,
            _target: Locale,
        ) -> BoxFuture<'a, Result<String, TranslateError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(text.to_uppercase()) }.boxed()
        }
    }

    fn tree_translator(provider: Arc<dyn TranslationProvider>) -> TreeTranslator {
        let translator = Translator::new(
            provider,
            Arc::new(MemoryCache::new()),
            TranslatorConfig::default(),
        );
        TreeTranslator::new(translator, ["images"])
    }

    fn bundle() -> TextNode {
        serde_json::from_str(
            r#"{
                "header": {"logoAlt": "Logo Alamendah", "navigation": {"home": "Beranda"}},
                "features": ["Udara segar", "ok", "Udara segar"],
                "images": {"logo": "/Dawala.png", "activities": {"culture": "/images/12.jpg"}}
            }"#,
        )
        .expect("parse bundle")
    }

    #[tokio::test]
    async fn translates_leaves_and_keeps_shape() {
        let provider = Arc::new(UpperProvider::default());
        let tree = tree_translator(provider.clone());
        let source = bundle();

        let (out, stats) = tree.translate_tree_with_stats(&source, Locale::En).await;
        assert!(out.same_shape(&source));
        assert_eq!(out.text("header.logoAlt"), "LOGO ALAMENDAH");
        assert_eq!(out.text("features.0"), "UDARA SEGAR");
        assert_eq!(out.text("features.1"), "ok");
        assert_eq!(out.text("images.logo"), "/Dawala.png");
        assert_eq!(out.text("images.activities.culture"), "/images/12.jpg");
        assert_eq!(stats.protected, 2);
        assert_eq!(stats.unchanged, 1);
        assert_eq!(stats.total(), source.leaf_count());
        // Duplicate siblings may race; each distinct string is sent at most twice
        assert!(provider.calls.load(Ordering::SeqCst) <= 4);
    }

    #[tokio::test]
    async fn second_pass_is_served_from_cache() {
        let provider = Arc::new(UpperProvider::default());
        let tree = tree_translator(provider.clone());
        let source = bundle();

        let first = tree.translate_tree(&source, Locale::En).await;
        let calls_after_first = provider.calls.load(Ordering::SeqCst);
        let (second, stats) = tree.translate_tree_with_stats(&source, Locale::En).await;

        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), calls_after_first);
        assert_eq!(stats.translated, 0);
        assert_eq!(stats.cached, 4);
    }

    #[tokio::test]
    async fn source_locale_returns_clone() {
        let provider = Arc::new(UpperProvider::default());
        let tree = tree_translator(provider.clone());
        let source = bundle();

        let (out, stats) = tree.translate_tree_with_stats(&source, Locale::Id).await;
        assert_eq!(out, source);
        assert_eq!(stats.unchanged, source.leaf_count());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn protected_keys_apply_at_any_depth() {
        let provider = Arc::new(UpperProvider::default());
        let tree = tree_translator(provider);
        let source: TextNode = serde_json::from_str(
            r#"{"page": {"images": {"hero": "/images/hero.jpg"}, "title": "Judul halaman"}}"#,
        )
        .expect("parse bundle");

        let out = tree.translate_tree(&source, Locale::En).await;
        assert_eq!(out.text("page.images.hero"), "/images/hero.jpg");
        assert_eq!(out.text("page.title"), "JUDUL HALAMAN");
    }
}
