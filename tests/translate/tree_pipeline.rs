//! Whole-bundle translation over the shipped site copy.

use std::sync::Arc;
use std::time::Duration;

use alamendah::i18n::{I18nConfig, Locale, TextNode, find_locales_dir, load_bundle_file};
use alamendah::translate::{
    GoogleTranslateProvider, MemoryCache, TranslationCache, Translator, TranslatorConfig,
    TreeTranslator,
};

use crate::fake_service::{self, Behavior, UNREACHABLE_ENDPOINT};

fn source_bundle() -> TextNode {
    let dir = find_locales_dir().expect("locales directory");
    load_bundle_file(Locale::Id, &dir).expect("source bundle")
}

fn tree_for(endpoint: &str, cache: Arc<MemoryCache>) -> TreeTranslator {
    let config = I18nConfig::default();
    let provider = GoogleTranslateProvider::new(endpoint).expect("build provider");
    let translator = Translator::new(
        Arc::new(provider),
        cache,
        TranslatorConfig {
            timeout: Duration::from_secs(2),
            ..TranslatorConfig::from(&config.translation)
        },
    );
    TreeTranslator::new(translator, config.protected_keys)
}

#[tokio::test]
async fn translated_bundle_keeps_shape_and_images() {
    let service = fake_service::start(Behavior::Uppercase).await;
    let cache = Arc::new(MemoryCache::new());
    let tree = tree_for(&service.endpoint, Arc::clone(&cache));
    let source = source_bundle();

    let (english, stats) = tree.translate_tree_with_stats(&source, Locale::En).await;

    assert!(english.same_shape(&source));
    assert_eq!(english.get("images"), source.get("images"));
    assert_eq!(english.text("home.hero.title"), "SELAMAT DATANG DI DESA WISATA ALAMENDAH");
    assert_eq!(english.text("home.accommodation.features.1"), "UDARA SEGAR DAN SEJUK");
    assert_eq!(stats.fallback, 0);
    assert_eq!(stats.protected, source.get("images").map_or(0, TextNode::leaf_count));
    assert_eq!(stats.total(), source.leaf_count());

    // Every memoized translation cost at least one request
    let distinct = cache.len();
    assert!(service.requests() >= distinct);

    let requests_before = service.requests();
    let again = tree.translate_tree(&source, Locale::En).await;
    assert_eq!(again, english);
    assert_eq!(service.requests(), requests_before);
}

#[tokio::test]
async fn unreachable_service_yields_source_bundle() {
    let tree = tree_for(UNREACHABLE_ENDPOINT, Arc::new(MemoryCache::new()));
    let source = source_bundle();

    let (out, stats) = tree.translate_tree_with_stats(&source, Locale::En).await;
    assert_eq!(out, source);
    assert_eq!(stats.translated, 0);
    assert!(stats.fallback > 0);
}

#[tokio::test]
async fn curated_bundle_seeds_the_cache() {
    let service = fake_service::start(Behavior::Uppercase).await;
    let cache = Arc::new(MemoryCache::new());
    let dir = find_locales_dir().expect("locales directory");
    let source = source_bundle();
    let curated = load_bundle_file(Locale::En, &dir).expect("curated bundle");
    assert!(cache.seed_from_bundles(&source, &curated) > 0);

    let tree = tree_for(&service.endpoint, Arc::clone(&cache));
    let (english, stats) = tree.translate_tree_with_stats(&source, Locale::En).await;

    assert_eq!(english.text("header.navigation.home"), "Home");
    assert_eq!(english.text("menu.cta.button"), "Contact Us Now");
    assert!(stats.cached > 0);
    // Strings the curated copy leaves identical still go to the service
    assert_eq!(english.text("header.navigation.menu"), "MENU");
}

#[tokio::test]
async fn source_locale_is_returned_untouched() {
    let service = fake_service::start(Behavior::Uppercase).await;
    let tree = tree_for(&service.endpoint, Arc::new(MemoryCache::new()));
    let source = source_bundle();

    assert_eq!(tree.translate_tree(&source, Locale::Id).await, source);
    assert_eq!(service.requests(), 0);
}
