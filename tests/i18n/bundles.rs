//! Bundle loading and lookup over real and temporary locale directories.

use std::fs;

use alamendah::i18n::{
    BundleLoader, LoadError, Locale, find_locales_dir, load_bundle_file, replace_placeholders,
};

#[test]
fn shipped_bundles_share_shape() {
    let dir = find_locales_dir().expect("locales directory");
    let mut loader = BundleLoader::new(dir);
    let source = loader.load(Locale::Id).expect("source bundle").clone();
    let curated = loader.load(Locale::En).expect("curated bundle");

    assert!(source.same_shape(curated));
    assert_eq!(source.text("header.navigation.home"), "Beranda");
    assert_eq!(curated.text("header.navigation.home"), "Home");
    assert_eq!(source.get("images"), curated.get("images"));
}

#[test]
fn missing_key_returns_the_key() {
    let dir = find_locales_dir().expect("locales directory");
    let source = load_bundle_file(Locale::Id, &dir).expect("source bundle");
    assert_eq!(source.text("home.hero.missing"), "home.hero.missing");
    assert_eq!(source.text("home.hero"), "home.hero");
}

#[test]
fn placeholders_fill_bundle_templates() {
    let dir = find_locales_dir().expect("locales directory");
    let source = load_bundle_file(Locale::Id, &dir).expect("source bundle");
    let results = replace_placeholders(&source.text("home.search.results"), &[("count", 4)]);
    assert_eq!(results, "Menampilkan 4 paket");
    let query = replace_placeholders(&source.text("home.search.forQuery"), &[("query", "liwet")]);
    assert_eq!(query, "untuk \"liwet\"");
}

#[test]
fn loader_reports_missing_and_malformed_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(matches!(
        load_bundle_file(Locale::En, dir.path()),
        Err(LoadError::NotFound(_))
    ));

    fs::write(dir.path().join("en.yml"), "id:\n  title: Salah kunci\n").expect("write file");
    assert!(matches!(
        load_bundle_file(Locale::En, dir.path()),
        Err(LoadError::MissingLocaleKey(Locale::En))
    ));

    fs::write(dir.path().join("id.yml"), "id:\n  title: [unclosed\n").expect("write file");
    assert!(matches!(
        load_bundle_file(Locale::Id, dir.path()),
        Err(LoadError::Yaml(_))
    ));
}
