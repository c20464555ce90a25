//! Locale resolution, preference persistence and record field fallback.

use std::sync::Arc;

use alamendah::i18n::{
    BilingualText, FilePreferences, Locale, LocaleResolver, MemoryPreferences, PreferenceStore,
    locale_from_cookie, redirect_for, resolve_locale,
};

#[test]
fn path_segment_beats_stored_preference() {
    for stored in [None, Some("id"), Some("en"), Some("fr"), Some("")] {
        assert_eq!(resolve_locale("/en/menu", stored), Locale::En);
        assert_eq!(resolve_locale("/id/contact", stored), Locale::Id);
    }
}

#[test]
fn stored_preference_applies_without_path_locale() {
    assert_eq!(resolve_locale("/menu", Some("en")), Locale::En);
    assert_eq!(resolve_locale("/menu", Some("EN")), Locale::En);
    assert_eq!(resolve_locale("/menu", Some("fr")), Locale::Id);
    assert_eq!(resolve_locale("/english", None), Locale::Id);
}

#[test]
fn router_redirects_pages_only() {
    let cookie = Some("theme=dark; preferred-locale=en");
    assert_eq!(redirect_for("/", None).as_deref(), Some("/id"));
    assert_eq!(redirect_for("/menu", cookie).as_deref(), Some("/en/menu"));
    assert_eq!(redirect_for("/menu", Some("preferred-locale=de")).as_deref(), Some("/id/menu"));
    for path in ["/en", "/id/menu", "/api/makanan", "/_next/static/x.js", "/images/5.jpg", "/favicon.ico", "/robots.txt"] {
        assert_eq!(redirect_for(path, cookie), None, "{path}");
    }
}

#[test]
fn switch_persists_and_round_trips_through_cookie() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("preferences.yml");
    let resolver = LocaleResolver::new(Arc::new(FilePreferences::new(&path)));

    let switch = resolver.switch(Locale::En, "/id/menu").expect("switch");
    assert_eq!(switch.location, "/en/menu");
    assert_eq!(locale_from_cookie(&switch.cookie), Some(Locale::En));

    // A fresh resolver over the same file sees the choice
    let reopened = LocaleResolver::new(Arc::new(FilePreferences::new(&path)));
    assert_eq!(reopened.resolve("/contact"), Locale::En);
    assert_eq!(reopened.resolve("/id/contact"), Locale::Id);

    let back = reopened.switch(Locale::Id, "/en").expect("switch back");
    assert_eq!(back.location, "/id");
}

#[test]
fn invalid_stored_value_is_absent() {
    let store = MemoryPreferences::with_value("klingon");
    assert_eq!(store.load().as_deref(), Some("klingon"));
    let resolver = LocaleResolver::new(Arc::new(store));
    assert_eq!(resolver.resolve("/menu"), Locale::Id);
}

#[test]
fn bilingual_field_falls_back_to_source() {
    let full = BilingualText::new("Paket Kuliner", Some("Culinary Package".to_string()));
    let blank = BilingualText::new("Paket Kuliner", Some(String::new()));
    let missing = BilingualText::source_only("Paket Kuliner");

    assert_eq!(full.localized(Locale::Id), "Paket Kuliner");
    assert_eq!(full.localized(Locale::En), "Culinary Package");
    assert_eq!(blank.localized(Locale::En), "Paket Kuliner");
    assert_eq!(missing.localized(Locale::En), "Paket Kuliner");
    assert_eq!(BilingualText::default().localized_or(Locale::En, "Unknown Package"), "Unknown Package");
}
