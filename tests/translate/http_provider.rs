//! Provider and client behavior against a local HTTP service.

use std::sync::Arc;
use std::time::Duration;

use alamendah::i18n::Locale;
use alamendah::translate::{
    FallbackReason, GoogleTranslateProvider, MemoryCache, TranslateError, Translation,
    TranslationProvider, TranslationReport, Translator, TranslatorConfig,
};

use crate::fake_service::{self, Behavior, UNREACHABLE_ENDPOINT};

fn client_for(endpoint: &str, timeout: Duration) -> Translator {
    let provider = GoogleTranslateProvider::new(endpoint).expect("build provider");
    Translator::new(
        Arc::new(provider),
        Arc::new(MemoryCache::new()),
        TranslatorConfig {
            timeout,
            min_length: 3,
            cache_fallbacks: true,
        },
    )
}

#[tokio::test]
async fn provider_decodes_service_response() {
    let service = fake_service::start(Behavior::Uppercase).await;
    let provider = GoogleTranslateProvider::new(service.endpoint.clone()).expect("build provider");

    let text = provider
        .translate("Hubungi Kami", Locale::Id, Locale::En)
        .await
        .expect("translation");
    assert_eq!(text, "HUBUNGI KAMI");

    let target = service.last_target();
    assert!(target.contains("client=gtx"), "{target}");
    assert!(target.contains("sl=id&tl=en"), "{target}");
    assert!(target.contains("q=Hubungi%20Kami"), "{target}");
}

#[tokio::test]
async fn provider_reports_status_and_shape_errors() {
    let failing = fake_service::start(Behavior::Status(503)).await;
    let provider = GoogleTranslateProvider::new(failing.endpoint.clone()).expect("build provider");
    assert!(matches!(
        provider.translate("Beranda", Locale::Id, Locale::En).await,
        Err(TranslateError::Status(503))
    ));

    let garbage = fake_service::start(Behavior::Garbage).await;
    let provider = GoogleTranslateProvider::new(garbage.endpoint.clone()).expect("build provider");
    assert!(matches!(
        provider.translate("Beranda", Locale::Id, Locale::En).await,
        Err(TranslateError::Malformed(_))
    ));
}

#[tokio::test]
async fn client_memoizes_successful_translations() {
    let service = fake_service::start(Behavior::Uppercase).await;
    let client = client_for(&service.endpoint, Duration::from_secs(3));

    let first = client.translate("Reservasi Sekarang", Locale::En).await;
    assert_eq!(first, Translation::Translated("RESERVASI SEKARANG".to_string()));
    let second = client.translate("Reservasi Sekarang", Locale::En).await;
    assert_eq!(second, Translation::Cached("RESERVASI SEKARANG".to_string()));
    assert_eq!(service.requests(), 1);
}

#[tokio::test]
async fn server_error_degrades_to_original_text() {
    let service = fake_service::start(Behavior::Status(500)).await;
    let client = client_for(&service.endpoint, Duration::from_secs(3));

    let outcome = client.translate("Terjadi kesalahan", Locale::En).await;
    assert_eq!(
        outcome,
        Translation::Fallback {
            text: "Terjadi kesalahan".to_string(),
            reason: FallbackReason::Status,
        }
    );
    let report = TranslationReport::new("Terjadi kesalahan", Locale::En, &outcome);
    assert!(!report.success);
    assert_eq!(report.translated_text, report.original_text);

    // Fallbacks are memoized: no second request, still reported as a failure
    let again = client.translate("Terjadi kesalahan", Locale::En).await;
    assert_eq!(again, outcome);
    assert!(!TranslationReport::new("Terjadi kesalahan", Locale::En, &again).success);
    assert_eq!(service.requests(), 1);
}

#[tokio::test]
async fn unreachable_service_degrades_to_original_text() {
    let client = client_for(UNREACHABLE_ENDPOINT, Duration::from_secs(2));
    let outcome = client.translate("Selamat Datang", Locale::En).await;
    assert!(outcome.is_fallback());
    assert_eq!(outcome.text(), "Selamat Datang");
}

#[tokio::test]
async fn short_and_source_requests_never_reach_the_service() {
    let service = fake_service::start(Behavior::Uppercase).await;
    let client = client_for(&service.endpoint, Duration::from_secs(3));

    assert_eq!(
        client.translate("OK", Locale::En).await,
        Translation::Unchanged("OK".to_string())
    );
    assert_eq!(
        client.translate("Beranda", Locale::Id).await,
        Translation::Unchanged("Beranda".to_string())
    );
    assert_eq!(service.requests(), 0);
}
