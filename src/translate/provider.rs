//! External text-translation service.

use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, warn};

use crate::i18n::Locale;
use crate::translate::error::TranslateError;
use crate::util::{percent_encode, preview};

/// One outbound translation request.
///
/// Implementations perform exactly one attempt and report every failure as an
/// error; the client decides what a failure means for the caller.
pub trait TranslationProvider: Send + Sync {
    /// What: Translate `text` from `source` to `target`.
    fn translate<'a>(
        &'a self,
        text: &'a str,
        source: Locale,
        target: Locale,
    ) -> BoxFuture<'a, Result<String, TranslateError>>;
}

/// Google Translate via the public `translate_a/single` endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslateProvider {
    /// Pooled HTTP client.
    client: reqwest::Client,
    /// Endpoint without query string.
    endpoint: String,
}

impl GoogleTranslateProvider {
    /// What: Create a provider for `endpoint`.
    ///
    /// # Errors
    /// - Returns `Err` when the HTTP client cannot be built (e.g. TLS backend init failure).
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .user_agent(format!("alamendah/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// What: Build the request URL for one text.
    ///
    /// Output:
    /// - `{endpoint}?client=gtx&sl={source}&tl={target}&dt=t&q={encoded text}`
    #[must_use]
    pub fn request_url(&self, text: &str, source: Locale, target: Locale) -> String {
        format!(
            "{}?client=gtx&sl={source}&tl={target}&dt=t&q={}",
            self.endpoint,
            percent_encode(text)
        )
    }

    /// What: Perform the request and decode the segment list.
    async fn fetch(&self, text: &str, source: Locale, target: Locale) -> Result<String, TranslateError> {
        let url = self.request_url(text, source, target);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                preview = %preview(&body, 200),
                "translation service returned non-success status"
            );
            return Err(TranslateError::Status(status.as_u16()));
        }
        debug!(bytes = body.len(), text = %preview(text, 40), "translation response received");
        let data: Value = serde_json::from_str(&body)?;
        parse_segments(&data)
    }
}

impl TranslationProvider for GoogleTranslateProvider {
    fn translate<'a>(
        &'a self,
        text: &'a str,
        source: Locale,
        target: Locale,
    ) -> BoxFuture<'a, Result<String, TranslateError>> {
        self.fetch(text, source, target).boxed()
    }
}

/// What: Decode a `translate_a/single` response.
///
/// Inputs:
/// - `data`: Parsed JSON body, e.g. `[[["Hello ","Halo ",null,null,1],["world","dunia"]],null,"id"]`.
///
/// Output:
/// - The first element of every segment, concatenated in order.
///
/// # Errors
/// - Returns `Err(Malformed)` unless the body is an array whose first element is a
///   non-empty segment array starting with a non-empty string.
pub fn parse_segments(data: &Value) -> Result<String, TranslateError> {
    let segments = data
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Malformed("missing segment list".to_string()))?;

    let leading = segments
        .first()
        .and_then(|segment| segment.get(0))
        .and_then(Value::as_str)
        .unwrap_or_default();
    if leading.is_empty() {
        return Err(TranslateError::Malformed(
            "first segment carries no text".to_string(),
        ));
    }

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}
