//! Command-line single-text translation.

use std::sync::Arc;

use alamendah::i18n::Locale;
use alamendah::translate::{MemoryCache, TranslationReport};

use crate::args::Args;
use crate::args::utils::{build_translator, load_config};

/// What: Translate `text` into `target` and print a JSON report.
///
/// Inputs:
/// - `args`: Global arguments (config and translation overrides).
/// - `text`: Source-language text.
/// - `target`: Requested locale.
///
/// Output:
/// - Prints `{"originalText", "translatedText", "targetLang", "success"}`.
///
/// Details:
/// - A failed translation is not an error: the report carries the original text and
///   `success: false`.
///
/// # Errors
/// - Returns `Err` when the HTTP client cannot be built or the report cannot be serialized.
pub async fn handle_translate(
    args: &Args,
    text: &str,
    target: Locale,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing::info!(locale = %target, chars = text.chars().count(), "translate requested from CLI");
    let config = load_config(args);
    let translator = build_translator(&config, Arc::new(MemoryCache::new()))?;
    let outcome = translator.translate(text, target).await;
    let report = TranslationReport::new(text, target, &outcome);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
