//! Shared utilities for argument processing.

use std::sync::Arc;

use alamendah::i18n::{I18nConfig, find_config_file};
use alamendah::translate::{
    GoogleTranslateProvider, MemoryCache, TranslateError, Translator, TranslatorConfig,
};

use crate::args::Args;

/// What: Determine the log level based on command-line arguments and environment variables.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level` argument.
/// - `ALAMENDAH_TRACE=1` enables TRACE level for request-level detail.
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else if std::env::var("ALAMENDAH_TRACE").ok().as_deref() == Some("1") {
        "trace".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Load the localization config and apply command-line overrides.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Effective configuration.
///
/// Details:
/// - `--config` wins over the dev/installed search; a missing file yields defaults.
/// - `--endpoint` and `--timeout-ms` replace the file's translation settings.
pub fn load_config(args: &Args) -> I18nConfig {
    let path = args
        .config
        .clone()
        .or_else(|| find_config_file("i18n.yml"));
    let mut config = path.map_or_else(I18nConfig::default, |path| {
        tracing::debug!(path = %path.display(), "loading i18n config");
        I18nConfig::load(&path)
    });
    if let Some(endpoint) = &args.endpoint {
        config.translation.endpoint.clone_from(endpoint);
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.translation.timeout_ms = timeout_ms;
    }
    config
}

/// What: Build a translation client backed by the configured HTTP provider.
///
/// Inputs:
/// - `config`: Effective localization configuration.
/// - `cache`: Memo to read and write.
///
/// Output:
/// - Ready-to-use client.
///
/// # Errors
/// - Returns `Err` when the HTTP client cannot be built.
pub fn build_translator(
    config: &I18nConfig,
    cache: Arc<MemoryCache>,
) -> Result<Translator, TranslateError> {
    let provider = GoogleTranslateProvider::new(config.translation.endpoint.clone())?;
    Ok(Translator::new(
        Arc::new(provider),
        cache,
        TranslatorConfig::from(&config.translation),
    ))
}
