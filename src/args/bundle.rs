//! Command-line bundle output.

use std::path::Path;
use std::sync::Arc;

use alamendah::i18n::{BundleLoader, Locale, TextNode, find_locales_dir};
use alamendah::translate::{MemoryCache, TreeTranslator};

use crate::args::utils::{build_translator, load_config};
use crate::args::{Args, BundleFormat};

/// What: Print the site copy bundle for `locale`.
///
/// Inputs:
/// - `args`: Global arguments (config and translation overrides).
/// - `locale`: Locale to print.
/// - `locales_dir`: Explicit locales directory, or `None` to search the default locations.
/// - `format`: Output format.
/// - `seed`: Pre-fill the translation cache from the curated bundle for `locale`.
///
/// Output:
/// - Prints the bundle to stdout.
///
/// Details:
/// - The source locale is printed as loaded. Any other locale is produced by translating
///   the source bundle; strings that fail to translate stay in the source language.
///
/// # Errors
/// - Returns `Err` when the source bundle cannot be loaded or the output cannot be encoded.
pub async fn handle_bundle(
    args: &Args,
    locale: Locale,
    locales_dir: Option<&Path>,
    format: BundleFormat,
    seed: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let dir = locales_dir
        .map(Path::to_path_buf)
        .or_else(find_locales_dir)
        .ok_or("locales directory not found")?;
    tracing::info!(locale = %locale, dir = %dir.display(), "bundle requested from CLI");

    let mut loader = BundleLoader::new(dir);
    let source = loader.load(Locale::SOURCE)?.clone();

    let bundle = if locale.is_source() {
        source
    } else {
        let config = load_config(args);
        let cache = Arc::new(MemoryCache::new());
        if seed {
            match loader.load(locale) {
                Ok(curated) => {
                    let added = cache.seed_from_bundles(&source, curated);
                    tracing::info!(added, "translation cache seeded");
                }
                Err(e) => tracing::debug!(error = %e, "no curated bundle, cache starts empty"),
            }
        }
        let translator = build_translator(&config, cache)?;
        let tree = TreeTranslator::new(translator, config.protected_keys.iter().cloned());
        let (translated, stats) = tree.translate_tree_with_stats(&source, locale).await;
        if stats.fallback > 0 {
            tracing::warn!(
                fallback = stats.fallback,
                "some strings kept their source text"
            );
        }
        translated
    };

    println!("{}", render(locale, bundle, format)?);
    Ok(())
}

/// What: Encode a bundle for output.
///
/// Details:
/// - YAML output is wrapped under the locale key so it can be saved as `{locale}.yml`.
fn render(
    locale: Locale,
    bundle: TextNode,
    format: BundleFormat,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    Ok(match format {
        BundleFormat::Json => bundle.to_json()?,
        BundleFormat::Yaml => TextNode::Mapping(vec![(locale.to_string(), bundle)]).to_yaml()?,
    })
}
