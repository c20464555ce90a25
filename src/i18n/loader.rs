//! Locale bundle file loading and parsing.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::i18n::bundle::TextNode;
use crate::i18n::locale::Locale;

/// Errors raised while loading a bundle file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No file exists for the locale.
    #[error("locale file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The file exists but could not be read.
    #[error("failed to read locale file {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file has no content.
    #[error("locale file is empty: {}", .0.display())]
    Empty(PathBuf),
    /// YAML syntax error.
    #[error("failed to parse YAML: {0}. Please check YAML syntax.")]
    Yaml(#[from] serde_norway::Error),
    /// JSON syntax error.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The document lacks the top-level locale key.
    #[error("expected a top-level '{0}' key in the locale file")]
    MissingLocaleKey(Locale),
}

/// What: Load the bundle for `locale` from `locales_dir`.
///
/// Inputs:
/// - `locale`: Locale to load.
/// - `locales_dir`: Directory holding the locale files.
///
/// Output:
/// - `Result<TextNode, LoadError>`
///
/// Details:
/// - `{locale}.yml` holds the bundle under a top-level locale key.
/// - Without it, `{locale}.json` is read as a bare tree, the shape `bundle --format json` prints.
///
/// # Errors
/// - Returns `Err` when neither file exists, or the file is unreadable, empty, invalid,
///   or (YAML) lacks the top-level locale key.
pub fn load_bundle_file(locale: Locale, locales_dir: &Path) -> Result<TextNode, LoadError> {
    let yaml_path = locales_dir.join(format!("{locale}.yml"));
    if yaml_path.exists() {
        let contents = read_bundle_text(&yaml_path)?;
        return parse_bundle_yaml(locale, &contents);
    }

    let json_path = locales_dir.join(format!("{locale}.json"));
    if json_path.exists() {
        let contents = read_bundle_text(&json_path)?;
        return parse_bundle_json(&contents);
    }

    Err(LoadError::NotFound(yaml_path))
}

/// What: Read a bundle file, rejecting blank content.
fn read_bundle_text(file_path: &Path) -> Result<String, LoadError> {
    let contents = fs::read_to_string(file_path).map_err(|source| LoadError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Err(LoadError::Empty(file_path.to_path_buf()));
    }
    Ok(contents)
}

/// What: Parse YAML locale content.
///
/// Inputs:
/// - `locale`: Expected top-level key (e.g. `id:`).
/// - `yaml_content`: File content.
///
/// Output:
/// - The subtree under the locale key.
///
/// # Errors
/// - Returns `Err` on invalid YAML or a missing locale key.
pub fn parse_bundle_yaml(locale: Locale, yaml_content: &str) -> Result<TextNode, LoadError> {
    let doc: TextNode = serde_norway::from_str(yaml_content)?;
    take_locale_subtree(doc, locale)
}

/// What: Parse a bare JSON bundle (no top-level locale key).
///
/// # Errors
/// - Returns `Err` on invalid JSON.
pub fn parse_bundle_json(json_content: &str) -> Result<TextNode, LoadError> {
    Ok(serde_json::from_str(json_content)?)
}

/// What: Extract the subtree stored under the locale's tag.
fn take_locale_subtree(doc: TextNode, locale: Locale) -> Result<TextNode, LoadError> {
    match doc {
        TextNode::Mapping(entries) => entries
            .into_iter()
            .find(|(key, _)| key == locale.as_str())
            .map(|(_, bundle)| bundle)
            .ok_or(LoadError::MissingLocaleKey(locale)),
        _ => Err(LoadError::MissingLocaleKey(locale)),
    }
}

/// Bundle loader that caches parsed files per locale.
#[derive(Debug)]
pub struct BundleLoader {
    /// Directory holding `{locale}.yml` files.
    locales_dir: PathBuf,
    /// Parsed bundles.
    cache: HashMap<Locale, TextNode>,
}

impl BundleLoader {
    /// What: Create a loader for `locales_dir`.
    #[must_use]
    pub fn new(locales_dir: PathBuf) -> Self {
        Self {
            locales_dir,
            cache: HashMap::new(),
        }
    }

    /// What: Load a locale bundle, reusing a previously parsed copy.
    ///
    /// # Errors
    /// - Returns `Err` when the file cannot be loaded (see [`load_bundle_file`]).
    pub fn load(&mut self, locale: Locale) -> Result<&TextNode, LoadError> {
        if !self.cache.contains_key(&locale) {
            match load_bundle_file(locale, &self.locales_dir) {
                Ok(bundle) => {
                    tracing::debug!(
                        "Loaded locale '{}' with {} text leaves",
                        locale,
                        bundle.leaf_count()
                    );
                    self.cache.insert(locale, bundle);
                }
                Err(e) => {
                    tracing::warn!("Failed to load locale '{}': {}", locale, e);
                    return Err(e);
                }
            }
        }
        self.cache
            .get(&locale)
            .ok_or(LoadError::MissingLocaleKey(locale))
    }

    /// What: Directory the loader reads from.
    #[must_use]
    pub fn locales_dir(&self) -> &Path {
        &self.locales_dir
    }
}
