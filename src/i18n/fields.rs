//! Bilingual record fields with source-language fallback.

use serde::{Deserialize, Serialize};

use crate::i18n::locale::Locale;

/// A record field authored in the source language with an optional target-language variant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BilingualText {
    /// Mandatory source-language value.
    pub source: String,
    /// Optional target-language value; blank counts as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl BilingualText {
    /// What: Create a pair.
    #[must_use]
    pub fn new(source: impl Into<String>, target: Option<String>) -> Self {
        Self {
            source: source.into(),
            target,
        }
    }

    /// What: Create a pair with no target-language variant.
    #[must_use]
    pub fn source_only(source: impl Into<String>) -> Self {
        Self::new(source, None)
    }

    /// What: Return the display text for `locale`.
    ///
    /// Inputs:
    /// - `locale`: Requested locale.
    ///
    /// Output:
    /// - The source value for the source locale; for the target locale the target value
    ///   when it is a non-empty string, else the source value.
    #[must_use]
    pub fn localized(&self, locale: Locale) -> &str {
        if locale.is_source() || !self.has_target() {
            return &self.source;
        }
        self.target.as_deref().unwrap_or(&self.source)
    }

    /// What: Like [`Self::localized`], but a blank result becomes `placeholder`.
    #[must_use]
    pub fn localized_or<'a>(&'a self, locale: Locale, placeholder: &'a str) -> &'a str {
        let text = self.localized(locale);
        if text.trim().is_empty() { placeholder } else { text }
    }

    /// What: Whether a usable target-language variant exists.
    #[must_use]
    pub fn has_target(&self) -> bool {
        self.target.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_locale_always_returns_source() {
        let pair = BilingualText::new("Nasi Box", Some("Rice Box".to_string()));
        assert_eq!(pair.localized(Locale::Id), "Nasi Box");
    }

    #[test]
    fn target_locale_prefers_target() {
        let pair = BilingualText::new("Minuman", Some("Beverages".to_string()));
        assert_eq!(pair.localized(Locale::En), "Beverages");
        assert!(pair.has_target());
    }

    #[test]
    fn target_locale_falls_back_when_absent_or_empty() {
        let absent = BilingualText::source_only("Snack Box");
        assert_eq!(absent.localized(Locale::En), "Snack Box");

        let empty = BilingualText::new("Nasi Gudeg", Some(String::new()));
        assert_eq!(empty.localized(Locale::En), "Nasi Gudeg");
        assert!(!empty.has_target());
    }

    #[test]
    fn placeholder_replaces_blank_text() {
        let blank = BilingualText::new("", Some(String::new()));
        assert_eq!(blank.localized_or(Locale::En, "Unknown Package"), "Unknown Package");
        assert_eq!(blank.localized_or(Locale::Id, "Unknown Package"), "Unknown Package");

        let named = BilingualText::source_only("Paket Wisata");
        assert_eq!(named.localized_or(Locale::En, "Unknown Package"), "Paket Wisata");
    }

    #[test]
    fn serde_omits_missing_target() {
        let json = serde_json::to_string(&BilingualText::source_only("Kopi")).expect("serialize");
        assert_eq!(json, r#"{"source":"Kopi"}"#);
        let back: BilingualText = serde_json::from_str(r#"{"source":"Teh","target":"Tea"}"#)
            .expect("deserialize");
        assert_eq!(back.localized(Locale::En), "Tea");
    }
}
