//! The two locales served by the site.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a supported locale tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{0}', expected one of: id, en")]
pub struct LocaleParseError(pub String);

/// Supported locales. Indonesian is the authoring (source) language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Indonesian, the language all canonical content is written in.
    #[default]
    Id,
    /// English, produced from the source copy on demand.
    En,
}

impl Locale {
    /// Locale in which canonical content is authored.
    pub const SOURCE: Self = Self::Id;
    /// Locale that may need on-the-fly translation.
    pub const TARGET: Self = Self::En;
    /// Every supported locale, source first.
    pub const ALL: [Self; 2] = [Self::Id, Self::En];

    /// What: Lowercase tag used in URLs, cookies and API requests.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::En => "en",
        }
    }

    /// What: Whether this is the authoring locale.
    #[must_use]
    pub const fn is_source(self) -> bool {
        matches!(self, Self::Id)
    }

    /// What: Parse a tag, treating anything unsupported as absent.
    ///
    /// Inputs:
    /// - `raw`: Candidate tag, e.g. a cookie value.
    ///
    /// Output:
    /// - `Some(Locale)` for `id`/`en` (case-insensitive, trimmed), `None` otherwise.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "en" => Ok(Self::En),
            _ => Err(LocaleParseError(s.to_string())),
        }
    }
}
