//! Site-wide settings taken from the environment.

use serde::Serialize;

/// Image shown when a record has no photo.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-food.jpg";

/// Default public storage bucket for catalog photos.
const DEFAULT_STORAGE_URL: &str =
    "https://iroaauayoqlfsetgtlec.supabase.co/storage/v1/object/public/gastronomi";

/// Application identity, contact data and asset locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    /// Display name.
    pub app_name: String,
    /// Public base URL.
    pub app_url: String,
    /// Contact email.
    pub contact_email: String,
    /// Contact phone as shown on the site.
    pub contact_phone: String,
    /// Base URL that relative photo paths are joined onto.
    pub storage_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            app_name: "Desa Wisata Alamendah".to_string(),
            app_url: "http://localhost:3000".to_string(),
            contact_email: "dawaladev@gmail.com".to_string(),
            contact_phone: "+62 xxx-xxxx-xxxx".to_string(),
            storage_url: DEFAULT_STORAGE_URL.to_string(),
        }
    }
}

impl SiteConfig {
    /// What: Read settings from `ALAMENDAH_*` environment variables.
    ///
    /// Details:
    /// - Unset or empty variables keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// What: Build settings from an arbitrary variable source.
    ///
    /// Inputs:
    /// - `lookup`: Returns the value of a variable name, if set.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str, default: String| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(default)
        };
        let defaults = Self::default();
        Self {
            app_name: read("ALAMENDAH_APP_NAME", defaults.app_name),
            app_url: read("ALAMENDAH_APP_URL", defaults.app_url),
            contact_email: read("ALAMENDAH_CONTACT_EMAIL", defaults.contact_email),
            contact_phone: read("ALAMENDAH_CONTACT_PHONE", defaults.contact_phone),
            storage_url: read("ALAMENDAH_STORAGE_URL", defaults.storage_url),
        }
    }

    /// What: Resolve a stored photo reference to a displayable URL.
    ///
    /// Inputs:
    /// - `path`: Storage-relative path, absolute URL, or inline `data:image` URI.
    ///
    /// Output:
    /// - [`PLACEHOLDER_IMAGE`] for an empty path; absolute URLs and data URIs unchanged;
    ///   otherwise `{storage_url}/{path}`.
    #[must_use]
    pub fn image_url(&self, path: &str) -> String {
        if path.is_empty() {
            return PLACEHOLDER_IMAGE.to_string();
        }
        if path.starts_with("data:image") || path.starts_with("http") {
            return path.to_string();
        }
        format!("{}/{path}", self.storage_url.trim_end_matches('/'))
    }
}
