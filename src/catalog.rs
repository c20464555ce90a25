//! Catalog records (packages and menu items) and the storefront search.
//!
//! Records arrive from the REST endpoints with Indonesian field names and an
//! optional `...En` column per translatable field. They are mapped onto
//! [`BilingualText`] so every display site goes through the same fallback rule.

use serde::{Deserialize, Serialize};

use crate::i18n::{BilingualText, Locale};
use crate::util::percent_encode;

/// Shown when a package has no usable name.
pub const UNKNOWN_PACKAGE: &str = "Unknown Package";
/// Shown when a menu item has no usable description.
pub const NO_DESCRIPTION: &str = "No description available";

/// Package category (`jenis paket`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPackageCategory", into = "RawPackageCategory")]
pub struct PackageCategory {
    /// Database id.
    pub id: i64,
    /// Category name.
    pub name: BilingualText,
}

impl PackageCategory {
    /// What: Category name for `locale`, never blank.
    #[must_use]
    pub fn display_name(&self, locale: Locale) -> &str {
        self.name.localized_or(locale, UNKNOWN_PACKAGE)
    }
}

/// Wire shape of [`PackageCategory`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPackageCategory {
    id: i64,
    #[serde(default)]
    nama_paket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nama_paket_en: Option<String>,
}

impl From<RawPackageCategory> for PackageCategory {
    fn from(raw: RawPackageCategory) -> Self {
        Self {
            id: raw.id,
            name: BilingualText::new(raw.nama_paket.unwrap_or_default(), raw.nama_paket_en),
        }
    }
}

impl From<PackageCategory> for RawPackageCategory {
    fn from(category: PackageCategory) -> Self {
        Self {
            id: category.id,
            nama_paket: Some(category.name.source),
            nama_paket_en: category.name.target,
        }
    }
}

/// Menu item (`makanan`) offered inside a package category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMenuItem", into = "RawMenuItem")]
pub struct MenuItem {
    /// Database id.
    pub id: i64,
    /// Dish name; authored once, not translated.
    pub name: String,
    /// Dish description.
    pub description: BilingualText,
    /// Photo paths or URLs, first one is the cover.
    pub photos: Vec<String>,
    /// Price in rupiah.
    pub price: f64,
    /// Owning [`PackageCategory`] id.
    pub category_id: i64,
}

impl MenuItem {
    /// What: Description for `locale`, never blank.
    #[must_use]
    pub fn display_description(&self, locale: Locale) -> &str {
        self.description.localized_or(locale, NO_DESCRIPTION)
    }

    /// What: Cover photo path, if any.
    #[must_use]
    pub fn cover_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }
}

/// Wire shape of [`MenuItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMenuItem {
    id: i64,
    #[serde(default)]
    nama_makanan: Option<String>,
    #[serde(default)]
    deskripsi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deskripsi_en: Option<String>,
    #[serde(default)]
    foto: Option<RawPhotos>,
    #[serde(default)]
    harga: Option<f64>,
    jenis_paket_id: i64,
}

/// Stored `foto` column: a list, a single path, or a JSON-encoded list in a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawPhotos {
    /// Proper list.
    Many(Vec<String>),
    /// Single path, or a list encoded as JSON text.
    One(String),
}

impl RawPhotos {
    /// What: Normalize to a list of non-blank photo references.
    fn into_photos(self) -> Vec<String> {
        let photos = match self {
            Self::Many(photos) => photos,
            Self::One(text) => {
                let trimmed = text.trim();
                if trimmed.starts_with('[') && trimmed.ends_with(']') {
                    serde_json::from_str::<Vec<String>>(trimmed).unwrap_or_else(|e| {
                        tracing::debug!(error = %e, "foto is not a JSON list, using it as a path");
                        vec![text]
                    })
                } else {
                    vec![text]
                }
            }
        };
        photos
            .into_iter()
            .map(|photo| photo.trim().to_string())
            .filter(|photo| !photo.is_empty())
            .collect()
    }
}

impl From<RawMenuItem> for MenuItem {
    fn from(raw: RawMenuItem) -> Self {
        Self {
            id: raw.id,
            name: raw.nama_makanan.unwrap_or_default(),
            description: BilingualText::new(raw.deskripsi.unwrap_or_default(), raw.deskripsi_en),
            photos: raw.foto.map(RawPhotos::into_photos).unwrap_or_default(),
            price: raw.harga.unwrap_or_default(),
            category_id: raw.jenis_paket_id,
        }
    }
}

impl From<MenuItem> for RawMenuItem {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id,
            nama_makanan: Some(item.name),
            deskripsi: Some(item.description.source),
            deskripsi_en: item.description.target,
            foto: Some(RawPhotos::Many(item.photos)),
            harga: Some(item.price),
            jenis_paket_id: item.category_id,
        }
    }
}

/// Storefront search state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Selected category; `None` means all.
    pub category: Option<i64>,
    /// Free-text query; empty means no text filter.
    pub query: String,
}

impl CatalogFilter {
    /// What: Whether `item` passes the filter when displayed in `locale`.
    ///
    /// Details:
    /// - The query is matched case-insensitively as a substring of the dish name or of
    ///   the description shown for `locale`.
    #[must_use]
    pub fn matches(&self, item: &MenuItem, locale: Locale) -> bool {
        let category_ok = self.category.is_none_or(|id| id == item.category_id);
        if !category_ok {
            return false;
        }
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        item.name.to_lowercase().contains(&needle)
            || item
                .display_description(locale)
                .to_lowercase()
                .contains(&needle)
    }
}

/// What: Items that pass `filter`, in their original order.
#[must_use]
pub fn filter_items<'a>(items: &'a [MenuItem], filter: &CatalogFilter, locale: Locale) -> Vec<&'a MenuItem> {
    items
        .iter()
        .filter(|item| filter.matches(item, locale))
        .collect()
}

/// What: Format a price as Indonesian rupiah, e.g. `Rp 150.000`.
///
/// Details:
/// - Rounded to whole rupiah, thousands grouped with `.`.
#[must_use]
pub fn format_rupiah(amount: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

/// Default contact email when no settings record exists.
pub const DEFAULT_CONTACT_EMAIL: &str = "dawaladev@gmail.com";
/// Default contact phone (international form, no `+`).
pub const DEFAULT_CONTACT_PHONE: &str = "628123456789";

/// Greeting prefilled into WhatsApp chats.
const WHATSAPP_GREETING: &str = "Halo, saya ingin mengetahui lebih lanjut tentang paket wisata dan kuliner di Desa Wisata Alamendah.";

/// Site contact record served by the settings endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSettings {
    /// Contact email.
    pub email: String,
    /// Phone number as typed by the site admin.
    #[serde(rename = "noTelp")]
    pub phone: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            email: DEFAULT_CONTACT_EMAIL.to_string(),
            phone: DEFAULT_CONTACT_PHONE.to_string(),
        }
    }
}

impl ContactSettings {
    /// What: Phone number in the digits-only `62...` form WhatsApp expects.
    ///
    /// Output:
    /// - Local `08...` and bare `8...` numbers get the `62` country code; anything else
    ///   not already starting with `62` falls back to [`DEFAULT_CONTACT_PHONE`].
    #[must_use]
    pub fn whatsapp_number(&self) -> String {
        let digits: String = self.phone.chars().filter(char::is_ascii_digit).collect();
        if let Some(rest) = digits.strip_prefix('0')
            && rest.starts_with('8')
        {
            return format!("62{rest}");
        }
        if digits.starts_with('8') {
            return format!("62{digits}");
        }
        if digits.starts_with("62") {
            return digits;
        }
        DEFAULT_CONTACT_PHONE.to_string()
    }

    /// What: Chat link with the greeting prefilled.
    ///
    /// Inputs:
    /// - `mobile`: `wa.me` link for phones, WhatsApp Web link otherwise.
    #[must_use]
    pub fn whatsapp_url(&self, mobile: bool) -> String {
        let number = self.whatsapp_number();
        let message = percent_encode(WHATSAPP_GREETING);
        if mobile {
            format!("https://wa.me/{number}?text={message}")
        } else {
            format!("https://web.whatsapp.com/send?phone={number}&text={message}")
        }
    }
}
