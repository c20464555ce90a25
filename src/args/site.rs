//! Command-line site settings output.

use serde::Serialize;

use alamendah::site::SiteConfig;

/// JSON printed by `site`.
#[derive(Debug, Serialize)]
struct SiteReport {
    /// Effective settings.
    #[serde(flatten)]
    site: SiteConfig,
    /// Requested photo paths and their URLs.
    images: Vec<(String, String)>,
}

/// What: Print effective site settings and resolve photo paths.
///
/// # Errors
/// - Returns `Err` when the report cannot be serialized.
pub fn handle_site(images: &[String]) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let site = SiteConfig::from_env();
    let images = images
        .iter()
        .map(|path| (path.clone(), site.image_url(path)))
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&SiteReport { site, images })?
    );
    Ok(())
}
