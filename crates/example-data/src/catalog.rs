//! Seed data structures describing one example catalog.
//!
//! These mirror the backend's wire shapes loosely but stay independent of
//! its domain types. Dates travel as ISO 8601 strings so this crate does
//! not need a datetime dependency.

use serde::{Deserialize, Serialize};

/// Localized copy for one text field, one entry per configured locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedSeed {
    /// Finnish variant.
    pub fi: Option<String>,
    /// English variant.
    pub en: Option<String>,
    /// Swedish variant.
    pub sv: Option<String>,
    /// Russian variant.
    pub ru: Option<String>,
}

impl LocalizedSeed {
    /// Build from one value per locale in `fi`, `en`, `sv`, `ru` order.
    #[must_use]
    pub fn from_variants(variants: [&str; 4]) -> Self {
        let [fi, en, sv, ru] = variants.map(str::to_owned);
        Self {
            fi: Some(fi),
            en: Some(en),
            sv: Some(sv),
            ru: Some(ru),
        }
    }
}

/// One seeded tag entity (category, platform, or accessibility).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSeed {
    /// URL-safe unique identifier.
    pub slug: String,
    /// Localized display name.
    pub name: LocalizedSeed,
}

/// Platform support metadata seeded for one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSupportSeed {
    /// Slug of the supported platform.
    pub platform: String,
    /// Store listing URL.
    pub store_url: Option<String>,
    /// Store rating on this platform.
    pub rating: Option<f32>,
    /// Number of store reviews.
    pub nr_reviews: Option<i32>,
}

/// Screenshot seeded for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotSeed {
    /// Image path relative to the media root.
    pub image: String,
    /// Slug of the platform the screenshot belongs to.
    pub platform: String,
}

/// One seeded application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSeed {
    /// URL-safe unique identifier.
    pub slug: String,
    /// Localized display name.
    pub name: LocalizedSeed,
    /// Localized one-line summary.
    pub short_description: LocalizedSeed,
    /// Localized long-form description.
    pub description: LocalizedSeed,
    /// Publisher or vendor name.
    pub vendor: Option<String>,
    /// Icon image path relative to the media root.
    pub image: Option<String>,
    /// First publication date, ISO 8601 (`YYYY-MM-DD`).
    pub publish_date: Option<String>,
    /// Aggregate editorial rating, 0.0 to 5.0.
    pub rating: Option<f32>,
    /// Publisher home page.
    pub publisher_url: Option<String>,
    /// Support page.
    pub support_url: Option<String>,
    /// Support contact address.
    pub contact_email: Option<String>,
    /// Slug of the referenced category.
    pub category: Option<String>,
    /// Slug of the referenced accessibility.
    pub accessibility: Option<String>,
    /// Language codes the application is available in.
    pub languages: Vec<String>,
    /// Per-platform support records.
    pub platforms: Vec<PlatformSupportSeed>,
    /// Screenshots.
    pub screenshots: Vec<ScreenshotSeed>,
}

/// A complete generated catalog: tags plus applications referencing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleCatalog {
    /// Seeded categories.
    pub categories: Vec<TagSeed>,
    /// Seeded platforms.
    pub platforms: Vec<TagSeed>,
    /// Seeded accessibilities.
    pub accessibilities: Vec<TagSeed>,
    /// Seeded applications.
    pub applications: Vec<ApplicationSeed>,
}
