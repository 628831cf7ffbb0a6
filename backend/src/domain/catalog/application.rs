//! Application read model and write payload.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::{
    ensure_valid_rating, validate_language_codes, validate_slug,
};
use super::{CatalogValidationError, PlatformSupport, Screenshot, TagRef};
use crate::domain::locale::TranslatedText;

/// Input payload for [`Application::new`].
///
/// Assembled by the persistence adapter from one application row and its
/// related rows; every nested value has already been validated on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDraft {
    /// Identifier.
    pub id: Uuid,
    /// URL-safe unique identifier.
    pub slug: String,
    /// Localized display name.
    pub name: TranslatedText,
    /// Localized one-line summary.
    pub short_description: TranslatedText,
    /// Localized long-form description.
    pub description: TranslatedText,
    /// Publisher or vendor name.
    pub vendor: Option<String>,
    /// Icon image path, relative to the media root.
    pub image: Option<String>,
    /// First publication date.
    pub publish_date: Option<NaiveDate>,
    /// Aggregate editorial rating, 0.0 to 5.0.
    pub rating: Option<f32>,
    /// Publisher home page.
    pub publisher_url: Option<String>,
    /// Support page.
    pub support_url: Option<String>,
    /// Support contact address.
    pub contact_email: Option<String>,
    /// Category reference, when classified.
    pub category: Option<TagRef>,
    /// Accessibility reference, when classified.
    pub accessibility: Option<TagRef>,
    /// Language codes the application is available in.
    pub languages: Vec<String>,
    /// Per-platform support records.
    pub platforms: Vec<PlatformSupport>,
    /// Screenshots, in stored order.
    pub screenshots: Vec<Screenshot>,
    /// Record creation timestamp.
    pub created: DateTime<Utc>,
    /// Last modification timestamp.
    pub modified: DateTime<Utc>,
}

/// Catalog entry for one application.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    id: Uuid,
    slug: String,
    name: TranslatedText,
    short_description: TranslatedText,
    description: TranslatedText,
    vendor: Option<String>,
    image: Option<String>,
    publish_date: Option<NaiveDate>,
    rating: Option<f32>,
    publisher_url: Option<String>,
    support_url: Option<String>,
    contact_email: Option<String>,
    category: Option<TagRef>,
    accessibility: Option<TagRef>,
    languages: Vec<String>,
    platforms: Vec<PlatformSupport>,
    screenshots: Vec<Screenshot>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl Application {
    /// Validate and construct an application.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogValidationError`] for a malformed slug, an
    /// out-of-scale rating, or malformed language codes.
    pub fn new(draft: ApplicationDraft) -> Result<Self, CatalogValidationError> {
        Self::try_from(draft)
    }

    /// Identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// URL-safe unique identifier.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }

    /// Localized display name.
    #[must_use]
    pub fn name(&self) -> &TranslatedText {
        &self.name
    }

    /// Localized one-line summary.
    #[must_use]
    pub fn short_description(&self) -> &TranslatedText {
        &self.short_description
    }

    /// Localized long-form description.
    #[must_use]
    pub fn description(&self) -> &TranslatedText {
        &self.description
    }

    /// Publisher or vendor name.
    #[must_use]
    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    /// Icon image path, relative to the media root.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// First publication date.
    #[must_use]
    pub fn publish_date(&self) -> Option<NaiveDate> {
        self.publish_date
    }

    /// Aggregate editorial rating.
    #[must_use]
    pub fn rating(&self) -> Option<f32> {
        self.rating
    }

    /// Publisher home page.
    #[must_use]
    pub fn publisher_url(&self) -> Option<&str> {
        self.publisher_url.as_deref()
    }

    /// Support page.
    #[must_use]
    pub fn support_url(&self) -> Option<&str> {
        self.support_url.as_deref()
    }

    /// Support contact address.
    #[must_use]
    pub fn contact_email(&self) -> Option<&str> {
        self.contact_email.as_deref()
    }

    /// Category reference, when classified.
    #[must_use]
    pub fn category(&self) -> Option<&TagRef> {
        self.category.as_ref()
    }

    /// Accessibility reference, when classified.
    #[must_use]
    pub fn accessibility(&self) -> Option<&TagRef> {
        self.accessibility.as_ref()
    }

    /// Language codes the application is available in.
    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Per-platform support records.
    #[must_use]
    pub fn platforms(&self) -> &[PlatformSupport] {
        &self.platforms
    }

    /// Screenshots, in stored order.
    #[must_use]
    pub fn screenshots(&self) -> &[Screenshot] {
        &self.screenshots
    }

    /// Record creation timestamp.
    #[must_use]
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Last modification timestamp.
    #[must_use]
    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }
}

impl TryFrom<ApplicationDraft> for Application {
    type Error = CatalogValidationError;

    fn try_from(draft: ApplicationDraft) -> Result<Self, Self::Error> {
        let slug = validate_slug(draft.slug, "application.slug")?;
        ensure_valid_rating(draft.rating, "application.rating")?;
        let languages = validate_language_codes(draft.languages)?;

        Ok(Self {
            id: draft.id,
            slug,
            name: draft.name,
            short_description: draft.short_description,
            description: draft.description,
            vendor: draft.vendor,
            image: draft.image,
            publish_date: draft.publish_date,
            rating: draft.rating,
            publisher_url: draft.publisher_url,
            support_url: draft.support_url,
            contact_email: draft.contact_email,
            category: draft.category,
            accessibility: draft.accessibility,
            languages,
            platforms: draft.platforms,
            screenshots: draft.screenshots,
            created: draft.created,
            modified: draft.modified,
        })
    }
}

/// Input payload for [`NewApplication`].
///
/// Platform support records and screenshots are read-only through the API
/// and are therefore absent here; they arrive via catalog seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct NewApplicationDraft {
    /// Requested slug.
    pub slug: String,
    /// Localized display name.
    #[serde(default)]
    pub name: TranslatedText,
    /// Localized one-line summary.
    #[serde(default)]
    pub short_description: TranslatedText,
    /// Localized long-form description.
    #[serde(default)]
    pub description: TranslatedText,
    /// Publisher or vendor name.
    #[serde(default)]
    pub vendor: Option<String>,
    /// Icon image path, relative to the media root.
    #[serde(default)]
    pub image: Option<String>,
    /// First publication date.
    #[serde(default)]
    pub publish_date: Option<NaiveDate>,
    /// Aggregate editorial rating, 0.0 to 5.0.
    #[serde(default)]
    pub rating: Option<f32>,
    /// Publisher home page.
    #[serde(default)]
    pub publisher_url: Option<String>,
    /// Support page.
    #[serde(default)]
    pub support_url: Option<String>,
    /// Support contact address.
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Identifier of the category to reference.
    #[serde(default)]
    pub category_id: Option<Uuid>,
    /// Identifier of the accessibility to reference.
    #[serde(default)]
    pub accessibility_id: Option<Uuid>,
    /// Language codes the application is available in.
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Validated write payload for creating or fully updating an application.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    slug: String,
    name: TranslatedText,
    short_description: TranslatedText,
    description: TranslatedText,
    vendor: Option<String>,
    image: Option<String>,
    publish_date: Option<NaiveDate>,
    rating: Option<f32>,
    publisher_url: Option<String>,
    support_url: Option<String>,
    contact_email: Option<String>,
    category_id: Option<Uuid>,
    accessibility_id: Option<Uuid>,
    languages: Vec<String>,
}

impl NewApplication {
    /// Requested slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }

    /// Localized display name.
    #[must_use]
    pub fn name(&self) -> &TranslatedText {
        &self.name
    }

    /// Localized one-line summary.
    #[must_use]
    pub fn short_description(&self) -> &TranslatedText {
        &self.short_description
    }

    /// Localized long-form description.
    #[must_use]
    pub fn description(&self) -> &TranslatedText {
        &self.description
    }

    /// Publisher or vendor name.
    #[must_use]
    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    /// Icon image path, relative to the media root.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// First publication date.
    #[must_use]
    pub fn publish_date(&self) -> Option<NaiveDate> {
        self.publish_date
    }

    /// Aggregate editorial rating.
    #[must_use]
    pub fn rating(&self) -> Option<f32> {
        self.rating
    }

    /// Publisher home page.
    #[must_use]
    pub fn publisher_url(&self) -> Option<&str> {
        self.publisher_url.as_deref()
    }

    /// Support page.
    #[must_use]
    pub fn support_url(&self) -> Option<&str> {
        self.support_url.as_deref()
    }

    /// Support contact address.
    #[must_use]
    pub fn contact_email(&self) -> Option<&str> {
        self.contact_email.as_deref()
    }

    /// Identifier of the category to reference.
    #[must_use]
    pub fn category_id(&self) -> Option<Uuid> {
        self.category_id
    }

    /// Identifier of the accessibility to reference.
    #[must_use]
    pub fn accessibility_id(&self) -> Option<Uuid> {
        self.accessibility_id
    }

    /// Language codes the application is available in.
    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }
}

impl TryFrom<NewApplicationDraft> for NewApplication {
    type Error = CatalogValidationError;

    fn try_from(draft: NewApplicationDraft) -> Result<Self, Self::Error> {
        let slug = validate_slug(draft.slug, "application.slug")?;
        ensure_valid_rating(draft.rating, "application.rating")?;
        let languages = validate_language_codes(draft.languages)?;

        Ok(Self {
            slug,
            name: draft.name,
            short_description: draft.short_description,
            description: draft.description,
            vendor: draft.vendor,
            image: draft.image,
            publish_date: draft.publish_date,
            rating: draft.rating,
            publisher_url: draft.publisher_url,
            support_url: draft.support_url,
            contact_email: draft.contact_email,
            category_id: draft.category_id,
            accessibility_id: draft.accessibility_id,
            languages,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Application entity and write payload validation coverage.

    use super::*;
    use crate::domain::locale::Locale;
    use rstest::rstest;

    fn write_draft() -> NewApplicationDraft {
        NewApplicationDraft {
            slug: "e-reader".to_owned(),
            name: TranslatedText::new().with(Locale::En, "Reader"),
            short_description: TranslatedText::new(),
            description: TranslatedText::new(),
            vendor: Some("Acme Oy".to_owned()),
            image: None,
            publish_date: None,
            rating: Some(3.5),
            publisher_url: None,
            support_url: None,
            contact_email: None,
            category_id: None,
            accessibility_id: None,
            languages: vec!["fi".to_owned(), "sv".to_owned()],
        }
    }

    #[rstest]
    fn write_payload_accepts_valid_draft() {
        let payload = NewApplication::try_from(write_draft()).expect("valid payload");
        assert_eq!(payload.slug(), "e-reader");
        assert_eq!(payload.languages(), ["fi", "sv"]);
    }

    #[rstest]
    fn write_payload_rejects_out_of_scale_rating() {
        let mut invalid = write_draft();
        invalid.rating = Some(6.0);
        let err = NewApplication::try_from(invalid).expect_err("rating rejected");
        assert!(matches!(err, CatalogValidationError::InvalidRating { .. }));
    }

    #[rstest]
    fn write_payload_rejects_malformed_language_code() {
        let mut invalid = write_draft();
        invalid.languages = vec!["FI".to_owned()];
        let err = NewApplication::try_from(invalid).expect_err("language code rejected");
        assert_eq!(
            err,
            CatalogValidationError::InvalidLanguageCode {
                code: "FI".to_owned()
            }
        );
    }

    #[rstest]
    fn read_model_rejects_malformed_slug() {
        let draft = ApplicationDraft {
            id: Uuid::new_v4(),
            slug: "Bad Slug".to_owned(),
            name: TranslatedText::new(),
            short_description: TranslatedText::new(),
            description: TranslatedText::new(),
            vendor: None,
            image: None,
            publish_date: None,
            rating: None,
            publisher_url: None,
            support_url: None,
            contact_email: None,
            category: None,
            accessibility: None,
            languages: vec![],
            platforms: vec![],
            screenshots: vec![],
            created: Utc::now(),
            modified: Utc::now(),
        };
        let err = Application::new(draft).expect_err("slug rejected");
        assert!(matches!(err, CatalogValidationError::InvalidSlug { .. }));
    }
}
