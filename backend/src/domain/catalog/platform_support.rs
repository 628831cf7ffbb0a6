//! Per-platform support record attached to an application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{ensure_non_negative, ensure_valid_rating};
use super::{CatalogValidationError, TagRef};

/// Input payload for [`PlatformSupport::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct PlatformSupportDraft {
    /// Identifier of the support record itself.
    pub id: Uuid,
    /// Platform the application runs on.
    pub platform: TagRef,
    /// Store listing for the application on this platform.
    pub store_url: Option<String>,
    /// Store rating on this platform.
    pub rating: Option<f32>,
    /// Number of store reviews on this platform.
    pub nr_reviews: Option<i32>,
    /// When the store listing was last updated.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Platform-specific metadata for one application.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformSupport {
    id: Uuid,
    platform: TagRef,
    store_url: Option<String>,
    rating: Option<f32>,
    nr_reviews: Option<i32>,
    last_updated: Option<DateTime<Utc>>,
}

impl PlatformSupport {
    /// Validate and construct a support record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogValidationError`] for out-of-scale ratings or
    /// negative review counts.
    pub fn new(draft: PlatformSupportDraft) -> Result<Self, CatalogValidationError> {
        Self::try_from(draft)
    }

    /// Identifier of the support record.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Platform the application runs on.
    #[must_use]
    pub fn platform(&self) -> &TagRef {
        &self.platform
    }

    /// Store listing URL, when known.
    #[must_use]
    pub fn store_url(&self) -> Option<&str> {
        self.store_url.as_deref()
    }

    /// Store rating on this platform.
    #[must_use]
    pub fn rating(&self) -> Option<f32> {
        self.rating
    }

    /// Number of store reviews on this platform.
    #[must_use]
    pub fn nr_reviews(&self) -> Option<i32> {
        self.nr_reviews
    }

    /// When the store listing was last updated.
    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

impl TryFrom<PlatformSupportDraft> for PlatformSupport {
    type Error = CatalogValidationError;

    fn try_from(draft: PlatformSupportDraft) -> Result<Self, Self::Error> {
        ensure_valid_rating(draft.rating, "platform_support.rating")?;
        ensure_non_negative(draft.nr_reviews, "platform_support.nr_reviews")?;
        Ok(Self {
            id: draft.id,
            platform: draft.platform,
            store_url: draft.store_url,
            rating: draft.rating,
            nr_reviews: draft.nr_reviews,
            last_updated: draft.last_updated,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Platform support validation coverage.

    use super::*;
    use crate::domain::locale::TranslatedText;
    use rstest::rstest;

    fn draft() -> PlatformSupportDraft {
        PlatformSupportDraft {
            id: Uuid::new_v4(),
            platform: TagRef {
                id: Uuid::new_v4(),
                slug: "android".to_owned(),
                name: TranslatedText::new(),
            },
            store_url: Some("https://play.example/app".to_owned()),
            rating: Some(4.5),
            nr_reviews: Some(12),
            last_updated: None,
        }
    }

    #[rstest]
    fn accepts_in_scale_rating() {
        let support = PlatformSupport::new(draft()).expect("valid support record");
        assert_eq!(support.rating(), Some(4.5));
        assert_eq!(support.platform().slug, "android");
    }

    #[rstest]
    #[case(-0.1)]
    #[case(5.1)]
    fn rejects_out_of_scale_rating(#[case] rating: f32) {
        let mut invalid = draft();
        invalid.rating = Some(rating);
        let err = PlatformSupport::new(invalid).expect_err("rating rejected");
        assert!(matches!(err, CatalogValidationError::InvalidRating { .. }));
    }

    #[rstest]
    fn rejects_negative_review_count() {
        let mut invalid = draft();
        invalid.nr_reviews = Some(-1);
        let err = PlatformSupport::new(invalid).expect_err("review count rejected");
        assert_eq!(
            err,
            CatalogValidationError::NegativeValue {
                field: "platform_support.nr_reviews",
                value: -1,
            }
        );
    }
}
