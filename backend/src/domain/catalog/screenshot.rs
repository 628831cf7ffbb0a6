//! Application screenshot record.

use serde::{Deserialize, Serialize};

use super::CatalogValidationError;
use super::validation::{validate_non_empty, validate_slug};

/// Input payload for [`Screenshot::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ScreenshotDraft {
    /// Stored image path, relative to the media root.
    pub image: String,
    /// Slug of the platform the screenshot was captured on.
    pub platform: String,
}

/// Screenshot of an application on one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    image: String,
    platform: String,
}

impl Screenshot {
    /// Validate and construct a screenshot record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogValidationError`] for a blank image path or a
    /// malformed platform slug.
    pub fn new(draft: ScreenshotDraft) -> Result<Self, CatalogValidationError> {
        Self::try_from(draft)
    }

    /// Stored image path, relative to the media root.
    #[must_use]
    pub fn image(&self) -> &str {
        self.image.as_str()
    }

    /// Slug of the platform the screenshot was captured on.
    #[must_use]
    pub fn platform(&self) -> &str {
        self.platform.as_str()
    }
}

impl TryFrom<ScreenshotDraft> for Screenshot {
    type Error = CatalogValidationError;

    fn try_from(draft: ScreenshotDraft) -> Result<Self, Self::Error> {
        let image = validate_non_empty(draft.image, "screenshot.image")?;
        let platform = validate_slug(draft.platform, "screenshot.platform")?;
        Ok(Self { image, platform })
    }
}
