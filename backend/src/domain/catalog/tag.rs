//! Tag entities: categories, platforms, and accessibilities.
//!
//! All three tag resources share one shape (a slug plus a localized name),
//! so a single entity type serves them, discriminated by [`TagKind`] at the
//! repository and API edges.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::CatalogValidationError;
use super::validation::validate_slug;
use crate::domain::locale::TranslatedText;

/// Kind of tag resource a request addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// Application category.
    Category,
    /// Supported platform.
    Platform,
    /// Accessibility feature.
    Accessibility,
}

impl TagKind {
    /// Collection path segment for this tag resource.
    #[must_use]
    pub fn resource(self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Platform => "platforms",
            Self::Accessibility => "accessibilities",
        }
    }

    /// Singular noun used in error messages.
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Platform => "platform",
            Self::Accessibility => "accessibility",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Input payload for [`Tag::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct TagDraft {
    /// Identifier.
    pub id: Uuid,
    /// URL-safe unique identifier.
    pub slug: String,
    /// Localized display name.
    pub name: TranslatedText,
    /// Applications referencing this tag.
    pub application_ids: Vec<Uuid>,
}

/// A named, sluggable classification entity attached to applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    id: Uuid,
    slug: String,
    name: TranslatedText,
    application_ids: Vec<Uuid>,
}

impl Tag {
    /// Validate and construct a tag.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogValidationError`] when the slug is malformed.
    pub fn new(draft: TagDraft) -> Result<Self, CatalogValidationError> {
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

    /// Applications referencing this tag.
    #[must_use]
    pub fn application_ids(&self) -> &[Uuid] {
        &self.application_ids
    }
}

impl TryFrom<TagDraft> for Tag {
    type Error = CatalogValidationError;

    fn try_from(draft: TagDraft) -> Result<Self, Self::Error> {
        let slug = validate_slug(draft.slug, "tag.slug")?;
        Ok(Self {
            id: draft.id,
            slug,
            name: draft.name,
            application_ids: draft.application_ids,
        })
    }
}

/// Nested tag reference rendered inside application representations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRef {
    /// Identifier of the referenced tag.
    pub id: Uuid,
    /// Slug of the referenced tag.
    pub slug: String,
    /// Localized name of the referenced tag.
    pub name: TranslatedText,
}

/// Input payload for [`NewTag`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct NewTagDraft {
    /// Requested slug.
    pub slug: String,
    /// Localized display name.
    #[serde(default)]
    pub name: TranslatedText,
}

/// Validated write payload for creating or updating a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    slug: String,
    name: TranslatedText,
}

impl NewTag {
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
}

impl TryFrom<NewTagDraft> for NewTag {
    type Error = CatalogValidationError;

    fn try_from(draft: NewTagDraft) -> Result<Self, Self::Error> {
        let slug = validate_slug(draft.slug, "tag.slug")?;
        Ok(Self {
            slug,
            name: draft.name,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Tag entity validation coverage.

    use super::*;
    use crate::domain::locale::Locale;
    use rstest::rstest;

    fn draft(slug: &str) -> TagDraft {
        TagDraft {
            id: Uuid::new_v4(),
            slug: slug.to_owned(),
            name: TranslatedText::new().with(Locale::En, "Games"),
            application_ids: vec![],
        }
    }

    #[rstest]
    fn accepts_valid_slug() {
        let tag = Tag::new(draft("games")).expect("valid tag");
        assert_eq!(tag.slug(), "games");
        assert_eq!(tag.name().get(Locale::En), Some("Games"));
    }

    #[rstest]
    #[case("Games")]
    #[case("")]
    #[case("two words")]
    fn rejects_malformed_slug(#[case] slug: &str) {
        let err = Tag::new(draft(slug)).expect_err("slug rejected");
        assert_eq!(err, CatalogValidationError::InvalidSlug { field: "tag.slug" });
    }

    #[rstest]
    fn write_payload_accepts_blank_name() {
        let tag = NewTag::try_from(NewTagDraft {
            slug: "braille".to_owned(),
            name: TranslatedText::new(),
        })
        .expect("blank names are allowed");
        assert!(tag.name().is_blank());
    }

    #[rstest]
    fn kind_maps_to_resource_paths() {
        assert_eq!(TagKind::Category.resource(), "categories");
        assert_eq!(TagKind::Platform.resource(), "platforms");
        assert_eq!(TagKind::Accessibility.resource(), "accessibilities");
    }
}
