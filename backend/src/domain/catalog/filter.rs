//! Application listing filter model.
//!
//! Maps the named query parameters of the applications collection endpoint
//! onto a validated filter the persistence adapter turns into lookups:
//! slug equality for related tags and languages, bounds on the rating, a
//! case-insensitive search term, and an ordering key.

use super::CatalogValidationError;

/// Field an application listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    /// First publication date.
    PublishDate,
    /// Record creation timestamp.
    Created,
    /// Last modification timestamp.
    Modified,
}

impl OrderField {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "publish_date" => Some(Self::PublishDate),
            "created" => Some(Self::Created),
            "modified" => Some(Self::Modified),
            _ => None,
        }
    }
}

/// Ordering applied to an application listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    field: OrderField,
    descending: bool,
}

impl Default for Ordering {
    /// Listings default to ascending creation order.
    fn default() -> Self {
        Self {
            field: OrderField::Created,
            descending: false,
        }
    }
}

impl Ordering {
    /// Parse an ordering key, honouring a `-` prefix for descending order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogValidationError::UnknownOrdering`] for keys naming
    /// no orderable field.
    pub fn parse(raw: &str) -> Result<Self, CatalogValidationError> {
        let (descending, key) = raw
            .strip_prefix('-')
            .map_or((false, raw), |stripped| (true, stripped));
        OrderField::parse(key)
            .map(|field| Self { field, descending })
            .ok_or_else(|| CatalogValidationError::UnknownOrdering {
                value: raw.to_owned(),
            })
    }

    /// Field ordered by.
    #[must_use]
    pub fn field(&self) -> OrderField {
        self.field
    }

    /// `true` for descending order.
    #[must_use]
    pub fn is_descending(&self) -> bool {
        self.descending
    }
}

/// Unvalidated filter parameters, as parsed from the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationFilterDraft {
    /// Category slug to match.
    pub category: Option<String>,
    /// Accessibility slug to match.
    pub accessibility: Option<String>,
    /// Platform slug to match.
    pub platform: Option<String>,
    /// Language code to match.
    pub language: Option<String>,
    /// Lower rating bound, inclusive.
    pub min_rating: Option<f32>,
    /// Upper rating bound, inclusive.
    pub max_rating: Option<f32>,
    /// Free-text search term.
    pub search: Option<String>,
    /// Ordering key, `-`-prefixed for descending.
    pub ordering: Option<String>,
}

/// Validated filter for an application listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationFilter {
    category: Option<String>,
    accessibility: Option<String>,
    platform: Option<String>,
    language: Option<String>,
    min_rating: Option<f32>,
    max_rating: Option<f32>,
    search: Option<String>,
    ordering: Ordering,
}

impl ApplicationFilter {
    /// Category slug to match.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Accessibility slug to match.
    #[must_use]
    pub fn accessibility(&self) -> Option<&str> {
        self.accessibility.as_deref()
    }

    /// Platform slug to match.
    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Language code to match.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Lower rating bound, inclusive.
    #[must_use]
    pub fn min_rating(&self) -> Option<f32> {
        self.min_rating
    }

    /// Upper rating bound, inclusive.
    #[must_use]
    pub fn max_rating(&self) -> Option<f32> {
        self.max_rating
    }

    /// Free-text search term.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Ordering applied to the listing.
    #[must_use]
    pub fn ordering(&self) -> Ordering {
        self.ordering
    }
}

/// Drop blank strings so `?search=` behaves like an absent parameter.
fn normalise(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

impl TryFrom<ApplicationFilterDraft> for ApplicationFilter {
    type Error = CatalogValidationError;

    fn try_from(draft: ApplicationFilterDraft) -> Result<Self, Self::Error> {
        for (bound, field) in [
            (draft.min_rating, "min_rating"),
            (draft.max_rating, "max_rating"),
        ] {
            if let Some(rating) = bound {
                if !(0.0..=5.0).contains(&rating) {
                    return Err(CatalogValidationError::InvalidRating { field, rating });
                }
            }
        }
        if let (Some(min), Some(max)) = (draft.min_rating, draft.max_rating) {
            if min > max {
                return Err(CatalogValidationError::InvalidRatingRange { min, max });
            }
        }

        let ordering = normalise(draft.ordering)
            .map(|raw| Ordering::parse(&raw))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            category: normalise(draft.category),
            accessibility: normalise(draft.accessibility),
            platform: normalise(draft.platform),
            language: normalise(draft.language),
            min_rating: draft.min_rating,
            max_rating: draft.max_rating,
            search: normalise(draft.search),
            ordering,
        })
    }
}
