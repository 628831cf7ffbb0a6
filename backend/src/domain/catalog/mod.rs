//! Catalog domain entities.
//!
//! Applications, the tag entities classifying them (categories, platforms,
//! accessibilities), and the per-application platform support and screenshot
//! records, all validated on construction and free of transport concerns.

use std::fmt;

mod application;
mod filter;
mod platform_support;
mod screenshot;
mod tag;
mod validation;

pub use application::{Application, ApplicationDraft, NewApplication, NewApplicationDraft};
pub use filter::{ApplicationFilter, ApplicationFilterDraft, OrderField, Ordering};
pub use platform_support::{PlatformSupport, PlatformSupportDraft};
pub use screenshot::{Screenshot, ScreenshotDraft};
pub use tag::{NewTag, NewTagDraft, Tag, TagDraft, TagKind, TagRef};

/// Validation errors returned by catalog entity constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogValidationError {
    /// Field is not a valid slug.
    InvalidSlug {
        /// Offending field path.
        field: &'static str,
    },
    /// Field must carry a non-blank value.
    EmptyField {
        /// Offending field path.
        field: &'static str,
    },
    /// Numeric field must not be negative.
    NegativeValue {
        /// Offending field path.
        field: &'static str,
        /// Rejected value.
        value: i32,
    },
    /// Rating outside the accepted scale.
    InvalidRating {
        /// Offending field path.
        field: &'static str,
        /// Rejected value.
        rating: f32,
    },
    /// Rating range filter with min above max.
    InvalidRatingRange {
        /// Lower bound supplied.
        min: f32,
        /// Upper bound supplied.
        max: f32,
    },
    /// Language code not drawn from the slug alphabet.
    InvalidLanguageCode {
        /// Rejected code.
        code: String,
    },
    /// Ordering key naming no known field.
    UnknownOrdering {
        /// Rejected ordering key.
        value: String,
    },
}

impl fmt::Display for CatalogValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSlug { field } => write!(
                f,
                "{field} must contain lowercase ASCII letters, digits, and hyphens"
            ),
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::NegativeValue { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            Self::InvalidRating { field, rating } => {
                write!(f, "{field} must be between 0.0 and 5.0 (got {rating})")
            }
            Self::InvalidRatingRange { min, max } => {
                write!(f, "min_rating must not exceed max_rating (got [{min}, {max}])")
            }
            Self::InvalidLanguageCode { code } => {
                write!(f, "language code '{code}' must be a lowercase identifier")
            }
            Self::UnknownOrdering { value } => {
                write!(
                    f,
                    "ordering '{value}' is not one of publish_date, created, modified"
                )
            }
        }
    }
}

impl std::error::Error for CatalogValidationError {}
