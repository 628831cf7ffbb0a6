//! Validation helpers shared by catalog entity constructors.

use super::CatalogValidationError;
use crate::domain::slug::is_valid_slug;

pub(super) fn validate_slug(
    value: String,
    field: &'static str,
) -> Result<String, CatalogValidationError> {
    if !is_valid_slug(&value) {
        return Err(CatalogValidationError::InvalidSlug { field });
    }
    Ok(value)
}

pub(super) fn validate_non_empty(
    value: String,
    field: &'static str,
) -> Result<String, CatalogValidationError> {
    if value.trim().is_empty() {
        return Err(CatalogValidationError::EmptyField { field });
    }
    Ok(value)
}

pub(super) fn ensure_non_negative(
    value: Option<i32>,
    field: &'static str,
) -> Result<(), CatalogValidationError> {
    if let Some(value) = value {
        if value < 0 {
            return Err(CatalogValidationError::NegativeValue { field, value });
        }
    }
    Ok(())
}

pub(super) fn ensure_valid_rating(
    rating: Option<f32>,
    field: &'static str,
) -> Result<(), CatalogValidationError> {
    if let Some(rating) = rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(CatalogValidationError::InvalidRating { field, rating });
        }
    }
    Ok(())
}

pub(super) fn validate_language_codes(
    codes: Vec<String>,
) -> Result<Vec<String>, CatalogValidationError> {
    for code in &codes {
        if !is_valid_slug(code) {
            return Err(CatalogValidationError::InvalidLanguageCode { code: code.clone() });
        }
    }
    Ok(codes)
}
