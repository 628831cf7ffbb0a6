//! Shared helpers for Diesel repository implementations.
//!
//! Error mapping from pool and Diesel failures into the domain-facing
//! [`CatalogRepositoryError`] variants, plus small conversion utilities.

use tracing::debug;

use crate::domain::ports::CatalogRepositoryError;

use super::pool::PoolError;

/// Map pool errors to domain catalog repository errors.
pub(crate) fn map_pool_error(error: PoolError) -> CatalogRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CatalogRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain catalog repository errors.
///
/// Unique violations surface as conflicts so the API can answer 409 for
/// duplicate slugs; closed connections surface as connection failures so
/// the API can answer 503.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> CatalogRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::NotFound => CatalogRepositoryError::query("record not found"),
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            match kind {
                DatabaseErrorKind::UniqueViolation => CatalogRepositoryError::conflict(
                    info.constraint_name()
                        .map_or_else(
                            || "duplicate value".to_owned(),
                            |constraint| format!("duplicate value violates {constraint}"),
                        ),
                ),
                DatabaseErrorKind::ForeignKeyViolation => CatalogRepositoryError::query(
                    "referenced record does not exist",
                ),
                DatabaseErrorKind::ClosedConnection => {
                    CatalogRepositoryError::connection("database connection error")
                }
                _ => CatalogRepositoryError::query("database error"),
            }
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            CatalogRepositoryError::query("database error")
        }
    }
}

/// Collect row conversion results, mapping the first error through `map_err`.
pub(crate) fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}

/// Escape LIKE wildcards in a user-supplied search term.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    //! Helper coverage for error mapping and pattern escaping.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_variant() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, CatalogRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn not_found_maps_to_query_variant() {
        let mapped = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(mapped, CatalogRepositoryError::Query { .. }));
    }

    #[rstest]
    #[case("reader", "%reader%")]
    #[case("50%", "%50\\%%")]
    #[case("a_b", "%a\\_b%")]
    fn like_patterns_escape_wildcards(#[case] term: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(term), expected);
    }
}
