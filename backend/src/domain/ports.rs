//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use pagination::PageParams;
use thiserror::Error;
use uuid::Uuid;

use super::catalog::{Application, ApplicationFilter, NewApplication, NewTag, Tag, TagKind};
use super::{Error, ErrorCode};

/// Persistence errors raised by catalog repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogRepositoryError {
    /// Repository connection could not be established.
    #[error("catalog repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("catalog repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// A uniqueness constraint was violated.
    #[error("catalog conflict: {message}")]
    Conflict {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl CatalogRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for uniqueness violations.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

impl From<CatalogRepositoryError> for Error {
    fn from(error: CatalogRepositoryError) -> Self {
        match error {
            CatalogRepositoryError::Connection { message } => {
                Self::service_unavailable(message)
            }
            CatalogRepositoryError::Query { message } => Self::new(ErrorCode::InternalError, message),
            CatalogRepositoryError::Conflict { message } => Self::conflict(message),
        }
    }
}

/// One window of applications out of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationPage {
    /// Total number of applications matching the filter.
    pub count: i64,
    /// Applications inside the requested window.
    pub items: Vec<Application>,
}

/// One window of tags out of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct TagPage {
    /// Total number of tags of the requested kind.
    pub count: i64,
    /// Tags inside the requested window.
    pub items: Vec<Tag>,
}

/// Persistence port for application aggregates.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// List applications matching `filter`, windowed by `window`.
    async fn list(
        &self,
        filter: &ApplicationFilter,
        window: PageParams,
    ) -> Result<ApplicationPage, CatalogRepositoryError>;

    /// Fetch one application by identifier.
    async fn find(&self, id: Uuid) -> Result<Option<Application>, CatalogRepositoryError>;

    /// Create an application from a validated write payload.
    async fn create(
        &self,
        application: &NewApplication,
    ) -> Result<Application, CatalogRepositoryError>;

    /// Replace an application's writable fields; `None` when absent.
    async fn update(
        &self,
        id: Uuid,
        application: &NewApplication,
    ) -> Result<Option<Application>, CatalogRepositoryError>;

    /// Delete an application; `false` when absent.
    async fn delete(&self, id: Uuid) -> Result<bool, CatalogRepositoryError>;
}

/// Persistence port for tag entities, shared by all three tag resources.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// List tags of `kind`, windowed by `window`.
    async fn list(
        &self,
        kind: TagKind,
        window: PageParams,
    ) -> Result<TagPage, CatalogRepositoryError>;

    /// Fetch one tag by identifier.
    async fn find(&self, kind: TagKind, id: Uuid)
    -> Result<Option<Tag>, CatalogRepositoryError>;

    /// Create a tag from a validated write payload.
    async fn create(&self, kind: TagKind, tag: &NewTag) -> Result<Tag, CatalogRepositoryError>;

    /// Replace a tag's writable fields; `None` when absent.
    async fn update(
        &self,
        kind: TagKind,
        id: Uuid,
        tag: &NewTag,
    ) -> Result<Option<Tag>, CatalogRepositoryError>;

    /// Delete a tag; `false` when absent.
    async fn delete(&self, kind: TagKind, id: Uuid) -> Result<bool, CatalogRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Repository error mapping coverage.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn connection_errors_surface_as_service_unavailable() {
        let error = Error::from(CatalogRepositoryError::connection("pool exhausted"));
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        assert_eq!(error.message(), "pool exhausted");
    }

    #[rstest]
    fn query_errors_surface_as_internal() {
        let error = Error::from(CatalogRepositoryError::query("syntax error"));
        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[rstest]
    fn conflicts_surface_as_conflict() {
        let error = Error::from(CatalogRepositoryError::conflict("slug already taken"));
        assert_eq!(error.code(), ErrorCode::Conflict);
    }
}
