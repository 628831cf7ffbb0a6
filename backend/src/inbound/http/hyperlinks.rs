//! Hyperlink and media URL assembly for resource representations.
//!
//! Responses are hyperlinked: each representation carries an absolute `url`
//! for itself and its nested resources, and stored media paths are rendered
//! absolute against the request origin under the configured media prefix.

use actix_web::HttpRequest;
use url::Url;
use uuid::Uuid;

use crate::domain::{Error, TagKind};

/// Base path of the versioned API.
pub const API_BASE: &str = "/api/v1";

/// Builds absolute URLs from one request's origin.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    origin: String,
    media_base: String,
}

impl LinkBuilder {
    /// Derive the origin (scheme and authority) from the request.
    pub fn from_request(req: &HttpRequest, media_base: &str) -> Self {
        let info = req.connection_info();
        Self {
            origin: format!("{}://{}", info.scheme(), info.host()),
            media_base: media_base.trim_end_matches('/').to_owned(),
        }
    }

    /// Detail URL for one application.
    #[must_use]
    pub fn application(&self, id: Uuid) -> String {
        format!("{}{API_BASE}/applications/{id}", self.origin)
    }

    /// Detail URL for one tag of the given kind.
    #[must_use]
    pub fn tag(&self, kind: TagKind, id: Uuid) -> String {
        format!("{}{API_BASE}/{}/{id}", self.origin, kind.resource())
    }

    /// Absolute URL for a stored media path.
    ///
    /// Already-absolute values pass through untouched so externally hosted
    /// images keep working.
    #[must_use]
    pub fn media(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        format!(
            "{}{}/{}",
            self.origin,
            self.media_base,
            path.trim_start_matches('/')
        )
    }
}

/// Reconstruct the full request URL, including the query string.
///
/// Used by the pagination envelope to derive `next`/`previous` links.
///
/// # Errors
///
/// Returns an internal error when the reconstructed URL fails to parse,
/// which would indicate a malformed `Host` header slipped through Actix.
pub fn request_url(req: &HttpRequest) -> Result<Url, Error> {
    let info = req.connection_info();
    let raw = format!(
        "{}://{}{}",
        info.scheme(),
        info.host(),
        req.uri()
            .path_and_query()
            .map_or_else(|| req.uri().path(), |paq| paq.as_str())
    );
    Url::parse(&raw).map_err(|err| Error::internal(format!("request URL not parseable: {err}")))
}
