//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ApplicationRepository, TagRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Application repository port.
    pub applications: Arc<dyn ApplicationRepository>,
    /// Tag repository port, shared by all three tag resources.
    pub tags: Arc<dyn TagRepository>,
    /// Path prefix under which media files are served, e.g. `/media`.
    pub media_base: String,
}

impl HttpState {
    /// Construct state from the repository ports and media prefix.
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        tags: Arc<dyn TagRepository>,
        media_base: impl Into<String>,
    ) -> Self {
        Self {
            applications,
            tags,
            media_base: media_base.into(),
        }
    }
}
