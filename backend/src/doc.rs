//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: every
//! endpoint from the inbound layer plus the shared schemas. The generated
//! document backs Swagger UI in debug builds and is exported at
//! `/api-docs/openapi.json`.

use utoipa::OpenApi;

use crate::domain::error::{Error, ErrorCode};
use crate::domain::locale::{Locale, TranslatedText};
use crate::domain::{NewApplicationDraft, NewTagDraft};
use crate::inbound::http::applications::{
    ApplicationResponse, PlatformSupportResponse, ScreenshotResponse, TagRefResponse,
};
use crate::inbound::http::tags::TagResponse;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Application catalog API",
        description = "CRUD, filtering, search, and ordering over the application catalog.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::applications::list_applications,
        crate::inbound::http::applications::get_application,
        crate::inbound::http::applications::create_application,
        crate::inbound::http::applications::update_application,
        crate::inbound::http::applications::delete_application,
        crate::inbound::http::tags::list_categories,
        crate::inbound::http::tags::get_category,
        crate::inbound::http::tags::create_category,
        crate::inbound::http::tags::update_category,
        crate::inbound::http::tags::delete_category,
        crate::inbound::http::tags::list_platforms,
        crate::inbound::http::tags::get_platform,
        crate::inbound::http::tags::create_platform,
        crate::inbound::http::tags::update_platform,
        crate::inbound::http::tags::delete_platform,
        crate::inbound::http::tags::list_accessibilities,
        crate::inbound::http::tags::get_accessibility,
        crate::inbound::http::tags::create_accessibility,
        crate::inbound::http::tags::update_accessibility,
        crate::inbound::http::tags::delete_accessibility,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApplicationResponse,
        TagResponse,
        TagRefResponse,
        PlatformSupportResponse,
        ScreenshotResponse,
        NewApplicationDraft,
        NewTagDraft,
        TranslatedText,
        Locale,
        Error,
        ErrorCode,
        pagination::Page<ApplicationResponse>,
        pagination::Page<TagResponse>,
    )),
    tags(
        (name = "applications", description = "Catalog applications"),
        (name = "categories", description = "Category tags"),
        (name = "platforms", description = "Platform tags"),
        (name = "accessibilities", description = "Accessibility tags"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying endpoint registration in the generated document.

    use super::*;

    #[test]
    fn openapi_registers_every_resource_collection() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/applications",
            "/api/v1/categories",
            "/api/v1/platforms",
            "/api/v1/accessibilities",
            "/health/ready",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "OpenAPI document should register {path}"
            );
        }
    }

    #[test]
    fn openapi_registers_detail_operations() {
        let doc = ApiDoc::openapi();
        let detail = doc
            .paths
            .paths
            .get("/api/v1/applications/{id}")
            .expect("application detail path");
        assert!(detail.get.is_some());
        assert!(detail.put.is_some());
        assert!(detail.delete.is_some());
    }
}
