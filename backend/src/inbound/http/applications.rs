//! Application resource endpoints.
//!
//! ```text
//! GET    /api/v1/applications
//! POST   /api/v1/applications
//! GET    /api/v1/applications/{id}
//! PUT    /api/v1/applications/{id}
//! DELETE /api/v1/applications/{id}
//! ```
//!
//! The collection endpoint honours the catalog filters (tag and language
//! slugs, rating bounds), free-text search, ordering, and pagination.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use pagination::{Page, PageParams};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::locale::TranslatedText;
use crate::domain::{
    Application, ApplicationFilter, ApplicationFilterDraft, Error, NewApplication,
    NewApplicationDraft, PlatformSupport, Screenshot, TagRef,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::hyperlinks::{LinkBuilder, request_url};
use crate::inbound::http::state::HttpState;

/// Nested tag reference inside an application representation.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagRefResponse {
    /// Detail URL of the referenced tag.
    pub url: String,
    /// Identifier of the referenced tag.
    pub id: Uuid,
    /// Localized name of the referenced tag.
    pub name: TranslatedText,
    /// Slug of the referenced tag.
    pub slug: String,
}

impl TagRefResponse {
    fn from_domain(tag: &TagRef, kind: crate::domain::TagKind, links: &LinkBuilder) -> Self {
        Self {
            url: links.tag(kind, tag.id),
            id: tag.id,
            name: tag.name.clone(),
            slug: tag.slug.clone(),
        }
    }
}

/// Platform support entry inside an application representation.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSupportResponse {
    /// Detail URL of the platform.
    pub url: String,
    /// Identifier of the support record.
    pub id: Uuid,
    /// Localized platform name.
    pub name: TranslatedText,
    /// Platform slug.
    pub slug: String,
    /// Store listing for the application on this platform.
    pub store_url: Option<String>,
    /// Store rating on this platform.
    pub rating: Option<f32>,
    /// Number of store reviews on this platform.
    pub nr_reviews: Option<i32>,
    /// When the store listing was last updated.
    pub last_updated: Option<DateTime<Utc>>,
}

impl PlatformSupportResponse {
    fn from_domain(support: &PlatformSupport, links: &LinkBuilder) -> Self {
        Self {
            url: links.tag(crate::domain::TagKind::Platform, support.platform().id),
            id: support.id(),
            name: support.platform().name.clone(),
            slug: support.platform().slug.clone(),
            store_url: support.store_url().map(str::to_owned),
            rating: support.rating(),
            nr_reviews: support.nr_reviews(),
            last_updated: support.last_updated(),
        }
    }
}

/// Screenshot entry inside an application representation.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotResponse {
    /// Absolute image URL.
    pub image: String,
    /// Slug of the platform the screenshot was captured on.
    pub platform: String,
}

impl ScreenshotResponse {
    fn from_domain(screenshot: &Screenshot, links: &LinkBuilder) -> Self {
        Self {
            image: links.media(screenshot.image()),
            platform: screenshot.platform().to_owned(),
        }
    }
}

/// Application representation.
///
/// The `categories` and `accessibilities` fields hold at most one nested
/// reference each; the plural names are kept for wire compatibility.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    /// Detail URL of this application.
    pub url: String,
    /// Identifier.
    pub id: Uuid,
    /// Localized display name.
    pub name: TranslatedText,
    /// URL-safe unique identifier.
    pub slug: String,
    /// Absolute icon image URL, when stored.
    pub image: Option<String>,
    /// Localized one-line summary.
    pub short_description: TranslatedText,
    /// Localized long-form description.
    pub description: TranslatedText,
    /// Publisher or vendor name.
    pub vendor: Option<String>,
    /// First publication date.
    pub publish_date: Option<NaiveDate>,
    /// Aggregate editorial rating.
    pub rating: Option<f32>,
    /// Publisher home page.
    pub publisher_url: Option<String>,
    /// Support page.
    pub support_url: Option<String>,
    /// Support contact address.
    pub contact_email: Option<String>,
    /// Record creation timestamp.
    pub created: DateTime<Utc>,
    /// Last modification timestamp.
    pub modified: DateTime<Utc>,
    /// Language codes the application is available in.
    pub languages: Vec<String>,
    /// Category reference, when classified.
    pub categories: Option<TagRefResponse>,
    /// Accessibility reference, when classified.
    pub accessibilities: Option<TagRefResponse>,
    /// Per-platform support entries.
    pub platforms: Vec<PlatformSupportResponse>,
    /// Screenshots with absolute image URLs.
    pub screenshots: Vec<ScreenshotResponse>,
}

impl ApplicationResponse {
    /// Render one application against the request's link builder.
    pub fn from_domain(application: &Application, links: &LinkBuilder) -> Self {
        use crate::domain::TagKind;

        Self {
            url: links.application(application.id()),
            id: application.id(),
            name: application.name().clone(),
            slug: application.slug().to_owned(),
            image: application.image().map(|path| links.media(path)),
            short_description: application.short_description().clone(),
            description: application.description().clone(),
            vendor: application.vendor().map(str::to_owned),
            publish_date: application.publish_date(),
            rating: application.rating(),
            publisher_url: application.publisher_url().map(str::to_owned),
            support_url: application.support_url().map(str::to_owned),
            contact_email: application.contact_email().map(str::to_owned),
            created: application.created(),
            modified: application.modified(),
            languages: application.languages().to_vec(),
            categories: application
                .category()
                .map(|tag| TagRefResponse::from_domain(tag, TagKind::Category, links)),
            accessibilities: application
                .accessibility()
                .map(|tag| TagRefResponse::from_domain(tag, TagKind::Accessibility, links)),
            platforms: application
                .platforms()
                .iter()
                .map(|support| PlatformSupportResponse::from_domain(support, links))
                .collect(),
            screenshots: application
                .screenshots()
                .iter()
                .map(|screenshot| ScreenshotResponse::from_domain(screenshot, links))
                .collect(),
        }
    }
}

/// Query parameters accepted by the applications collection endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApplicationListQuery {
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
    /// Case-insensitive term searched across names, descriptions, vendor.
    pub search: Option<String>,
    /// Ordering key: `publish_date`, `created`, or `modified`, `-`-prefixed
    /// for descending.
    pub ordering: Option<String>,
    /// Window size, up to 100.
    pub limit: Option<i64>,
    /// Rows skipped before the window starts.
    pub offset: Option<i64>,
}

impl ApplicationListQuery {
    fn filter(&self) -> Result<ApplicationFilter, Error> {
        ApplicationFilter::try_from(ApplicationFilterDraft {
            category: self.category.clone(),
            accessibility: self.accessibility.clone(),
            platform: self.platform.clone(),
            language: self.language.clone(),
            min_rating: self.min_rating,
            max_rating: self.max_rating,
            search: self.search.clone(),
            ordering: self.ordering.clone(),
        })
        .map_err(|err| Error::invalid_request(err.to_string()))
    }

    fn window(&self) -> Result<PageParams, Error> {
        PageParams::new(self.limit, self.offset)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

/// List applications matching the given filters.
#[utoipa::path(
    get,
    path = "/api/v1/applications",
    params(ApplicationListQuery),
    responses(
        (status = 200, description = "One window of applications", body = Page<ApplicationResponse>),
        (status = 400, description = "Malformed filter or window", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["applications"],
    operation_id = "listApplications"
)]
#[get("/applications")]
pub async fn list_applications(
    state: web::Data<HttpState>,
    query: web::Query<ApplicationListQuery>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let filter = query.filter()?;
    let window = query.window()?;

    let page = state.applications.list(&filter, window).await?;

    let links = LinkBuilder::from_request(&req, &state.media_base);
    let results: Vec<ApplicationResponse> = page
        .items
        .iter()
        .map(|application| ApplicationResponse::from_domain(application, &links))
        .collect();
    let envelope = Page::new(page.count, results, window, &request_url(&req)?);
    Ok(HttpResponse::Ok().json(envelope))
}

/// Fetch one application.
#[utoipa::path(
    get,
    path = "/api/v1/applications/{id}",
    params(("id" = Uuid, Path, description = "Application identifier")),
    responses(
        (status = 200, description = "Application detail", body = ApplicationResponse),
        (status = 404, description = "No such application", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["applications"],
    operation_id = "getApplication"
)]
#[get("/applications/{id}")]
pub async fn get_application(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let application = state
        .applications
        .find(id)
        .await?
        .ok_or_else(|| Error::not_found(format!("application {id} not found")))?;

    let links = LinkBuilder::from_request(&req, &state.media_base);
    Ok(HttpResponse::Ok().json(ApplicationResponse::from_domain(&application, &links)))
}

/// Create an application.
#[utoipa::path(
    post,
    path = "/api/v1/applications",
    request_body = NewApplicationDraft,
    responses(
        (status = 201, description = "Application created", body = ApplicationResponse),
        (status = 400, description = "Payload fails validation", body = Error),
        (status = 409, description = "Slug already taken", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["applications"],
    operation_id = "createApplication"
)]
#[post("/applications")]
pub async fn create_application(
    state: web::Data<HttpState>,
    body: web::Json<NewApplicationDraft>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let payload = NewApplication::try_from(body.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    let application = state.applications.create(&payload).await?;

    let links = LinkBuilder::from_request(&req, &state.media_base);
    Ok(HttpResponse::Created().json(ApplicationResponse::from_domain(&application, &links)))
}

/// Replace an application's writable fields.
#[utoipa::path(
    put,
    path = "/api/v1/applications/{id}",
    params(("id" = Uuid, Path, description = "Application identifier")),
    request_body = NewApplicationDraft,
    responses(
        (status = 200, description = "Application updated", body = ApplicationResponse),
        (status = 400, description = "Payload fails validation", body = Error),
        (status = 404, description = "No such application", body = Error),
        (status = 409, description = "Slug already taken", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["applications"],
    operation_id = "updateApplication"
)]
#[put("/applications/{id}")]
pub async fn update_application(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    body: web::Json<NewApplicationDraft>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let payload = NewApplication::try_from(body.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    let application = state
        .applications
        .update(id, &payload)
        .await?
        .ok_or_else(|| Error::not_found(format!("application {id} not found")))?;

    let links = LinkBuilder::from_request(&req, &state.media_base);
    Ok(HttpResponse::Ok().json(ApplicationResponse::from_domain(&application, &links)))
}

/// Delete an application.
#[utoipa::path(
    delete,
    path = "/api/v1/applications/{id}",
    params(("id" = Uuid, Path, description = "Application identifier")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "No such application", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["applications"],
    operation_id = "deleteApplication"
)]
#[delete("/applications/{id}")]
pub async fn delete_application(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    if !state.applications.delete(id).await? {
        return Err(Error::not_found(format!("application {id} not found")));
    }
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    //! Query parsing and representation mapping coverage.

    use super::*;
    use crate::domain::locale::Locale;
    use crate::domain::{ApplicationDraft, TagKind};
    use actix_web::test::TestRequest;
    use rstest::rstest;

    fn links() -> LinkBuilder {
        let req = TestRequest::get()
            .uri("/api/v1/applications")
            .insert_header(("Host", "catalog.example"))
            .to_http_request();
        LinkBuilder::from_request(&req, "/media")
    }

    fn sample_application() -> Application {
        Application::new(ApplicationDraft {
            id: Uuid::nil(),
            slug: "e-reader".to_owned(),
            name: TranslatedText::new().with(Locale::En, "Reader"),
            short_description: TranslatedText::new(),
            description: TranslatedText::new(),
            vendor: Some("Acme Oy".to_owned()),
            image: Some("icons/reader.png".to_owned()),
            publish_date: None,
            rating: Some(4.0),
            publisher_url: None,
            support_url: None,
            contact_email: None,
            category: Some(TagRef {
                id: Uuid::nil(),
                slug: "books".to_owned(),
                name: TranslatedText::new().with(Locale::En, "Books"),
            }),
            accessibility: None,
            languages: vec!["en".to_owned()],
            platforms: vec![],
            screenshots: vec![],
            created: Utc::now(),
            modified: Utc::now(),
        })
        .expect("valid application")
    }

    #[rstest]
    fn representation_hyperlinks_and_absolutizes() {
        let response = ApplicationResponse::from_domain(&sample_application(), &links());

        assert_eq!(
            response.url,
            format!("http://catalog.example/api/v1/applications/{}", Uuid::nil())
        );
        assert_eq!(
            response.image.as_deref(),
            Some("http://catalog.example/media/icons/reader.png")
        );
        let category = response.categories.expect("category present");
        assert_eq!(
            category.url,
            format!("http://catalog.example/api/v1/categories/{}", Uuid::nil())
        );
        assert!(response.accessibilities.is_none());
    }

    #[rstest]
    fn query_maps_onto_filter() {
        let query = ApplicationListQuery {
            category: Some("books".to_owned()),
            min_rating: Some(3.0),
            ordering: Some("-publish_date".to_owned()),
            ..ApplicationListQuery::default()
        };

        let filter = query.filter().expect("valid filter");
        assert_eq!(filter.category(), Some("books"));
        assert_eq!(filter.min_rating(), Some(3.0));
        assert!(filter.ordering().is_descending());
    }

    #[rstest]
    fn query_rejects_unknown_ordering() {
        let query = ApplicationListQuery {
            ordering: Some("rating".to_owned()),
            ..ApplicationListQuery::default()
        };

        let err = query.filter().expect_err("unknown ordering rejected");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn query_rejects_oversized_window() {
        let query = ApplicationListQuery {
            limit: Some(1000),
            ..ApplicationListQuery::default()
        };

        let err = query.window().expect_err("oversized window rejected");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn tag_ref_response_targets_kind_path() {
        let tag = TagRef {
            id: Uuid::nil(),
            slug: "screen-reader".to_owned(),
            name: TranslatedText::new(),
        };
        let response = TagRefResponse::from_domain(&tag, TagKind::Accessibility, &links());
        assert!(response.url.contains("/accessibilities/"));
    }
}
